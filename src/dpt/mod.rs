/*! Data-propagation-tree search for the maximum data age.

An alternative to the partitioned job-chain analysis that assumes
much weaker timing information: starting from every initial job of
the chain's first task, recursively follow every job of the next
task whose read window overlaps the producer's data-validity
window, down to the chain's last task. The age of one branch is the
latest instant its leaf's output can take effect minus the root's
earliest read; the maximum over all roots and branches bounds the
data age. See Becker et al., *Synthesizing Job-Level Dependencies
for Automotive Multi-rate Effect Chains* (2017).

Following a branch narrows the successor's bounds --- data cannot be
read before the producer published it. The narrowed bounds are
passed *by value* down the recursion, so sibling branches always
observe the original intervals and no reset discipline is needed on
backtracking. */

use crate::chain::CEChain;
use crate::events::{EventModel, Let, NoInformation, ResponseTimes, SchedTrace};
use crate::task::Task;
use crate::time::{div_floor, Duration, Instant};

pub mod path;

#[cfg(test)]
mod tests;

/// Maximum data age of `chain` under the given event model,
/// explored over all data-propagation trees rooted within the job
/// pool (one chain hyperperiod of initial jobs plus two periods of
/// slack per chain task).
pub fn maximum_data_age<M: EventModel>(chain: &CEChain, model: &M) -> Duration {
    let bound = pool_bound(chain);
    let counts: Vec<i64> = chain.iter().map(|t| div_floor(bound, t.period)).collect();

    let mut max_age = 0;
    for root in 0..counts[0] {
        let first = chain.first();
        let root_rmin = model.rmin(first, root);
        let age = descend(chain, model, &counts, 0, root, model.dmin(first, root), root_rmin);
        max_age = max_age.max(age);
    }
    max_age
}

/// Convenience wrapper: release arithmetic and WCETs only.
pub fn no_information(chain: &CEChain) -> Duration {
    maximum_data_age(chain, &NoInformation)
}

/// Convenience wrapper: bounds tightened by the base set's WCRTs.
pub fn response_times(chain: &CEChain) -> Duration {
    maximum_data_age(chain, &ResponseTimes::new(chain.base()))
}

/// Convenience wrapper: exact bounds from the base set's worst-case
/// schedule trace.
pub fn sched_trace(chain: &CEChain) -> Duration {
    maximum_data_age(chain, &SchedTrace::new(chain.base()))
}

/// Convenience wrapper: deterministic LET arithmetic.
pub fn let_communication(chain: &CEChain) -> Duration {
    maximum_data_age(chain, &Let)
}

/// Horizon of the job pool: enough initial jobs to cover one chain
/// hyperperiod, plus two periods of every chain task for the
/// propagation tail.
fn pool_bound(chain: &CEChain) -> Instant {
    let initial_jobs = div_floor(chain.hyperperiod(), chain.first().period);
    (initial_jobs - 1) * chain.first().period + chain.iter().map(|t| 2 * t.period).sum::<Duration>()
}

/// Maximum branch age below the job `(chain[pos], occurrence)`
/// whose effective earliest write is `dmin_eff` (narrowed by the
/// producers above it). Returns 0 when no successor is reachable ---
/// such a branch propagates no data and contributes no age.
fn descend<M: EventModel>(
    chain: &CEChain,
    model: &M,
    counts: &[i64],
    pos: usize,
    occurrence: i64,
    dmin_eff: Instant,
    root_rmin: Instant,
) -> Duration {
    let task = chain.task(pos);
    if pos + 1 == chain.len() {
        return model.latest_impact(task, occurrence) - root_rmin;
    }

    let next = chain.task(pos + 1);
    let dmax = model.dmax(task, occurrence);
    let successors: Vec<i64> = (0..counts[pos + 1])
        .filter(|&k| reads_data_of(model, next, k, dmin_eff, dmax))
        .collect();
    if successors.is_empty() {
        return 0;
    }
    let explored = if model.last_successor_dominates() {
        &successors[successors.len() - 1..]
    } else {
        &successors[..]
    };

    let mut max_age = 0;
    for &k in explored {
        // data cannot be read before the producer published it
        let narrowed_dmin = if dmin_eff > model.rmin(next, k) {
            dmin_eff + next.wcet
        } else {
            model.dmin(next, k)
        };
        let age = descend(chain, model, counts, pos + 1, k, narrowed_dmin, root_rmin);
        max_age = max_age.max(age);
    }
    max_age
}

/// Can the `occurrence`-th job of `consumer` read data valid during
/// `[dmin_eff, dmax)`?
fn reads_data_of<M: EventModel>(
    model: &M,
    consumer: &Task,
    occurrence: i64,
    dmin_eff: Instant,
    dmax: Instant,
) -> bool {
    model.rmax(consumer, occurrence) >= dmin_eff && model.rmin(consumer, occurrence) < dmax
}
