/*! Single-path data-age search.

A faster variant of the tree search: instead of branching over
every reachable successor, follow only the *last* job of the next
task that can still read the producer's data --- for each initial
occurrence of the first task, this yields one propagation path
whose age is evaluated directly. Initial occurrences are swept over
one chain hyperperiod plus the maximum phase. */

use itertools::Itertools;

use crate::chain::CEChain;
use crate::events::EventModel;
use crate::time::{div_ceil, Duration};

/// Maximum data age over all complete single propagation paths.
///
/// A path can come up short when the next task's phase places all
/// of its pool jobs after the producer's data validity window; such
/// initial occurrences propagate nothing and are skipped.
///
/// # Panics
///
/// Panics if no initial occurrence within the sweep window yields a
/// complete path --- data never reaches the end of the chain, which
/// indicates an inconsistent task model.
pub fn maximum_data_age<M: EventModel>(chain: &CEChain, model: &M) -> Duration {
    let window = chain.hyperperiod() + chain.max_phase();
    let mut ages = Vec::new();
    let mut initial = 0;
    while chain.first().period * initial <= window {
        if let Some(last_occurrence) = walk(chain, initial, model) {
            let age =
                model.latest_impact(chain.last(), last_occurrence) - model.rmin(chain.first(), initial);
            ages.push(age);
        }
        initial += 1;
    }
    ages.into_iter()
        .max()
        .expect("no complete propagation path within the sweep window")
}

/// Follow the chain from `(first task, initial)` keeping, at every
/// hand-off, the last job of the next task that can read the
/// producer's data. Returns the occurrence reached at the chain's
/// last task, or `None` if the data dies before reaching it.
fn walk<M: EventModel>(chain: &CEChain, initial: i64, model: &M) -> Option<i64> {
    let mut occurrence = initial;
    for (this, next) in chain.iter().tuple_windows() {
        let dmax = model.dmax(this, occurrence);
        // a safe starting candidate at or below the last reader
        let mut k = div_ceil(dmax - next.phase, next.period) - 1;
        while model.rmin(next, k) >= dmax {
            k -= 1;
        }
        k = k.max(0);
        if model.rmin(next, k) >= dmax {
            // every pool job of the next task reads too late
            return None;
        }
        while model.rmin(next, k + 1) < dmax {
            k += 1;
        }
        occurrence = k;
    }
    Some(occurrence)
}
