/*! Closed-form latency bounds for periodic chains,
computed by walking successive releases of the first task instead
of enumerating partitioned job chains.

Both variants share one walk skeleton: for every release of the
first chain task within the analysis window, propagate a release
pointer down the chain --- each hand-off moves to the next release of
the consumer at or after the producer's hand-off instant --- and
measure from the *previous* release of the first task to the final
term of the last. The variants differ only in the hand-off instant
and the final term. */

use itertools::Itertools;

use crate::chain::CEChain;
use crate::task::Task;
use crate::time::{div_ceil, Duration, Instant};

/// Time of the `m`-th release of a periodic task (first release at
/// `m` = 1).
fn release(task: &Task, m: i64) -> Instant {
    task.phase + (m - 1) * task.period
}

/// Next release of `task` at or after `t`.
fn release_after(task: &Task, t: Instant) -> Instant {
    task.phase + div_ceil(t - task.phase, task.period) * task.period
}

/// The shared release-walk skeleton. `handoff(producer, consumer,
/// producer_release)` yields the instant from which the consumer's
/// next release is taken; `final_term(last, last_release)` yields
/// the instant the chain's effect is published.
///
/// # Panics
///
/// Panics if the base task set's WCRTs have not been computed; the
/// walk's window bounds depend on them.
pub(super) fn release_walk(
    chain: &CEChain,
    handoff: impl Fn(&Task, &Task, Instant) -> Instant,
    final_term: impl Fn(&Task, Instant) -> Instant,
) -> Duration {
    let base = chain.base();
    let hyper = chain.hyperperiod();
    let max_phase = chain.max_phase();
    let wcrt_max = chain.iter().map(|t| base.wcrt(t)).max().unwrap();

    let mut lengths = Vec::new();
    let mut m = 1;
    loop {
        let start = release(chain.first(), m);
        let mut rel = release(chain.first(), m + 1);

        // too early to be affected by every chain task
        if rel + base.wcrt(chain.first()) < max_phase {
            m += 1;
            continue;
        }
        // beyond the window that provably covers the worst case
        if start > max_phase + hyper + wcrt_max {
            break;
        }

        for (this, next) in chain.iter().tuple_windows() {
            rel = release_after(next, handoff(this, next, rel));
        }
        lengths.push(final_term(chain.last(), rel) - start);
        m += 1;
    }
    lengths
        .into_iter()
        .max()
        .expect("the analysis window contains at least one release of the first task")
}

/// Closed-form bound for periodic chains under LET: data is handed
/// off at the producer's deadline and published at the last task's
/// deadline. For implicit-deadline chains this equals the
/// partitioned LET analysis.
pub fn let_periodic(chain: &CEChain) -> Duration {
    release_walk(
        chain,
        |this, _, rel| rel + this.deadline,
        |last, rel| rel + last.deadline,
    )
}

/// Closed-form bound for periodic chains under implicit
/// communication: a producer hands off immediately when the
/// consumer cannot preempt it, and after its worst-case response
/// time otherwise.
pub fn implicit_periodic(chain: &CEChain) -> Duration {
    let base = chain.base();
    release_walk(
        chain,
        |this, next, rel| {
            if base.higher_prio(this, next) {
                rel
            } else {
                rel + base.wcrt(this)
            }
        },
        |last, rel| rel + base.wcrt(last),
    )
}
