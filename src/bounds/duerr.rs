/*! The sporadic chain bounds of Dürr et al., *End-to-end timing
analysis of sporadic cause-effect chains in distributed systems*
(CASES 2019), for implicit communication.

Both theorems walk the chain once and charge a producer's full
response time only where the hand-off cannot happen in-place: when
the consumer can preempt the producer, or when either side crosses
an ECU boundary. */

use itertools::Itertools;

use crate::chain::CEChain;
use crate::task::Task;
use crate::time::Duration;

fn carry_over(chain: &CEChain, task: &Task, next: &Task) -> Duration {
    let base = chain.base();
    if base.higher_prio(next, task) || next.inter_ecu || task.inter_ecu {
        base.wcrt(task)
    } else {
        0
    }
}

/// Maximum reaction time (Theorem 5.4).
///
/// # Panics
///
/// Panics if the base task set's WCRTs have not been computed.
pub fn reaction_time(chain: &CEChain) -> Duration {
    let base = chain.base();
    let mut latency = chain.first().max_iat + base.wcrt(chain.last());
    for (task, next) in chain.iter().tuple_windows() {
        latency += base
            .wcrt(task)
            .max(next.max_iat + carry_over(chain, task, next));
    }
    latency
}

/// Maximum reduced data age (Theorem 5.10).
///
/// # Panics
///
/// Panics if the base task set's WCRTs have not been computed.
pub fn data_age(chain: &CEChain) -> Duration {
    let base = chain.base();
    let mut latency = base.wcrt(chain.last());
    for (task, next) in chain.iter().tuple_windows() {
        latency += task.max_iat + carry_over(chain, task, next);
    }
    latency
}
