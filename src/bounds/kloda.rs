/*! The recursive reaction-time bound of Kloda et al., *Latency
analysis for data chains of real-time periodic tasks* (ETFA 2018).

Applies to periodic tasks with synchronous releases under implicit
communication on a single ECU: for every release of the first chain
task within one hyperperiod, successive consumer releases are
aligned by ceiling division, charging the producer's response time
wherever the consumer can preempt it. */

use crate::chain::CEChain;
use crate::time::{div_ceil, Duration, Instant};

/// The Kloda bound: the maximum of the recursive latency over all
/// releases of the first chain task within one hyperperiod of the
/// base task set.
///
/// # Panics
///
/// Panics if the base task set's WCRTs have not been computed, or
/// if any chain task has a non-zero phase (the bound assumes
/// synchronous releases).
pub fn bound(chain: &CEChain) -> Duration {
    assert!(
        chain.iter().all(|t| t.phase == 0),
        "the Kloda bound assumes synchronous releases"
    );
    let mut latency = 0;
    let mut release = 0;
    while release < chain.base().hyperperiod() {
        latency = latency.max(recurse(chain, 0, release, true));
        release += chain.first().period;
    }
    latency
}

/// Latency of the chain suffix starting at position `pos`, with the
/// producer released at `producer_release`. The extra period
/// covering the sampling delay is added once, at the head of the
/// chain.
fn recurse(chain: &CEChain, pos: usize, producer_release: Instant, beginning: bool) -> Duration {
    let base = chain.base();
    let producer = chain.task(pos);
    let head = if beginning { producer.period } else { 0 };

    if pos + 1 == chain.len() {
        return head + base.wcrt(producer);
    }

    let consumer = chain.task(pos + 1);
    // the consumer can only be trusted to sample the output once
    // the producer can no longer be preempted by it
    let settle = if base.higher_prio(consumer, producer) {
        base.wcrt(producer)
    } else {
        0
    };
    let consumer_release =
        div_ceil(producer_release + settle, consumer.period) * consumer.period;
    head + consumer_release - producer_release + recurse(chain, pos + 1, consumer_release, false)
}
