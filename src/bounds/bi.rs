/*! The data-age bound of Bi et al., *Efficient Maximum Data Age
Analysis for Cause-Effect Chains in Automotive Systems* (RTSS
2022), for periodic tasks under implicit communication.

Each producer→consumer pair contributes according to the GCD of
their periods: a full period term when the producer cannot be
relied on to finish between consumer samplings, and a
response-time-modulo term otherwise. */

use itertools::Itertools;

use crate::chain::CEChain;
use crate::time::{gcd, Duration};

/// The Bi data-age bound. A single-task chain degenerates to that
/// task's worst-case response time.
///
/// # Panics
///
/// Panics if the base task set's WCRTs have not been computed.
pub fn bound(chain: &CEChain) -> Duration {
    let base = chain.base();
    if chain.len() == 1 {
        return base.wcrt(chain.first());
    }

    let mut age = base.wcrt(chain.last());
    for (producer, consumer) in chain.iter().tuple_windows() {
        let eta = gcd(producer.period, consumer.period);
        let wcrt = base.wcrt(producer);
        if base.higher_prio(producer, consumer) {
            age += producer.period - eta;
        } else if wcrt % eta == 0 {
            age += wcrt + producer.period - eta;
        } else {
            age += wcrt + producer.period - wcrt % eta;
        }
    }
    age
}

/// The Bi bound of an interconnected chain spanning several ECUs:
/// the sum of the local bounds.
pub fn interconnected<'a, 'ts: 'a>(
    local_chains: impl IntoIterator<Item = &'a CEChain<'ts>>,
) -> Duration {
    local_chains.into_iter().map(bound).sum()
}
