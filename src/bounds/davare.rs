/*! The classic end-to-end bound of Davare et al., *Period
optimization for hard real-time distributed automotive systems*
(DAC 2007): every chain task contributes one full inter-arrival
plus its worst-case response time. Applies to sporadic (and hence
periodic) tasks under implicit communication. */

use crate::chain::CEChain;
use crate::time::Duration;

/// The Davare bound: `Σ (max_iat + WCRT)` over the chain tasks.
///
/// # Panics
///
/// Panics if the base task set's WCRTs have not been computed.
pub fn bound(chain: &CEChain) -> Duration {
    let base = chain.base();
    chain.iter().map(|task| task.max_iat + base.wcrt(task)).sum()
}

/// The Davare bound of an interconnected chain spanning several
/// ECUs: the sum of the local bounds.
pub fn interconnected<'a, 'ts: 'a>(
    local_chains: impl IntoIterator<Item = &'a CEChain<'ts>>,
) -> Duration {
    local_chains.into_iter().map(bound).sum()
}
