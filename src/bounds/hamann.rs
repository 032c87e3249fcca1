/*! The LET counterpart of the Davare bound, from Hamann et al.,
*Communication Centric Design in Complex Automotive Embedded
Systems* (ECRTS 2017): under LET the publication delay is the
deadline rather than the response time. Applies to sporadic (and
hence periodic) tasks. */

use crate::chain::CEChain;
use crate::time::Duration;

/// The Hamann bound: `Σ (max_iat + deadline)` over the chain tasks.
pub fn bound(chain: &CEChain) -> Duration {
    chain.iter().map(|task| task.max_iat + task.deadline).sum()
}
