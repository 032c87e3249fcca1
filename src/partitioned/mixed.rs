/*! Latency bounds for chains mixing communication policies or
release patterns.

A chain whose tasks disagree on communication policy or release
pattern cannot be fed to one homogeneous analysis directly. The
decomposition law applies instead: cut the chain into maximal
homogeneous sub-chains, analyze each with the matching method, and
sum the results. The per-task [pessimistic] sum serves as the
always-applicable (and always dominated) fallback. See Günzel et
al., *Timing Analysis of Cause-Effect Chains with Heterogeneous
Communication Mechanisms* (2023). */

use super::closed_form::{implicit_periodic, let_periodic, release_walk};
use crate::bounds::{duerr, hamann};
use crate::chain::CEChain;
use crate::task::{CommunicationPolicy, ReleasePattern, Task};
use crate::taskset::TaskSet;
use crate::time::Duration;

/// Per-task pessimistic bound: every task contributes its maximum
/// inter-arrival time plus its publication delay (WCRT under
/// implicit communication, deadline under LET), regardless of how
/// its neighbors communicate.
pub fn pessimistic(chain: &CEChain) -> Duration {
    let base = chain.base();
    chain
        .iter()
        .map(|task| {
            task.max_iat
                + match task.communication {
                    CommunicationPolicy::Implicit => base.wcrt(task),
                    CommunicationPolicy::Let => task.deadline,
                }
        })
        .sum()
}

/// Decomposition bound: cut wherever the communication policy or
/// the release pattern changes, analyze every homogeneous segment
/// with the method matching its features, and sum.
pub fn decomposed(chain: &CEChain) -> Duration {
    chain
        .cut(true, true)
        .iter()
        .map(|segment| {
            let communication = segment
                .communication()
                .expect("segments are homogeneous by construction");
            let release = segment
                .release_pattern()
                .expect("segments are homogeneous by construction");
            match (communication, release) {
                (CommunicationPolicy::Implicit, ReleasePattern::Sporadic) => {
                    duerr::reaction_time(segment)
                }
                (CommunicationPolicy::Implicit, ReleasePattern::Periodic) => {
                    implicit_periodic(segment)
                }
                // the sporadic LET bound is exactly Hamann's
                (CommunicationPolicy::Let, ReleasePattern::Sporadic) => hamann::bound(segment),
                (CommunicationPolicy::Let, ReleasePattern::Periodic) => let_periodic(segment),
            }
        })
        .sum()
}

/// Improved decomposition: cut only where the release pattern
/// changes and let the per-segment analyses handle mixed
/// communication through the hand-off terms.
pub fn decomposed_improved(chain: &CEChain) -> Duration {
    chain
        .cut(false, true)
        .iter()
        .map(|segment| {
            match segment
                .release_pattern()
                .expect("segments are homogeneous by construction")
            {
                ReleasePattern::Sporadic => mixed_sporadic(segment),
                ReleasePattern::Periodic => mixed_periodic(segment),
            }
        })
        .sum()
}

/// Bound for sporadic segments with mixed communication: every task
/// contributes its maximum inter-arrival time plus a hand-off cost
/// that credits the back-to-back case of an immediately preemptable
/// implicit consumer.
pub fn mixed_sporadic(chain: &CEChain) -> Duration {
    (0..chain.len())
        .map(|idx| chain.task(idx).max_iat + handoff_cost(chain, idx))
        .sum()
}

fn handoff_cost(chain: &CEChain, idx: usize) -> Duration {
    let base = chain.base();
    let task = chain.task(idx);
    if task.communication == CommunicationPolicy::Let {
        return task.deadline;
    }
    let followed_by_preemptable_implicit = idx + 1 < chain.len()
        && chain.task(idx + 1).communication == CommunicationPolicy::Implicit
        && base.higher_prio(task, chain.task(idx + 1));
    if followed_by_preemptable_implicit {
        (base.wcrt(task) - chain.task(idx + 1).max_iat).max(0)
    } else {
        base.wcrt(task)
    }
}

/// Bound for periodic segments with mixed communication: the
/// release walk with a hand-off term chosen per consecutive pair.
pub fn mixed_periodic(chain: &CEChain) -> Duration {
    let base = chain.base();
    release_walk(
        chain,
        |this, next, rel| rel + handoff_term(base, this, next),
        |last, rel| {
            rel + match last.communication {
                CommunicationPolicy::Let => last.deadline,
                CommunicationPolicy::Implicit => base.wcrt(last),
            }
        },
    )
}

fn handoff_term(base: &TaskSet, this: &Task, next: &Task) -> Duration {
    match (this.communication, next.communication) {
        (CommunicationPolicy::Let, _) => this.deadline,
        (CommunicationPolicy::Implicit, CommunicationPolicy::Let) => base.wcrt(this),
        (CommunicationPolicy::Implicit, CommunicationPolicy::Implicit) => {
            if base.higher_prio(this, next) {
                0
            } else {
                base.wcrt(this)
            }
        }
    }
}
