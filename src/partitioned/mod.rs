/*! Partitioned job-chain latency analysis.

The tightest and most general latency computation of this library:
split the chain at the task with the largest period (the pivot),
pair a backward job chain ending at the pivot's `k`-th occurrence
with a forward job chain starting at its `(k+1)`-th occurrence, and
take the maximum chain length over all pivot occurrences whose
chains begin within two hyperperiods plus the maximum phase --- a
window that provably covers the worst case by periodicity of the
schedule.

The algorithm's shape is independent of how much is known about the
schedule; pick the [EventModel] matching the available information
(deterministic LET arithmetic, a simulated trace, response-time
bounds, or release arithmetic alone). See Günzel et al.,
*Compositional Timing Analysis of Asynchronized Distributed
Cause-Effect Chains* (2023). */

use crate::chain::CEChain;
use crate::events::{EventModel, SchedTrace};
use crate::jobchain::{find_fi, PartitionedJobChain};
use crate::time::{Duration, Instant};

pub mod closed_form;
pub mod mixed;


/// Maximum length of any partitioned job chain in the analysis
/// window --- the chain's maximum reaction time, which in this
/// framework equals its maximum data age.
///
/// # Panics
///
/// Panics if a chain inside the guaranteed-valid window is
/// incomplete: within the window every backward walk must succeed
/// for a consistent task model, so an incomplete one indicates a
/// modeling bug rather than an expected boundary condition.
pub fn maximum_latency<M: EventModel>(chain: &CEChain, model: &M) -> Duration {
    let fi = find_fi(chain, model);
    let pivot = chain.pivot();
    let window_end: Instant = 2 * chain.base().hyperperiod() + chain.base().max_phase();

    let mut maximum: Option<Duration> = None;
    let mut occurrence = fi[pivot];
    loop {
        let pc = PartitionedJobChain::new(chain, pivot, occurrence, model);
        if pc.backward.first_read(model) > window_end {
            break;
        }
        assert!(
            pc.is_complete(),
            "incomplete job chain inside the analysis window: inconsistent task model"
        );
        maximum = maximum.max(Some(pc.length(model)));
        occurrence += 1;
    }
    maximum.expect("the analysis window contains at least one partitioned job chain")
}

/// Maximum reaction time: worst-case delay from a stimulus's first
/// possible sampling to the response's last possible effect.
pub fn maximum_reaction_time<M: EventModel>(chain: &CEChain, model: &M) -> Duration {
    maximum_latency(chain, model)
}

/// Maximum data age: worst-case time between sampling a value and
/// the last effect based on it. Coincides with the maximum reaction
/// time in the partitioned framework.
pub fn maximum_data_age<M: EventModel>(chain: &CEChain, model: &M) -> Duration {
    maximum_latency(chain, model)
}

/// Maximum *reduced* reaction time, which discounts the initial
/// sampling delay of one period of the chain's first task.
pub fn maximum_reduced_reaction_time<M: EventModel>(chain: &CEChain, model: &M) -> Duration {
    maximum_latency(chain, model) - chain.first().period
}

/// Maximum *reduced* data age, which discounts the final
/// publication delay of one period of the chain's last task.
pub fn maximum_reduced_data_age<M: EventModel>(chain: &CEChain, model: &M) -> Duration {
    maximum_latency(chain, model) - chain.last().period
}

/// Maximum reaction time of an interconnected chain spanning
/// several ECUs: the sum of the local reaction times, each computed
/// from its own task set's simulated trace.
pub fn interconnected_reaction_time<'a, 'ts: 'a>(
    local_chains: impl IntoIterator<Item = &'a CEChain<'ts>>,
) -> Duration {
    local_chains
        .into_iter()
        .map(|chain| maximum_reaction_time(chain, &SchedTrace::new(chain.base())))
        .sum()
}

/// Maximum reduced data age of an interconnected chain: the sum of
/// the local reduced data ages.
pub fn interconnected_data_age<'a, 'ts: 'a>(
    local_chains: impl IntoIterator<Item = &'a CEChain<'ts>>,
) -> Duration {
    local_chains
        .into_iter()
        .map(|chain| maximum_reduced_data_age(chain, &SchedTrace::new(chain.base())))
        .sum()
}
