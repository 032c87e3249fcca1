/*! Definitions and algorithms for end-to-end latency analysis of
cause-effect chains in real-time systems.

A *cause-effect chain* is an ordered sequence of recurrent tasks
that pass data to one another, e.g. sensor → filter → actuator on
an automotive ECU. This library bounds the worst-case end-to-end
latency metrics of such chains --- maximum reaction time and maximum
data age --- under fixed-priority preemptive scheduling, for periodic
and sporadic releases and for implicit as well as LET
communication.

The building blocks, bottom up:

- [task] and [taskset]: the task model and priority-ordered task
  sets with the time-demand (response-time) analysis engine.
- [sim]: a discrete-event schedule simulator producing exact
  per-job read/write events, cached per task set.
- [events]: the read/write event models (release arithmetic only,
  response-time bounds, exact simulated trace, deterministic LET),
  one of which parameterizes every chain analysis.
- [chain], [job], [jobchain]: cause-effect chains, job instances,
  and forward/backward job-chain construction.
- [partitioned]: the partitioned job-chain analysis --- the tightest
  latency bound of this library --- with closed forms and
  mixed-chain decomposition.
- [dpt]: data-propagation-tree search, a data-age bound under
  weaker timing assumptions.
- [bounds]: classic closed-form baselines (Davare, Hamann, Dürr,
  Kloda, Bi).

A typical sequence: build a [TaskSet][taskset::TaskSet], assign
priorities, run
[compute_wcrts][taskset::TaskSet::compute_wcrts], populate the
schedule cache with
[populate_schedules][sim::populate_schedules] if trace-based
analyses are wanted, and only then borrow the set into
[CEChain][chain::CEChain]s and evaluate the analyses --- the borrow
checker enforces that the shared caches are complete before any
chain reads them. */

pub mod bounds;
pub mod chain;
pub mod dpt;
pub mod events;
pub mod job;
pub mod jobchain;
pub mod partitioned;
pub mod sim;
pub mod task;
pub mod taskset;
pub mod time;

#[cfg(test)]
pub(crate) mod tests {
    use crate::task::{CommunicationPolicy, Task};
    use crate::taskset::TaskSet;
    use crate::time::{Duration, Instant};

    /// A periodic implicit-communication task with implicit
    /// deadline and `bcet == wcet`.
    pub fn periodic_implicit(phase: Instant, period: Duration, wcet: Duration) -> Task {
        Task::periodic(CommunicationPolicy::Implicit, phase, period, wcet, wcet, period).unwrap()
    }

    /// A periodic LET task with implicit deadline and
    /// `bcet == wcet`.
    pub fn let_periodic(phase: Instant, period: Duration, wcet: Duration) -> Task {
        Task::periodic(CommunicationPolicy::Let, phase, period, wcet, wcet, period).unwrap()
    }

    /// A task set with rate-monotonic priorities already assigned.
    pub fn rm_taskset(tasks: Vec<Task>) -> TaskSet {
        let mut ts = TaskSet::new(tasks);
        ts.assign_rate_monotonic_priorities();
        ts
    }
}
