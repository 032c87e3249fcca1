/*! Discrete-event simulation of fixed-priority preemptive schedules.

Several chain analyses need ground-truth read/write events rather
than analytic bounds. This module produces, per task, the
chronological list of `(start of execution, end of execution)` pairs
of every job over a simulation window, and manages the per-task-set
trace cache keyed by execution-time ratio (1.0 = declared WCETs,
0.0 = zero-execution idealization, anything in between = a scaled
copy of the set).

Simulation is expensive and its result is reused by every chain
drawn from the same task set, which is why traces are memoized on
the [TaskSet][crate::taskset::TaskSet] itself: populate the cache
once through `&mut` access ([populate_schedules]), then share the
set immutably with any number of concurrent chain analyses. */

use derive_more::Display;

use crate::task::Task;
use crate::taskset::TaskSet;
use crate::time::{div_ceil, Duration, Instant};

mod simulator;

pub use simulator::{simulate, ExecutionTime};


/// An execution-time ratio, the key of the schedule-trace cache.
/// 1.0 reproduces the declared worst-case execution times, 0.0 the
/// zero-execution idealization.
#[derive(Debug, Display, Clone, Copy)]
pub struct Ratio(f64);

impl Ratio {
    /// Wrap a ratio. Must be finite and within `0.0..=1.0`.
    pub fn new(value: f64) -> Ratio {
        assert!(
            value.is_finite() && (0.0..=1.0).contains(&value),
            "execution-time ratio must be within [0, 1], got {}",
            value
        );
        Ratio(value)
    }

    /// The ratio reproducing declared worst-case execution times.
    pub fn full() -> Ratio {
        Ratio(1.0)
    }

    /// The zero-execution ratio.
    pub fn zero() -> Ratio {
        Ratio(0.0)
    }

    pub fn value(self) -> f64 {
        self.0
    }

    fn is_zero(self) -> bool {
        self.0 == 0.0
    }

    fn is_full(self) -> bool {
        self.0 == 1.0
    }
}

impl PartialEq for Ratio {
    fn eq(&self, other: &Ratio) -> bool {
        self.0.total_cmp(&other.0) == std::cmp::Ordering::Equal
    }
}

impl Eq for Ratio {}

impl PartialOrd for Ratio {
    fn partial_cmp(&self, other: &Ratio) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Ratio {
    fn cmp(&self, other: &Ratio) -> std::cmp::Ordering {
        self.0.total_cmp(&other.0)
    }
}

/// A simulated schedule: per task, the chronological
/// `(start, finish)` pair of each job, indexed by occurrence.
#[derive(Debug, Clone, Default)]
pub struct Schedule {
    jobs: Vec<Vec<(Instant, Instant)>>,
}

impl Schedule {
    pub(crate) fn new(jobs: Vec<Vec<(Instant, Instant)>>) -> Schedule {
        Schedule { jobs }
    }

    /// The recorded `(start, finish)` pairs of `task`, one per
    /// occurrence starting at 0.
    pub fn of(&self, task: &Task) -> &[(Instant, Instant)] {
        &self.jobs[task.id()]
    }
}

/// The simulation window that provably covers every job relevant to
/// any chain whose end-to-end latency is at most
/// `latency_upper_bound` (use the Davare bound, which dominates all
/// other analyses): two hyperperiods plus the maximum phase, plus
/// the chain latency bound, plus one maximum period for slack.
pub fn simulation_horizon(ts: &TaskSet, latency_upper_bound: Duration) -> Instant {
    2 * ts.hyperperiod() + ts.max_phase() + latency_upper_bound + ts.max_period()
}

/// The trace of the zero-execution idealization: every job starts
/// and finishes at its release instant.
pub fn execution_zero_schedule(ts: &TaskSet, horizon: Instant) -> Schedule {
    let jobs = ts
        .iter()
        .map(|task| {
            (0..released_before(task, horizon))
                .map(|occurrence| {
                    let release = task.release(occurrence);
                    (release, release)
                })
                .collect()
        })
        .collect();
    Schedule::new(jobs)
}

/// Number of jobs of `task` released strictly before `horizon`.
pub(crate) fn released_before(task: &Task, horizon: Instant) -> i64 {
    div_ceil(horizon - task.phase, task.period).max(0)
}

/// Populate the schedule-trace cache of `ts` for all given ratios
/// that are not cached yet. `latency_upper_bound` must dominate the
/// end-to-end latency of every chain that will be analyzed against
/// these traces (see [simulation_horizon]).
///
/// Population is idempotent and deterministic: a trace is a pure
/// function of the task set and the ratio, so repeating it merely
/// repeats work.
pub fn populate_schedules(ts: &mut TaskSet, latency_upper_bound: Duration, ratios: &[Ratio]) {
    let horizon = simulation_horizon(ts, latency_upper_bound);
    for &ratio in ratios {
        if ts.has_schedule(ratio) {
            continue;
        }
        let trace = if ratio.is_zero() {
            execution_zero_schedule(ts, horizon)
        } else if ratio.is_full() {
            simulate(ts, horizon, ExecutionTime::WorstCase)
        } else {
            simulate(&ts.scaled(ratio.value()), horizon, ExecutionTime::WorstCase)
        };
        ts.insert_schedule(ratio, trace);
    }
}
