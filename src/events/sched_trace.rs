use super::EventModel;
use crate::sim::{Ratio, Schedule};
use crate::task::Task;
use crate::taskset::TaskSet;
use crate::time::{Duration, Instant};

/// Exact event bounds read from a simulated schedule trace: the
/// read event is the job's first start of execution and the write
/// event its completion.
///
/// The finite trace is extended periodically: an occurrence beyond
/// the recorded window is mapped down by whole hyperperiods and its
/// events shifted back up accordingly. Occurrences below zero read
/// as `(0, 0)` --- the marker the job-chain layer interprets as an
/// incomplete backward walk.
#[derive(Debug, Clone, Copy)]
pub struct SchedTrace<'ts> {
    schedule: &'ts Schedule,
    hyperperiod: Duration,
}

impl<'ts> SchedTrace<'ts> {
    /// Exact bounds from the worst-case (ratio 1.0) trace of `ts`.
    ///
    /// # Panics
    ///
    /// Panics if the trace has not been populated, see
    /// [populate_schedules][crate::sim::populate_schedules].
    pub fn new(ts: &'ts TaskSet) -> SchedTrace<'ts> {
        SchedTrace::with_ratio(ts, Ratio::full())
    }

    /// Exact bounds from the trace of `ts` for a specific
    /// execution-time ratio.
    ///
    /// # Panics
    ///
    /// Panics if no trace for `ratio` has been populated.
    pub fn with_ratio(ts: &'ts TaskSet, ratio: Ratio) -> SchedTrace<'ts> {
        SchedTrace {
            schedule: ts.schedule(ratio),
            hyperperiod: ts.hyperperiod(),
        }
    }

    fn entry(&self, task: &Task, occurrence: i64) -> (Instant, Instant) {
        if occurrence < 0 {
            return (0, 0);
        }
        let trace = self.schedule.of(task);
        assert!(
            !trace.is_empty(),
            "schedule trace records no job of task {}",
            task.id()
        );
        if (occurrence as usize) < trace.len() {
            return trace[occurrence as usize];
        }
        // extend the trace periodically beyond the recorded window
        let per_hyperperiod = self.hyperperiod / task.period;
        debug_assert_eq!(self.hyperperiod % task.period, 0);
        let mut shifted = occurrence;
        let mut wrapped = 0;
        while shifted >= trace.len() as i64 {
            shifted -= per_hyperperiod;
            wrapped += 1;
        }
        debug_assert!(shifted >= 0, "trace shorter than one hyperperiod");
        let (start, finish) = trace[shifted as usize];
        (
            start + wrapped * self.hyperperiod,
            finish + wrapped * self.hyperperiod,
        )
    }
}

impl EventModel for SchedTrace<'_> {
    fn rmin(&self, task: &Task, occurrence: i64) -> Instant {
        self.entry(task, occurrence).0
    }

    fn rmax(&self, task: &Task, occurrence: i64) -> Instant {
        self.entry(task, occurrence).0
    }

    fn dmin(&self, task: &Task, occurrence: i64) -> Instant {
        self.entry(task, occurrence).1
    }

    fn dmax(&self, task: &Task, occurrence: i64) -> Instant {
        self.entry(task, occurrence + 1).1
    }
}
