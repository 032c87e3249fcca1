use super::EventModel;
use crate::task::Task;
use crate::taskset::TaskSet;
use crate::time::Instant;

/// Event bounds tightened with each task's worst-case response
/// time: a job reads no later than `wcrt − wcet` after its release
/// and has certainly written `wcrt` after it.
#[derive(Debug, Clone, Copy)]
pub struct ResponseTimes<'ts> {
    ts: &'ts TaskSet,
}

impl<'ts> ResponseTimes<'ts> {
    /// Bounds backed by the memoized response times of `ts`.
    ///
    /// # Panics
    ///
    /// Panics if [TaskSet::compute_wcrts] has not run on `ts`.
    pub fn new(ts: &'ts TaskSet) -> ResponseTimes<'ts> {
        assert!(
            ts.has_wcrts(),
            "response-time event bounds need the task set's WCRTs computed first"
        );
        ResponseTimes { ts }
    }
}

impl EventModel for ResponseTimes<'_> {
    fn rmin(&self, task: &Task, occurrence: i64) -> Instant {
        task.release(occurrence)
    }

    fn rmax(&self, task: &Task, occurrence: i64) -> Instant {
        task.release(occurrence) + self.ts.wcrt(task) - task.wcet
    }

    fn dmin(&self, task: &Task, occurrence: i64) -> Instant {
        self.rmin(task, occurrence) + task.wcet
    }

    fn dmax(&self, task: &Task, occurrence: i64) -> Instant {
        self.rmax(task, occurrence + 1) + task.wcet
    }

    fn write_event(&self, task: &Task, occurrence: i64) -> Instant {
        task.release(occurrence) + self.ts.wcrt(task)
    }
}
