use super::EventModel;
use crate::task::Task;
use crate::time::Instant;

/// Event bounds derived from release arithmetic and WCETs alone:
/// a job may read any time between its release and the latest start
/// that still meets the deadline, and its output stands until the
/// successor job's deadline.
///
/// This is the weakest (most pessimistic) model; it needs neither
/// response times nor a schedule trace.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoInformation;

impl EventModel for NoInformation {
    fn rmin(&self, task: &Task, occurrence: i64) -> Instant {
        task.release(occurrence)
    }

    fn rmax(&self, task: &Task, occurrence: i64) -> Instant {
        task.release(occurrence) + task.deadline - task.wcet
    }

    fn dmin(&self, task: &Task, occurrence: i64) -> Instant {
        self.rmin(task, occurrence) + task.wcet
    }

    fn dmax(&self, task: &Task, occurrence: i64) -> Instant {
        self.rmax(task, occurrence + 1) + task.wcet
    }

    fn write_event(&self, task: &Task, occurrence: i64) -> Instant {
        // latest completion a schedulable task can exhibit
        task.release(occurrence) + task.deadline
    }

    /// All bounds of this model are rigid shifts by the period, so
    /// among successors generated in increasing occurrence order the
    /// last one subsumes the reachable ages of all earlier ones.
    fn last_successor_dominates(&self) -> bool {
        true
    }
}
