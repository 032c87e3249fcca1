/*! The task model: recurrent activities with release, execution,
deadline, and communication parameters.

A [Task] describes one recurring unit of computation of an embedded
application, e.g. a runnable on an automotive ECU. Tasks are
constructed once, validated eagerly, and not mutated thereafter;
the only sanctioned way to obtain a variant is [Task::scaled], which
is used for execution-time sensitivity studies. */

use derive_more::Display;
use thiserror::Error;

use crate::time::{Duration, Instant, Time};

/// How jobs of a task are released over time.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum ReleasePattern {
    /// Jobs are released with exact period separation, starting at
    /// the task's phase.
    #[display(fmt = "periodic")]
    Periodic,
    /// Consecutive releases are separated by at least the minimum
    /// and at most the maximum inter-arrival time.
    #[display(fmt = "sporadic")]
    Sporadic,
}

/// When a task logically reads its inputs and writes its outputs.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum CommunicationPolicy {
    /// Shared memory is read when the job actually starts executing
    /// and written when it finishes.
    #[display(fmt = "implicit")]
    Implicit,
    /// Logical Execution Time: inputs are read at the release and
    /// outputs published at the end of the reserved time window,
    /// independent of actual execution timing.
    #[display(fmt = "LET")]
    Let,
}

/// The relation between a task's relative deadline and its period.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum DeadlineType {
    /// Deadline equals the period.
    #[display(fmt = "implicit")]
    Implicit,
    /// Deadline does not exceed the period.
    #[display(fmt = "constrained")]
    Constrained,
    /// No constraint between deadline and period.
    #[display(fmt = "arbitrary")]
    Arbitrary,
}

/// Error type for rejected task definitions.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum TaskError {
    #[error("period must be positive, got {0}")]
    NonPositivePeriod(Duration),
    #[error("inter-arrival times must satisfy 0 < min ({min}) <= max ({max})")]
    InvalidInterArrival { min: Duration, max: Duration },
    #[error("execution times must satisfy 0 < bcet ({bcet}) <= wcet ({wcet})")]
    InvalidExecutionTimes { bcet: Duration, wcet: Duration },
    #[error("relative deadline must be non-negative, got {0}")]
    NegativeDeadline(Duration),
}

/// One recurrent task of a task set.
///
/// The priority value orders tasks for fixed-priority scheduling:
/// a *smaller* value means *higher* priority. Tasks with equal
/// priority values do not preempt each other's analysis bounds; the
/// dispatcher breaks ties by declaration order. Priorities are
/// usually assigned by
/// [TaskSet::assign_rate_monotonic_priorities][crate::taskset::TaskSet::assign_rate_monotonic_priorities],
/// but may also be supplied externally.
#[derive(Debug, Clone)]
pub struct Task {
    /// How jobs are released.
    pub release_pattern: ReleasePattern,
    /// When inputs are read and outputs are written.
    pub communication: CommunicationPolicy,
    /// Deadline/period relation.
    pub deadline_type: DeadlineType,
    /// Whether this task communicates across an ECU boundary.
    pub inter_ecu: bool,
    /// Offset of the first release.
    pub phase: Instant,
    /// Minimum separation of consecutive releases.
    pub min_iat: Duration,
    /// Maximum separation of consecutive releases.
    pub max_iat: Duration,
    /// The period used for occurrence arithmetic. Equals the
    /// inter-arrival times for periodic tasks and the minimum
    /// inter-arrival time (the densest pattern) for sporadic ones.
    pub period: Duration,
    /// Best-case execution time.
    pub bcet: Duration,
    /// Worst-case execution time.
    pub wcet: Duration,
    /// Relative deadline.
    pub deadline: Duration,
    /// Scheduling priority; smaller value = higher priority.
    pub priority: u32,
    pub(crate) id: usize,
}

impl Task {
    /// Define a periodic task. The inter-arrival times are implied
    /// by the period.
    pub fn periodic(
        communication: CommunicationPolicy,
        phase: Instant,
        period: Duration,
        bcet: Duration,
        wcet: Duration,
        deadline: Duration,
    ) -> Result<Task, TaskError> {
        Task::check(period, period, period, bcet, wcet, deadline)?;
        Ok(Task {
            release_pattern: ReleasePattern::Periodic,
            communication,
            deadline_type: Task::classify_deadline(deadline, period),
            inter_ecu: false,
            phase,
            min_iat: period,
            max_iat: period,
            period,
            bcet,
            wcet,
            deadline,
            priority: 0,
            id: usize::MAX,
        })
    }

    /// Define a sporadic task. Occurrence arithmetic uses the
    /// minimum inter-arrival time as the period, which is the
    /// densest and hence analysis-relevant release pattern.
    pub fn sporadic(
        communication: CommunicationPolicy,
        phase: Instant,
        min_iat: Duration,
        max_iat: Duration,
        bcet: Duration,
        wcet: Duration,
        deadline: Duration,
    ) -> Result<Task, TaskError> {
        Task::check(min_iat, min_iat, max_iat, bcet, wcet, deadline)?;
        Ok(Task {
            release_pattern: ReleasePattern::Sporadic,
            communication,
            deadline_type: Task::classify_deadline(deadline, min_iat),
            inter_ecu: false,
            phase,
            min_iat,
            max_iat,
            period: min_iat,
            bcet,
            wcet,
            deadline,
            priority: 0,
            id: usize::MAX,
        })
    }

    fn check(
        period: Duration,
        min_iat: Duration,
        max_iat: Duration,
        bcet: Duration,
        wcet: Duration,
        deadline: Duration,
    ) -> Result<(), TaskError> {
        if period <= 0 {
            return Err(TaskError::NonPositivePeriod(period));
        }
        if min_iat <= 0 || min_iat > max_iat {
            return Err(TaskError::InvalidInterArrival {
                min: min_iat,
                max: max_iat,
            });
        }
        if bcet <= 0 || bcet > wcet {
            return Err(TaskError::InvalidExecutionTimes { bcet, wcet });
        }
        if deadline < 0 {
            return Err(TaskError::NegativeDeadline(deadline));
        }
        Ok(())
    }

    fn classify_deadline(deadline: Duration, period: Duration) -> DeadlineType {
        if deadline == period {
            DeadlineType::Implicit
        } else if deadline < period {
            DeadlineType::Constrained
        } else {
            DeadlineType::Arbitrary
        }
    }

    /// Mark this task as communicating across an ECU boundary.
    pub fn across_ecus(mut self) -> Task {
        self.inter_ecu = true;
        self
    }

    /// The stable identity of this task within its owning task set.
    /// Doubles as the index into schedule traces.
    ///
    /// # Panics
    ///
    /// Panics if the task has not been placed into a
    /// [TaskSet][crate::taskset::TaskSet] yet.
    pub fn id(&self) -> usize {
        assert!(
            self.id != usize::MAX,
            "task identity is assigned by the owning task set"
        );
        self.id
    }

    /// Task utilization, `wcet / min_iat`.
    pub fn utilization(&self) -> f64 {
        self.wcet as f64 / self.min_iat as f64
    }

    /// A copy of this task with both execution times scaled by
    /// `ratio` and rounded up. Rounding up keeps the execution
    /// demand positive for every ratio > 0.
    pub fn scaled(&self, ratio: f64) -> Task {
        let mut t = self.clone();
        t.bcet = (ratio * self.bcet as f64).ceil() as Time;
        t.wcet = (ratio * self.wcet as f64).ceil() as Time;
        t
    }

    /// Release time of the `occurrence`-th job (occurrence 0 is the
    /// first job, released at the phase).
    pub fn release(&self, occurrence: i64) -> Instant {
        self.phase + occurrence * self.period
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn periodic_task() {
        let t = Task::periodic(CommunicationPolicy::Implicit, 3, 10, 2, 4, 10).unwrap();
        assert_eq!(t.min_iat, 10);
        assert_eq!(t.max_iat, 10);
        assert_eq!(t.deadline_type, DeadlineType::Implicit);
        assert_eq!(t.release(0), 3);
        assert_eq!(t.release(4), 43);
        assert_eq!(t.release(-1), -7);
        assert_approx_eq!(t.utilization(), 0.4, 1e-12);
    }

    #[test]
    fn rejects_bad_parameters() {
        assert!(matches!(
            Task::periodic(CommunicationPolicy::Let, 0, 0, 1, 1, 0),
            Err(TaskError::NonPositivePeriod(0))
        ));
        assert!(matches!(
            Task::periodic(CommunicationPolicy::Let, 0, 10, 5, 3, 10),
            Err(TaskError::InvalidExecutionTimes { bcet: 5, wcet: 3 })
        ));
        assert!(matches!(
            Task::sporadic(CommunicationPolicy::Implicit, 0, 20, 10, 1, 2, 20),
            Err(TaskError::InvalidInterArrival { min: 20, max: 10 })
        ));
        assert!(matches!(
            Task::periodic(CommunicationPolicy::Implicit, 0, 10, 1, 2, -1),
            Err(TaskError::NegativeDeadline(-1))
        ));
    }

    #[test]
    fn scaling_rounds_up() {
        let t = Task::periodic(CommunicationPolicy::Implicit, 0, 100, 3, 7, 100).unwrap();
        let s = t.scaled(0.3);
        assert_eq!(s.bcet, 1);
        assert_eq!(s.wcet, 3);
        // never scales an execution time down to zero
        let tiny = t.scaled(0.01);
        assert_eq!(tiny.bcet, 1);
        assert_eq!(tiny.wcet, 1);
    }
}
