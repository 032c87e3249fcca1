/*! Read/write event models for jobs of a chain.

Every chain analysis in this library reasons about the same four
per-job quantities: the earliest and latest instants at which a job
can read its inputs (`rmin`, `rmax`), the earliest instant its
output can be published (`dmin`), and the instant that output is
overwritten by the successor job's output (`dmax`). What differs
between analyses is only *how much is known* about the schedule ---
nothing (release arithmetic and WCETs only), worst-case response
times, an exact simulated trace, or deterministic LET arithmetic.

This module captures that choice as the [EventModel] trait with one
implementation per knowledge level ([NoInformation],
[ResponseTimes], [SchedTrace], [Let]), selected once per analysis
invocation. The chain-walking and tree-search algorithms are generic
over the model and identical across all four. */

use auto_impl::auto_impl;

use crate::task::Task;
use crate::time::{div_ceil, div_floor, Instant};

/// Per-job read/write event bounds of one knowledge level.
///
/// All implementations must be monotone in the occurrence index:
/// each of the four bounds of occurrence `k + 1` is at least the
/// corresponding bound of occurrence `k`. The default occurrence
/// searches rely on this.
#[auto_impl(&, Box, Rc)]
pub trait EventModel {
    /// Earliest read event of the `occurrence`-th job.
    fn rmin(&self, task: &Task, occurrence: i64) -> Instant;

    /// Latest read event of the `occurrence`-th job.
    fn rmax(&self, task: &Task, occurrence: i64) -> Instant;

    /// Earliest write event of the `occurrence`-th job.
    fn dmin(&self, task: &Task, occurrence: i64) -> Instant;

    /// Instant at which the output of the `occurrence`-th job is
    /// superseded by the next job's output.
    fn dmax(&self, task: &Task, occurrence: i64) -> Instant;

    /// The read event used by job-chain walks.
    fn read_event(&self, task: &Task, occurrence: i64) -> Instant {
        self.rmin(task, occurrence)
    }

    /// The write event used by job-chain walks: the latest instant
    /// at which the job's output is published. The default is
    /// `dmin`, which is exact for models with deterministic write
    /// events; models with uncertain completion override this with
    /// their conservative bound.
    fn write_event(&self, task: &Task, occurrence: i64) -> Instant {
        self.dmin(task, occurrence)
    }

    /// Occurrence of the earliest job of `task` whose read event is
    /// at or after `t` --- the first job that can consume data
    /// published at `t`. Never negative.
    ///
    /// The default starts at the first release at or after `t`
    /// (whose read event cannot precede `t`) and scans down.
    fn earliest_read_at_or_after(&self, task: &Task, t: Instant) -> i64 {
        let mut k = div_ceil(t - task.phase, task.period).max(0);
        while k > 0 && self.read_event(task, k - 1) >= t {
            k -= 1;
        }
        k
    }

    /// Occurrence of the latest job of `task` whose write event is
    /// at or before `t` --- the last job whose output can be consumed
    /// at `t`. Negative when no job has written by `t`, which
    /// signals an incomplete backward chain.
    ///
    /// The default starts at the last release at or before `t` (no
    /// later job can have written by `t`) and scans down.
    fn latest_write_at_or_before(&self, task: &Task, t: Instant) -> i64 {
        let mut k = div_floor(t - task.phase, task.period);
        while k >= 0 && self.write_event(task, k) > t {
            k -= 1;
        }
        k
    }

    /// Latest instant at which the `occurrence`-th job's output can
    /// take effect; the branch-age anchor of the
    /// data-propagation-tree search.
    fn latest_impact(&self, task: &Task, occurrence: i64) -> Instant {
        self.rmax(task, occurrence) + task.wcet
    }

    /// Whether, among the possible successors of a job, the one
    /// with the largest occurrence index dominates all earlier ones
    /// so that tree search may skip the rest. Holds only for models
    /// whose bounds are rigid occurrence shifts of each other
    /// ([NoInformation]); models with per-occurrence information
    /// must explore every successor.
    fn last_successor_dominates(&self) -> bool {
        false
    }
}

mod let_comm;
mod no_information;
mod response_times;
mod sched_trace;

pub use let_comm::Let;
pub use no_information::NoInformation;
pub use response_times::ResponseTimes;
pub use sched_trace::SchedTrace;

#[cfg(test)]
mod tests;
