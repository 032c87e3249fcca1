/*! Job chains: concrete producer→consumer sequences of jobs.

A [JobChain] instantiates a cause-effect chain with one job per
task such that every consecutive pair satisfies the producer→
consumer timing relation of the chosen [EventModel]: walking
*forward* selects the earliest job able to consume the predecessor's
output, walking *backward* the latest job whose output the successor
can still have consumed. A [PartitionedJobChain] combines a backward
walk up to a pivot task with a forward walk from the pivot's next
occurrence; the maximum of its lengths over the analysis window is
the chain's worst-case latency (see
[partitioned][crate::partitioned]). */

use crate::chain::CEChain;
use crate::events::EventModel;
use crate::job::Job;
use crate::time::{Duration, Instant};

/// An ordered sequence of jobs, one per task of a cause-effect
/// chain.
#[derive(Debug, Clone)]
pub struct JobChain<'ts> {
    jobs: Vec<Job<'ts>>,
}

impl<'ts> JobChain<'ts> {
    /// The immediate forward job chain starting with the
    /// `occurrence`-th job of the chain's first task: each
    /// subsequent job is the earliest one whose read event is at or
    /// after the predecessor's write event.
    pub fn forward<M: EventModel>(
        chain: &CEChain<'ts>,
        occurrence: i64,
        model: &M,
    ) -> JobChain<'ts> {
        let mut jobs = vec![Job::new(chain.first(), occurrence)];
        for task in chain.iter().skip(1) {
            let prev = jobs.last().unwrap();
            let published = model.write_event(prev.task, prev.occurrence);
            let next = model.earliest_read_at_or_after(task, published);
            jobs.push(Job::new(task, next));
        }
        JobChain { jobs }
    }

    /// The immediate backward job chain ending with the
    /// `occurrence`-th job of the chain's last task: each
    /// preceding job is the latest one whose write event is at or
    /// before the successor's read event. The walk may step below
    /// occurrence 0; see [JobChain::is_complete].
    pub fn backward<M: EventModel>(
        chain: &CEChain<'ts>,
        occurrence: i64,
        model: &M,
    ) -> JobChain<'ts> {
        let mut jobs = vec![Job::new(chain.last(), occurrence)];
        for pos in (0..chain.len() - 1).rev() {
            let task = chain.task(pos);
            let next = jobs.last().unwrap();
            let consumed = model.read_event(next.task, next.occurrence);
            let previous = model.latest_write_at_or_before(task, consumed);
            jobs.push(Job::new(task, previous));
        }
        jobs.reverse();
        JobChain { jobs }
    }

    pub fn jobs(&self) -> &[Job<'ts>] {
        &self.jobs
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    pub fn first(&self) -> &Job<'ts> {
        &self.jobs[0]
    }

    pub fn last(&self) -> &Job<'ts> {
        &self.jobs[self.jobs.len() - 1]
    }

    /// A backward walk is complete iff it never ran out of
    /// occurrences, i.e. its first job exists.
    pub fn is_complete(&self) -> bool {
        self.first().occurrence >= 0
    }

    /// Read event of the first job --- where the chain's latency
    /// measurement starts.
    pub fn first_read<M: EventModel>(&self, model: &M) -> Instant {
        let first = self.first();
        model.read_event(first.task, first.occurrence)
    }

    /// Write event of the last job --- where the chain's latency
    /// measurement ends.
    pub fn last_write<M: EventModel>(&self, model: &M) -> Instant {
        let last = self.last();
        model.write_event(last.task, last.occurrence)
    }
}

impl std::fmt::Display for JobChain<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[ ")?;
        for (pos, job) in self.jobs.iter().enumerate() {
            if pos > 0 {
                write!(f, " -> ")?;
            }
            write!(f, "{}", job)?;
        }
        write!(f, " ]")
    }
}

/// A job chain split at a pivot task: a backward walk over the
/// chain prefix ending at `(pivot, occurrence)` paired with a
/// forward walk over the chain suffix starting at
/// `(pivot, occurrence + 1)`.
#[derive(Debug, Clone)]
pub struct PartitionedJobChain<'ts> {
    pub backward: JobChain<'ts>,
    pub forward: JobChain<'ts>,
    complete: bool,
}

impl<'ts> PartitionedJobChain<'ts> {
    pub fn new<M: EventModel>(
        chain: &CEChain<'ts>,
        pivot: usize,
        occurrence: i64,
        model: &M,
    ) -> PartitionedJobChain<'ts> {
        assert!(pivot < chain.len(), "pivot position outside the chain");
        let backward = JobChain::backward(&chain.sub_chain(0..=pivot), occurrence, model);
        let forward =
            JobChain::forward(&chain.sub_chain(pivot..=chain.len() - 1), occurrence + 1, model);
        let complete = backward.is_complete();
        PartitionedJobChain {
            backward,
            forward,
            complete,
        }
    }

    /// Complete iff the backward walk did not run out of
    /// occurrences.
    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// The chain length `ℓ`: write event of the forward part's last
    /// job minus read event of the backward part's first job.
    pub fn length<M: EventModel>(&self, model: &M) -> Duration {
        self.forward.last_write(model) - self.backward.first_read(model)
    }
}

/// The occurrence indices that anchor partitioned-chain
/// enumeration: build one forward chain from occurrence 0, then one
/// backward chain ending at that forward chain's last occurrence;
/// the backward chain's occurrences are the earliest of interest at
/// every chain position.
pub fn find_fi<M: EventModel>(chain: &CEChain, model: &M) -> Vec<i64> {
    let fc = JobChain::forward(chain, 0, model);
    let bc = JobChain::backward(chain, fc.last().occurrence, model);
    bc.jobs().iter().map(|job| job.occurrence).collect()
}
