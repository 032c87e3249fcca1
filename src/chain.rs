/*! Cause-effect chains: ordered, non-owning views into a task set.

A [CEChain] lists tasks in the order data flows through them, which
is independent of the priority order of the underlying
[TaskSet][crate::taskset::TaskSet]. The chain never owns or mutates
its base set; it stores task indices and a shared borrow, so a chain
cannot outlive or alter the set it was drawn from. */

use itertools::Itertools;
use thiserror::Error;

use crate::task::{CommunicationPolicy, ReleasePattern, Task};
use crate::taskset::TaskSet;
use crate::time::{self, Duration, Instant};

/// Error type for rejected chain definitions.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ChainError {
    /// A chain without tasks has no read or write events and cannot
    /// be analyzed; constructing one is a programming error.
    #[error("a cause-effect chain must contain at least one task")]
    Empty,
    /// The chain referenced a task that is not a member of its base
    /// task set.
    #[error("task index {0} is outside the base task set (length {1})")]
    OutOfRange(usize, usize),
}

/// An ordered sequence of tasks of one base task set, in causal
/// (data-flow) order.
#[derive(Debug, Clone)]
pub struct CEChain<'ts> {
    base: &'ts TaskSet,
    tasks: Vec<usize>,
}

impl<'ts> CEChain<'ts> {
    /// Create a chain over the tasks of `base` selected by index, in
    /// causal order. Rejects empty chains and foreign indices.
    pub fn new(base: &'ts TaskSet, tasks: Vec<usize>) -> Result<CEChain<'ts>, ChainError> {
        if tasks.is_empty() {
            return Err(ChainError::Empty);
        }
        if let Some(&bad) = tasks.iter().find(|&&idx| idx >= base.len()) {
            return Err(ChainError::OutOfRange(bad, base.len()));
        }
        Ok(CEChain { base, tasks })
    }

    /// The task set this chain is drawn from.
    pub fn base(&self) -> &'ts TaskSet {
        self.base
    }

    /// Number of tasks in the chain.
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Always false; empty chains are rejected at construction.
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// The `pos`-th task of the chain (causal order).
    pub fn task(&self, pos: usize) -> &'ts Task {
        self.base.task(self.tasks[pos])
    }

    pub fn first(&self) -> &'ts Task {
        self.task(0)
    }

    pub fn last(&self) -> &'ts Task {
        self.task(self.len() - 1)
    }

    pub fn iter(&self) -> impl Iterator<Item = &'ts Task> + '_ {
        self.tasks.iter().map(|&idx| self.base.task(idx))
    }

    /// Position of the chain task with the largest period --- the
    /// pivot used by partitioned job-chain analysis (fewest pivot
    /// occurrences per analysis window). Ties resolve to the first
    /// such task.
    pub fn pivot(&self) -> usize {
        let mut best = 0;
        for (pos, task) in self.iter().enumerate() {
            if task.period > self.task(best).period {
                best = pos;
            }
        }
        best
    }

    /// Least common multiple of the chain tasks' periods.
    pub fn hyperperiod(&self) -> Duration {
        self.iter().map(|t| t.period).fold(1, time::lcm)
    }

    /// Largest phase among the chain tasks.
    pub fn max_phase(&self) -> Instant {
        self.iter().map(|t| t.phase).max().unwrap()
    }

    /// The common communication policy, or `None` for a mixed chain.
    pub fn communication(&self) -> Option<CommunicationPolicy> {
        let first = self.first().communication;
        self.iter()
            .all(|t| t.communication == first)
            .then_some(first)
    }

    /// The common release pattern, or `None` for a mixed chain.
    pub fn release_pattern(&self) -> Option<ReleasePattern> {
        let first = self.first().release_pattern;
        self.iter()
            .all(|t| t.release_pattern == first)
            .then_some(first)
    }

    /// A sub-chain over chain positions `range` (causal order kept).
    pub fn sub_chain(&self, range: std::ops::RangeInclusive<usize>) -> CEChain<'ts> {
        let tasks: Vec<usize> = self.tasks[range].to_vec();
        debug_assert!(!tasks.is_empty());
        CEChain {
            base: self.base,
            tasks,
        }
    }

    /// Cut the chain into maximal homogeneous sub-chains: a new
    /// segment starts wherever the communication policy (if
    /// `by_communication`) or the release pattern (if `by_release`)
    /// changes between consecutive tasks. This is the decomposition
    /// law for chains mixing communication or release semantics ---
    /// each segment is analyzed with the method matching its
    /// features and the results are summed.
    pub fn cut(&self, by_communication: bool, by_release: bool) -> Vec<CEChain<'ts>> {
        let mut segments: Vec<Vec<usize>> = vec![vec![self.tasks[0]]];
        for (&prev_idx, &idx) in self.tasks.iter().tuple_windows() {
            let prev = self.base.task(prev_idx);
            let task = self.base.task(idx);
            let cut_here = (by_communication && task.communication != prev.communication)
                || (by_release && task.release_pattern != prev.release_pattern);
            if cut_here {
                segments.push(vec![idx]);
            } else {
                segments.last_mut().unwrap().push(idx);
            }
        }
        segments
            .into_iter()
            .map(|tasks| CEChain {
                base: self.base,
                tasks,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::{CommunicationPolicy, Task};
    use crate::tests::{let_periodic, periodic_implicit};
    use crate::taskset::TaskSet;

    fn mixed_set() -> TaskSet {
        TaskSet::new(vec![
            periodic_implicit(0, 10, 1),
            let_periodic(0, 20, 2),
            let_periodic(0, 40, 3),
            periodic_implicit(0, 5, 1),
        ])
    }

    #[test]
    fn construction_is_validated() {
        let ts = mixed_set();
        assert_eq!(CEChain::new(&ts, vec![]).unwrap_err(), ChainError::Empty);
        assert_eq!(
            CEChain::new(&ts, vec![0, 9]).unwrap_err(),
            ChainError::OutOfRange(9, 4)
        );
        assert!(CEChain::new(&ts, vec![3, 1, 0]).is_ok());
    }

    #[test]
    fn feature_probes() {
        let ts = mixed_set();
        let homogeneous = CEChain::new(&ts, vec![1, 2]).unwrap();
        assert_eq!(homogeneous.communication(), Some(CommunicationPolicy::Let));
        let mixed = CEChain::new(&ts, vec![0, 1]).unwrap();
        assert_eq!(mixed.communication(), None);
    }

    #[test]
    fn pivot_is_first_largest_period() {
        let ts = TaskSet::new(vec![
            periodic_implicit(0, 20, 1),
            periodic_implicit(0, 50, 1),
            periodic_implicit(0, 50, 1),
        ]);
        let chain = CEChain::new(&ts, vec![0, 1, 2]).unwrap();
        assert_eq!(chain.pivot(), 1);
        assert_eq!(chain.hyperperiod(), 100);
    }

    #[test]
    fn cut_into_homogeneous_segments() {
        let ts = mixed_set();
        let chain = CEChain::new(&ts, vec![0, 1, 2, 3]).unwrap();
        let segments = chain.cut(true, true);
        assert_eq!(segments.len(), 3);
        assert_eq!(segments[0].len(), 1);
        assert_eq!(segments[1].len(), 2);
        assert_eq!(segments[2].len(), 1);
        // cutting on nothing keeps the chain whole
        assert_eq!(chain.cut(false, false).len(), 1);
    }

    #[test]
    fn chain_does_not_own_its_tasks() {
        let ts = mixed_set();
        let chain = CEChain::new(&ts, vec![0, 3]).unwrap();
        let from_chain: Vec<&Task> = chain.iter().collect();
        assert!(std::ptr::eq(from_chain[0], ts.task(0)));
        assert!(std::ptr::eq(from_chain[1], ts.task(3)));
    }
}
