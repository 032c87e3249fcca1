/*! Priority-ordered task sets and the time-demand analysis (TDA)
response-time engine.

A [TaskSet] owns its tasks and two memoized products that are
expensive to compute and shared by every cause-effect chain drawn
from the set: the per-task worst-case response times (computed by
[tda]) and the simulated schedule traces keyed by execution-time
ratio. Both caches are populated through `&mut self` before any
chain borrows the set, so the write-once-then-read-many discipline
is enforced by the borrow checker rather than by convention. */

use std::collections::BTreeMap;

use crate::sim::{Ratio, Schedule};
use crate::task::Task;
use crate::time::{self, div_ceil, Duration, Instant};

/// An ordered collection of tasks. List position encodes dispatch
/// order among equal-priority tasks; the [priority
/// value][Task::priority] encodes the preemption level.
#[derive(Debug, Clone, Default)]
pub struct TaskSet {
    tasks: Vec<Task>,
    wcrts: Option<Vec<Duration>>,
    schedules: BTreeMap<Ratio, Schedule>,
}

impl TaskSet {
    /// Create a task set from tasks in declaration order, assigning
    /// each task its stable identity.
    pub fn new(tasks: Vec<Task>) -> TaskSet {
        let mut ts = TaskSet {
            tasks,
            wcrts: None,
            schedules: BTreeMap::new(),
        };
        ts.reassign_ids();
        ts
    }

    fn reassign_ids(&mut self) {
        for (idx, task) in self.tasks.iter_mut().enumerate() {
            task.id = idx;
        }
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn task(&self, idx: usize) -> &Task {
        &self.tasks[idx]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter()
    }

    /// Does `a` preempt `b`? Smaller priority value wins; equal
    /// priority values do not preempt each other.
    pub fn higher_prio(&self, a: &Task, b: &Task) -> bool {
        a.priority < b.priority
    }

    /// Total utilization of the set.
    pub fn utilization(&self) -> f64 {
        self.iter().map(Task::utilization).sum()
    }

    /// Least common multiple of all task periods.
    pub fn hyperperiod(&self) -> Duration {
        self.iter().map(|t| t.period).fold(1, time::lcm)
    }

    /// Largest first-release offset in the set.
    pub fn max_phase(&self) -> Instant {
        self.iter().map(|t| t.phase).max().unwrap_or(0)
    }

    /// Largest period in the set.
    pub fn max_period(&self) -> Duration {
        self.iter().map(|t| t.period).max().unwrap_or(0)
    }

    /// Re-sort the set rate-monotonically and assign priorities.
    ///
    /// The sort is stable, so tasks with equal periods keep their
    /// declaration order for dispatching. Priority values are dense
    /// ranks of the period: equal-period tasks share one priority
    /// value and hence do not interfere with each other in TDA.
    ///
    /// Invalidates previously computed response times and schedule
    /// traces, since both depend on the priority order.
    pub fn assign_rate_monotonic_priorities(&mut self) {
        self.tasks.sort_by_key(|t| t.period);
        let mut prio = 0;
        for idx in 0..self.tasks.len() {
            if idx > 0 && self.tasks[idx].period != self.tasks[idx - 1].period {
                prio += 1;
            }
            self.tasks[idx].priority = prio;
        }
        self.reassign_ids();
        self.wcrts = None;
        self.schedules.clear();
    }

    /// Compute and memoize the worst-case response time of every
    /// task via [tda] against its strictly-higher-priority tasks.
    pub fn compute_wcrts(&mut self) {
        let wcrts = self
            .tasks
            .iter()
            .map(|task| {
                let hp: Vec<&Task> = self
                    .tasks
                    .iter()
                    .filter(|t| t.priority < task.priority)
                    .collect();
                tda(task, &hp)
            })
            .collect();
        self.wcrts = Some(wcrts);
    }

    /// Worst-case response time of `task`.
    ///
    /// # Panics
    ///
    /// Panics if [TaskSet::compute_wcrts] has not run yet --- a
    /// misordered setup, not a data error.
    pub fn wcrt(&self, task: &Task) -> Duration {
        self.wcrts
            .as_ref()
            .expect("response times have not been computed for this task set")[task.id()]
    }

    /// Have the response times been computed?
    pub fn has_wcrts(&self) -> bool {
        self.wcrts.is_some()
    }

    /// Does every task meet its deadline, i.e., is WCRT ≤ deadline
    /// for all tasks? Task sets failing this check must be filtered
    /// out before any chain analysis.
    ///
    /// # Panics
    ///
    /// Panics if [TaskSet::compute_wcrts] has not run yet.
    pub fn is_schedulable(&self) -> bool {
        self.iter().all(|t| self.wcrt(t) <= t.deadline)
    }

    /// A copy of the set with all execution times scaled by `ratio`
    /// (rounded up, see [Task::scaled]). Identities, priorities,
    /// phases and periods are preserved; the caches are not carried
    /// over.
    pub fn scaled(&self, ratio: f64) -> TaskSet {
        TaskSet {
            tasks: self.tasks.iter().map(|t| t.scaled(ratio)).collect(),
            wcrts: None,
            schedules: BTreeMap::new(),
        }
    }

    /// The memoized schedule trace for `ratio`.
    ///
    /// # Panics
    ///
    /// Panics if no trace for `ratio` has been inserted --- schedule
    /// population is the caller's responsibility and must happen
    /// before analysis, see
    /// [populate_schedules][crate::sim::populate_schedules].
    pub fn schedule(&self, ratio: Ratio) -> &Schedule {
        self.schedules
            .get(&ratio)
            .unwrap_or_else(|| panic!("no schedule trace for execution-time ratio {}", ratio))
    }

    pub fn has_schedule(&self, ratio: Ratio) -> bool {
        self.schedules.contains_key(&ratio)
    }

    /// Memoize a schedule trace for `ratio`. Re-inserting the same
    /// key is harmless: population is a pure function of the task
    /// set and the ratio, so the trace is simply replaced by an
    /// identical one.
    pub fn insert_schedule(&mut self, ratio: Ratio, schedule: Schedule) {
        self.schedules.insert(ratio, schedule);
    }
}

impl std::ops::Index<usize> for TaskSet {
    type Output = Task;

    fn index(&self, idx: usize) -> &Task {
        &self.tasks[idx]
    }
}

/// Time-demand analysis: the smallest response time `r` satisfying
///
/// `r = wcet(task) + Σ ⌈r / min_iat(i)⌉ × wcet(i)`
///
/// over all higher-priority tasks `i`, found by fixed-point
/// iteration starting at `r = wcet(task)`. Assumes fixed-priority
/// preemptive scheduling.
///
/// There is no artificial iteration cap: if the interfering demand
/// exceeds the processor capacity the iteration does not converge,
/// which upstream validity filtering
/// ([TaskSet::is_schedulable]) is responsible for ruling out.
pub fn tda(task: &Task, higher_priority: &[&Task]) -> Duration {
    let c = task.wcet;
    let mut r = c;
    loop {
        let interference: Duration = higher_priority
            .iter()
            .map(|t| t.wcet * div_ceil(r, t.min_iat))
            .sum();
        if r < interference + c {
            r = interference + c;
        } else {
            return r;
        }
    }
}
