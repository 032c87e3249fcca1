use super::{released_before, Schedule};
use crate::taskset::TaskSet;
use crate::time::{Duration, Instant};

/// Which declared execution time each simulated job consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionTime {
    /// Every job runs for its task's BCET.
    BestCase,
    /// Every job runs for its task's WCET.
    WorstCase,
}

struct ReadyJob {
    priority: u32,
    task_idx: usize,
    occurrence: i64,
    remaining: Duration,
    started: Option<Instant>,
}

/// Simulate the task set under fixed-priority preemptive scheduling
/// and record, per task, the `(start, finish)` pair of every job
/// released strictly before `horizon`. Jobs always consume their
/// full declared execution time (no early completion). Sporadic
/// tasks are released at their minimum inter-arrival spacing, the
/// densest admissible pattern.
///
/// Dispatching picks the ready job with the smallest
/// `(priority value, task position, occurrence)` triple, so ties
/// between equal-priority tasks resolve by declaration order.
pub fn simulate(ts: &TaskSet, horizon: Instant, execution: ExecutionTime) -> Schedule {
    let n = ts.len();
    let counts: Vec<i64> = ts.iter().map(|t| released_before(t, horizon)).collect();
    let mut next_occurrence = vec![0i64; n];
    let mut records: Vec<Vec<(Instant, Instant)>> = counts
        .iter()
        .map(|&c| Vec::with_capacity(c.max(0) as usize))
        .collect();
    let mut ready: Vec<ReadyJob> = Vec::new();

    let first_release = (0..n)
        .filter(|&idx| counts[idx] > 0)
        .map(|idx| ts[idx].release(0))
        .min();
    let mut now = match first_release {
        Some(t) => t,
        None => return Schedule::new(records),
    };

    loop {
        // admit everything released up to the current instant
        for idx in 0..n {
            while next_occurrence[idx] < counts[idx] && ts[idx].release(next_occurrence[idx]) <= now
            {
                let cost = match execution {
                    ExecutionTime::BestCase => ts[idx].bcet,
                    ExecutionTime::WorstCase => ts[idx].wcet,
                };
                ready.push(ReadyJob {
                    priority: ts[idx].priority,
                    task_idx: idx,
                    occurrence: next_occurrence[idx],
                    remaining: cost,
                    started: None,
                });
                next_occurrence[idx] += 1;
            }
        }

        let upcoming = (0..n)
            .filter(|&idx| next_occurrence[idx] < counts[idx])
            .map(|idx| ts[idx].release(next_occurrence[idx]))
            .min();

        let running = ready
            .iter()
            .enumerate()
            .min_by_key(|(_, j)| (j.priority, j.task_idx, j.occurrence))
            .map(|(pos, _)| pos);

        let pos = match running {
            Some(pos) => pos,
            None => match upcoming {
                // idle until the next release
                Some(release) => {
                    now = release;
                    continue;
                }
                None => break,
            },
        };

        let job = &mut ready[pos];
        if job.started.is_none() {
            job.started = Some(now);
        }
        let completion = now + job.remaining;
        let run_until = match upcoming {
            Some(release) if release < completion => release,
            _ => completion,
        };
        job.remaining -= run_until - now;
        now = run_until;
        if job.remaining == 0 {
            let started = job
                .started
                .expect("a completed job must have started executing");
            records[job.task_idx].push((started, now));
            ready.swap_remove(pos);
        }
    }

    Schedule::new(records)
}
