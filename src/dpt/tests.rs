use super::{let_communication, maximum_data_age, no_information, path, response_times, sched_trace};
use crate::chain::CEChain;
use crate::events::{EventModel, NoInformation};
use crate::sim::{populate_schedules, Ratio};
use crate::task::Task;
use crate::tests::{let_periodic, periodic_implicit, rm_taskset};
use crate::time::Instant;
use crate::taskset::TaskSet;

fn two_task_set(comm_let: bool) -> TaskSet {
    let mk = if comm_let { let_periodic } else { periodic_implicit };
    let mut ts = rm_taskset(vec![mk(0, 10, 1), mk(0, 20, 2)]);
    ts.compute_wcrts();
    ts
}

#[test]
fn let_tree_age() {
    let ts = two_task_set(true);
    let chain = CEChain::new(&ts, vec![0, 1]).unwrap();
    // the only reachable branches pair producer occurrences 1 and 3
    // with consumer occurrences 1 and 2, both aged two consumer
    // periods minus one producer period
    assert_eq!(let_communication(&chain), 30);
}

#[test]
fn tree_and_path_agree_under_let() {
    let ts = two_task_set(true);
    let chain = CEChain::new(&ts, vec![0, 1]).unwrap();
    assert_eq!(
        path::maximum_data_age(&chain, &crate::events::Let),
        let_communication(&chain)
    );
}

#[test]
fn no_information_tree_age() {
    let ts = two_task_set(false);
    let chain = CEChain::new(&ts, vec![0, 1]).unwrap();
    assert_eq!(no_information(&chain), 30);
}

#[test]
fn response_times_tighten_the_age() {
    let ts = two_task_set(false);
    let chain = CEChain::new(&ts, vec![0, 1]).unwrap();
    let with_wcrts = response_times(&chain);
    assert_eq!(with_wcrts, 13);
    assert!(with_wcrts <= no_information(&chain));
}

/// The same bounds as [NoInformation] but exploring every possible
/// successor instead of only the dominating last one.
struct ExploreAll;

impl EventModel for ExploreAll {
    fn rmin(&self, task: &Task, occurrence: i64) -> Instant {
        NoInformation.rmin(task, occurrence)
    }
    fn rmax(&self, task: &Task, occurrence: i64) -> Instant {
        NoInformation.rmax(task, occurrence)
    }
    fn dmin(&self, task: &Task, occurrence: i64) -> Instant {
        NoInformation.dmin(task, occurrence)
    }
    fn dmax(&self, task: &Task, occurrence: i64) -> Instant {
        NoInformation.dmax(task, occurrence)
    }
    fn write_event(&self, task: &Task, occurrence: i64) -> Instant {
        NoInformation.write_event(task, occurrence)
    }
}

#[test]
fn last_successor_pruning_is_exact() {
    let ts = two_task_set(false);
    for tasks in [vec![0, 1], vec![1, 0], vec![0, 1, 0]] {
        let chain = CEChain::new(&ts, tasks).unwrap();
        assert_eq!(
            maximum_data_age(&chain, &ExploreAll),
            no_information(&chain)
        );
    }
}

#[test]
fn single_task_chain_ages() {
    // periods [20, 50, 50], C [5, 10, 1]
    let mut ts = rm_taskset(vec![
        periodic_implicit(0, 20, 5),
        periodic_implicit(0, 50, 10),
        periodic_implicit(0, 50, 1),
    ]);
    ts.compute_wcrts();
    populate_schedules(&mut ts, 200, &[Ratio::full()]);
    let chain = CEChain::new(&ts, vec![2]).unwrap();
    // with no information the data of a lone job stands for the
    // whole deadline; response times tighten that to the WCRT, the
    // exact trace to the execution span
    assert_eq!(no_information(&chain), 50);
    assert_eq!(response_times(&chain), 6);
    assert_eq!(sched_trace(&chain), 1);
}
