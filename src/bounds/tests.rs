use super::{bi, davare, duerr, hamann, kloda};
use crate::chain::CEChain;
use crate::task::{CommunicationPolicy, Task};
use crate::tests::{periodic_implicit, rm_taskset};
use crate::taskset::TaskSet;

fn analyzed(mut ts: TaskSet) -> TaskSet {
    ts.compute_wcrts();
    ts
}

#[test]
fn davare_bound() {
    // WCRTs compute to [5, 8]
    let ts = analyzed(rm_taskset(vec![
        periodic_implicit(0, 10, 5),
        periodic_implicit(0, 20, 3),
    ]));
    assert_eq!(ts.wcrt(&ts[1]), 8);
    let chain = CEChain::new(&ts, vec![0, 1]).unwrap();
    assert_eq!(davare::bound(&chain), (10 + 5) + (20 + 8));
    assert_eq!(davare::interconnected([&chain, &chain]), 2 * 43);
}

#[test]
fn hamann_bound() {
    let ts = TaskSet::new(vec![
        Task::sporadic(CommunicationPolicy::Let, 0, 10, 10, 1, 1, 10).unwrap(),
        Task::sporadic(CommunicationPolicy::Let, 0, 20, 20, 1, 1, 20).unwrap(),
    ]);
    let chain = CEChain::new(&ts, vec![0, 1]).unwrap();
    assert_eq!(hamann::bound(&chain), (10 + 10) + (20 + 20));
}

#[test]
fn duerr_bounds() {
    let ts = analyzed(rm_taskset(vec![
        periodic_implicit(0, 20, 5),
        periodic_implicit(0, 50, 10),
    ]));
    let downhill = CEChain::new(&ts, vec![0, 1]).unwrap();
    // the low-priority consumer cannot preempt: no carry-over
    assert_eq!(duerr::reaction_time(&downhill), 20 + 15 + 50);
    assert_eq!(duerr::data_age(&downhill), 15 + 20);

    let uphill = CEChain::new(&ts, vec![1, 0]).unwrap();
    // the high-priority consumer forces the producer's full WCRT
    assert_eq!(duerr::reaction_time(&uphill), 50 + 5 + (20 + 15));
    assert_eq!(duerr::data_age(&uphill), 5 + (50 + 15));
}

#[test]
fn duerr_charges_ecu_boundaries() {
    let ts = analyzed(rm_taskset(vec![
        periodic_implicit(0, 20, 5).across_ecus(),
        periodic_implicit(0, 50, 10),
    ]));
    let chain = CEChain::new(&ts, vec![0, 1]).unwrap();
    // same shape as `downhill` above, but the boundary forces the
    // carry-over term
    assert_eq!(duerr::reaction_time(&chain), 20 + 15 + (50 + 5));
}

#[test]
fn kloda_bound() {
    let ts = analyzed(rm_taskset(vec![
        periodic_implicit(0, 20, 5),
        periodic_implicit(0, 50, 10),
    ]));
    let chain = CEChain::new(&ts, vec![0, 1]).unwrap();
    // worst first release at 60: one period head, 40 until the
    // consumer's release at 100, plus its response time
    assert_eq!(kloda::bound(&chain), 20 + 40 + 15);
}

#[test]
#[should_panic(expected = "synchronous releases")]
fn kloda_rejects_phases() {
    let ts = analyzed(rm_taskset(vec![periodic_implicit(5, 20, 5)]));
    let chain = CEChain::new(&ts, vec![0]).unwrap();
    let _ = kloda::bound(&chain);
}

#[test]
fn bi_bound() {
    let ts = analyzed(rm_taskset(vec![
        periodic_implicit(0, 20, 5),
        periodic_implicit(0, 50, 10),
    ]));
    let downhill = CEChain::new(&ts, vec![0, 1]).unwrap();
    // high-priority producer: one period minus the period GCD
    assert_eq!(bi::bound(&downhill), 15 + (20 - 10));
    let uphill = CEChain::new(&ts, vec![1, 0]).unwrap();
    // WCRT 15 is no multiple of the GCD 10: modulo term
    assert_eq!(bi::bound(&uphill), 5 + (15 + 50 - 15 % 10));
    assert_eq!(bi::interconnected([&downhill, &uphill]), 25 + 65);
}

#[test]
fn bi_single_task_degenerates_to_the_wcrt() {
    // periods [20, 50, 50], C [5, 10, 1]: WCRTs [5, 15, 6]
    let ts = analyzed(rm_taskset(vec![
        periodic_implicit(0, 20, 5),
        periodic_implicit(0, 50, 10),
        periodic_implicit(0, 50, 1),
    ]));
    let chain = CEChain::new(&ts, vec![2]).unwrap();
    assert_eq!(bi::bound(&chain), 6);
}
