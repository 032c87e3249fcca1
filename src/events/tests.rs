use super::{EventModel, Let, NoInformation, ResponseTimes, SchedTrace};
use crate::sim::{populate_schedules, Ratio};
use crate::tests::{let_periodic, periodic_implicit, rm_taskset};

#[test]
fn let_bounds_are_deterministic() {
    let t = let_periodic(5, 10, 2);
    let m = Let;
    assert_eq!(m.rmin(&t, 0), 5);
    assert_eq!(m.rmax(&t, 0), 5);
    assert_eq!(m.dmin(&t, 0), 15);
    assert_eq!(m.dmax(&t, 0), 25);
    assert_eq!(m.latest_impact(&t, 3), 45);
}

#[test]
fn let_closed_form_searches() {
    let t = let_periodic(0, 10, 2);
    let m = Let;
    // earliest job reading at or after t
    assert_eq!(m.earliest_read_at_or_after(&t, 0), 0);
    assert_eq!(m.earliest_read_at_or_after(&t, 1), 1);
    assert_eq!(m.earliest_read_at_or_after(&t, 10), 1);
    assert_eq!(m.earliest_read_at_or_after(&t, 11), 2);
    assert_eq!(m.earliest_read_at_or_after(&t, -50), 0);
    // latest job written at or before t; write of job k is at 10(k+1)
    assert_eq!(m.latest_write_at_or_before(&t, 10), 0);
    assert_eq!(m.latest_write_at_or_before(&t, 19), 0);
    assert_eq!(m.latest_write_at_or_before(&t, 20), 1);
    // nothing written yet: the incomplete-chain signal
    assert_eq!(m.latest_write_at_or_before(&t, 9), -1);
    assert_eq!(m.latest_write_at_or_before(&t, -35), -5);
}

#[test]
fn no_information_bounds() {
    let t = periodic_implicit(0, 10, 2);
    let m = NoInformation;
    assert_eq!(m.rmin(&t, 1), 10);
    // may start as late as the deadline still allows
    assert_eq!(m.rmax(&t, 1), 18);
    assert_eq!(m.dmin(&t, 1), 12);
    // output stands until the next job's latest completion
    assert_eq!(m.dmax(&t, 1), 30);
    assert_eq!(m.write_event(&t, 1), 20);
    assert!(m.last_successor_dominates());
}

#[test]
fn response_time_bounds() {
    let mut ts = rm_taskset(vec![
        periodic_implicit(0, 20, 5),
        periodic_implicit(0, 50, 10),
    ]);
    ts.compute_wcrts();
    assert_eq!(ts.wcrt(&ts[1]), 15);
    let m = ResponseTimes::new(&ts);
    let low = &ts[1];
    assert_eq!(m.rmin(low, 0), 0);
    assert_eq!(m.rmax(low, 0), 5);
    assert_eq!(m.dmin(low, 0), 10);
    assert_eq!(m.dmax(low, 0), 65);
    assert_eq!(m.write_event(low, 0), 15);
    assert_eq!(m.latest_impact(low, 0), 15);
    assert!(!m.last_successor_dominates());
}

#[test]
#[should_panic(expected = "WCRTs")]
fn response_times_require_wcrts() {
    let ts = rm_taskset(vec![periodic_implicit(0, 10, 1)]);
    let _ = ResponseTimes::new(&ts);
}

#[test]
fn sched_trace_bounds_and_extension() {
    let mut ts = rm_taskset(vec![
        periodic_implicit(0, 20, 5),
        periodic_implicit(0, 50, 10),
    ]);
    ts.compute_wcrts();
    populate_schedules(&mut ts, 100, &[Ratio::full()]);
    let m = SchedTrace::new(&ts);
    let hi = &ts[0];
    let lo = &ts[1];
    assert_eq!((m.rmin(lo, 0), m.dmin(lo, 0)), (5, 15));
    assert_eq!(m.rmax(lo, 0), m.rmin(lo, 0));
    assert_eq!(m.dmax(lo, 0), m.dmin(lo, 1));
    // negative occurrences read as the origin marker
    assert_eq!((m.rmin(hi, -1), m.dmin(hi, -1)), (0, 0));
    // occurrences beyond the trace wrap by whole hyperperiods
    let recorded = ts.schedule(Ratio::full()).of(lo).len() as i64;
    let per_hyper = ts.hyperperiod() / lo.period;
    let wraps = (recorded / per_hyper + 1) * per_hyper;
    assert_eq!(
        m.rmin(lo, wraps),
        m.rmin(lo, 0) + (wraps / per_hyper) * ts.hyperperiod()
    );
}

#[test]
fn generic_searches_on_a_trace() {
    let mut ts = rm_taskset(vec![
        periodic_implicit(0, 20, 5),
        periodic_implicit(0, 50, 10),
    ]);
    ts.compute_wcrts();
    populate_schedules(&mut ts, 100, &[Ratio::full()]);
    let m = SchedTrace::new(&ts);
    let lo = &ts[1];
    // job 0 of the low task starts at 5 and finishes at 15
    assert_eq!(m.earliest_read_at_or_after(lo, 5), 0);
    assert_eq!(m.earliest_read_at_or_after(lo, 6), 1);
    assert_eq!(m.latest_write_at_or_before(lo, 14), -1);
    assert_eq!(m.latest_write_at_or_before(lo, 15), 0);
    // job 1 finishes at 60
    assert_eq!(m.latest_write_at_or_before(lo, 59), 0);
    assert_eq!(m.latest_write_at_or_before(lo, 60), 1);
}
