use super::*;

fn drain(q: &mut TimerQueue<&'static str>, limit: u64) -> Vec<(u64, &'static str)> {
    let mut out = Vec::new();
    while let Some(f) = q.pop_due(Millis(limit)) {
        out.push((f.at.0, f.task));
    }
    out
}

#[test]
fn timeouts_fire_in_due_order() {
    let mut q = TimerQueue::new();
    q.set_timeout(Millis(300), "c");
    q.set_timeout(Millis(100), "a");
    q.set_timeout(Millis(200), "b");
    assert_eq!(drain(&mut q, 1_000), vec![(100, "a"), (200, "b"), (300, "c")]);
    assert!(q.is_empty());
    assert_eq!(q.now(), Millis(300));
}

#[test]
fn same_instant_fires_in_registration_order() {
    let mut q = TimerQueue::new();
    q.set_timeout(Millis(50), "first");
    q.set_timeout(Millis(50), "second");
    q.set_timeout(Millis(0), "zero");
    assert_eq!(
        drain(&mut q, 50),
        vec![(0, "zero"), (50, "first"), (50, "second")]
    );
}

#[test]
fn interval_repeats_until_cleared() {
    let mut q = TimerQueue::new();
    let id = q.set_interval(Millis(350), "tick");
    assert_eq!(
        drain(&mut q, 1_000),
        vec![(350, "tick"), (700, "tick")]
    );
    assert!(q.is_pending(id));
    assert_eq!(q.next_due(), Some(Millis(1_050)));
    assert!(q.clear(id));
    assert!(!q.clear(id));
    assert!(drain(&mut q, 5_000).is_empty());
}

#[test]
fn cleared_timeout_never_fires() {
    let mut q = TimerQueue::new();
    let a = q.set_timeout(Millis(10), "a");
    q.set_timeout(Millis(20), "b");
    assert!(q.clear(a));
    assert_eq!(drain(&mut q, 100), vec![(20, "b")]);
}

#[test]
fn fired_timeout_cannot_be_cleared() {
    let mut q = TimerQueue::new();
    let a = q.set_timeout(Millis(10), "a");
    assert_eq!(drain(&mut q, 10).len(), 1);
    assert!(!q.is_pending(a));
    assert!(!q.clear(a));
}

#[test]
fn delays_are_relative_to_current_clock() {
    let mut q = TimerQueue::new();
    q.advance_to(Millis(1_000));
    q.set_timeout(Millis(250), "x");
    assert_eq!(q.next_due(), Some(Millis(1_250)));
    q.advance_to(Millis(10));
    assert_eq!(q.now(), Millis(1_000));
}

#[test]
fn zero_period_interval_is_clamped() {
    let mut q = TimerQueue::new();
    q.set_interval(Millis(0), "spin");
    assert_eq!(drain(&mut q, 3), vec![(1, "spin"), (2, "spin"), (3, "spin")]);
}
