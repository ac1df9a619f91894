use super::*;
use crate::foundation::timing::HEARTS_WINDOW;
use crate::presentation::state::PresentationState;
use crate::presentation::trace::Trace;
use crate::runtime::timers::TimerQueue;
use crate::show::dsl::ShowBuilder;
use crate::stage::Stage;

struct World {
    stage: Stage,
    timers: TimerQueue<Task>,
    state: PresentationState,
    trace: Trace,
}

impl World {
    fn new(hearts_container: bool) -> Self {
        let show = ShowBuilder::new()
            .hearts_container(hearts_container)
            .build()
            .unwrap();
        Self {
            stage: Stage::from_def(&show.def().stage).unwrap(),
            timers: TimerQueue::new(),
            state: PresentationState::default(),
            trace: Trace::default(),
        }
    }

    fn cx(&mut self) -> Cx<'_> {
        Cx {
            stage: &mut self.stage,
            timers: &mut self.timers,
            state: &mut self.state,
            trace: &mut self.trace,
        }
    }

    fn spawn_times(&self) -> Vec<Millis> {
        self.trace
            .times(|k| matches!(k, TraceKind::HeartSpawned { .. }))
    }
}

fn run(em: &mut HeartEmitter, w: &mut World, until: Millis) {
    while let Some(f) = w.timers.pop_due(until) {
        match f.task {
            Task::SpawnHeart => {
                em.spawn(&mut w.cx());
            }
            Task::RetireHeart(id) => {
                em.retire(id, &mut w.cx());
            }
            other => panic!("unexpected task {other:?}"),
        }
    }
    w.timers.advance_to(until);
}

#[test]
fn burst_and_ticks_interleave() {
    let mut w = World::new(true);
    let mut em = HeartEmitter::new(1);
    assert!(em.start(&mut w.cx()));
    assert!(w.state.hearts_running);

    run(&mut em, &mut w, Millis(600));
    let expected: Vec<Millis> = [0, 120, 240, 350, 360, 480, 600]
        .into_iter()
        .map(Millis)
        .collect();
    assert_eq!(w.spawn_times(), expected);
}

#[test]
fn start_twice_is_a_noop() {
    let mut w = World::new(true);
    let mut em = HeartEmitter::new(1);
    assert!(em.start(&mut w.cx()));
    let pending = w.timers.len();
    assert!(!em.start(&mut w.cx()));
    assert_eq!(w.timers.len(), pending);
}

#[test]
fn stop_ends_spawning_at_the_window() {
    let mut w = World::new(true);
    let mut em = HeartEmitter::new(1);
    em.start(&mut w.cx());
    run(&mut em, &mut w, HEARTS_WINDOW);
    // Six burst particles plus one per 350 ms tick up to 9800.
    assert_eq!(em.spawned(), 6 + 28);

    em.stop(&mut w.cx());
    assert!(!w.state.hearts_running);
    run(&mut em, &mut w, Millis(20_000));
    assert_eq!(em.spawned(), 34);
    assert_eq!(
        w.trace
            .count(|k| matches!(k, TraceKind::HeartsStopped { spawned: 34 })),
        1
    );
}

#[test]
fn stop_cancels_pending_burst() {
    let mut w = World::new(true);
    let mut em = HeartEmitter::new(1);
    em.start(&mut w.cx());
    run(&mut em, &mut w, Millis(130));
    em.stop(&mut w.cx());
    run(&mut em, &mut w, Millis(1000));
    assert_eq!(em.spawned(), 2);
}

#[test]
fn particles_retire_after_rise_plus_buffer() {
    let mut w = World::new(true);
    let mut em = HeartEmitter::new(42);
    em.start(&mut w.cx());
    run(&mut em, &mut w, Millis::ZERO);

    let p = *em.live().next().unwrap();
    let gone_at = p.born_at + p.lifetime();
    assert_eq!(
        p.lifetime(),
        Millis::from_secs_f64(p.rise_secs) + PARTICLE_RETIRE_BUFFER
    );

    em.stop(&mut w.cx());
    run(&mut em, &mut w, gone_at - Millis(1));
    assert!(em.live().any(|q| q.id == p.id));
    run(&mut em, &mut w, gone_at);
    assert!(!em.live().any(|q| q.id == p.id));
    assert_eq!(
        w.trace
            .find(|k| *k == TraceKind::HeartRetired { id: p.id })
            .map(|e| e.at),
        Some(gone_at)
    );
}

#[test]
fn stop_leaves_live_particles_to_their_own_timers() {
    let mut w = World::new(true);
    let mut em = HeartEmitter::new(3);
    em.start(&mut w.cx());
    run(&mut em, &mut w, Millis(1000));
    let live = em.live_count();
    assert!(live > 0);

    em.stop(&mut w.cx());
    assert_eq!(em.live_count(), live);

    // Longest rise is under 26 s.
    run(&mut em, &mut w, Millis(40_000));
    assert_eq!(em.live_count(), 0);
    assert!(w.timers.is_empty());
}

#[test]
fn missing_container_ticks_without_spawning() {
    let mut w = World::new(false);
    let mut em = HeartEmitter::new(1);
    em.start(&mut w.cx());
    run(&mut em, &mut w, Millis(5000));
    assert_eq!(em.spawned(), 0);
    assert_eq!(em.live_count(), 0);
    assert!(!w.timers.is_empty());
}

#[test]
fn teardown_drops_particles_and_timers() {
    let mut w = World::new(true);
    let mut em = HeartEmitter::new(5);
    em.start(&mut w.cx());
    run(&mut em, &mut w, Millis(2000));
    assert!(em.live_count() > 0);

    em.teardown(&mut w.cx());
    assert_eq!(em.live_count(), 0);
    assert!(w.timers.is_empty());
}

#[test]
fn particles_are_seeded_and_in_range() {
    let sample = |seed: u64| {
        let mut w = World::new(true);
        let mut em = HeartEmitter::new(seed);
        em.start(&mut w.cx());
        run(&mut em, &mut w, Millis(3000));
        em.live().copied().collect::<Vec<_>>()
    };
    let a = sample(11);
    assert_eq!(a, sample(11));
    assert_ne!(a, sample(12));

    for p in &a {
        assert!((14.0..40.0).contains(&p.size_px));
        assert!((0.0..100.0).contains(&p.left_pct));
        assert!((8.0..26.0).contains(&p.rise_secs));
        assert!((-20.0..20.0).contains(&p.rotation_deg));
        assert!((90.0..130.0).contains(&p.target_bottom_pct));
    }
}
