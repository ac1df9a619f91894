use crate::foundation::core::{Millis, ParticleId, TimerId};
use crate::foundation::rng::Rng64;
use crate::foundation::timing::{
    HEART_BURST_COUNT, HEART_BURST_SPACING, HEART_TICK, PARTICLE_RETIRE_BUFFER,
};
use crate::presentation::trace::TraceKind;
use crate::presentation::{Cx, Task};
use std::collections::BTreeMap;

/// One of the two heart gradients.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HeartVariant {
    /// Deeper blue.
    Azure,
    /// Lighter blue.
    Sky,
}

/// A rising heart.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Particle {
    /// Unique id.
    pub id: ParticleId,
    /// Spawn time.
    pub born_at: Millis,
    /// Edge length in px, `[14, 40)`.
    pub size_px: f64,
    /// Horizontal position in percent of the container, `[0, 100)`.
    pub left_pct: f64,
    /// Rise duration in seconds, `[8, 26)`.
    pub rise_secs: f64,
    /// Tilt in degrees, `[-20, 20)`.
    pub rotation_deg: f64,
    /// Height reached at the end of the rise, `[90, 130)` percent.
    pub target_bottom_pct: f64,
    /// Gradient.
    pub variant: HeartVariant,
}

impl Particle {
    fn sample(id: ParticleId, born_at: Millis, rng: &mut Rng64) -> Self {
        let size_px = rng.range_f64(14.0, 40.0);
        let left_pct = rng.range_f64(0.0, 100.0);
        let variant = if rng.next_f64_01() < 0.5 {
            HeartVariant::Azure
        } else {
            HeartVariant::Sky
        };
        let rotation_deg = rng.range_f64(-20.0, 20.0);
        let rise_secs = rng.range_f64(8.0, 26.0);
        let target_bottom_pct = rng.range_f64(90.0, 130.0);
        Self {
            id,
            born_at,
            size_px,
            left_pct,
            rise_secs,
            rotation_deg,
            target_bottom_pct,
            variant,
        }
    }

    /// Time from spawn to removal.
    pub fn lifetime(&self) -> Millis {
        Millis::from_secs_f64(self.rise_secs) + PARTICLE_RETIRE_BUFFER
    }
}

/// Fills the intro with hearts: an immediate burst, then one per tick until stopped.
///
/// Particle removal is scheduled per particle and is not affected by [`HeartEmitter::stop`].
#[derive(Debug)]
pub struct HeartEmitter {
    rng: Rng64,
    next_id: u64,
    interval: Option<TimerId>,
    burst: Vec<TimerId>,
    live: BTreeMap<ParticleId, (Particle, TimerId)>,
    spawned: u64,
}

impl HeartEmitter {
    /// Emitter seeded for reproducible particles.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Rng64::new(seed),
            next_id: 0,
            interval: None,
            burst: Vec::new(),
            live: BTreeMap::new(),
            spawned: 0,
        }
    }

    /// Particles currently on screen.
    pub fn live(&self) -> impl Iterator<Item = &Particle> {
        self.live.values().map(|(p, _)| p)
    }

    /// Number of particles on screen.
    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    /// Total particles spawned.
    pub fn spawned(&self) -> u64 {
        self.spawned
    }

    /// Arm the burst and the interval. Returns `false` if already running.
    pub(crate) fn start(&mut self, cx: &mut Cx<'_>) -> bool {
        if self.interval.is_some() {
            return false;
        }
        self.interval = Some(cx.timers.set_interval(HEART_TICK, Task::SpawnHeart));
        self.burst = (0..HEART_BURST_COUNT)
            .map(|i| {
                cx.timers
                    .set_timeout(Millis(HEART_BURST_SPACING.0 * i), Task::SpawnHeart)
            })
            .collect();
        cx.state.hearts_running = true;
        cx.record(TraceKind::HeartsStarted);
        true
    }

    /// Cancel spawning. Live particles keep their own removal timers.
    pub(crate) fn stop(&mut self, cx: &mut Cx<'_>) {
        let Some(interval) = self.interval.take() else {
            return;
        };
        cx.timers.clear(interval);
        for id in self.burst.drain(..) {
            cx.timers.clear(id);
        }
        cx.state.hearts_running = false;
        cx.record(TraceKind::HeartsStopped {
            spawned: self.spawned,
        });
    }

    pub(crate) fn spawn(&mut self, cx: &mut Cx<'_>) -> Option<ParticleId> {
        if !cx.stage.has_hearts_container() {
            tracing::debug!("no hearts container, skipping particle");
            return None;
        }
        let id = ParticleId(self.next_id);
        self.next_id += 1;
        let p = Particle::sample(id, cx.now(), &mut self.rng);
        let timer = cx.timers.set_timeout(p.lifetime(), Task::RetireHeart(id));
        self.live.insert(id, (p, timer));
        self.spawned += 1;
        cx.record(TraceKind::HeartSpawned { id });
        Some(id)
    }

    pub(crate) fn retire(&mut self, id: ParticleId, cx: &mut Cx<'_>) -> bool {
        if self.live.remove(&id).is_none() {
            return false;
        }
        cx.record(TraceKind::HeartRetired { id });
        true
    }

    /// Stop and drop every live particle, cancelling their removal timers.
    pub(crate) fn teardown(&mut self, cx: &mut Cx<'_>) {
        self.stop(cx);
        for (_, (_, timer)) in std::mem::take(&mut self.live) {
            cx.timers.clear(timer);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/presentation/hearts.rs"]
mod tests;
