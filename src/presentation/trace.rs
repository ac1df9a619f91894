use crate::foundation::core::{Millis, ParticleId};
use crate::presentation::cake::RevealTrigger;
use crate::runtime::signal::Signal;
use crate::stage::SurfacePlacement;
use crate::stage::animation::FallbackDeadline;
use crate::stage::scene::SceneId;

/// Something observable that happened during a run.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum TraceKind {
    /// A scene became the active one.
    SceneShown {
        /// The scene.
        scene: SceneId,
    },
    /// The active scene started fading out.
    SceneLeaving {
        /// The scene.
        scene: SceneId,
    },
    /// Heart emitter timers armed.
    HeartsStarted,
    /// A heart particle was created.
    HeartSpawned {
        /// Particle id.
        id: ParticleId,
    },
    /// A heart particle finished its rise and was removed.
    HeartRetired {
        /// Particle id.
        id: ParticleId,
    },
    /// Heart emitter stopped.
    HeartsStopped {
        /// Particles spawned so far.
        spawned: u64,
    },
    /// Music is playing.
    MusicPlaying,
    /// Autoplay was refused; waiting for the first user input.
    MusicDeferred,
    /// The deferred playback attempt ran.
    MusicResumed {
        /// Whether playback started.
        ok: bool,
    },
    /// Music paused from the toggle.
    MusicPaused,
    /// Music toggle became visible.
    MusicToggleShown,
    /// Balloon rendering surface added to the page.
    BalloonSurfaceCreated {
        /// Where it was placed.
        placement: SurfacePlacement,
    },
    /// External balloon module loaded and launched.
    BalloonModuleLoaded,
    /// Balloon call-to-action revealed.
    BalloonCtaRevealed,
    /// A completion signal was broadcast.
    SignalPublished {
        /// The signal.
        signal: Signal,
    },
    /// A duplicate broadcast was dropped.
    SignalIgnored {
        /// The signal.
        signal: Signal,
    },
    /// First cake chain element started.
    CakeChainBegun {
        /// Element id.
        id: String,
    },
    /// End-event listener registered on the final chain element.
    CakeEndListenerArmed {
        /// Element id.
        id: String,
    },
    /// Fallback timer armed.
    CakeFallbackArmed {
        /// Computed deadline.
        deadline: FallbackDeadline,
    },
    /// The cake reveal ran.
    CakeRevealed {
        /// What triggered it.
        trigger: RevealTrigger,
    },
    /// A second reveal trigger arrived and was suppressed.
    CakeRevealSuppressed {
        /// What triggered it.
        trigger: RevealTrigger,
    },
    /// "See gifts" call-to-action revealed.
    GiftCtaRevealed {
        /// Whether it took focus.
        focused: bool,
    },
    /// Letter modal opened.
    LetterOpened,
    /// Letter modal closed (only recorded when it was open).
    LetterClosed,
}

/// A [`TraceKind`] stamped with virtual time.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct TraceEvent {
    /// When it happened.
    pub at: Millis,
    /// What happened.
    #[serde(flatten)]
    pub kind: TraceKind,
}

/// Ordered record of a run.
#[derive(Clone, Debug, Default)]
pub struct Trace {
    events: Vec<TraceEvent>,
}

impl Trace {
    /// Append an event.
    pub fn push(&mut self, at: Millis, kind: TraceKind) {
        self.events.push(TraceEvent { at, kind });
    }

    /// All events in order.
    pub fn events(&self) -> &[TraceEvent] {
        &self.events
    }

    /// Number of events matching `pred`.
    pub fn count(&self, pred: impl Fn(&TraceKind) -> bool) -> usize {
        self.events.iter().filter(|e| pred(&e.kind)).count()
    }

    /// First event matching `pred`.
    pub fn find(&self, pred: impl Fn(&TraceKind) -> bool) -> Option<&TraceEvent> {
        self.events.iter().find(|e| pred(&e.kind))
    }

    /// Times of every event matching `pred`.
    pub fn times(&self, pred: impl Fn(&TraceKind) -> bool) -> Vec<Millis> {
        self.events
            .iter()
            .filter(|e| pred(&e.kind))
            .map(|e| e.at)
            .collect()
    }
}
