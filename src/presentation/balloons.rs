use crate::foundation::core::{Millis, TimerId};
use crate::foundation::error::FestoonResult;
use crate::foundation::timing::BALLOON_CTA_DELAY;
use crate::presentation::trace::TraceKind;
use crate::presentation::{Cx, Task};
use crate::runtime::signal::Signal;
use crate::stage::Surface;
use crate::stage::control::ControlId;

/// What the balloon module reports when launched.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BalloonLaunch {
    /// Delay after which the module will broadcast [`Signal::BalloonsFinished`]. `None` when the
    /// module broadcasts on its own through [`crate::Presentation::publish`].
    pub finishes_after: Option<Millis>,
}

/// The external balloon animation capability.
pub trait BalloonRenderer {
    /// Start drawing into `surface`. Called at most once per presentation.
    fn launch(&mut self, surface: &Surface) -> FestoonResult<BalloonLaunch>;
}

/// Renderer that draws nothing and reports a fixed completion delay.
#[derive(Clone, Debug, Default)]
pub struct ScriptedBalloons {
    finishes_after: Option<Millis>,
    launches: u32,
}

impl ScriptedBalloons {
    /// Renderer finishing `finishes_after` after launch (or never, if `None`).
    pub fn new(finishes_after: Option<Millis>) -> Self {
        Self {
            finishes_after,
            launches: 0,
        }
    }

    /// How many times `launch` was called.
    pub fn launches(&self) -> u32 {
        self.launches
    }
}

impl BalloonRenderer for ScriptedBalloons {
    fn launch(&mut self, surface: &Surface) -> FestoonResult<BalloonLaunch> {
        self.launches += 1;
        tracing::debug!(surface = %surface.id, "scripted balloons launched");
        Ok(BalloonLaunch {
            finishes_after: self.finishes_after,
        })
    }
}

/// Prepares the balloon surface, loads the balloon module once, and times the balloon CTA.
pub struct BalloonFlow {
    renderer: Box<dyn BalloonRenderer>,
    cta_timer: Option<TimerId>,
}

impl BalloonFlow {
    /// Flow driving `renderer`.
    pub fn new(renderer: Box<dyn BalloonRenderer>) -> Self {
        Self {
            renderer,
            cta_timer: None,
        }
    }

    pub(crate) fn start(&mut self, cx: &mut Cx<'_>) {
        self.ensure_surface(cx);
        self.load_once(cx);
        if self.cta_timer.is_none() {
            self.cta_timer = Some(
                cx.timers
                    .set_timeout(BALLOON_CTA_DELAY, Task::RevealBalloonCta),
            );
        }
    }

    fn ensure_surface(&mut self, cx: &mut Cx<'_>) {
        match cx.stage.ensure_balloon_surface() {
            Ok(true) => {
                if let Some(s) = cx.stage.balloon_surface() {
                    let placement = s.placement;
                    cx.record(TraceKind::BalloonSurfaceCreated { placement });
                }
            }
            Ok(false) => {}
            Err(e) => tracing::warn!(error = %e, "could not prepare balloon surface"),
        }
    }

    /// Load and launch the module. Returns `false` if it was already loaded or cannot be.
    pub(crate) fn load_once(&mut self, cx: &mut Cx<'_>) -> bool {
        if cx.state.balloons_loaded {
            return false;
        }
        self.ensure_surface(cx);
        let Some(surface) = cx.stage.balloon_surface().cloned() else {
            return false;
        };
        cx.state.balloons_loaded = true;
        cx.record(TraceKind::BalloonModuleLoaded);

        match self.renderer.launch(&surface) {
            Ok(BalloonLaunch {
                finishes_after: Some(after),
            }) => {
                cx.timers
                    .set_timeout(after, Task::Publish(Signal::BalloonsFinished));
            }
            Ok(BalloonLaunch {
                finishes_after: None,
            }) => {}
            Err(e) => tracing::warn!(error = %e, "balloon module failed to launch"),
        }
        true
    }

    pub(crate) fn reveal_cta(&mut self, cx: &mut Cx<'_>) {
        self.cta_timer = None;
        if cx.stage.set_hidden(ControlId::BalloonCta, false) {
            cx.record(TraceKind::BalloonCtaRevealed);
        } else {
            tracing::debug!("no balloon call-to-action on the page");
        }
    }
}

impl std::fmt::Debug for BalloonFlow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BalloonFlow")
            .field("cta_timer", &self.cta_timer)
            .finish_non_exhaustive()
    }
}
