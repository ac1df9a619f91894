use crate::foundation::core::TimerId;
use crate::foundation::timing::{CAKE_BEGIN_DELAY, CAKE_SCENE_DELAY};
use crate::presentation::trace::TraceKind;
use crate::presentation::{Cx, Task, gifts};
use crate::stage::animation::{FallbackBasis, FallbackDeadline, fallback_deadline};
use crate::stage::control::ControlId;
use crate::stage::scene::SceneId;

/// Where the cake reveal is in its sequence.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CakeState {
    /// Waiting for the balloons to finish.
    #[default]
    Idle,
    /// Cake scene visible, chain not begun yet.
    SceneShown,
    /// First chain element begun.
    AnimationStarted,
    /// End listener and fallback timer armed.
    AwaitingCompletion,
    /// Gifts call-to-action revealed.
    Revealed,
}

/// What caused the reveal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RevealTrigger {
    /// Native end event of the final chain element.
    EndEvent,
    /// Duration-derived (or fixed) fallback timer.
    FallbackTimer,
    /// The page has no cake scene.
    NoCakeScene,
}

/// State machine from the balloons-finished signal to the gifts call-to-action.
///
/// The end event and the fallback timer race; whichever arrives first reveals, and the
/// `cake_revealed` guard turns the other into a no-op.
#[derive(Debug, Default)]
pub struct CakeSequencer {
    state: CakeState,
    end_listener: Option<String>,
    fallback: Option<(TimerId, FallbackDeadline)>,
    native_end_events: bool,
    triggered: bool,
}

impl CakeSequencer {
    /// Sequencer; `native_end_events` says whether the animation engine dispatches end events
    /// for chains it runs.
    pub fn new(native_end_events: bool) -> Self {
        Self {
            native_end_events,
            ..Self::default()
        }
    }

    /// Current state.
    pub fn state(&self) -> CakeState {
        self.state
    }

    /// The armed fallback deadline, once computed.
    pub fn deadline(&self) -> Option<FallbackDeadline> {
        self.fallback.map(|(_, d)| d)
    }

    /// Element whose end event is being listened for.
    pub fn end_listener(&self) -> Option<&str> {
        self.end_listener.as_deref()
    }

    /// Returns `true` when the reveal ran (only on the no-cake path).
    pub(crate) fn on_balloons_finished(&mut self, cx: &mut Cx<'_>) -> bool {
        if cx.stage.set_hidden(ControlId::MusicToggle, false) && !cx.state.music_toggle_visible {
            cx.record(TraceKind::MusicToggleShown);
        }
        cx.state.music_toggle_visible = true;

        if self.triggered {
            tracing::debug!(state = ?self.state, "balloons finished again, ignoring");
            return false;
        }
        self.triggered = true;

        if cx.stage.scenes().is_registered(SceneId::Cake) {
            cx.timers.set_timeout(CAKE_SCENE_DELAY, Task::ShowCakeScene);
            false
        } else {
            self.reveal(cx, RevealTrigger::NoCakeScene)
        }
    }

    pub(crate) fn on_show_scene(&mut self, cx: &mut Cx<'_>) {
        if self.state != CakeState::Idle {
            return;
        }
        cx.show_scene(SceneId::Cake);
        self.state = CakeState::SceneShown;
        cx.timers.set_timeout(CAKE_BEGIN_DELAY, Task::BeginCakeChain);
    }

    pub(crate) fn on_begin_chain(&mut self, cx: &mut Cx<'_>) {
        if self.state != CakeState::SceneShown {
            return;
        }
        let now = cx.now();
        let first = cx.stage.chain().first_id().map(str::to_owned);
        let began = match first.as_deref() {
            Some(id) => match cx.stage.animation_mut(id) {
                Some(el) => match el.begin(now) {
                    Ok(()) => {
                        cx.record(TraceKind::CakeChainBegun { id: id.to_owned() });
                        true
                    }
                    Err(e) => {
                        tracing::debug!(error = %e, "first cake animation could not begin");
                        false
                    }
                },
                None => {
                    tracing::debug!(id, "first cake animation is not on the page");
                    false
                }
            },
            None => false,
        };
        self.state = CakeState::AnimationStarted;

        let deadline = fallback_deadline(cx.stage.chain(), cx.stage.animations());
        if deadline.basis != FallbackBasis::MissingFinal
            && let Some(final_id) = cx.stage.chain().final_id().map(str::to_owned)
        {
            if began
                && self.native_end_events
                && let FallbackBasis::ChainSum { declared } = deadline.basis
            {
                cx.timers
                    .set_timeout(declared, Task::AnimationEnd(final_id.clone()));
            }
            cx.record(TraceKind::CakeEndListenerArmed {
                id: final_id.clone(),
            });
            self.end_listener = Some(final_id);
        }

        let timer = cx.timers.set_timeout(deadline.delay, Task::CakeFallback);
        self.fallback = Some((timer, deadline));
        cx.record(TraceKind::CakeFallbackArmed { deadline });
        self.state = CakeState::AwaitingCompletion;
    }

    /// Returns `true` when this event performed the reveal.
    pub(crate) fn on_animation_end(&mut self, id: &str, cx: &mut Cx<'_>) -> bool {
        if self.end_listener.as_deref() != Some(id) {
            tracing::debug!(id, "end event with no listener");
            return false;
        }
        self.end_listener = None;
        self.reveal(cx, RevealTrigger::EndEvent)
    }

    /// Returns `true` when the timer performed the reveal.
    pub(crate) fn on_fallback(&mut self, cx: &mut Cx<'_>) -> bool {
        self.reveal(cx, RevealTrigger::FallbackTimer)
    }

    fn reveal(&mut self, cx: &mut Cx<'_>, trigger: RevealTrigger) -> bool {
        if cx.state.cake_revealed {
            cx.record(TraceKind::CakeRevealSuppressed { trigger });
            return false;
        }
        cx.state.cake_revealed = true;
        self.state = CakeState::Revealed;

        if trigger != RevealTrigger::NoCakeScene && cx.stage.scenes().is_registered(SceneId::Gifts)
        {
            cx.show_scene(SceneId::Gifts);
        }
        gifts::reveal_cta(cx);
        cx.record(TraceKind::CakeRevealed { trigger });
        true
    }
}

#[cfg(test)]
#[path = "../../tests/unit/presentation/cake.rs"]
mod tests;
