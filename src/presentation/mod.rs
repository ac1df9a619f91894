//! The presentation orchestrator and the flows it drives.
//!
//! A [`Presentation`] owns the stage, the virtual clock and every flow. Timer callbacks are
//! [`Task`] values dispatched back into the orchestrator, so all mutation happens through one
//! `&mut` path and no flow holds a reference to another.

/// Background music.
pub mod audio;
/// Balloon surface, module loading and CTA timing.
pub mod balloons;
/// Cake reveal state machine.
pub mod cake;
pub(crate) mod gifts;
/// Heart particles.
pub mod hearts;
/// Timed input scripts.
pub mod script;
/// Guard flags.
pub mod state;
/// Observable run record.
pub mod trace;

use crate::foundation::core::{Millis, ParticleId};
use crate::foundation::error::{FestoonError, FestoonResult};
use crate::foundation::timing::{HEARTS_WINDOW, INTRO_LEAVE};
use crate::runtime::signal::{Signal, SignalBus};
use crate::runtime::timers::TimerQueue;
use crate::show::Show;
use crate::show::model::EnvironmentDef;
use crate::stage::control::ControlId;
use crate::stage::modal::ModalState;
use crate::stage::scene::SceneId;
use crate::stage::{FocusTarget, Stage};
use audio::{AudioController, MediaPlayer, SimulatedPlayer};
use balloons::{BalloonFlow, BalloonRenderer, ScriptedBalloons};
use cake::{CakeSequencer, CakeState};
use hearts::HeartEmitter;
use state::PresentationState;
use trace::{Trace, TraceKind};

/// Mutable view of the shared world handed to each flow.
pub(crate) struct Cx<'a> {
    pub(crate) stage: &'a mut Stage,
    pub(crate) timers: &'a mut TimerQueue<Task>,
    pub(crate) state: &'a mut PresentationState,
    pub(crate) trace: &'a mut Trace,
}

impl Cx<'_> {
    pub(crate) fn now(&self) -> Millis {
        self.timers.now()
    }

    pub(crate) fn record(&mut self, kind: TraceKind) {
        let at = self.now();
        self.trace.push(at, kind);
    }

    /// Switch scenes, logging instead of failing when the scene is not registered.
    pub(crate) fn show_scene(&mut self, id: SceneId) -> bool {
        match self.stage.scenes_mut().show_scene(id) {
            Ok(()) => {
                debug_assert_eq!(self.stage.scenes().active_count(), 1);
                tracing::info!(scene = %id, at = %self.now(), "scene shown");
                self.record(TraceKind::SceneShown { scene: id });
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, "scene switch failed");
                false
            }
        }
    }
}

macro_rules! cx {
    ($p:expr) => {
        Cx {
            stage: &mut $p.stage,
            timers: &mut $p.timers,
            state: &mut $p.state,
            trace: &mut $p.trace,
        }
    };
}

/// Deferred work scheduled on the timer queue or subscribed to a signal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Task {
    SpawnHeart,
    RetireHeart(ParticleId),
    HeartsWindowEnd,
    IntroLeft,
    RevealBalloonCta,
    Publish(Signal),
    CakeOnBalloonsFinished,
    ShowCakeScene,
    BeginCakeChain,
    AnimationEnd(String),
    CakeFallback,
}

/// Something arriving from outside the presentation.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Input {
    /// The user clicked a control.
    Click {
        /// Target control.
        control: ControlId,
    },
    /// The user pressed a key anywhere on the page.
    KeyDown {
        /// Key name (`"Escape"`, `"Enter"`, ...).
        key: String,
    },
    /// A declarative animation element finished.
    AnimationEnd {
        /// Element id.
        id: String,
    },
    /// A process-wide completion signal was broadcast.
    Signal {
        /// The signal.
        signal: Signal,
    },
}

/// External capabilities a presentation runs against.
pub struct PresentationOpts {
    /// Background music.
    pub player: Box<dyn MediaPlayer>,
    /// Balloon animation module.
    pub renderer: Box<dyn BalloonRenderer>,
}

impl PresentationOpts {
    /// In-memory capabilities behaving as `env` describes.
    pub fn simulated(env: &EnvironmentDef) -> Self {
        Self {
            player: Box::new(SimulatedPlayer::new(env.autoplay_allowed)),
            renderer: Box::new(ScriptedBalloons::new(
                env.balloons_finish_after_ms.map(Millis),
            )),
        }
    }
}

impl std::fmt::Debug for PresentationOpts {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PresentationOpts").finish_non_exhaustive()
    }
}

/// Point-in-time view of what the page shows.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Snapshot {
    /// Virtual time.
    pub at: Millis,
    /// Visible scene.
    pub active_scene: Option<SceneId>,
    /// Cake sequencer state.
    pub cake: CakeState,
    /// Letter modal visibility, if the page has one.
    pub modal: Option<ModalState>,
    /// Focus holder.
    pub focused: Option<FocusTarget>,
    /// Controls not hidden.
    pub visible_controls: Vec<ControlId>,
    /// Hearts on screen.
    pub live_particles: usize,
    /// Whether music is playing.
    pub music_playing: bool,
    /// Guard flags.
    pub state: PresentationState,
}

/// A running greeting presentation over a virtual clock.
#[derive(Debug)]
pub struct Presentation {
    show: Show,
    stage: Stage,
    timers: TimerQueue<Task>,
    bus: SignalBus<Task>,
    state: PresentationState,
    trace: Trace,
    hearts: HeartEmitter,
    balloons: BalloonFlow,
    cake: CakeSequencer,
    audio: AudioController,
    started: bool,
}

impl Presentation {
    /// Validate `show` and build a presentation over the given capabilities.
    pub fn new(show: Show, opts: PresentationOpts) -> FestoonResult<Self> {
        show.validate()?;
        let def = show.def();
        let stage = Stage::from_def(&def.stage)?;
        let hearts = HeartEmitter::new(def.seed);
        let cake = CakeSequencer::new(def.environment.native_end_events);
        Ok(Self {
            stage,
            timers: TimerQueue::new(),
            bus: SignalBus::new(),
            state: PresentationState::default(),
            trace: Trace::default(),
            hearts,
            balloons: BalloonFlow::new(opts.renderer),
            cake,
            audio: AudioController::new(opts.player),
            started: false,
            show,
        })
    }

    /// Presentation over simulated capabilities configured by the show's environment.
    pub fn simulated(show: Show) -> FestoonResult<Self> {
        let opts = PresentationOpts::simulated(&show.def().environment);
        Self::new(show, opts)
    }

    /// Run the document-ready sequence. Timers armed here fire on the next `run_*` call.
    #[tracing::instrument(skip(self))]
    pub fn start(&mut self) -> FestoonResult<()> {
        if self.started {
            return Err(FestoonError::playback("presentation already started"));
        }
        self.started = true;
        self.bus
            .subscribe(Signal::BalloonsFinished, Task::CakeOnBalloonsFinished);

        let mut cx = cx!(self);
        self.audio.start(&mut cx);
        self.audio.update_toggle_label(cx.stage);
        cx.stage.set_hidden(ControlId::MusicToggle, true);
        cx.show_scene(SceneId::Intro);
        self.hearts.start(&mut cx);
        cx.timers.set_timeout(HEARTS_WINDOW, Task::HeartsWindowEnd);
        Ok(())
    }

    /// Fire every timer due at or before `t`, then move the clock to `t`.
    pub fn run_until(&mut self, t: Millis) -> FestoonResult<()> {
        self.ensure_started()?;
        while let Some(fired) = self.timers.pop_due(t) {
            self.run_task(fired.task);
        }
        self.timers.advance_to(t);
        Ok(())
    }

    /// Run for `d` past the current time.
    pub fn run_for(&mut self, d: Millis) -> FestoonResult<()> {
        self.run_until(self.now() + d)
    }

    /// Fire timers until none are pending or the next one lies past `limit`.
    ///
    /// Returns `true` when the queue drained.
    pub fn run_until_idle(&mut self, limit: Millis) -> FestoonResult<bool> {
        self.ensure_started()?;
        loop {
            match self.timers.next_due() {
                None => return Ok(true),
                Some(due) if due > limit => {
                    self.timers.advance_to(limit);
                    return Ok(false);
                }
                Some(_) => {
                    if let Some(fired) = self.timers.pop_due(limit) {
                        self.run_task(fired.task);
                    }
                }
            }
        }
    }

    /// Deliver an external input at the current time.
    ///
    /// User inputs are seen by the media player first, then by the control handlers, then by
    /// the deferred-music retry.
    #[tracing::instrument(skip(self))]
    pub fn dispatch(&mut self, input: Input) -> FestoonResult<()> {
        self.ensure_started()?;
        match input {
            Input::Click { control } => {
                self.audio.note_activation();
                self.on_click(control);
                self.audio.on_user_input(&mut cx!(self));
            }
            Input::KeyDown { key } => {
                self.audio.note_activation();
                if key == "Escape" {
                    gifts::close_letter(&mut cx!(self));
                }
                self.audio.on_user_input(&mut cx!(self));
            }
            Input::AnimationEnd { id } => self.on_animation_end(&id),
            Input::Signal { signal } => {
                self.broadcast(signal);
            }
        }
        Ok(())
    }

    /// Broadcast a completion signal. Returns `Ok(false)` if it had already fired.
    ///
    /// Fails before [`Presentation::start`], since nothing is subscribed yet and the
    /// signal would be spent without reaching the cake flow.
    pub fn publish(&mut self, signal: Signal) -> FestoonResult<bool> {
        self.ensure_started()?;
        Ok(self.broadcast(signal))
    }

    #[tracing::instrument(skip(self))]
    fn broadcast(&mut self, signal: Signal) -> bool {
        let Some(subscribers) = self.bus.publish(signal) else {
            tracing::debug!(signal = signal.name(), "duplicate signal ignored");
            cx!(self).record(TraceKind::SignalIgnored { signal });
            return false;
        };
        cx!(self).record(TraceKind::SignalPublished { signal });
        for task in subscribers {
            self.run_task(task);
        }
        true
    }

    /// Cancel every heart timer and drop live particles.
    pub fn teardown(&mut self) {
        self.hearts.teardown(&mut cx!(self));
    }

    /// Current virtual time.
    pub fn now(&self) -> Millis {
        self.timers.now()
    }

    /// Whether [`Presentation::start`] has run.
    pub fn is_started(&self) -> bool {
        self.started
    }

    /// The show this presentation runs.
    pub fn show(&self) -> &Show {
        &self.show
    }

    /// The page model.
    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    /// Guard flags.
    pub fn state(&self) -> PresentationState {
        self.state
    }

    /// Cake sequencer state.
    pub fn cake_state(&self) -> CakeState {
        self.cake.state()
    }

    /// The cake sequencer.
    pub fn cake(&self) -> &CakeSequencer {
        &self.cake
    }

    /// The heart emitter.
    pub fn hearts(&self) -> &HeartEmitter {
        &self.hearts
    }

    /// The audio controller.
    pub fn audio(&self) -> &AudioController {
        &self.audio
    }

    /// Everything observable that happened so far.
    pub fn trace(&self) -> &Trace {
        &self.trace
    }

    /// What the page shows right now.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            at: self.now(),
            active_scene: self.stage.scenes().active(),
            cake: self.cake.state(),
            modal: self.stage.modal().map(|m| m.state()),
            focused: self.stage.focused(),
            visible_controls: self
                .stage
                .controls()
                .filter(|c| !c.hidden)
                .map(|c| c.id)
                .collect(),
            live_particles: self.hearts.live_count(),
            music_playing: self.audio.is_playing(),
            state: self.state,
        }
    }

    fn ensure_started(&self) -> FestoonResult<()> {
        if self.started {
            Ok(())
        } else {
            Err(FestoonError::playback("presentation not started"))
        }
    }

    fn on_click(&mut self, control: ControlId) {
        let visible = self.stage.control(control).is_some_and(|c| !c.hidden);
        if !visible {
            tracing::debug!(control = control.name(), "click on hidden or missing control");
            return;
        }
        let mut cx = cx!(self);
        match control {
            ControlId::SeeGifts => {
                gifts::open_letter(&mut cx);
            }
            ControlId::LetterClose | ControlId::OpenGift => {
                gifts::close_letter(&mut cx);
            }
            ControlId::MusicToggle => self.audio.toggle(&mut cx),
            ControlId::BalloonCta => {}
        }
    }

    fn on_animation_end(&mut self, id: &str) {
        if self.cake.on_animation_end(id, &mut cx!(self)) {
            self.broadcast(Signal::CakeFinished);
        }
    }

    fn run_task(&mut self, task: Task) {
        tracing::trace!(?task, at = %self.now(), "task");
        match task {
            Task::SpawnHeart => {
                self.hearts.spawn(&mut cx!(self));
            }
            Task::RetireHeart(id) => {
                self.hearts.retire(id, &mut cx!(self));
            }
            Task::HeartsWindowEnd => {
                let mut cx = cx!(self);
                self.hearts.stop(&mut cx);
                if cx.stage.scenes_mut().begin_leave(SceneId::Intro) {
                    cx.record(TraceKind::SceneLeaving {
                        scene: SceneId::Intro,
                    });
                }
                cx.timers.set_timeout(INTRO_LEAVE, Task::IntroLeft);
            }
            Task::IntroLeft => {
                let mut cx = cx!(self);
                cx.show_scene(SceneId::Balloons);
                self.balloons.start(&mut cx);
            }
            Task::RevealBalloonCta => self.balloons.reveal_cta(&mut cx!(self)),
            Task::Publish(signal) => {
                self.broadcast(signal);
            }
            Task::CakeOnBalloonsFinished => {
                self.cake.on_balloons_finished(&mut cx!(self));
            }
            Task::ShowCakeScene => self.cake.on_show_scene(&mut cx!(self)),
            Task::BeginCakeChain => self.cake.on_begin_chain(&mut cx!(self)),
            Task::AnimationEnd(id) => self.on_animation_end(&id),
            Task::CakeFallback => {
                if self.cake.on_fallback(&mut cx!(self)) {
                    self.broadcast(Signal::CakeFinished);
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/presentation/orchestrator.rs"]
mod tests;
