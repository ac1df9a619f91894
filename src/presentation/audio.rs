use crate::foundation::timing::MUSIC_VOLUME;
use crate::presentation::Cx;
use crate::presentation::trace::TraceKind;
use crate::stage::Stage;
use crate::stage::control::ControlId;

/// Why a playback request was refused.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PlaybackError {
    /// The environment blocks playback until the user interacts with the page.
    #[error("playback not allowed before a user gesture")]
    NotAllowed,
    /// The media could not be played at all.
    #[error("media unavailable: {0}")]
    Unavailable(String),
}

/// The background music resource.
pub trait MediaPlayer {
    /// Start or resume playback.
    fn play(&mut self) -> Result<(), PlaybackError>;
    /// Pause playback.
    fn pause(&mut self);
    /// Set output volume in `[0, 1]`.
    fn set_volume(&mut self, volume: f64);
    /// Whether audio is currently playing.
    fn is_playing(&self) -> bool;
    /// Notification that the user has interacted with the page.
    fn user_activated(&mut self) {}
}

/// In-memory player that enforces an autoplay policy.
#[derive(Clone, Debug)]
pub struct SimulatedPlayer {
    autoplay_allowed: bool,
    activated: bool,
    playing: bool,
    volume: f64,
    play_attempts: u32,
}

impl SimulatedPlayer {
    /// Player that refuses to start before a user activation unless `autoplay_allowed`.
    pub fn new(autoplay_allowed: bool) -> Self {
        Self {
            autoplay_allowed,
            activated: false,
            playing: false,
            volume: 1.0,
            play_attempts: 0,
        }
    }

    /// Current volume.
    pub fn volume(&self) -> f64 {
        self.volume
    }

    /// Number of `play` calls so far.
    pub fn play_attempts(&self) -> u32 {
        self.play_attempts
    }
}

impl MediaPlayer for SimulatedPlayer {
    fn play(&mut self) -> Result<(), PlaybackError> {
        self.play_attempts += 1;
        if !self.autoplay_allowed && !self.activated {
            return Err(PlaybackError::NotAllowed);
        }
        self.playing = true;
        Ok(())
    }

    fn pause(&mut self) {
        self.playing = false;
    }

    fn set_volume(&mut self, volume: f64) {
        self.volume = volume.clamp(0.0, 1.0);
    }

    fn is_playing(&self) -> bool {
        self.playing
    }

    fn user_activated(&mut self) {
        self.activated = true;
    }
}

/// Starts music, defers it past autoplay blocking, and backs the music toggle.
pub struct AudioController {
    player: Box<dyn MediaPlayer>,
    awaiting_interaction: bool,
}

impl AudioController {
    /// Controller over `player`.
    pub fn new(player: Box<dyn MediaPlayer>) -> Self {
        Self {
            player,
            awaiting_interaction: false,
        }
    }

    /// Whether music is playing.
    pub fn is_playing(&self) -> bool {
        self.player.is_playing()
    }

    /// Whether a deferred retry is armed.
    pub fn awaiting_interaction(&self) -> bool {
        self.awaiting_interaction
    }

    pub(crate) fn start(&mut self, cx: &mut Cx<'_>) {
        self.player.set_volume(MUSIC_VOLUME);
        match self.player.play() {
            Ok(()) => cx.record(TraceKind::MusicPlaying),
            Err(e) => {
                tracing::debug!(error = %e, "autoplay refused, waiting for user input");
                self.awaiting_interaction = true;
                cx.record(TraceKind::MusicDeferred);
            }
        }
    }

    /// Forward the user activation to the player before any handler runs.
    pub(crate) fn note_activation(&mut self) {
        self.player.user_activated();
    }

    /// Retry a deferred start once; later inputs do nothing.
    pub(crate) fn on_user_input(&mut self, cx: &mut Cx<'_>) {
        if !self.awaiting_interaction {
            return;
        }
        self.awaiting_interaction = false;
        let ok = match self.player.play() {
            Ok(()) => true,
            Err(e) => {
                tracing::debug!(error = %e, "deferred playback failed");
                false
            }
        };
        cx.record(TraceKind::MusicResumed { ok });
        self.update_toggle_label(cx.stage);
    }

    pub(crate) fn toggle(&mut self, cx: &mut Cx<'_>) {
        if self.player.is_playing() {
            self.player.pause();
            cx.record(TraceKind::MusicPaused);
        } else {
            match self.player.play() {
                Ok(()) => cx.record(TraceKind::MusicPlaying),
                Err(e) => tracing::debug!(error = %e, "music toggle could not start playback"),
            }
        }
        self.update_toggle_label(cx.stage);
    }

    pub(crate) fn update_toggle_label(&self, stage: &mut Stage) {
        let label = if self.player.is_playing() {
            "Pause music"
        } else {
            "Play music"
        };
        stage.set_label(ControlId::MusicToggle, label);
    }
}

impl std::fmt::Debug for AudioController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AudioController")
            .field("playing", &self.player.is_playing())
            .field("awaiting_interaction", &self.awaiting_interaction)
            .finish()
    }
}
