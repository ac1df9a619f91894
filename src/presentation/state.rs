/// Guard flags shared between flows, owned by the orchestrator.
///
/// Timer callbacks check these before acting; every flag only ever goes one way except
/// `hearts_running`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct PresentationState {
    /// The cake reveal action has run.
    pub cake_revealed: bool,
    /// The music toggle has been unhidden.
    pub music_toggle_visible: bool,
    /// The balloon module has been loaded.
    pub balloons_loaded: bool,
    /// The heart emitter's timers are armed.
    pub hearts_running: bool,
    /// The "see gifts" call-to-action has been unhidden.
    pub gift_cta_revealed: bool,
}
