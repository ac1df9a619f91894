//! Festoon sequences an animated greeting presentation over a virtual clock.
//!
//! A presentation walks through fixed scenes (intro hearts, balloon release, cake build-up, gifts)
//! and ends on a letter modal. The public API is:
//!
//! - Load and validate a [`Show`] (JSON, or built with [`ShowBuilder`])
//! - Create a [`Presentation`] over a [`MediaPlayer`] and a [`BalloonRenderer`]
//! - Drive it with `run_*` calls and [`Input`]s, and observe it through its [`Trace`] and
//!   [`Snapshot`]s
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

/// Orchestrator and flows.
pub mod presentation;
/// Timer queue and signal bus.
pub mod runtime;
/// Show definition boundary.
pub mod show;
/// Page model.
pub mod stage;

pub use crate::foundation::core::{Millis, ParticleId, TimerId};
pub use crate::foundation::error::{FestoonError, FestoonResult};
pub use crate::foundation::timing;

pub use crate::presentation::audio::{AudioController, MediaPlayer, PlaybackError, SimulatedPlayer};
pub use crate::presentation::balloons::{BalloonLaunch, BalloonRenderer, ScriptedBalloons};
pub use crate::presentation::cake::{CakeSequencer, CakeState, RevealTrigger};
pub use crate::presentation::hearts::{HeartEmitter, HeartVariant, Particle};
pub use crate::presentation::script::ScriptedInput;
pub use crate::presentation::state::PresentationState;
pub use crate::presentation::trace::{Trace, TraceEvent, TraceKind};
pub use crate::presentation::{Input, Presentation, PresentationOpts, Snapshot};
pub use crate::runtime::signal::Signal;
pub use crate::show::Show;
pub use crate::show::dsl::ShowBuilder;
pub use crate::show::model::{
    AnimationElementDef, CakeDef, ControlDef, EnvironmentDef, ModalDef, ShowDef, StageDef,
};
pub use crate::stage::animation::{FallbackBasis, FallbackDeadline, fallback_deadline};
pub use crate::stage::control::ControlId;
pub use crate::stage::modal::ModalState;
pub use crate::stage::scene::SceneId;
pub use crate::stage::{FocusTarget, Stage, Surface, SurfacePlacement};
