use crate::stage::control::ControlId;
use crate::stage::scene::SceneId;
use serde::{Deserialize, Serialize};

/// Show file format version understood by this crate.
pub const SHOW_VERSION: &str = "1";

fn default_true() -> bool {
    true
}

/// JSON-facing definition of a presentation: the page it runs on and the environment it runs in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShowDef {
    /// Must equal [`SHOW_VERSION`].
    pub version: String,
    /// Seed for decorative randomness.
    #[serde(default)]
    pub seed: u64,
    /// Page markup.
    pub stage: StageDef,
    /// Runtime environment behavior.
    #[serde(default)]
    pub environment: EnvironmentDef,
}

/// Page markup: which scenes, controls and animation elements exist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageDef {
    /// Registered scenes.
    pub scenes: Vec<SceneId>,
    /// Controls present on the page.
    #[serde(default)]
    pub controls: Vec<ControlDef>,
    /// Letter modal, if present.
    #[serde(default)]
    pub modal: Option<ModalDef>,
    /// Whether the intro scene has a hearts container.
    #[serde(default = "default_true")]
    pub hearts_container: bool,
    /// Cake animation chain and its elements.
    #[serde(default)]
    pub cake: CakeDef,
}

/// A control on the page. Accepts either `"see-gifts"` or `{"id": "see-gifts", "focusable": false}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ControlDef {
    /// Which control.
    pub id: ControlId,
    /// Whether it accepts focus.
    pub focusable: bool,
}

impl ControlDef {
    /// Focusable control.
    pub fn new(id: ControlId) -> Self {
        Self {
            id,
            focusable: true,
        }
    }
}

impl<'de> Deserialize<'de> for ControlDef {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Name(ControlId),
            Obj {
                id: ControlId,
                #[serde(default = "default_true")]
                focusable: bool,
            },
        }

        match Repr::deserialize(deserializer)? {
            Repr::Name(id) => Ok(Self::new(id)),
            Repr::Obj { id, focusable } => Ok(Self { id, focusable }),
        }
    }
}

/// Letter modal markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModalDef {
    /// Whether the content region accepts focus.
    #[serde(default = "default_true")]
    pub inner_focusable: bool,
}

impl Default for ModalDef {
    fn default() -> Self {
        Self {
            inner_focusable: true,
        }
    }
}

/// Cake animation chain.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CakeDef {
    /// Ordered chain ids; first is begun, last completes the cake.
    #[serde(default)]
    pub chain: Vec<String>,
    /// Animation elements present on the page.
    #[serde(default)]
    pub elements: Vec<AnimationElementDef>,
}

/// A declarative animation element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimationElementDef {
    /// Element id.
    pub id: String,
    /// Raw clock value (`"1.2s"`, `"800ms"`, ...).
    #[serde(default)]
    pub dur: Option<String>,
    /// Whether the element supports an imperative begin.
    #[serde(default = "default_true")]
    pub begin: bool,
}

/// How the surrounding environment behaves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvironmentDef {
    /// Whether music may start without a prior user gesture.
    #[serde(default = "default_true")]
    pub autoplay_allowed: bool,
    /// Whether the animation engine dispatches native end events.
    #[serde(default)]
    pub native_end_events: bool,
    /// Delay from balloon launch to the balloon module's completion broadcast. `None` means the
    /// module never reports and completion must be injected.
    #[serde(default)]
    pub balloons_finish_after_ms: Option<u64>,
}

impl Default for EnvironmentDef {
    fn default() -> Self {
        Self {
            autoplay_allowed: true,
            native_end_events: false,
            balloons_finish_after_ms: None,
        }
    }
}
