use crate::foundation::error::{FestoonError, FestoonResult};
use std::fmt;

/// The fixed set of scenes a presentation can show.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum SceneId {
    /// Opening scene filled with rising hearts.
    Intro,
    /// Balloon release, drawn by the external balloon module.
    Balloons,
    /// Cake build-up animation.
    Cake,
    /// Final scene with the gifts call-to-action.
    Gifts,
}

impl SceneId {
    /// Every scene, in presentation order.
    pub const ALL: [SceneId; 4] = [
        SceneId::Intro,
        SceneId::Balloons,
        SceneId::Cake,
        SceneId::Gifts,
    ];

    /// Stable kebab-case name.
    pub fn name(self) -> &'static str {
        match self {
            SceneId::Intro => "intro",
            SceneId::Balloons => "balloons",
            SceneId::Cake => "cake",
            SceneId::Gifts => "gifts",
        }
    }
}

impl fmt::Display for SceneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Visibility state of one registered scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct Scene {
    /// Which scene this is.
    pub id: SceneId,
    /// Whether the scene is the visible one.
    pub active: bool,
    /// Whether the scene is fading out (still active until the next switch).
    pub leaving: bool,
}

/// Exclusive-visibility controller over the registered scenes.
///
/// Invariant: at most one scene is active, and once any scene has been shown exactly one is.
#[derive(Clone, Debug)]
pub struct SceneSwitcher {
    scenes: Vec<Scene>,
}

impl SceneSwitcher {
    /// Register a fixed set of scenes, all initially inactive.
    pub fn new(ids: impl IntoIterator<Item = SceneId>) -> FestoonResult<Self> {
        let mut scenes: Vec<Scene> = Vec::new();
        for id in ids {
            if scenes.iter().any(|s| s.id == id) {
                return Err(FestoonError::validation(format!(
                    "scene '{id}' registered twice"
                )));
            }
            scenes.push(Scene {
                id,
                active: false,
                leaving: false,
            });
        }
        Ok(Self { scenes })
    }

    /// Return `true` when `id` is one of the registered scenes.
    pub fn is_registered(&self, id: SceneId) -> bool {
        self.scenes.iter().any(|s| s.id == id)
    }

    /// Deactivate every scene and activate exactly `id`.
    ///
    /// Fails without touching any scene when `id` is not registered.
    pub fn show_scene(&mut self, id: SceneId) -> FestoonResult<()> {
        if !self.is_registered(id) {
            return Err(FestoonError::stage(format!("scene '{id}' is not registered")));
        }
        for s in &mut self.scenes {
            s.active = s.id == id;
            s.leaving = false;
        }
        Ok(())
    }

    /// Mark the active scene `id` as leaving. Returns `false` if `id` is not the active scene.
    pub fn begin_leave(&mut self, id: SceneId) -> bool {
        match self.scenes.iter_mut().find(|s| s.id == id && s.active) {
            Some(s) => {
                s.leaving = true;
                true
            }
            None => false,
        }
    }

    /// The active scene, if any has been shown yet.
    pub fn active(&self) -> Option<SceneId> {
        self.scenes.iter().find(|s| s.active).map(|s| s.id)
    }

    /// Number of active scenes (0 before the first switch, 1 afterwards).
    pub fn active_count(&self) -> usize {
        self.scenes.iter().filter(|s| s.active).count()
    }

    /// Return `true` when `id` is registered and fading out.
    pub fn is_leaving(&self, id: SceneId) -> bool {
        self.scenes.iter().any(|s| s.id == id && s.leaving)
    }

    /// All registered scenes in registration order.
    pub fn scenes(&self) -> &[Scene] {
        &self.scenes
    }
}

#[cfg(test)]
#[path = "../../tests/unit/stage/scene.rs"]
mod tests;
