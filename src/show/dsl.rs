use crate::foundation::error::FestoonResult;
use crate::show::Show;
use crate::show::model::{
    AnimationElementDef, CakeDef, ControlDef, EnvironmentDef, ModalDef, SHOW_VERSION, ShowDef,
    StageDef,
};
use crate::stage::control::ControlId;
use crate::stage::scene::SceneId;

/// Builder for [`Show`].
///
/// Starts from the bare minimum (intro and balloon scenes, no controls) so tests can add exactly
/// the markup they care about.
#[derive(Debug, Clone)]
pub struct ShowBuilder {
    seed: u64,
    scenes: Vec<SceneId>,
    controls: Vec<ControlDef>,
    modal: Option<ModalDef>,
    hearts_container: bool,
    chain: Vec<String>,
    elements: Vec<AnimationElementDef>,
    environment: EnvironmentDef,
}

impl Default for ShowBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ShowBuilder {
    /// Builder with intro and balloon scenes and a hearts container.
    pub fn new() -> Self {
        Self {
            seed: 0,
            scenes: vec![SceneId::Intro, SceneId::Balloons],
            controls: Vec::new(),
            modal: None,
            hearts_container: true,
            chain: Vec::new(),
            elements: Vec::new(),
            environment: EnvironmentDef::default(),
        }
    }

    /// Builder for the full birthday layout: every scene and control, a modal, and a five-step
    /// cake chain with the given per-element durations (in chain order).
    pub fn full(durations: [&str; 5]) -> Self {
        let ids = ["sponge-1", "filling-1", "sponge-2", "sponge-3", "frosting"];
        let mut b = Self::new()
            .scene(SceneId::Cake)
            .scene(SceneId::Gifts)
            .modal(ModalDef::default());
        for c in ControlId::ALL {
            b = b.control(c);
        }
        b = b.chain(ids);
        for (id, dur) in ids.into_iter().zip(durations) {
            b = b.element(id, Some(dur));
        }
        b
    }

    /// Set the decorative randomness seed.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Register another scene.
    pub fn scene(mut self, id: SceneId) -> Self {
        self.scenes.push(id);
        self
    }

    /// Drop a scene (e.g. to build a layout without a cake).
    pub fn without_scene(mut self, id: SceneId) -> Self {
        self.scenes.retain(|s| *s != id);
        self
    }

    /// Add a focusable control.
    pub fn control(mut self, id: ControlId) -> Self {
        self.controls.push(ControlDef::new(id));
        self
    }

    /// Add a control that never accepts focus.
    pub fn unfocusable_control(mut self, id: ControlId) -> Self {
        self.controls.push(ControlDef {
            id,
            focusable: false,
        });
        self
    }

    /// Remove a control.
    pub fn without_control(mut self, id: ControlId) -> Self {
        self.controls.retain(|c| c.id != id);
        self
    }

    /// Add the letter modal.
    pub fn modal(mut self, modal: ModalDef) -> Self {
        self.modal = Some(modal);
        self
    }

    /// Remove the letter modal.
    pub fn without_modal(mut self) -> Self {
        self.modal = None;
        self
    }

    /// Toggle the hearts container.
    pub fn hearts_container(mut self, present: bool) -> Self {
        self.hearts_container = present;
        self
    }

    /// Set the cake chain ids.
    pub fn chain<S: Into<String>>(mut self, ids: impl IntoIterator<Item = S>) -> Self {
        self.chain = ids.into_iter().map(Into::into).collect();
        self
    }

    /// Add an animation element.
    pub fn element(mut self, id: impl Into<String>, dur: Option<&str>) -> Self {
        self.elements.push(AnimationElementDef {
            id: id.into(),
            dur: dur.map(str::to_owned),
            begin: true,
        });
        self
    }

    /// Remove an animation element.
    pub fn without_element(mut self, id: &str) -> Self {
        self.elements.retain(|e| e.id != id);
        self
    }

    /// Replace the environment.
    pub fn environment(mut self, env: EnvironmentDef) -> Self {
        self.environment = env;
        self
    }

    /// Whether music may start before a user gesture.
    pub fn autoplay_allowed(mut self, allowed: bool) -> Self {
        self.environment.autoplay_allowed = allowed;
        self
    }

    /// Whether the animation engine fires native end events.
    pub fn native_end_events(mut self, supported: bool) -> Self {
        self.environment.native_end_events = supported;
        self
    }

    /// Delay after launch at which the balloon module reports completion.
    pub fn balloons_finish_after_ms(mut self, ms: Option<u64>) -> Self {
        self.environment.balloons_finish_after_ms = ms;
        self
    }

    /// Build and validate the final [`Show`].
    pub fn build(self) -> FestoonResult<Show> {
        let show = Show::from_def(ShowDef {
            version: SHOW_VERSION.to_owned(),
            seed: self.seed,
            stage: StageDef {
                scenes: self.scenes,
                controls: self.controls,
                modal: self.modal,
                hearts_container: self.hearts_container,
                cake: CakeDef {
                    chain: self.chain,
                    elements: self.elements,
                },
            },
            environment: self.environment,
        });
        show.validate()?;
        Ok(show)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/show/dsl.rs"]
mod tests;
