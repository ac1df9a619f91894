//! In-memory model of the page the sequencer drives.
//!
//! The stage is the narrow interface to everything visual: scene visibility, controls and
//! focus, the letter modal, declarative animation elements, and the balloon rendering surface.
//! Sequencing code mutates it; nothing here schedules time.

/// Declarative animation elements and fallback deadline computation.
pub mod animation;
/// Interactive controls.
pub mod control;
/// Letter modal.
pub mod modal;
/// Scene registry and exclusive switching.
pub mod scene;

use crate::foundation::error::{FestoonError, FestoonResult};
use crate::show::model::StageDef;
use animation::{AnimationChain, AnimationElement};
use control::{Control, ControlId};
use modal::LetterModal;
use scene::{SceneId, SceneSwitcher};
use std::collections::BTreeMap;

/// Id given to the balloon rendering surface.
pub const BALLOON_SURFACE_ID: &str = "balloon-canvas";

/// Where the balloon surface sits inside the balloon scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SurfacePlacement {
    /// Inserted first, behind the call-to-action overlay so the overlay stays clickable.
    BehindOverlay,
    /// Appended at the end of the scene.
    Appended,
}

/// Rendering surface handed to the balloon module.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct Surface {
    /// Surface id.
    pub id: String,
    /// Position in the balloon scene.
    pub placement: SurfacePlacement,
}

/// What currently holds input focus.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FocusTarget {
    /// A control.
    Control(ControlId),
    /// The letter modal's content region.
    LetterInner,
}

/// The page model.
#[derive(Clone, Debug)]
pub struct Stage {
    scenes: SceneSwitcher,
    controls: BTreeMap<ControlId, Control>,
    focus: Option<FocusTarget>,
    modal: Option<LetterModal>,
    animations: BTreeMap<String, AnimationElement>,
    chain: AnimationChain,
    hearts_container: bool,
    balloon_surface: Option<Surface>,
}

impl Stage {
    /// Build the initial page state from its definition.
    pub fn from_def(def: &StageDef) -> FestoonResult<Self> {
        let scenes = SceneSwitcher::new(def.scenes.iter().copied())?;

        let mut controls = BTreeMap::new();
        for c in &def.controls {
            if controls
                .insert(c.id, Control::new(c.id, c.focusable))
                .is_some()
            {
                return Err(FestoonError::validation(format!(
                    "control '{}' declared twice",
                    c.id
                )));
            }
        }

        let mut animations = BTreeMap::new();
        for a in &def.cake.elements {
            let el = AnimationElement::new(a.id.clone(), a.dur.clone(), a.begin);
            if animations.insert(a.id.clone(), el).is_some() {
                return Err(FestoonError::validation(format!(
                    "animation '{}' declared twice",
                    a.id
                )));
            }
        }

        Ok(Self {
            scenes,
            controls,
            focus: None,
            modal: def.modal.map(|m| LetterModal::new(m.inner_focusable)),
            animations,
            chain: AnimationChain::new(def.cake.chain.iter().cloned()),
            hearts_container: def.hearts_container,
            balloon_surface: None,
        })
    }

    /// Scene registry.
    pub fn scenes(&self) -> &SceneSwitcher {
        &self.scenes
    }

    /// Mutable scene registry.
    pub fn scenes_mut(&mut self) -> &mut SceneSwitcher {
        &mut self.scenes
    }

    /// Look up a control.
    pub fn control(&self, id: ControlId) -> Option<&Control> {
        self.controls.get(&id)
    }

    /// Every control on the page.
    pub fn controls(&self) -> impl Iterator<Item = &Control> {
        self.controls.values()
    }

    /// Set a control's hidden flag. Returns `false` when the control is not on the page.
    ///
    /// Hiding the focused control drops focus.
    pub fn set_hidden(&mut self, id: ControlId, hidden: bool) -> bool {
        let Some(c) = self.controls.get_mut(&id) else {
            return false;
        };
        c.hidden = hidden;
        if hidden && self.focus == Some(FocusTarget::Control(id)) {
            self.focus = None;
        }
        true
    }

    /// Replace a control's label. Returns `false` when the control is not on the page.
    pub fn set_label(&mut self, id: ControlId, label: impl Into<String>) -> bool {
        let Some(c) = self.controls.get_mut(&id) else {
            return false;
        };
        c.label = Some(label.into());
        true
    }

    /// Move focus to a control.
    pub fn focus_control(&mut self, id: ControlId) -> FestoonResult<()> {
        let c = self
            .controls
            .get(&id)
            .ok_or_else(|| FestoonError::stage(format!("control '{id}' is not on the page")))?;
        if c.hidden {
            return Err(FestoonError::stage(format!("control '{id}' is hidden")));
        }
        if !c.focusable {
            return Err(FestoonError::stage(format!("control '{id}' is not focusable")));
        }
        self.focus = Some(FocusTarget::Control(id));
        Ok(())
    }

    /// Move focus into the visible letter modal.
    pub fn focus_letter_inner(&mut self) -> FestoonResult<()> {
        let m = self
            .modal
            .as_ref()
            .ok_or_else(|| FestoonError::stage("letter modal is not on the page"))?;
        if m.state() != modal::ModalState::Visible {
            return Err(FestoonError::stage("letter modal is hidden"));
        }
        if !m.inner_focusable() {
            return Err(FestoonError::stage("letter content is not focusable"));
        }
        self.focus = Some(FocusTarget::LetterInner);
        Ok(())
    }

    /// Current focus holder.
    pub fn focused(&self) -> Option<FocusTarget> {
        self.focus
    }

    /// The letter modal, if the page has one.
    pub fn modal(&self) -> Option<&LetterModal> {
        self.modal.as_ref()
    }

    /// Mutable letter modal, if the page has one.
    ///
    /// Closing the modal through here does not move focus; callers own that.
    pub fn modal_mut(&mut self) -> Option<&mut LetterModal> {
        self.modal.as_mut()
    }

    /// Drop focus if it is inside the modal.
    pub fn blur_letter(&mut self) {
        if self.focus == Some(FocusTarget::LetterInner) {
            self.focus = None;
        }
    }

    /// Look up an animation element by id.
    pub fn animation(&self, id: &str) -> Option<&AnimationElement> {
        self.animations.get(id)
    }

    /// Mutable animation element by id.
    pub fn animation_mut(&mut self, id: &str) -> Option<&mut AnimationElement> {
        self.animations.get_mut(id)
    }

    /// Every animation element keyed by id.
    pub fn animations(&self) -> &BTreeMap<String, AnimationElement> {
        &self.animations
    }

    /// The cake animation chain.
    pub fn chain(&self) -> &AnimationChain {
        &self.chain
    }

    /// Whether the intro scene has a container for hearts.
    pub fn has_hearts_container(&self) -> bool {
        self.hearts_container
    }

    /// The balloon surface, once created.
    pub fn balloon_surface(&self) -> Option<&Surface> {
        self.balloon_surface.as_ref()
    }

    /// Create the balloon surface if it does not exist yet. Returns `true` if it was created.
    pub fn ensure_balloon_surface(&mut self) -> FestoonResult<bool> {
        if self.balloon_surface.is_some() {
            return Ok(false);
        }
        if !self.scenes.is_registered(SceneId::Balloons) {
            return Err(FestoonError::stage(
                "balloon surface needs a 'balloons' scene",
            ));
        }
        let placement = if self.controls.contains_key(&ControlId::BalloonCta) {
            SurfacePlacement::BehindOverlay
        } else {
            SurfacePlacement::Appended
        };
        self.balloon_surface = Some(Surface {
            id: BALLOON_SURFACE_ID.to_owned(),
            placement,
        });
        Ok(true)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/stage/stage.rs"]
mod tests;
