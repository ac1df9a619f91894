/// Visibility of the letter modal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModalState {
    /// Not shown.
    #[default]
    Hidden,
    /// Shown over the gifts scene.
    Visible,
}

/// The letter dialog shown at the end of the presentation.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct LetterModal {
    state: ModalState,
    aria_hidden: bool,
    inner_focusable: bool,
}

impl LetterModal {
    /// Hidden modal; `inner_focusable` says whether its content region can take focus.
    pub fn new(inner_focusable: bool) -> Self {
        Self {
            state: ModalState::Hidden,
            aria_hidden: true,
            inner_focusable,
        }
    }

    /// Current visibility.
    pub fn state(&self) -> ModalState {
        self.state
    }

    /// Accessibility-hidden attribute; mirrors the visibility.
    pub fn aria_hidden(&self) -> bool {
        self.aria_hidden
    }

    /// Whether the inner content region accepts focus.
    pub fn inner_focusable(&self) -> bool {
        self.inner_focusable
    }

    /// Show the modal. Returns `true` if it was hidden.
    pub fn open(&mut self) -> bool {
        let changed = self.state != ModalState::Visible;
        self.state = ModalState::Visible;
        self.aria_hidden = false;
        changed
    }

    /// Hide the modal. Safe to call when already hidden; returns `true` if it was visible.
    pub fn close(&mut self) -> bool {
        let changed = self.state != ModalState::Hidden;
        self.state = ModalState::Hidden;
        self.aria_hidden = true;
        changed
    }
}
