use std::fmt;

/// Interactive controls the sequencer knows about.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum ControlId {
    /// "See your gifts" call-to-action; opens the letter.
    SeeGifts,
    /// Call-to-action overlaid on the balloon scene.
    BalloonCta,
    /// Background music play/pause toggle.
    MusicToggle,
    /// Close button inside the letter modal.
    LetterClose,
    /// "Close & celebrate" button inside the letter modal.
    OpenGift,
}

impl ControlId {
    /// Every control.
    pub const ALL: [ControlId; 5] = [
        ControlId::SeeGifts,
        ControlId::BalloonCta,
        ControlId::MusicToggle,
        ControlId::LetterClose,
        ControlId::OpenGift,
    ];

    /// Stable kebab-case name.
    pub fn name(self) -> &'static str {
        match self {
            ControlId::SeeGifts => "see-gifts",
            ControlId::BalloonCta => "balloon-cta",
            ControlId::MusicToggle => "music-toggle",
            ControlId::LetterClose => "letter-close",
            ControlId::OpenGift => "open-gift",
        }
    }

    /// Parse a kebab-case control name.
    pub fn from_name(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.name() == s)
    }

    /// Whether the control starts hidden in the page markup.
    pub fn hidden_in_markup(self) -> bool {
        matches!(self, ControlId::SeeGifts | ControlId::BalloonCta)
    }
}

impl fmt::Display for ControlId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Runtime state of one control.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct Control {
    /// Which control this is.
    pub id: ControlId,
    /// Hidden controls cannot take focus.
    pub hidden: bool,
    /// Whether the control accepts focus at all.
    pub focusable: bool,
    /// Visible text, for controls whose label changes (music toggle).
    pub label: Option<String>,
}

impl Control {
    /// Control in its markup state.
    pub fn new(id: ControlId, focusable: bool) -> Self {
        Self {
            id,
            hidden: id.hidden_in_markup(),
            focusable,
            label: None,
        }
    }
}
