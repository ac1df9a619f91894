/// Convenience result type used across festoon.
pub type FestoonResult<T> = Result<T, FestoonError>;

/// Top-level error taxonomy used by festoon APIs.
///
/// The sequencing core never surfaces these while a presentation is running; they are returned
/// at the boundaries (loading a show, building a presentation, explicit stage operations).
#[derive(thiserror::Error, Debug)]
pub enum FestoonError {
    /// Invalid user-provided show data.
    #[error("validation error: {0}")]
    Validation(String),

    /// A stage operation referenced something the stage does not have.
    #[error("stage error: {0}")]
    Stage(String),

    /// The media collaborator refused or failed a playback request.
    #[error("playback error: {0}")]
    Playback(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl FestoonError {
    /// Build a [`FestoonError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`FestoonError::Stage`] value.
    pub fn stage(msg: impl Into<String>) -> Self {
        Self::Stage(msg.into())
    }

    /// Build a [`FestoonError::Playback`] value.
    pub fn playback(msg: impl Into<String>) -> Self {
        Self::Playback(msg.into())
    }

    /// Build a [`FestoonError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
