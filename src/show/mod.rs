//! Show files: the JSON configuration boundary of a presentation.

/// Builder for programmatic show construction.
pub mod dsl;
/// Serde definitions.
pub mod model;
pub(crate) mod validate;

use crate::foundation::error::{FestoonError, FestoonResult};
use model::ShowDef;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use validate::validate_show;

/// A presentation definition as loaded from disk or built in code.
///
/// Parsing does not validate; call [`Show::validate`] (presentations do so on construction).
#[derive(Debug, Clone, PartialEq)]
pub struct Show {
    def: ShowDef,
}

impl Show {
    /// Parse a show from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> FestoonResult<Self> {
        let def: ShowDef = serde_json::from_reader(r)
            .map_err(|e| FestoonError::serde(format!("parse show JSON: {e}")))?;
        Ok(Self { def })
    }

    /// Parse a show from a JSON string.
    pub fn from_json_str(s: &str) -> FestoonResult<Self> {
        let def: ShowDef = serde_json::from_str(s)
            .map_err(|e| FestoonError::serde(format!("parse show JSON: {e}")))?;
        Ok(Self { def })
    }

    /// Parse a show from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> FestoonResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            FestoonError::validation(format!("open show JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Wrap an already-built definition.
    pub fn from_def(def: ShowDef) -> Self {
        Self { def }
    }

    /// Check the definition, reporting every problem at once.
    pub fn validate(&self) -> FestoonResult<()> {
        validate_show(&self.def)
            .map_err(|e| FestoonError::validation(format!("show validation failed: {e}")))
    }

    /// Serialize back to pretty JSON.
    pub fn to_json_pretty(&self) -> FestoonResult<String> {
        serde_json::to_string_pretty(&self.def)
            .map_err(|e| FestoonError::serde(format!("write show JSON: {e}")))
    }

    /// The underlying definition.
    pub fn def(&self) -> &ShowDef {
        &self.def
    }
}
