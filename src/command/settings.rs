use std::path::Path;

use serde::Deserialize;

use crate::error::{Result, SceneError};

/// Names the hole placement looks for in the open documents.
///
/// Missing fields in a settings file fall back to [`HoleSettings::default`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct HoleSettings {
    /// Substring identifying the document that holds ducts and pipes.
    pub source_title_marker: String,
    /// Family name of the hole family in the active document.
    pub family_name: String,
    /// Instance parameter receiving the hole width.
    pub width_parameter: String,
    /// Instance parameter receiving the hole height.
    pub height_parameter: String,
}

impl Default for HoleSettings {
    fn default() -> Self {
        Self {
            source_title_marker: "ОВ".to_owned(),
            family_name: "Отверстие".to_owned(),
            width_parameter: "Ширина".to_owned(),
            height_parameter: "Высота".to_owned(),
        }
    }
}

impl HoleSettings {
    /// Parses settings from JSON text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a valid settings object.
    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text).map_err(SceneError::from)?)
    }

    /// Reads settings from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| SceneError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&text)
    }
}
