//! # Config Snapshot
//!
//! The unit persisted remotely: four named sequences of strings, serialized
//! as a JSON object.
//!
//! ```json
//! {
//!   "settings": ["{", "  \"editor.tabSize\": 4", "}"],
//!   "keybindings": [],
//!   "locale": [],
//!   "extensions": ["rust-lang.rust-analyzer"]
//! }
//! ```
//!
//! Reading is lenient: missing keys or `null` values become empty sequences,
//! unknown keys are ignored. Writing always emits all four keys.

use crate::error::Result;
use crate::paths::UserFile;
use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigSnapshot {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub settings: Vec<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub keybindings: Vec<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub locale: Vec<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub extensions: Vec<String>,
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

impl ConfigSnapshot {
    pub fn to_persisted(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_persisted(body: &str) -> Result<Self> {
        Ok(serde_json::from_str(body)?)
    }

    pub fn slot(&self, file: UserFile) -> &[String] {
        match file {
            UserFile::Settings => &self.settings,
            UserFile::Keybindings => &self.keybindings,
            UserFile::Locale => &self.locale,
        }
    }
}
