use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct ConfigFile {
    pub version: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,
    pub profiles: BTreeMap<String, Profile>,
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Profile {
    pub data_home: String,
    /// Defaults to `{{data_home}}/templates`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub templates_dir: Option<String>,
    /// Subdirectory of `data_home` holding periodic notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub periodic_dir: Option<String>,
    /// Subdirectory of `data_home` holding zettel notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zettel_dir: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Default, Clone)]
pub struct GeneralConfig {
    /// Editor command; may carry arguments (e.g. `code --wait`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub editor: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_level: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: default_log_level(), file_level: None, file: None }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}

pub const DEFAULT_PERIODIC_DIR: &str = "periodic";
pub const DEFAULT_ZETTEL_DIR: &str = "0-inbox";

/// Configuration after profile selection, expansion and defaulting.
///
/// Every path here is absolute; the note layer never expands or validates
/// paths on its own.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub active_profile: String,
    pub data_home: PathBuf,
    pub templates_dir: PathBuf,
    /// Relative to `data_home`.
    pub periodic_subdir: String,
    /// Relative to `data_home`.
    pub zettel_subdir: String,
    pub editor: String,
    pub logging: LoggingConfig,
}

impl ResolvedConfig {
    pub fn periodic_dir(&self) -> PathBuf {
        self.data_home.join(&self.periodic_subdir)
    }

    pub fn zettel_dir(&self) -> PathBuf {
        self.data_home.join(&self.zettel_subdir)
    }

    /// Build a config rooted at `data_home` with every other value defaulted.
    pub fn with_data_home(data_home: impl Into<PathBuf>) -> Self {
        let data_home = data_home.into();
        Self {
            active_profile: "default".into(),
            templates_dir: data_home.join("templates"),
            data_home,
            periodic_subdir: DEFAULT_PERIODIC_DIR.into(),
            zettel_subdir: DEFAULT_ZETTEL_DIR.into(),
            editor: "vim".into(),
            logging: LoggingConfig::default(),
        }
    }
}
