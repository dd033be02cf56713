//! Reading and changing single configuration values by key.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use super::loader::ConfigError;
use super::types::{ConfigFile, GeneralConfig, LoggingConfig, Profile, ResolvedConfig};

const LOG_LEVELS: [&str; 6] = ["off", "error", "warn", "info", "debug", "trace"];

/// A setting addressable from `exo config get/set`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKey {
    Editor,
    DataHome,
    TemplatesDir,
    PeriodicDir,
    ZettelDir,
    LogLevel,
    LogFileLevel,
    LogFile,
}

impl ConfigKey {
    pub const ALL: [ConfigKey; 8] = [
        ConfigKey::Editor,
        ConfigKey::DataHome,
        ConfigKey::TemplatesDir,
        ConfigKey::PeriodicDir,
        ConfigKey::ZettelDir,
        ConfigKey::LogLevel,
        ConfigKey::LogFileLevel,
        ConfigKey::LogFile,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ConfigKey::Editor => "editor",
            ConfigKey::DataHome => "data_home",
            ConfigKey::TemplatesDir => "templates_dir",
            ConfigKey::PeriodicDir => "periodic_dir",
            ConfigKey::ZettelDir => "zettel_dir",
            ConfigKey::LogLevel => "log.level",
            ConfigKey::LogFileLevel => "log.file_level",
            ConfigKey::LogFile => "log.file",
        }
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConfigKey {
    type Err = ConfigError;

    /// Case-insensitive; accepts the underscore-free spellings too.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = match s.trim().to_lowercase().as_str() {
            "editor" => ConfigKey::Editor,
            "data_home" | "datahome" => ConfigKey::DataHome,
            "templates_dir" | "template_dir" | "templatesdir" | "templatedir" => {
                ConfigKey::TemplatesDir
            }
            "periodic_dir" | "periodicdir" => ConfigKey::PeriodicDir,
            "zettel_dir" | "zetteldir" => ConfigKey::ZettelDir,
            "log.level" | "logging.level" | "loglevel" => ConfigKey::LogLevel,
            "log.file_level" | "logging.file_level" | "logfilelevel" => ConfigKey::LogFileLevel,
            "log.file" | "logging.file" | "logfile" => ConfigKey::LogFile,
            _ => return Err(ConfigError::UnknownKey(s.to_string())),
        };
        Ok(key)
    }
}

impl ResolvedConfig {
    /// The effective value of `key`, or `None` for an unset optional setting.
    pub fn get(&self, key: ConfigKey) -> Option<String> {
        match key {
            ConfigKey::Editor => Some(self.editor.clone()),
            ConfigKey::DataHome => Some(self.data_home.display().to_string()),
            ConfigKey::TemplatesDir => Some(self.templates_dir.display().to_string()),
            ConfigKey::PeriodicDir => Some(self.periodic_subdir.clone()),
            ConfigKey::ZettelDir => Some(self.zettel_subdir.clone()),
            ConfigKey::LogLevel => Some(self.logging.level.clone()),
            ConfigKey::LogFileLevel => self.logging.file_level.clone(),
            ConfigKey::LogFile => self.logging.file.as_ref().map(|p| p.display().to_string()),
        }
    }
}

impl ConfigFile {
    /// A version 1 file with a single profile, selected by default.
    pub fn new(profile: &str, data_home: &str) -> Self {
        let mut profiles = BTreeMap::new();
        profiles.insert(
            profile.to_string(),
            Profile { data_home: data_home.to_string(), ..Default::default() },
        );
        Self {
            version: 1,
            profile: Some(profile.to_string()),
            profiles,
            general: GeneralConfig::default(),
            logging: LoggingConfig::default(),
        }
    }

    /// Store `value` under `key`. Directory keys go to `profile`, the rest to
    /// the shared `[general]` and `[logging]` tables.
    pub fn set(&mut self, profile: &str, key: ConfigKey, value: &str) -> Result<(), ConfigError> {
        let value = value.trim();
        if value.is_empty() {
            return Err(ConfigError::InvalidValue { key: key.as_str(), value: value.into() });
        }

        match key {
            ConfigKey::Editor => self.general.editor = Some(value.into()),
            ConfigKey::LogLevel => self.logging.level = log_level(key, value)?,
            ConfigKey::LogFileLevel => self.logging.file_level = Some(log_level(key, value)?),
            ConfigKey::LogFile => self.logging.file = Some(PathBuf::from(value)),
            ConfigKey::DataHome => self.profile_mut(profile)?.data_home = value.into(),
            ConfigKey::TemplatesDir => {
                self.profile_mut(profile)?.templates_dir = Some(value.into());
            }
            ConfigKey::PeriodicDir => self.profile_mut(profile)?.periodic_dir = Some(value.into()),
            ConfigKey::ZettelDir => self.profile_mut(profile)?.zettel_dir = Some(value.into()),
        }
        Ok(())
    }

    fn profile_mut(&mut self, name: &str) -> Result<&mut Profile, ConfigError> {
        self.profiles
            .get_mut(name)
            .ok_or_else(|| ConfigError::ProfileNotFound(name.to_string()))
    }
}

fn log_level(key: ConfigKey, value: &str) -> Result<String, ConfigError> {
    let level = value.to_lowercase();
    if LOG_LEVELS.contains(&level.as_str()) {
        Ok(level)
    } else {
        Err(ConfigError::InvalidValue { key: key.as_str(), value: value.to_string() })
    }
}
