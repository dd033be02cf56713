use crate::config::settings::ConfigKey;
use crate::config::types::{
    ConfigFile, DEFAULT_PERIODIC_DIR, DEFAULT_ZETTEL_DIR, GeneralConfig, LoggingConfig,
    Profile, ResolvedConfig,
};
use shellexpand::full;
use std::path::{Component, Path, PathBuf};
use std::{env, fs};

use dirs::home_dir;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found at {0}")]
    NotFound(String),

    #[error("failed to read config file {0}: {1}")]
    ReadError(String, #[source] std::io::Error),

    #[error("failed to parse TOML in {0}: {1}")]
    ParseError(String, #[source] toml::de::Error),

    #[error("profile '{0}' not found")]
    ProfileNotFound(String),

    #[error("no profiles defined in config")]
    NoProfiles,

    #[error("version {0} is unsupported (expected 1)")]
    BadVersion(u32),

    #[error("home directory not available to expand '~'")]
    NoHome,

    #[error("{field} must be a subdirectory of data_home, got '{value}'")]
    InvalidSubdir { field: &'static str, value: String },

    #[error("editor command cannot be empty")]
    EmptyEditor,

    #[error("unknown configuration key '{0}'")]
    UnknownKey(String),

    #[error("invalid value '{value}' for {key}")]
    InvalidValue { key: &'static str, value: String },

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("failed to write config file {0}: {1}")]
    WriteError(String, #[source] std::io::Error),
}

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load and resolve the configuration.
    ///
    /// An explicit `config_path` must exist. Without one, the default location
    /// is tried and built-in defaults are used when nothing is there.
    pub fn load(
        config_path: Option<&Path>,
        profile_override: Option<&str>,
    ) -> Result<ResolvedConfig, ConfigError> {
        let path = match config_path {
            Some(p) => p.to_path_buf(),
            None => {
                let p = default_config_path();
                if !p.exists() {
                    tracing::debug!(path = %p.display(), "no config file, using defaults");
                    return Self::defaults(profile_override);
                }
                p
            }
        };

        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()));
        }

        let s = fs::read_to_string(&path)
            .map_err(|e| ConfigError::ReadError(path.display().to_string(), e))?;

        Self::from_toml_str(&s, &path.display().to_string(), profile_override)
    }

    /// Parse and resolve configuration text; `origin` is only used in errors.
    pub fn from_toml_str(
        s: &str,
        origin: &str,
        profile_override: Option<&str>,
    ) -> Result<ResolvedConfig, ConfigError> {
        let cf: ConfigFile = toml::from_str(s)
            .map_err(|e| ConfigError::ParseError(origin.to_string(), e))?;

        if cf.version != 1 {
            return Err(ConfigError::BadVersion(cf.version));
        }
        if cf.profiles.is_empty() {
            return Err(ConfigError::NoProfiles);
        }

        let active = profile_override
            .map(ToOwned::to_owned)
            .or(cf.profile.clone())
            .unwrap_or_else(|| "default".to_string());

        let prof = cf
            .profiles
            .get(&active)
            .ok_or_else(|| ConfigError::ProfileNotFound(active.clone()))?;

        Self::resolve_profile(&active, prof, &cf.general, &cf.logging)
    }

    /// Change one setting in the file at `path` and write it back.
    ///
    /// The profile touched is `current.active_profile`. A missing file is
    /// created with that profile rooted at `current.data_home`. The updated
    /// file is resolved before it is written, so an invalid value leaves the
    /// file as it was.
    pub fn set_value(
        path: &Path,
        key: ConfigKey,
        value: &str,
        current: &ResolvedConfig,
    ) -> Result<ResolvedConfig, ConfigError> {
        let origin = path.display().to_string();
        let active = current.active_profile.as_str();

        let mut cf = if path.exists() {
            let s = fs::read_to_string(path)
                .map_err(|e| ConfigError::ReadError(origin.clone(), e))?;
            toml::from_str(&s).map_err(|e| ConfigError::ParseError(origin.clone(), e))?
        } else {
            ConfigFile::new(active, &current.data_home.to_string_lossy())
        };

        cf.set(active, key, value)?;

        let text = toml::to_string_pretty(&cf)?;
        let resolved = Self::from_toml_str(&text, &origin, Some(active))?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::WriteError(origin.clone(), e))?;
        }
        fs::write(path, text).map_err(|e| ConfigError::WriteError(origin.clone(), e))?;

        tracing::info!(path = %path.display(), key = %key, "config updated");
        Ok(resolved)
    }

    fn defaults(profile_override: Option<&str>) -> Result<ResolvedConfig, ConfigError> {
        let active = profile_override.unwrap_or("default");
        let prof = Profile {
            data_home: default_data_home().to_string_lossy().to_string(),
            ..Default::default()
        };
        Self::resolve_profile(active, &prof, &GeneralConfig::default(), &LoggingConfig::default())
    }

    fn resolve_profile(
        active: &str,
        prof: &Profile,
        general: &GeneralConfig,
        log_cfg: &LoggingConfig,
    ) -> Result<ResolvedConfig, ConfigError> {
        let data_home = expand_path(&prof.data_home)?;
        let sub = |s: &str| s.replace("{{data_home}}", &data_home.to_string_lossy());

        let templates_dir = match &prof.templates_dir {
            Some(dir) => expand_path(&sub(dir))?,
            None => data_home.join("templates"),
        };

        let periodic_subdir =
            relative_subdir("periodic_dir", prof.periodic_dir.as_deref(), DEFAULT_PERIODIC_DIR)?;
        let zettel_subdir =
            relative_subdir("zettel_dir", prof.zettel_dir.as_deref(), DEFAULT_ZETTEL_DIR)?;

        let editor = resolve_editor(general.editor.as_deref(), |k| env::var(k).ok())?;

        // Resolve log file path if present
        let logging = if let Some(ref file) = log_cfg.file {
            let expanded_file = expand_path(&sub(&file.to_string_lossy()))?;
            LoggingConfig {
                level: log_cfg.level.clone(),
                file_level: log_cfg.file_level.clone(),
                file: Some(expanded_file),
            }
        } else {
            log_cfg.clone()
        };

        Ok(ResolvedConfig {
            active_profile: active.to_string(),
            data_home,
            templates_dir,
            periodic_subdir,
            zettel_subdir,
            editor,
            logging,
        })
    }
}

pub fn default_config_path() -> PathBuf {
    if let Ok(xdg) = env::var("XDG_CONFIG_HOME") {
        return Path::new(&xdg).join("exo").join("config.toml");
    }
    let home = home_dir().unwrap_or_else(|| PathBuf::from("~"));
    home.join(".config").join("exo").join("config.toml")
}

/// Default data home.
/// Priority: `$EXO_DATA_HOME`, `$XDG_DATA_HOME/exo`, `~/.local/share/exo`.
pub fn default_data_home() -> PathBuf {
    if let Ok(dir) = env::var("EXO_DATA_HOME")
        && !dir.is_empty()
    {
        return PathBuf::from(dir);
    }
    if let Ok(xdg) = env::var("XDG_DATA_HOME")
        && !xdg.is_empty()
    {
        return Path::new(&xdg).join("exo");
    }
    let home = home_dir().unwrap_or_else(|| PathBuf::from("~"));
    home.join(".local").join("share").join("exo")
}

fn relative_subdir(
    field: &'static str,
    value: Option<&str>,
    default: &str,
) -> Result<String, ConfigError> {
    let value = value.map(str::trim).filter(|v| !v.is_empty()).unwrap_or(default);
    if !Path::new(value).components().all(|c| matches!(c, Component::Normal(_))) {
        return Err(ConfigError::InvalidSubdir { field, value: value.to_string() });
    }
    Ok(value.trim_end_matches('/').to_string())
}

fn resolve_editor(
    configured: Option<&str>,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<String, ConfigError> {
    if let Some(editor) = configured {
        let editor = editor.trim();
        if editor.is_empty() {
            return Err(ConfigError::EmptyEditor);
        }
        return Ok(editor.to_string());
    }

    Ok(lookup("EDITOR")
        .filter(|e| !e.trim().is_empty())
        .or_else(|| lookup("VISUAL").filter(|e| !e.trim().is_empty()))
        .unwrap_or_else(|| "vim".to_string()))
}

/// Expand `~` and environment variables; relative results are anchored at home.
fn expand_path(input: &str) -> Result<PathBuf, ConfigError> {
    let expanded = full(input).map_err(|_| ConfigError::NoHome)?;
    let path = PathBuf::from(expanded.to_string());
    if path.is_absolute() {
        return Ok(path);
    }
    let home = home_dir().ok_or(ConfigError::NoHome)?;
    Ok(home.join(path))
}
