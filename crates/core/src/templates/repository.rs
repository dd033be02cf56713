use std::fs;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use serde_json::Value;
use tracing::{debug, error};

use super::builtin;
use super::discovery::{TemplateDiscoveryError, discover_templates};
use super::engine::{context_from_value, render_strict};
use super::renderer::{TemplateError, TemplateRenderer};

pub const TEMPLATE_EXTENSION: &str = "md";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateSource {
    /// A file under the templates directory.
    Custom(PathBuf),
    /// Compiled into the binary.
    Builtin,
}

#[derive(Debug, Clone)]
pub struct LoadedTemplate {
    pub logical_name: String,
    pub source: TemplateSource,
    pub body: String,
}

/// Looks templates up by logical name, preferring files under `root` over
/// the built-in defaults.
pub struct TemplateRepository {
    pub root: PathBuf,
}

impl TemplateRepository {
    pub fn new(root: &Path) -> Self {
        Self { root: root.to_path_buf() }
    }

    /// Every available template name with its source, sorted by name.
    pub fn list_all(&self) -> Result<Vec<(String, TemplateSource)>, TemplateDiscoveryError> {
        let custom = match discover_templates(&self.root) {
            Ok(list) => list,
            Err(TemplateDiscoveryError::MissingDir(_)) => Vec::new(),
            Err(e) => return Err(e),
        };

        let mut all: Vec<(String, TemplateSource)> = custom
            .into_iter()
            .map(|t| (t.logical_name, TemplateSource::Custom(t.path)))
            .collect();

        for name in builtin::names() {
            if !all.iter().any(|(n, _)| n == name) {
                all.push((name.to_string(), TemplateSource::Builtin));
            }
        }

        all.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(all)
    }

    pub fn path_for(&self, name: &str) -> PathBuf {
        self.root.join(format!("{name}.{TEMPLATE_EXTENSION}"))
    }

    pub fn get_by_name(&self, name: &str) -> Result<LoadedTemplate, TemplateError> {
        validate_template_name(name)?;

        let path = self.path_for(name);
        match fs::read_to_string(&path) {
            Ok(body) => {
                return Ok(LoadedTemplate {
                    logical_name: name.to_string(),
                    source: TemplateSource::Custom(path),
                    body,
                });
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => return Err(TemplateError::Io { path, source: e }),
        }

        builtin::get(name)
            .map(|body| LoadedTemplate {
                logical_name: name.to_string(),
                source: TemplateSource::Builtin,
                body: body.to_string(),
            })
            .ok_or_else(|| TemplateError::NotFound(name.to_string()))
    }
}

impl TemplateRenderer for TemplateRepository {
    fn render(&self, name: &str, data: &Value) -> Result<String, TemplateError> {
        debug!(template = name, root = %self.root.display(), "rendering template");

        let template = self.get_by_name(name).inspect_err(|e| {
            error!(template = name, error = %e, "failed to load template");
        })?;

        let render_err =
            |source| TemplateError::Render { name: name.to_string(), source };
        let ctx = context_from_value(data).map_err(render_err)?;
        let rendered = render_strict(&template.body, &ctx).map_err(render_err)?;

        debug!(template = name, source = ?template.source, "template rendered");
        Ok(rendered)
    }
}

/// Logical names are relative, slash-separated and stay inside the root.
fn validate_template_name(name: &str) -> Result<(), TemplateError> {
    let invalid = || TemplateError::InvalidName(name.to_string());
    if name.trim().is_empty() {
        return Err(invalid());
    }
    let path = Path::new(name);
    if path.components().any(|c| !matches!(c, Component::Normal(_))) {
        return Err(invalid());
    }
    Ok(())
}
