//! Dynamic shell completions backed by the user's configuration.

use clap_complete::engine::CompletionCandidate;
use exo_core::config::loader::ConfigLoader;
use exo_core::templates::{TemplateRepository, TemplateSource};
use std::ffi::OsStr;

/// Complete template names from the configured templates directory and the
/// built-in defaults.
pub fn complete_templates(current: &OsStr) -> Vec<CompletionCandidate> {
    let current_str = current.to_str().unwrap_or("");

    let Ok(cfg) = ConfigLoader::load(None, None) else {
        return Vec::new();
    };
    let Ok(all) = TemplateRepository::new(&cfg.templates_dir).list_all() else {
        return Vec::new();
    };

    all.into_iter()
        .filter(|(name, _)| name.starts_with(current_str))
        .map(|(name, source)| {
            let help = match source {
                TemplateSource::Custom(_) => "custom",
                TemplateSource::Builtin => "built-in",
            };
            CompletionCandidate::new(name).help(Some(help.into()))
        })
        .collect()
}
