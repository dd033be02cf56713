pub mod config;
pub mod day;
pub mod doctor;
pub mod init;
pub mod new;
pub mod templates;
pub mod week;
pub mod zet;

use chrono::{Days, Local, NaiveDate};
use exo_core::config::loader::{default_config_path, ConfigLoader};
use exo_core::config::types::ResolvedConfig;
use exo_core::templates::{DeadlineRenderer, TemplateRepository};
use exo_core::{FsStorage, Note, NoteDeps, PeriodicNote};
use std::error::Error;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use crate::logging;

/// How long a template may take before note creation gives up.
pub const RENDER_TIMEOUT: Duration = Duration::from_secs(5);

/// Print `FAIL exo <cmd>` with the error chain and exit with status 1.
pub fn fail(cmd: &str, err: &dyn Error) -> ! {
    println!("FAIL exo {cmd}");
    println!("{err}");
    let mut source = err.source();
    while let Some(cause) = source {
        println!("  caused by: {cause}");
        source = cause.source();
    }
    logging::flush();
    std::process::exit(1);
}

pub fn load_config(config: Option<&Path>, profile: Option<&str>, cmd: &str) -> ResolvedConfig {
    match ConfigLoader::load(config, profile) {
        Ok(rc) => rc,
        Err(e) => {
            println!("FAIL exo {cmd}");
            println!("{e}");
            if config.is_none() {
                println!("looked for: {}", default_config_path().display());
            }
            std::process::exit(1);
        }
    }
}

/// Note dependencies for the command line: real filesystem, templates from
/// the configured directory with built-in fallbacks, bounded render time.
pub fn build_deps(rc: ResolvedConfig) -> NoteDeps {
    let repo = TemplateRepository::new(&rc.templates_dir);
    let renderer = DeadlineRenderer::new(Arc::new(repo), RENDER_TIMEOUT);
    NoteDeps::new(Arc::new(rc), Arc::new(renderer), Arc::new(FsStorage::new()))
}

/// `today`, `yesterday`, `tomorrow` or `YYYY-MM-DD`.
pub fn parse_date_arg(s: &str) -> Result<NaiveDate, String> {
    resolve_date(s, Local::now().date_naive())
}

fn resolve_date(s: &str, today: NaiveDate) -> Result<NaiveDate, String> {
    let out_of_range = || format!("date out of range: {s}");
    match s.trim().to_lowercase().as_str() {
        "today" => Ok(today),
        "yesterday" => today.checked_sub_days(Days::new(1)).ok_or_else(out_of_range),
        "tomorrow" => today.checked_add_days(Days::new(1)).ok_or_else(out_of_range),
        other => NaiveDate::parse_from_str(other, "%Y-%m-%d")
            .map_err(|_| format!("expected today, yesterday, tomorrow or YYYY-MM-DD, got '{s}'")),
    }
}

pub fn report(cmd: &str, initialized: bool, path: &Path) {
    println!("OK   exo {cmd}");
    let verb = if initialized { "created" } else { "opened" };
    println!("{verb}: {}", path.display());
}

pub fn open_note(cmd: &str, note: &Note, no_edit: bool) {
    if no_edit {
        return;
    }
    if let Err(e) = note.open() {
        fail(cmd, &e);
    }
}

pub fn open_periodic(cmd: &str, note: &PeriodicNote, no_edit: bool) {
    if no_edit {
        return;
    }
    if let Err(e) = note.open() {
        fail(cmd, &e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_resolve_date_keywords() {
        let today = d("2025-03-01");
        assert_eq!(resolve_date("today", today).unwrap(), today);
        assert_eq!(resolve_date("Yesterday", today).unwrap(), d("2025-02-28"));
        assert_eq!(resolve_date("tomorrow", today).unwrap(), d("2025-03-02"));
    }

    #[test]
    fn test_resolve_date_explicit() {
        let today = d("2025-03-01");
        assert_eq!(resolve_date("2024-02-29", today).unwrap(), d("2024-02-29"));
        assert!(resolve_date("2025-02-30", today).is_err());
        assert!(resolve_date("next week", today).is_err());
    }
}
