//! Installing the built-in templates into a templates directory.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;
use tracing::info;

use super::builtin;
use super::renderer::TemplateError;

pub const BACKUP_EXTENSION: &str = "bak";

#[derive(Debug, Default)]
pub struct InstallReport {
    pub installed: Vec<PathBuf>,
    pub skipped: Vec<PathBuf>,
    pub backups: Vec<PathBuf>,
}

/// Write every built-in template into `target_dir`.
///
/// Missing files are written directly. An existing file is replaced only when
/// `force` is set or `confirm` returns true for its path, and is renamed to a
/// backup first.
pub fn install_defaults(
    target_dir: &Path,
    force: bool,
    mut confirm: impl FnMut(&Path) -> bool,
) -> Result<InstallReport, TemplateError> {
    let io_err = |path: &Path| {
        let path = path.to_path_buf();
        move |source| TemplateError::Io { path, source }
    };

    fs::create_dir_all(target_dir).map_err(io_err(target_dir))?;

    let mut report = InstallReport::default();
    for name in builtin::names() {
        let Some(body) = builtin::get(name) else {
            continue;
        };
        let dest = target_dir.join(format!("{name}.md"));

        if dest.exists() {
            if !force && !confirm(&dest) {
                report.skipped.push(dest);
                continue;
            }
            let backup = create_backup(&dest)?;
            report.backups.push(backup);
        }

        fs::write(&dest, body).map_err(io_err(&dest))?;
        info!(template = name, path = %dest.display(), "installed default template");
        report.installed.push(dest);
    }

    Ok(report)
}

/// Rename `path` to the first free name among `path.bak`,
/// `path.<timestamp>.bak`, `path.<timestamp>-1.bak`, ...
pub fn create_backup(path: &Path) -> Result<PathBuf, TemplateError> {
    let backup = free_backup_path(path);
    fs::rename(path, &backup)
        .map_err(|source| TemplateError::Io { path: path.to_path_buf(), source })?;
    Ok(backup)
}

fn free_backup_path(path: &Path) -> PathBuf {
    let plain = PathBuf::from(format!("{}.{BACKUP_EXTENSION}", path.display()));
    if !plain.exists() {
        return plain;
    }
    let stamp = Local::now().format("%Y%m%d%H%M%S");
    let stamped = PathBuf::from(format!("{}.{stamp}.{BACKUP_EXTENSION}", path.display()));
    if !stamped.exists() {
        return stamped;
    }
    (1u32..)
        .map(|n| PathBuf::from(format!("{}.{stamp}-{n}.{BACKUP_EXTENSION}", path.display())))
        .find(|candidate| !candidate.exists())
        .unwrap_or(stamped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_installs_into_empty_dir() {
        let tmp = tempdir().unwrap();
        let dir = tmp.path().join("templates");

        let report = install_defaults(&dir, false, |_| panic!("nothing to confirm")).unwrap();

        assert_eq!(report.installed.len(), 3);
        assert!(dir.join("day.md").exists());
        assert!(dir.join("zet.md").exists());
        assert!(report.backups.is_empty());
    }

    #[test]
    fn test_keeps_existing_when_declined() {
        let tmp = tempdir().unwrap();
        fs::write(tmp.path().join("day.md"), "mine").unwrap();

        let report = install_defaults(tmp.path(), false, |_| false).unwrap();

        assert_eq!(report.skipped, vec![tmp.path().join("day.md")]);
        assert_eq!(fs::read_to_string(tmp.path().join("day.md")).unwrap(), "mine");
    }

    #[test]
    fn test_force_backs_up_existing() {
        let tmp = tempdir().unwrap();
        let day = tmp.path().join("day.md");
        fs::write(&day, "mine").unwrap();
        fs::write(tmp.path().join("day.md.bak"), "older").unwrap();

        let report = install_defaults(tmp.path(), true, |_| false).unwrap();

        assert_eq!(report.backups.len(), 1);
        let backup = &report.backups[0];
        assert_ne!(backup, &tmp.path().join("day.md.bak"));
        assert_eq!(fs::read_to_string(backup).unwrap(), "mine");
        assert_eq!(fs::read_to_string(tmp.path().join("day.md.bak")).unwrap(), "older");
        assert_eq!(fs::read_to_string(&day).unwrap(), builtin::DAY);
    }

    #[test]
    fn test_repeated_backups_never_overwrite() {
        let tmp = tempdir().unwrap();
        let day = tmp.path().join("day.md");

        let mut backups = Vec::new();
        for round in 0..4 {
            fs::write(&day, format!("version {round}")).unwrap();
            backups.push(create_backup(&day).unwrap());
        }

        for (round, backup) in backups.iter().enumerate() {
            assert_eq!(fs::read_to_string(backup).unwrap(), format!("version {round}"));
        }
        assert!(!day.exists());
    }
}
