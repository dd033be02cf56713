use dialoguer::{theme::ColorfulTheme, Confirm};
use exo_core::config::types::ResolvedConfig;
use exo_core::note::kinds::{daily, weekly};
use exo_core::templates::install::install_defaults;
use std::fs;
use std::io::IsTerminal;
use std::path::Path;
use tracing::{debug, info};

use super::fail;
use crate::InitArgs;

pub fn run(rc: &ResolvedConfig, args: &InitArgs) {
    let dirs = [
        rc.data_home.clone(),
        rc.periodic_dir().join(daily::SUBDIR),
        rc.periodic_dir().join(weekly::SUBDIR),
        rc.zettel_dir(),
    ];
    for dir in &dirs {
        if let Err(e) = fs::create_dir_all(dir) {
            fail("init", &e);
        }
        debug!(path = %dir.display(), "directory ready");
    }

    let report = match install_defaults(&rc.templates_dir, args.force, confirm_overwrite) {
        Ok(report) => report,
        Err(e) => fail("init", &e),
    };
    info!(installed = report.installed.len(), skipped = report.skipped.len(), "templates installed");

    println!("OK   exo init");
    println!("data_home: {}", rc.data_home.display());
    for path in &report.installed {
        println!("installed: {}", path.display());
    }
    for path in &report.backups {
        println!("backup: {}", path.display());
    }
    for path in &report.skipped {
        println!("kept: {}", path.display());
    }
}

/// Ask before replacing a template. Without a terminal the file is kept.
fn confirm_overwrite(path: &Path) -> bool {
    if !std::io::stdin().is_terminal() {
        return false;
    }
    Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(format!("{} exists. Replace it (a backup is kept)?", path.display()))
        .default(false)
        .interact()
        .unwrap_or(false)
}
