#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Write a config rooted at `<root>/data` and return its path.
pub fn write_config(root: &Path, extra: &str) -> PathBuf {
    let cfg = root.join("config.toml");
    let toml = format!(
        r#"
version = 1
profile = "default"

[profiles.default]
data_home = "{data}"

[general]
editor = "true"
{extra}
"#,
        data = root.join("data").display(),
    );
    fs::write(&cfg, toml).unwrap();
    cfg
}

/// `exo --config <cfg>` with a clean environment for logging and colour.
pub fn exo(cfg: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("exo"));
    cmd.env("NO_COLOR", "1");
    cmd.env_remove("RUST_LOG");
    cmd.arg("--config").arg(cfg);
    cmd
}
