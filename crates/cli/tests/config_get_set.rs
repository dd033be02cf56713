mod common;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::process::Command;
use tempfile::tempdir;

#[test]
fn config_lists_every_setting() {
    let tmp = tempdir().unwrap();
    let cfg = common::write_config(tmp.path(), "");

    common::exo(&cfg)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("OK   exo config"))
        .stdout(predicate::str::contains("editor: true"))
        .stdout(predicate::str::contains("zettel_dir: 0-inbox"))
        .stdout(predicate::str::contains("log.file: (unset)"));
}

#[test]
fn config_set_persists_and_get_reads_it_back() {
    let tmp = tempdir().unwrap();
    let cfg = common::write_config(tmp.path(), "");

    common::exo(&cfg)
        .args(["config", "set", "zettel_dir", "cards"])
        .assert()
        .success()
        .stdout(predicate::str::contains("zettel_dir: cards"))
        .stdout(predicate::str::contains(format!("written: {}", cfg.display())));

    common::exo(&cfg)
        .args(["config", "get", "ZettelDir"])
        .assert()
        .success()
        .stdout(predicate::str::contains("zettel_dir: cards"));

    common::exo(&cfg).args(["zet", "Card", "--no-edit"]).assert().success();
    assert!(tmp.path().join("data/cards/card.md").exists());
}

#[test]
fn config_set_creates_default_file() {
    let tmp = tempdir().unwrap();
    let xdg = tmp.path().join("xdg");

    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("exo"));
    cmd.env("XDG_CONFIG_HOME", &xdg);
    cmd.env("EXO_DATA_HOME", tmp.path().join("notes"));
    cmd.args(["config", "set", "editor", "hx"]);
    cmd.assert().success().stdout(predicate::str::contains("editor: hx"));

    let written = fs::read_to_string(xdg.join("exo/config.toml")).unwrap();
    assert!(written.contains("editor = \"hx\""), "config was: {written}");
}

#[test]
fn config_rejects_unknown_key_and_bad_value() {
    let tmp = tempdir().unwrap();
    let cfg = common::write_config(tmp.path(), "");
    let before = fs::read_to_string(&cfg).unwrap();

    common::exo(&cfg)
        .args(["config", "get", "colour"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("FAIL exo config"))
        .stdout(predicate::str::contains("unknown configuration key 'colour'"));

    common::exo(&cfg)
        .args(["config", "set", "periodic_dir", "../elsewhere"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("FAIL exo config"));

    assert_eq!(fs::read_to_string(&cfg).unwrap(), before);
}
