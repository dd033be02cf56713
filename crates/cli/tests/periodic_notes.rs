mod common;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

#[test]
fn day_creates_then_reopens() {
    let tmp = tempdir().unwrap();
    let cfg = common::write_config(tmp.path(), "");
    let note = tmp.path().join("data/periodic/day/2025-02-08.md");

    common::exo(&cfg)
        .args(["day", "2025-02-08", "--no-edit"])
        .assert()
        .success()
        .stdout(predicate::str::contains("OK   exo day"))
        .stdout(predicate::str::contains(format!("created: {}", note.display())));

    let content = fs::read_to_string(&note).unwrap();
    assert!(content.starts_with("# 2025-02-08\n"));
    assert!(content.contains("[[2025-02-07]] | [[2025-02-09]]"));

    fs::write(&note, "Updated").unwrap();
    common::exo(&cfg)
        .args(["day", "2025-02-08", "--no-edit"])
        .assert()
        .success()
        .stdout(predicate::str::contains("opened:"));
    assert_eq!(fs::read_to_string(&note).unwrap(), "Updated");
}

#[test]
fn day_runs_configured_editor() {
    let tmp = tempdir().unwrap();
    let cfg = common::write_config(tmp.path(), "");

    common::exo(&cfg).args(["day", "2025-02-08"]).assert().success();
}

#[test]
fn failing_editor_is_reported() {
    let tmp = tempdir().unwrap();
    let cfg = tmp.path().join("config.toml");
    fs::write(
        &cfg,
        format!(
            "version = 1\n[profiles.default]\ndata_home = \"{}\"\n[general]\neditor = \"false\"\n",
            tmp.path().join("data").display()
        ),
    )
    .unwrap();

    common::exo(&cfg)
        .args(["day", "2025-02-08"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("FAIL exo day"))
        .stdout(predicate::str::contains("failed to edit note '2025-02-08'"));
}

#[test]
fn custom_day_template_is_used() {
    let tmp = tempdir().unwrap();
    let cfg = common::write_config(tmp.path(), "");
    let tpl = tmp.path().join("data/templates");
    fs::create_dir_all(&tpl).unwrap();
    fs::write(tpl.join("day.md"), "{{date}} prev={{previous}}\n").unwrap();

    common::exo(&cfg).args(["day", "2025-01-01", "--no-edit"]).assert().success();

    let content =
        fs::read_to_string(tmp.path().join("data/periodic/day/2025-01-01.md")).unwrap();
    assert_eq!(content, "2025-01-01 prev=2024-12-31\n");
}

#[test]
fn broken_template_fails_without_writing() {
    let tmp = tempdir().unwrap();
    let cfg = common::write_config(tmp.path(), "");
    let tpl = tmp.path().join("data/templates");
    fs::create_dir_all(&tpl).unwrap();
    fs::write(tpl.join("day.md"), "{{date}} {{weather}}\n").unwrap();

    common::exo(&cfg)
        .args(["day", "2025-02-08", "--no-edit"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("FAIL exo day"))
        .stdout(predicate::str::contains("weather"));

    assert!(!tmp.path().join("data/periodic/day/2025-02-08.md").exists());
}

#[test]
fn week_normalizes_to_iso_week() {
    let tmp = tempdir().unwrap();
    let cfg = common::write_config(tmp.path(), "");
    let note = tmp.path().join("data/periodic/week/2025-W06.md");

    common::exo(&cfg)
        .args(["week", "2025-02-08", "--no-edit"])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("created: {}", note.display())));

    let content = fs::read_to_string(&note).unwrap();
    assert!(content.starts_with("# 2025-W06\n"));
    assert!(content.contains("2025-02-03 to 2025-02-09"));
}

#[test]
fn bad_date_is_a_usage_error() {
    let tmp = tempdir().unwrap();
    let cfg = common::write_config(tmp.path(), "");

    common::exo(&cfg)
        .args(["day", "someday", "--no-edit"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("YYYY-MM-DD"));
}
