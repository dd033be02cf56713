use exo_core::config::loader::{ConfigError, ConfigLoader};
use rstest::rstest;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

const PROFILE: &str = "[profiles.default]\ndata_home = \"/tmp/exo\"\n";

fn load(toml: &str, profile: Option<&str>) -> ConfigError {
    let tmp = tempdir().unwrap();
    let cfg_path = tmp.path().join("config.toml");
    fs::write(&cfg_path, toml).unwrap();
    ConfigLoader::load(Some(&cfg_path), profile).unwrap_err()
}

#[test]
fn missing_explicit_file_fails() {
    let tmp = tempdir().unwrap();
    let err = ConfigLoader::load(Some(&tmp.path().join("nope/config.toml")), None).unwrap_err();
    assert!(matches!(err, ConfigError::NotFound(ref p) if Path::new(p).ends_with("nope/config.toml")));
}

#[rstest]
#[case::bad_version("version = 2\nprofiles = {}\n", None, "BadVersion")]
#[case::no_profiles("version = 1\nprofiles = {}\n", None, "NoProfiles")]
#[case::unparsable("version = \n", None, "ParseError")]
#[case::unknown_profile("version = 1\n[profiles.default]\ndata_home = \"/x\"\n", Some("work"), "ProfileNotFound")]
fn malformed_configs_fail(
    #[case] toml: &str,
    #[case] profile: Option<&str>,
    #[case] expected: &str,
) {
    let err = load(toml, profile);
    let got = format!("{err:?}");
    assert!(got.starts_with(expected), "expected {expected}, got {got}");
}

#[test]
fn unknown_profile_names_the_profile() {
    let err = load(&format!("version = 1\n{PROFILE}"), Some("missing"));
    assert!(matches!(err, ConfigError::ProfileNotFound(ref p) if p == "missing"));
}

#[rstest]
#[case("zettel_dir", "/elsewhere")]
#[case("periodic_dir", "/elsewhere")]
#[case("zettel_dir", "../outside")]
#[case("periodic_dir", "notes/../../outside")]
fn subdir_outside_data_home_fails(#[case] field: &str, #[case] dir: &str) {
    let err = load(&format!("version = 1\n{PROFILE}{field} = \"{dir}\"\n"), None);
    match err {
        ConfigError::InvalidSubdir { field: f, value } => {
            assert_eq!(f, field);
            assert_eq!(value, dir);
        }
        other => panic!("expected InvalidSubdir, got {other:?}"),
    }
}

#[test]
fn blank_editor_fails() {
    let err = load(&format!("version = 1\n{PROFILE}[general]\neditor = \"  \"\n"), None);
    assert!(matches!(err, ConfigError::EmptyEditor), "got {err:?}");
}
