use exo_core::config::loader::{default_config_path, ConfigLoader};
use exo_core::config::settings::ConfigKey;
use exo_core::config::types::ResolvedConfig;
use std::path::Path;

use super::fail;
use crate::{ConfigAction, ConfigArgs};

const UNSET: &str = "(unset)";

pub fn run(rc: &ResolvedConfig, config: Option<&Path>, args: &ConfigArgs) {
    match &args.action {
        None => list(rc),
        Some(ConfigAction::Get { key }) => get(rc, key),
        Some(ConfigAction::Set { key, value }) => set(rc, config, key, value),
    }
}

fn list(rc: &ResolvedConfig) {
    println!("OK   exo config");
    println!("profile: {}", rc.active_profile);
    for key in ConfigKey::ALL {
        println!("{key}: {}", rc.get(key).as_deref().unwrap_or(UNSET));
    }
}

fn get(rc: &ResolvedConfig, raw: &str) {
    let key: ConfigKey = raw.parse().unwrap_or_else(|e| fail("config", &e));
    println!("OK   exo config");
    println!("{key}: {}", rc.get(key).as_deref().unwrap_or(UNSET));
}

fn set(rc: &ResolvedConfig, config: Option<&Path>, raw: &str, value: &str) {
    let key: ConfigKey = raw.parse().unwrap_or_else(|e| fail("config", &e));
    let path = config.map(Path::to_path_buf).unwrap_or_else(default_config_path);

    let updated = ConfigLoader::set_value(&path, key, value, rc)
        .unwrap_or_else(|e| fail("config", &e));

    println!("OK   exo config");
    println!("{key}: {}", updated.get(key).as_deref().unwrap_or(UNSET));
    println!("written: {}", path.display());
}
