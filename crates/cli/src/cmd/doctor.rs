use exo_core::config::loader::default_config_path;
use exo_core::config::types::ResolvedConfig;
use std::path::Path;

pub fn run(rc: &ResolvedConfig, config: Option<&Path>) {
    println!("OK   exo doctor");
    let path = config.map(Path::to_path_buf).unwrap_or_else(default_config_path);
    if path.exists() {
        println!("path: {}", path.display());
    } else {
        println!("path: (none, using defaults)");
    }
    println!("version: {}", exo_core::version());
    println!("profile: {}", rc.active_profile);
    println!("data_home: {}", rc.data_home.display());
    println!("templates_dir: {}", rc.templates_dir.display());
    println!("periodic_dir: {}", rc.periodic_dir().display());
    println!("zettel_dir: {}", rc.zettel_dir().display());
    println!("editor: {}", rc.editor);
    println!("logging.level: {}", rc.logging.level);
    if let Some(file) = &rc.logging.file {
        println!("logging.file: {}", file.display());
    }
}
