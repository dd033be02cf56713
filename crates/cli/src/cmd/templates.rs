use exo_core::config::types::ResolvedConfig;
use exo_core::templates::{TemplateRepository, TemplateSource};

use super::fail;

pub fn run(rc: &ResolvedConfig) {
    let repo = TemplateRepository::new(&rc.templates_dir);
    let list = match repo.list_all() {
        Ok(list) => list,
        Err(e) => fail("templates", &e),
    };

    for (name, source) in &list {
        match source {
            TemplateSource::Custom(path) => println!("{name}  (custom: {})", path.display()),
            TemplateSource::Builtin => println!("{name}  (built-in)"),
        }
    }
    println!("-- {} templates --", list.len());
}
