use exo_core::config::types::ResolvedConfig;
use exo_core::note::kinds::custom;
use exo_core::NoteOptions;

use super::{build_deps, fail, open_note, report};
use crate::NewArgs;

pub fn run(rc: ResolvedConfig, args: &NewArgs) {
    let mut options = NoteOptions::new().subdir(args.subdir.as_str());
    if let Some(file_name) = &args.file_name {
        options = options.file_name(file_name.as_str());
    }
    if let Some(template) = &args.template {
        options = options.template_name(template.as_str());
    }

    let deps = build_deps(rc);
    let ready = match custom::create(&deps, &args.title, options) {
        Ok(ready) => ready,
        Err(e) => fail("new", &e),
    };

    report("new", ready.was_initialized(), ready.note.path());
    open_note("new", &ready.note, args.no_edit);
}
