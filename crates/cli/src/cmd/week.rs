use exo_core::config::types::ResolvedConfig;
use exo_core::note::kinds::weekly;
use exo_core::NoteOptions;
use tracing::info;

use super::{build_deps, fail, open_periodic, report};
use crate::PeriodArgs;

pub fn run(rc: ResolvedConfig, args: &PeriodArgs) {
    let deps = build_deps(rc);
    let ready = match weekly::create(&deps, args.date, NoteOptions::new()) {
        Ok(ready) => ready,
        Err(e) => fail("week", &e),
    };

    info!(week = ready.note.title(), construction = ?ready.construction, "weekly note ready");
    report("week", ready.was_initialized(), ready.note.path());
    open_periodic("week", &ready.note, args.no_edit);
}
