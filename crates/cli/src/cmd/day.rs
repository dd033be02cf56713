use exo_core::config::types::ResolvedConfig;
use exo_core::note::kinds::daily;
use exo_core::NoteOptions;
use tracing::info;

use super::{build_deps, fail, open_periodic, report};
use crate::PeriodArgs;

pub fn run(rc: ResolvedConfig, args: &PeriodArgs) {
    let deps = build_deps(rc);
    let ready = match daily::create(&deps, args.date, NoteOptions::new()) {
        Ok(ready) => ready,
        Err(e) => fail("day", &e),
    };

    info!(date = %args.date, construction = ?ready.construction, "daily note ready");
    report("day", ready.was_initialized(), ready.note.path());
    open_periodic("day", &ready.note, args.no_edit);
}
