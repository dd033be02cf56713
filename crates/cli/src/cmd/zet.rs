use chrono::Local;
use exo_core::config::types::ResolvedConfig;
use exo_core::note::kinds::{daily, zettel};
use exo_core::{NoteDeps, NoteOptions, NoteResult};
use tracing::{info, warn};

use super::{build_deps, fail, open_note, report};
use crate::ZetArgs;

pub fn run(rc: ResolvedConfig, args: &ZetArgs) {
    let deps = build_deps(rc);
    let ready = match zettel::create(&deps, &args.title, NoteOptions::new()) {
        Ok(ready) => ready,
        Err(e) => fail("zet", &e),
    };

    report("zet", ready.was_initialized(), ready.note.path());

    // Only new zettels get a link, reopening one must not duplicate it
    if ready.was_initialized() {
        match link_from_today(&deps, ready.note.title()) {
            Ok(()) => info!(title = ready.note.title(), "linked from daily note"),
            Err(e) => warn!(title = ready.note.title(), error = %e, "could not link from daily note"),
        }
    }

    open_note("zet", &ready.note, args.no_edit);
}

/// Append `- [[title]]` to today's daily note, creating it if needed.
fn link_from_today(deps: &NoteDeps, title: &str) -> NoteResult<()> {
    let today = Local::now().date_naive();
    let mut day = daily::create(deps, today, NoteOptions::new())?.into_note();
    day.append_line(&format!("- [[{title}]]"))
}
