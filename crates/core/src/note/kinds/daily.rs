//! One note per calendar day.

use chrono::NaiveDate;
use serde::Serialize;

use super::{Ready, initialize_or_load};
use crate::note::error::NoteResult;
use crate::note::{
    DailyNavigator, NoteDeps, NoteFactory, NoteOptions, NoteType, PeriodNavigator, PeriodType,
    PeriodicNote,
};
use crate::paths::date_label;

pub const TEMPLATE: &str = "day";
pub const SUBDIR: &str = "day";

#[derive(Debug, Serialize)]
struct DailyData {
    date: String,
    previous: String,
    next: String,
}

/// `<periodic>/day`
pub fn subdir(deps: &NoteDeps) -> String {
    format!("{}/{SUBDIR}", deps.config.periodic_subdir)
}

/// Create or load the daily note for `date`.
pub fn create(
    deps: &NoteDeps,
    date: NaiveDate,
    overrides: NoteOptions,
) -> NoteResult<Ready<PeriodicNote>> {
    let nav = DailyNavigator;
    let title = date_label(date);

    let defaults = NoteOptions::new()
        .subdir(subdir(deps))
        .file_name(format!("{title}.md"))
        .template_name(TEMPLATE);

    let factory = NoteFactory::new(NoteType::Daily, deps.clone());
    let mut note = factory.create_periodic(
        &title,
        date,
        PeriodType::Daily,
        Some(Box::new(nav)),
        defaults.merge(overrides),
    )?;

    let data = DailyData {
        date: title.clone(),
        previous: nav.label(note.previous()?),
        next: nav.label(note.next()?),
    };
    let construction = initialize_or_load(&mut note, &title, &data)?;

    Ok(Ready { note, construction })
}
