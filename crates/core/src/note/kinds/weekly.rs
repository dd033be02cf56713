//! One note per ISO week.

use chrono::NaiveDate;
use serde::Serialize;

use super::{Ready, initialize_or_load};
use crate::note::error::NoteResult;
use crate::note::{
    NoteDeps, NoteFactory, NoteOptions, NoteType, PeriodNavigator, PeriodType, PeriodicNote,
    WeeklyNavigator,
};
use crate::paths::{date_label, week_label};

pub const TEMPLATE: &str = "week";
pub const SUBDIR: &str = "week";

#[derive(Debug, Serialize)]
struct WeeklyData {
    week: String,
    start: String,
    end: String,
    previous: String,
    next: String,
}

/// `<periodic>/week`
pub fn subdir(deps: &NoteDeps) -> String {
    format!("{}/{SUBDIR}", deps.config.periodic_subdir)
}

/// Create or load the note for the week containing `date`.
///
/// The note's date is the Monday of that week, so any day of the week
/// resolves to the same file.
pub fn create(
    deps: &NoteDeps,
    date: NaiveDate,
    overrides: NoteOptions,
) -> NoteResult<Ready<PeriodicNote>> {
    let nav = WeeklyNavigator;
    let start = nav.start(date);
    let title = week_label(start);

    let defaults = NoteOptions::new()
        .subdir(subdir(deps))
        .file_name(format!("{title}.md"))
        .template_name(TEMPLATE);

    let factory = NoteFactory::new(NoteType::Weekly, deps.clone());
    let mut note = factory.create_periodic(
        &title,
        start,
        PeriodType::Weekly,
        Some(Box::new(nav)),
        defaults.merge(overrides),
    )?;

    let data = WeeklyData {
        week: title.clone(),
        start: date_label(note.start()?),
        end: date_label(note.end()?),
        previous: nav.label(note.previous()?),
        next: nav.label(note.next()?),
    };
    let construction = initialize_or_load(&mut note, &title, &data)?;

    Ok(Ready { note, construction })
}
