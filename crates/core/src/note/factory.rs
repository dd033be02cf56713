use std::fmt;

use chrono::NaiveDate;
use tracing::debug;

use super::NoteDeps;
use super::base::Note;
use super::error::NoteResult;
use super::navigator::PeriodNavigator;
use super::options::NoteOptions;
use super::periodic::{PeriodType, PeriodicNote};

/// Label carried by a factory. It does not change how notes are built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NoteType {
    Note,
    Zettel,
    Daily,
    Weekly,
}

impl NoteType {
    pub fn as_str(&self) -> &'static str {
        match self {
            NoteType::Note => "note",
            NoteType::Zettel => "zettel",
            NoteType::Daily => "daily",
            NoteType::Weekly => "weekly",
        }
    }
}

impl fmt::Display for NoteType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Builds notes with the shared dependencies already bound.
#[derive(Debug, Clone)]
pub struct NoteFactory {
    note_type: NoteType,
    deps: NoteDeps,
}

impl NoteFactory {
    pub fn new(note_type: NoteType, deps: NoteDeps) -> Self {
        Self { note_type, deps }
    }

    pub fn note_type(&self) -> NoteType {
        self.note_type
    }

    pub fn deps(&self) -> &NoteDeps {
        &self.deps
    }

    pub fn create_note(&self, title: &str, options: NoteOptions) -> NoteResult<Note> {
        debug!(note_type = %self.note_type, title, "factory building note");
        Note::create(title, self.deps.clone(), options)
    }

    pub fn create_periodic(
        &self,
        title: &str,
        date: NaiveDate,
        period_type: PeriodType,
        navigator: Option<Box<dyn PeriodNavigator>>,
        options: NoteOptions,
    ) -> NoteResult<PeriodicNote> {
        debug!(note_type = %self.note_type, title, %date, "factory building periodic note");
        PeriodicNote::create(title, date, period_type, navigator, self.deps.clone(), options)
    }
}
