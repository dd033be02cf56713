use std::fmt;
use std::path::Path;

use chrono::{DateTime, Local, NaiveDate};
use serde::Serialize;
use tracing::warn;

use super::NoteDeps;
use super::base::Note;
use super::error::{NoteError, NoteResult};
use super::navigator::PeriodNavigator;
use super::options::NoteOptions;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PeriodType {
    Daily,
    Weekly,
}

impl PeriodType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PeriodType::Daily => "daily",
            PeriodType::Weekly => "weekly",
        }
    }
}

impl fmt::Display for PeriodType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A note keyed by a calendar period.
///
/// Wraps a [`Note`] and forwards to it, except that the title cannot change
/// and persistence refuses to run until a navigator is attached.
#[derive(Debug)]
pub struct PeriodicNote {
    note: Note,
    date: NaiveDate,
    period_type: PeriodType,
    navigator: Option<Box<dyn PeriodNavigator>>,
}

impl PeriodicNote {
    pub fn create(
        title: &str,
        date: NaiveDate,
        period_type: PeriodType,
        navigator: Option<Box<dyn PeriodNavigator>>,
        deps: NoteDeps,
        options: NoteOptions,
    ) -> NoteResult<Self> {
        let Some(navigator) = navigator else {
            return Err(NoteError::validation(format!(
                "{period_type} note '{title}' needs a period navigator"
            )));
        };
        let note = Note::create(title, deps, options)?;
        Ok(Self { note, date, period_type, navigator: Some(navigator) })
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn period_type(&self) -> PeriodType {
        self.period_type
    }

    pub fn navigator(&self) -> Option<&dyn PeriodNavigator> {
        self.navigator.as_deref()
    }

    pub fn set_navigator(&mut self, navigator: Box<dyn PeriodNavigator>) {
        self.navigator = Some(navigator);
    }

    /// Detach the navigator. The note fails validation until one is set again.
    pub fn take_navigator(&mut self) -> Option<Box<dyn PeriodNavigator>> {
        self.navigator.take()
    }

    pub fn previous(&self) -> NoteResult<NaiveDate> {
        Ok(self.nav()?.previous(self.date))
    }

    pub fn next(&self) -> NoteResult<NaiveDate> {
        Ok(self.nav()?.next(self.date))
    }

    pub fn start(&self) -> NoteResult<NaiveDate> {
        Ok(self.nav()?.start(self.date))
    }

    pub fn end(&self) -> NoteResult<NaiveDate> {
        Ok(self.nav()?.end(self.date))
    }

    /// Label of the period `date` falls in, e.g. `2025-02-07` or `2025-W06`.
    pub fn label_for(&self, date: NaiveDate) -> NoteResult<String> {
        Ok(self.nav()?.label(date))
    }

    /// Periodic titles follow their date and never change.
    pub fn set_title(&mut self, title: &str) -> NoteResult<()> {
        warn!(title = self.note.title(), requested = title, "rename of periodic note rejected");
        Err(NoteError::CannotRename(self.note.title().to_string()))
    }

    pub fn validate(&self) -> NoteResult<()> {
        self.note.validate()?;
        self.nav()?;
        Ok(())
    }

    pub fn save(&self) -> NoteResult<()> {
        self.validate()?;
        self.note.save()
    }

    pub fn load(&mut self) -> NoteResult<()> {
        self.validate()?;
        self.note.load()
    }

    pub fn delete(&self) -> NoteResult<()> {
        self.note.delete()
    }

    pub fn exists(&self) -> bool {
        self.note.exists()
    }

    pub fn open(&self) -> NoteResult<()> {
        self.note.open()
    }

    pub fn apply_template<T: Serialize + ?Sized>(&mut self, data: &T) -> NoteResult<()> {
        self.note.apply_template(data)
    }

    pub fn append_line(&mut self, line: &str) -> NoteResult<()> {
        self.validate()?;
        self.note.append_line(line)
    }

    pub fn title(&self) -> &str {
        self.note.title()
    }

    pub fn content(&self) -> &str {
        self.note.content()
    }

    pub fn set_content(&mut self, content: impl Into<String>) {
        self.note.set_content(content);
    }

    pub fn path(&self) -> &Path {
        self.note.path()
    }

    pub fn template_name(&self) -> Option<&str> {
        self.note.template_name()
    }

    pub fn set_template_name(&mut self, name: &str) -> NoteResult<()> {
        self.note.set_template_name(name)
    }

    pub fn created(&self) -> DateTime<Local> {
        self.note.created()
    }

    pub fn modified(&self) -> DateTime<Local> {
        self.note.modified()
    }

    /// The wrapped note, read-only.
    pub fn as_note(&self) -> &Note {
        &self.note
    }

    fn nav(&self) -> NoteResult<&dyn PeriodNavigator> {
        self.navigator.as_deref().ok_or_else(|| {
            NoteError::validation(format!(
                "{} note '{}' has no period navigator",
                self.period_type,
                self.note.title()
            ))
        })
    }
}
