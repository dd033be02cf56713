//! Notes and their lifecycle.
//!
//! # Architecture
//!
//! - **Base** (`base.rs`): [`Note`], one file with a title, content and timestamps
//! - **Periodic** (`periodic.rs`): [`PeriodicNote`], a note keyed by a date
//! - **Navigators** (`navigator.rs`): period arithmetic as a pluggable strategy
//! - **Factory** (`factory.rs`): binds shared dependencies to new notes
//! - **Kinds** (`kinds/`): zettel, daily, weekly and custom constructors that
//!   initialize a note from its template or load it from disk
//!
//! Every collaborator arrives through [`NoteDeps`]; nothing here reads global
//! state or touches the filesystem except through [`Storage`].

pub mod base;
pub mod error;
pub mod factory;
pub mod kinds;
pub mod navigator;
pub mod options;
pub mod periodic;

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::config::types::ResolvedConfig;
use crate::storage::Storage;
use crate::templates::TemplateRenderer;

pub use base::Note;
pub use error::{NoteError, NoteResult};
pub use factory::{NoteFactory, NoteType};
pub use kinds::Construction;
pub use navigator::{DailyNavigator, PeriodNavigator, WeeklyNavigator};
pub use options::NoteOptions;
pub use periodic::{PeriodType, PeriodicNote};

/// Shared collaborators handed to every note.
#[derive(Clone)]
pub struct NoteDeps {
    pub config: Arc<ResolvedConfig>,
    pub renderer: Arc<dyn TemplateRenderer>,
    pub storage: Arc<dyn Storage>,
}

impl NoteDeps {
    pub fn new(
        config: Arc<ResolvedConfig>,
        renderer: Arc<dyn TemplateRenderer>,
        storage: Arc<dyn Storage>,
    ) -> Self {
        Self { config, renderer, storage }
    }
}

impl fmt::Debug for NoteDeps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NoteDeps")
            .field("data_home", &self.config.data_home)
            .finish_non_exhaustive()
    }
}

/// The steps the initialize-or-load flow drives on a note.
pub trait NoteLifecycle {
    fn exists(&self) -> bool;

    /// Produce first content from `data` and write it out.
    fn initialize(&mut self, data: &Value) -> NoteResult<()>;

    fn load(&mut self) -> NoteResult<()>;
}

impl NoteLifecycle for Note {
    fn exists(&self) -> bool {
        Note::exists(self)
    }

    /// Notes without a template keep whatever content they were built with.
    fn initialize(&mut self, data: &Value) -> NoteResult<()> {
        if self.template_name().is_some() {
            self.apply_template_value(data)?;
        }
        self.save()
    }

    fn load(&mut self) -> NoteResult<()> {
        Note::load(self)
    }
}

impl NoteLifecycle for PeriodicNote {
    fn exists(&self) -> bool {
        PeriodicNote::exists(self)
    }

    fn initialize(&mut self, data: &Value) -> NoteResult<()> {
        self.validate()?;
        self.apply_template(data)?;
        self.save()
    }

    fn load(&mut self) -> NoteResult<()> {
        PeriodicNote::load(self)
    }
}
