#![deny(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod note;
pub mod paths;
pub mod storage;
pub mod templates;

pub use note::{
    Construction, DailyNavigator, Note, NoteDeps, NoteError, NoteFactory, NoteOptions,
    NoteResult, NoteType, PeriodNavigator, PeriodType, PeriodicNote, WeeklyNavigator,
};
pub use storage::{FsStorage, Storage, StorageError};

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
