//! Constructors for each note kind.
//!
//! Each kind pre-supplies its subdirectory, file name and template, builds the
//! note through a [`NoteFactory`](super::NoteFactory), then runs
//! [`initialize_or_load`]: a missing file is rendered from the template and
//! saved, an existing file is read back as-is.

pub mod custom;
pub mod daily;
pub mod weekly;
pub mod zettel;

use serde::Serialize;
use tracing::{debug, info};

use super::NoteLifecycle;
use super::error::{NoteError, NoteResult};
use crate::templates::TemplateError;
use crate::templates::engine::TemplateRenderError;

/// Which branch construction took.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Construction {
    /// The file did not exist; it was rendered and saved.
    Initialized,
    /// The file existed and was loaded.
    Loaded,
}

/// A note that finished construction.
#[derive(Debug)]
pub struct Ready<N> {
    pub note: N,
    pub construction: Construction,
}

impl<N> Ready<N> {
    pub fn into_note(self) -> N {
        self.note
    }

    pub fn was_initialized(&self) -> bool {
        self.construction == Construction::Initialized
    }
}

/// Bring `note` to a state consistent with its file.
///
/// Any failure is returned as-is and the caller must drop the note.
pub fn initialize_or_load<N, T>(note: &mut N, title: &str, data: &T) -> NoteResult<Construction>
where
    N: NoteLifecycle,
    T: Serialize + ?Sized,
{
    if note.exists() {
        debug!(title, "note exists, loading");
        note.load()?;
        return Ok(Construction::Loaded);
    }

    debug!(title, "note missing, initializing from template");
    let value = serde_json::to_value(data).map_err(|e| NoteError::Template {
        title: title.to_string(),
        source: TemplateError::Render {
            name: String::new(),
            source: TemplateRenderError::Serialize(e.to_string()),
        },
    })?;
    note.initialize(&value)?;
    info!(title, "note initialized");
    Ok(Construction::Initialized)
}
