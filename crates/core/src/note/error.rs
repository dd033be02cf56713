use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::storage::StorageError;
use crate::templates::TemplateError;

/// Errors from note construction and note operations.
///
/// Every variant carries the note title (and path where one exists) so the
/// caller can report a precise message without extra bookkeeping.
#[derive(Debug, Error)]
pub enum NoteError {
    /// A required field is missing or empty. Raised before any I/O.
    #[error("invalid note: {0}")]
    Validation(String),

    #[error("note '{title}' does not exist at {path}")]
    NotFound { title: String, path: PathBuf },

    #[error("failed to {op} note '{title}': {source}")]
    Io {
        op: &'static str,
        title: String,
        path: PathBuf,
        #[source]
        source: StorageError,
    },

    #[error("template error for note '{title}': {source}")]
    Template {
        title: String,
        #[source]
        source: TemplateError,
    },

    #[error("note '{0}' has no template to apply")]
    NoTemplate(String),

    #[error("cannot rename '{0}': its title is derived from its date")]
    CannotRename(String),

    #[error("failed to edit note '{title}' at {path}: {source}")]
    Editor {
        title: String,
        path: PathBuf,
        #[source]
        source: StorageError,
    },

    #[error("template '{template}' for note '{title}' did not render within {timeout:?}")]
    DeadlineExceeded { title: String, template: String, timeout: Duration },
}

impl NoteError {
    pub(crate) fn validation(msg: impl Into<String>) -> Self {
        NoteError::Validation(msg.into())
    }

    pub(crate) fn template(title: &str, source: TemplateError) -> Self {
        match source {
            TemplateError::DeadlineExceeded { name, timeout } => {
                NoteError::DeadlineExceeded { title: title.to_string(), template: name, timeout }
            }
            source => NoteError::Template { title: title.to_string(), source },
        }
    }
}

pub type NoteResult<T> = Result<T, NoteError>;
