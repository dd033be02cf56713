//! Construction options for notes.

use std::path::{Component, Path};

use super::error::{NoteError, NoteResult};

/// Named, optional construction settings for a [`Note`](super::Note).
///
/// Setters are infallible; [`NoteOptions::validate`] runs before a note is
/// built so an empty or malformed value never produces a note.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteOptions {
    pub(crate) subdir: Option<String>,
    pub(crate) file_name: Option<String>,
    pub(crate) template_name: Option<String>,
    pub(crate) content: Option<String>,
}

impl NoteOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subdirectory relative to the data root.
    pub fn subdir(mut self, subdir: impl Into<String>) -> Self {
        self.subdir = Some(subdir.into());
        self
    }

    pub fn file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = Some(file_name.into());
        self
    }

    pub fn template_name(mut self, name: impl Into<String>) -> Self {
        self.template_name = Some(name.into());
        self
    }

    /// Initial in-memory content.
    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// Layer `overrides` on top of `self`; values set in `overrides` win.
    pub fn merge(self, overrides: NoteOptions) -> Self {
        Self {
            subdir: overrides.subdir.or(self.subdir),
            file_name: overrides.file_name.or(self.file_name),
            template_name: overrides.template_name.or(self.template_name),
            content: overrides.content.or(self.content),
        }
    }

    pub fn validate(&self) -> NoteResult<()> {
        if let Some(subdir) = &self.subdir {
            if subdir.trim().is_empty() {
                return Err(NoteError::validation("subdirectory cannot be empty"));
            }
            if !Path::new(subdir).components().all(|c| matches!(c, Component::Normal(_))) {
                return Err(NoteError::validation(format!(
                    "subdirectory must stay inside the data root: {subdir}"
                )));
            }
        }
        if let Some(file_name) = &self.file_name {
            if file_name.trim().is_empty() {
                return Err(NoteError::validation("file name cannot be empty"));
            }
            if file_name.contains(['/', '\\']) || matches!(file_name.trim(), "." | "..") {
                return Err(NoteError::validation(format!(
                    "file name must not contain path separators: {file_name}"
                )));
            }
        }
        if let Some(name) = &self.template_name
            && name.trim().is_empty()
        {
            return Err(NoteError::validation("template name cannot be empty"));
        }
        Ok(())
    }
}
