//! Atomic notes named after their title.

use chrono::Local;
use serde::Serialize;

use super::{Ready, initialize_or_load};
use crate::note::error::{NoteError, NoteResult};
use crate::note::{Note, NoteDeps, NoteFactory, NoteOptions, NoteType};
use crate::paths::{slugify, zettel_file_name};

pub const TEMPLATE: &str = "zet";

#[derive(Debug, Serialize)]
struct ZettelData<'a> {
    title: &'a str,
    created: String,
    file_name: &'a str,
}

/// Create or load the zettel for `title` in the configured zettel directory.
///
/// `overrides` replace the defaults (directory, slugged file name, `zet`
/// template) field by field.
pub fn create(deps: &NoteDeps, title: &str, overrides: NoteOptions) -> NoteResult<Ready<Note>> {
    if slugify(title).is_empty() {
        return Err(NoteError::validation(format!(
            "title '{title}' has no characters usable in a file name"
        )));
    }

    let defaults = NoteOptions::new()
        .subdir(deps.config.zettel_subdir.as_str())
        .file_name(zettel_file_name(title))
        .template_name(TEMPLATE);

    let factory = NoteFactory::new(NoteType::Zettel, deps.clone());
    let mut note = factory.create_note(title, defaults.merge(overrides))?;

    let file_name = note.file_name().to_string();
    let data = ZettelData { title, created: Local::now().to_rfc3339(), file_name: &file_name };
    let construction = initialize_or_load(&mut note, title, &data)?;

    Ok(Ready { note, construction })
}
