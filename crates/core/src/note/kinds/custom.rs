//! Free-form notes placed wherever the caller says.

use chrono::Local;
use serde::Serialize;

use super::{Ready, initialize_or_load};
use crate::note::error::{NoteError, NoteResult};
use crate::note::{Note, NoteDeps, NoteFactory, NoteOptions, NoteType};
use crate::paths::{slugify, zettel_file_name};

#[derive(Debug, Serialize)]
struct CustomData<'a> {
    title: &'a str,
    created: String,
    file_name: &'a str,
}

/// Create or load a note from caller-supplied options.
///
/// A subdirectory is required. The file name defaults to the slugged title.
/// Without a template the file starts with the option content, or empty.
pub fn create(deps: &NoteDeps, title: &str, options: NoteOptions) -> NoteResult<Ready<Note>> {
    let options = if options.file_name.is_none() {
        if slugify(title).is_empty() {
            return Err(NoteError::validation(format!(
                "title '{title}' has no characters usable in a file name"
            )));
        }
        NoteOptions::new().file_name(zettel_file_name(title)).merge(options)
    } else {
        options
    };

    let factory = NoteFactory::new(NoteType::Note, deps.clone());
    let mut note = factory.create_note(title, options)?;

    let file_name = note.file_name().to_string();
    let data = CustomData { title, created: Local::now().to_rfc3339(), file_name: &file_name };
    let construction = initialize_or_load(&mut note, title, &data)?;

    Ok(Ready { note, construction })
}
