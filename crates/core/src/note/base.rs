use std::fmt;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, error, info};

use super::NoteDeps;
use super::error::{NoteError, NoteResult};
use super::options::NoteOptions;
use crate::paths::resolve_note_path;
use crate::storage::StorageError;
use crate::templates::TemplateError;
use crate::templates::engine::TemplateRenderError;

/// A single note backed by exactly one file.
///
/// The path is computed once at construction and never changes. Content lives
/// in memory until [`Note::save`] is called.
pub struct Note {
    title: String,
    content: String,
    path: PathBuf,
    subdir: String,
    file_name: String,
    template_name: Option<String>,
    created: DateTime<Local>,
    modified: DateTime<Local>,
    deps: NoteDeps,
}

impl Note {
    /// Build an in-memory note. No I/O happens here.
    ///
    /// Both a subdirectory and a file name must be supplied through `options`,
    /// otherwise the path cannot be computed and construction fails.
    pub fn create(title: &str, deps: NoteDeps, options: NoteOptions) -> NoteResult<Self> {
        if title.trim().is_empty() {
            return Err(NoteError::validation("title cannot be empty"));
        }
        options.validate()?;

        let NoteOptions { subdir, file_name, template_name, content } = options;
        let subdir = subdir.ok_or_else(|| {
            NoteError::validation(format!("no subdirectory given for note '{title}'"))
        })?;
        let file_name = file_name.ok_or_else(|| {
            NoteError::validation(format!("no file name given for note '{title}'"))
        })?;

        let path = resolve_note_path(&deps.config.data_home, &subdir, &file_name);
        let now = Local::now();

        debug!(title, path = %path.display(), template = ?template_name, "note created");

        Ok(Self {
            title: title.to_string(),
            content: content.unwrap_or_default(),
            path,
            subdir,
            file_name,
            template_name,
            created: now,
            modified: now,
            deps,
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn subdir(&self) -> &str {
        &self.subdir
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn template_name(&self) -> Option<&str> {
        self.template_name.as_deref()
    }

    pub fn created(&self) -> DateTime<Local> {
        self.created
    }

    pub fn modified(&self) -> DateTime<Local> {
        self.modified
    }

    pub fn deps(&self) -> &NoteDeps {
        &self.deps
    }

    /// Replace the in-memory content. Never touches the file.
    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
        self.modified = Local::now();
    }

    /// Rename the note in memory. The path stays where it was computed.
    pub fn set_title(&mut self, title: &str) -> NoteResult<()> {
        if title.trim().is_empty() {
            return Err(NoteError::validation("title cannot be empty"));
        }
        self.title = title.to_string();
        Ok(())
    }

    pub fn set_template_name(&mut self, name: &str) -> NoteResult<()> {
        if name.trim().is_empty() {
            return Err(NoteError::validation("template name cannot be empty"));
        }
        self.template_name = Some(name.to_string());
        Ok(())
    }

    /// Render the note's template with `data` and make the output its content.
    pub fn apply_template<T: Serialize + ?Sized>(&mut self, data: &T) -> NoteResult<()> {
        let value = serde_json::to_value(data).map_err(|e| {
            let name = self.template_name.clone().unwrap_or_default();
            NoteError::template(
                &self.title,
                TemplateError::Render { name, source: TemplateRenderError::Serialize(e.to_string()) },
            )
        })?;
        self.apply_template_value(&value)
    }

    pub fn apply_template_value(&mut self, data: &Value) -> NoteResult<()> {
        let Some(name) = self.template_name.as_deref() else {
            return Err(NoteError::NoTemplate(self.title.clone()));
        };

        debug!(title = %self.title, template = name, "applying template");
        let rendered = self.deps.renderer.render(name, data).map_err(|e| {
            error!(title = %self.title, template = name, error = %e, "template failed");
            NoteError::template(&self.title, e)
        })?;

        self.set_content(rendered);
        Ok(())
    }

    /// Title and path must both be present.
    pub fn validate(&self) -> NoteResult<()> {
        if self.title.trim().is_empty() {
            return Err(NoteError::validation("title cannot be empty"));
        }
        if self.path.as_os_str().is_empty() {
            return Err(NoteError::validation(format!("note '{}' has no path", self.title)));
        }
        Ok(())
    }

    /// Write the content to disk, overwriting whatever is there.
    pub fn save(&self) -> NoteResult<()> {
        self.validate()?;
        debug!(title = %self.title, path = %self.path.display(), "saving note");

        self.deps
            .storage
            .write(&self.path, self.content.as_bytes())
            .map_err(|e| self.storage_error("save", e))?;

        info!(title = %self.title, path = %self.path.display(), "note saved");
        Ok(())
    }

    /// Replace the in-memory content with the file's.
    pub fn load(&mut self) -> NoteResult<()> {
        self.validate()?;
        debug!(title = %self.title, path = %self.path.display(), "loading note");

        let bytes = self.deps.storage.read(&self.path).map_err(|e| self.storage_error("load", e))?;
        let content = String::from_utf8(bytes).map_err(|e| {
            let source = StorageError::Io {
                op: "decode",
                path: self.path.clone(),
                source: std::io::Error::new(std::io::ErrorKind::InvalidData, e),
            };
            self.storage_error("load", source)
        })?;

        self.set_content(content);
        info!(title = %self.title, path = %self.path.display(), "note loaded");
        Ok(())
    }

    /// Remove the file. A note that was never saved deletes fine.
    pub fn delete(&self) -> NoteResult<()> {
        self.validate()?;
        self.deps.storage.delete(&self.path).map_err(|e| self.storage_error("delete", e))?;
        info!(title = %self.title, path = %self.path.display(), "note deleted");
        Ok(())
    }

    pub fn exists(&self) -> bool {
        self.deps.storage.exists(&self.path)
    }

    /// Open the saved file in the configured editor and wait for it to exit.
    pub fn open(&self) -> NoteResult<()> {
        self.validate()?;
        if !self.exists() {
            return Err(NoteError::NotFound { title: self.title.clone(), path: self.path.clone() });
        }

        let editor = &self.deps.config.editor;
        debug!(title = %self.title, path = %self.path.display(), editor = %editor, "opening note");

        self.deps.storage.open_external(&self.path, editor).map_err(|e| {
            error!(title = %self.title, path = %self.path.display(), error = %e, "editor failed");
            match e {
                StorageError::NotFound(path) => NoteError::NotFound { title: self.title.clone(), path },
                source => NoteError::Editor { title: self.title.clone(), path: self.path.clone(), source },
            }
        })
    }

    /// Append `line` on its own line and save.
    pub fn append_line(&mut self, line: &str) -> NoteResult<()> {
        let mut content = std::mem::take(&mut self.content);
        if !content.is_empty() && !content.ends_with('\n') {
            content.push('\n');
        }
        content.push_str(line);
        content.push('\n');
        self.set_content(content);
        self.save()
    }

    fn storage_error(&self, op: &'static str, e: StorageError) -> NoteError {
        error!(title = %self.title, path = %self.path.display(), op, error = %e, "storage failed");
        match e {
            StorageError::NotFound(path) => NoteError::NotFound { title: self.title.clone(), path },
            source => NoteError::Io { op, title: self.title.clone(), path: self.path.clone(), source },
        }
    }
}

impl fmt::Debug for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Note")
            .field("title", &self.title)
            .field("path", &self.path)
            .field("template_name", &self.template_name)
            .field("created", &self.created)
            .field("modified", &self.modified)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use tempfile::tempdir;

    use crate::config::types::ResolvedConfig;
    use crate::storage::FsStorage;
    use crate::templates::TemplateRepository;

    fn deps(root: &Path) -> NoteDeps {
        let config = ResolvedConfig::with_data_home(root);
        let renderer = Arc::new(TemplateRepository::new(&config.templates_dir));
        NoteDeps::new(Arc::new(config), renderer, Arc::new(FsStorage::new()))
    }

    fn opts() -> NoteOptions {
        NoteOptions::new().subdir("notes").file_name("a.md")
    }

    #[test]
    fn test_create_requires_title_and_location() {
        let tmp = tempdir().unwrap();
        let d = deps(tmp.path());

        assert!(matches!(Note::create("", d.clone(), opts()), Err(NoteError::Validation(_))));
        assert!(matches!(
            Note::create("A", d.clone(), NoteOptions::new().subdir("notes")),
            Err(NoteError::Validation(_))
        ));
        assert!(matches!(
            Note::create("A", d, NoteOptions::new().file_name("a.md")),
            Err(NoteError::Validation(_))
        ));
    }

    #[test]
    fn test_set_content_bumps_modified() {
        let tmp = tempdir().unwrap();
        let mut note = Note::create("A", deps(tmp.path()), opts()).unwrap();
        let before = note.modified();

        std::thread::sleep(std::time::Duration::from_millis(2));
        note.set_content("hello");

        assert_eq!(note.content(), "hello");
        assert!(note.modified() > before);
        assert_eq!(note.created(), before);
        assert!(!note.exists());
    }

    #[test]
    fn test_apply_template_without_name_fails() {
        let tmp = tempdir().unwrap();
        let mut note = Note::create("A", deps(tmp.path()), opts()).unwrap();
        assert!(matches!(note.apply_template(&serde_json::json!({})), Err(NoteError::NoTemplate(_))));
    }

    #[test]
    fn test_load_missing_is_not_found() {
        let tmp = tempdir().unwrap();
        let mut note = Note::create("A", deps(tmp.path()), opts()).unwrap();
        assert!(matches!(note.load(), Err(NoteError::NotFound { .. })));
        assert!(matches!(note.open(), Err(NoteError::NotFound { .. })));
    }

    #[test]
    fn test_delete_is_idempotent() {
        let tmp = tempdir().unwrap();
        let mut note = Note::create("A", deps(tmp.path()), opts().content("x")).unwrap();
        note.save().unwrap();
        assert!(note.exists());

        note.delete().unwrap();
        note.delete().unwrap();
        assert!(!note.exists());
        assert!(note.load().is_err());
    }

    #[test]
    fn test_append_line_adds_newline_and_saves() {
        let tmp = tempdir().unwrap();
        let mut note = Note::create("A", deps(tmp.path()), opts().content("# A")).unwrap();

        note.append_line("- one").unwrap();
        note.append_line("- two").unwrap();

        let on_disk = std::fs::read_to_string(note.path()).unwrap();
        assert_eq!(on_disk, "# A\n- one\n- two\n");
    }
}
