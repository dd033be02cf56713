#![allow(dead_code)]

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use exo_core::config::types::ResolvedConfig;
use exo_core::storage::{Storage, StorageError, StorageResult};
use exo_core::templates::{TemplateError, TemplateRenderer, TemplateRepository};
use exo_core::{FsStorage, NoteDeps};
use serde_json::Value;

/// In-memory storage that records every call it receives.
#[derive(Default)]
pub struct RecordingStorage {
    files: Mutex<HashMap<PathBuf, Vec<u8>>>,
    calls: Mutex<Vec<String>>,
}

impl RecordingStorage {
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn contents(&self, path: &Path) -> Option<String> {
        let files = self.files.lock().unwrap();
        files.get(path).map(|b| String::from_utf8_lossy(b).into_owned())
    }

    pub fn seed(&self, path: &Path, content: &str) {
        self.files.lock().unwrap().insert(path.to_path_buf(), content.as_bytes().to_vec());
    }

    fn record(&self, op: &str, path: &Path) {
        self.calls.lock().unwrap().push(format!("{op} {}", path.display()));
    }
}

impl Storage for RecordingStorage {
    fn exists(&self, path: &Path) -> bool {
        self.record("exists", path);
        self.files.lock().unwrap().contains_key(path)
    }

    fn read(&self, path: &Path) -> StorageResult<Vec<u8>> {
        self.record("read", path);
        self.files
            .lock()
            .unwrap()
            .get(path)
            .cloned()
            .ok_or_else(|| StorageError::NotFound(path.to_path_buf()))
    }

    fn write(&self, path: &Path, bytes: &[u8]) -> StorageResult<()> {
        self.record("write", path);
        self.files.lock().unwrap().insert(path.to_path_buf(), bytes.to_vec());
        Ok(())
    }

    fn delete(&self, path: &Path) -> StorageResult<()> {
        self.record("delete", path);
        self.files.lock().unwrap().remove(path);
        Ok(())
    }

    fn open_external(&self, path: &Path, program: &str) -> StorageResult<()> {
        self.record(&format!("open[{program}]"), path);
        Ok(())
    }
}

/// Renders `"<name>: <data as json>"` and counts invocations.
#[derive(Default)]
pub struct StubRenderer {
    pub renders: Mutex<Vec<String>>,
}

impl TemplateRenderer for StubRenderer {
    fn render(&self, name: &str, data: &Value) -> Result<String, TemplateError> {
        self.renders.lock().unwrap().push(name.to_string());
        if name == "missing" {
            return Err(TemplateError::NotFound(name.to_string()));
        }
        Ok(format!("{name}: {data}"))
    }
}

/// Dependencies backed by the real filesystem and built-in templates.
pub fn fs_deps(root: &Path) -> NoteDeps {
    let config = ResolvedConfig::with_data_home(root);
    let renderer = Arc::new(TemplateRepository::new(&config.templates_dir));
    NoteDeps::new(Arc::new(config), renderer, Arc::new(FsStorage::new()))
}

/// Dependencies backed by in-memory storage and the stub renderer.
pub fn mock_deps(root: &Path) -> (NoteDeps, Arc<RecordingStorage>, Arc<StubRenderer>) {
    let storage = Arc::new(RecordingStorage::default());
    let renderer = Arc::new(StubRenderer::default());
    let deps = NoteDeps::new(
        Arc::new(ResolvedConfig::with_data_home(root)),
        renderer.clone(),
        storage.clone(),
    );
    (deps, storage, renderer)
}
