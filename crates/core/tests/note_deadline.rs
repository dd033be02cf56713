mod common;

use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use common::RecordingStorage;
use exo_core::config::types::ResolvedConfig;
use exo_core::note::kinds::zettel;
use exo_core::templates::{DeadlineRenderer, TemplateError, TemplateRenderer};
use exo_core::{NoteDeps, NoteError, NoteOptions};
use serde_json::Value;
use tempfile::tempdir;

struct Slow(Duration);

impl TemplateRenderer for Slow {
    fn render(&self, _name: &str, _data: &Value) -> Result<String, TemplateError> {
        thread::sleep(self.0);
        Ok("too late".into())
    }
}

#[test]
fn slow_template_fails_construction_promptly() {
    let tmp = tempdir().unwrap();
    let storage = Arc::new(RecordingStorage::default());
    let renderer = DeadlineRenderer::new(
        Arc::new(Slow(Duration::from_secs(2))),
        Duration::from_millis(50),
    );
    let deps = NoteDeps::new(
        Arc::new(ResolvedConfig::with_data_home(tmp.path())),
        Arc::new(renderer),
        storage.clone(),
    );

    let started = Instant::now();
    let err = zettel::create(&deps, "Slow Thought", NoteOptions::new()).unwrap_err();

    assert!(started.elapsed() < Duration::from_secs(1));
    match err {
        NoteError::DeadlineExceeded { title, template, timeout } => {
            assert_eq!(title, "Slow Thought");
            assert_eq!(template, "zet");
            assert_eq!(timeout, Duration::from_millis(50));
        }
        other => panic!("expected DeadlineExceeded, got {other:?}"),
    }
    assert!(!storage.calls().iter().any(|c| c.starts_with("write")));
}

#[test]
fn fast_template_passes_through() {
    let tmp = tempdir().unwrap();
    let storage = Arc::new(RecordingStorage::default());
    let renderer =
        DeadlineRenderer::new(Arc::new(Slow(Duration::ZERO)), Duration::from_secs(5));
    let deps = NoteDeps::new(
        Arc::new(ResolvedConfig::with_data_home(tmp.path())),
        Arc::new(renderer),
        storage.clone(),
    );

    let note = zettel::create(&deps, "Quick", NoteOptions::new()).unwrap().note;
    assert_eq!(note.content(), "too late");
    assert_eq!(storage.contents(note.path()).as_deref(), Some("too late"));
}
