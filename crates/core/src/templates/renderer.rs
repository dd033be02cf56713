//! The contract between notes and template rendering.

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use std::time::Duration;

use crossbeam_channel::RecvTimeoutError;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use super::discovery::TemplateDiscoveryError;
use super::engine::TemplateRenderError;

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("template not found: {0}")]
    NotFound(String),

    #[error("invalid template name '{0}'")]
    InvalidName(String),

    #[error("failed to render template '{name}': {source}")]
    Render {
        name: String,
        #[source]
        source: TemplateRenderError,
    },

    #[error("failed to read template file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Discovery(#[from] TemplateDiscoveryError),

    #[error("rendering template '{name}' did not finish within {timeout:?}")]
    DeadlineExceeded { name: String, timeout: Duration },

    #[error("render worker for template '{name}' failed: {reason}")]
    Worker { name: String, reason: String },
}

/// Renders a named template with structured data.
pub trait TemplateRenderer: Send + Sync {
    fn render(&self, name: &str, data: &Value) -> Result<String, TemplateError>;
}

/// Default cap on abandoned renders still running in the background.
pub const DEFAULT_MAX_IN_FLIGHT: usize = 4;

/// Races a wrapped renderer against a timeout.
///
/// Each call runs on a worker thread. When the timeout elapses first the
/// caller gets [`TemplateError::DeadlineExceeded`] and the worker's eventual
/// result is dropped. At most `max_in_flight` workers exist at once; calls
/// beyond that fail straight away instead of spawning another thread.
pub struct DeadlineRenderer {
    inner: Arc<dyn TemplateRenderer>,
    timeout: Duration,
    max_in_flight: usize,
    in_flight: Arc<AtomicUsize>,
}

impl DeadlineRenderer {
    pub fn new(inner: Arc<dyn TemplateRenderer>, timeout: Duration) -> Self {
        Self {
            inner,
            timeout,
            max_in_flight: DEFAULT_MAX_IN_FLIGHT,
            in_flight: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn with_max_in_flight(mut self, max: usize) -> Self {
        self.max_in_flight = max.max(1);
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Workers currently running, including abandoned ones.
    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }

    fn try_acquire(&self) -> Option<InFlightSlot> {
        self.in_flight
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| {
                (n < self.max_in_flight).then_some(n + 1)
            })
            .ok()
            .map(|_| InFlightSlot(Arc::clone(&self.in_flight)))
    }
}

impl TemplateRenderer for DeadlineRenderer {
    fn render(&self, name: &str, data: &Value) -> Result<String, TemplateError> {
        let deadline_exceeded =
            || TemplateError::DeadlineExceeded { name: name.to_string(), timeout: self.timeout };

        let Some(slot) = self.try_acquire() else {
            warn!(template = name, in_flight = self.in_flight(), "render workers saturated");
            return Err(deadline_exceeded());
        };

        let (tx, rx) = crossbeam_channel::bounded(1);
        let inner = Arc::clone(&self.inner);
        let owned_name = name.to_string();
        let owned_data = data.clone();

        thread::Builder::new()
            .name("template-render".into())
            .spawn(move || {
                let _slot = slot;
                // The receiver is gone when the caller already timed out.
                let _ = tx.send(inner.render(&owned_name, &owned_data));
            })
            .map_err(|e| TemplateError::Worker { name: name.to_string(), reason: e.to_string() })?;

        match rx.recv_timeout(self.timeout) {
            Ok(result) => result,
            Err(RecvTimeoutError::Timeout) => {
                warn!(template = name, timeout = ?self.timeout, "template render timed out");
                Err(deadline_exceeded())
            }
            Err(RecvTimeoutError::Disconnected) => {
                debug!(template = name, "render worker exited without a result");
                Err(TemplateError::Worker {
                    name: name.to_string(),
                    reason: "worker panicked".into(),
                })
            }
        }
    }
}

struct InFlightSlot(Arc<AtomicUsize>);

impl Drop for InFlightSlot {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::{Receiver, Sender};
    use serde_json::json;
    use std::time::Instant;

    struct Echo;

    impl TemplateRenderer for Echo {
        fn render(&self, name: &str, _data: &Value) -> Result<String, TemplateError> {
            Ok(format!("rendered {name}"))
        }
    }

    /// Blocks until released.
    struct Gate(Receiver<()>);

    impl TemplateRenderer for Gate {
        fn render(&self, _name: &str, _data: &Value) -> Result<String, TemplateError> {
            let _ = self.0.recv();
            Ok("late".into())
        }
    }

    fn gated() -> (Arc<dyn TemplateRenderer>, Sender<()>) {
        let (tx, rx) = crossbeam_channel::unbounded();
        (Arc::new(Gate(rx)), tx)
    }

    #[test]
    fn test_passes_through_fast_render() {
        let r = DeadlineRenderer::new(Arc::new(Echo), Duration::from_secs(5));
        assert_eq!(r.render("day", &json!({})).unwrap(), "rendered day");
    }

    #[test]
    fn test_times_out_promptly() {
        let (inner, release) = gated();
        let r = DeadlineRenderer::new(inner, Duration::from_millis(50));

        let started = Instant::now();
        let err = r.render("day", &json!({})).unwrap_err();

        assert!(matches!(err, TemplateError::DeadlineExceeded { .. }));
        assert!(started.elapsed() < Duration::from_secs(2));
        drop(release);
    }

    #[test]
    fn test_bounds_abandoned_workers() {
        let (inner, release) = gated();
        let r = DeadlineRenderer::new(inner, Duration::from_millis(20)).with_max_in_flight(1);

        assert!(r.render("a", &json!({})).is_err());
        assert_eq!(r.in_flight(), 1);

        // Saturated: fails without spawning
        let err = r.render("b", &json!({})).unwrap_err();
        assert!(matches!(err, TemplateError::DeadlineExceeded { .. }));
        assert_eq!(r.in_flight(), 1);

        release.send(()).unwrap();
        let deadline = Instant::now() + Duration::from_secs(5);
        while r.in_flight() > 0 && Instant::now() < deadline {
            thread::sleep(Duration::from_millis(5));
        }
        assert_eq!(r.in_flight(), 0);
    }
}
