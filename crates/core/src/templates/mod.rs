//! Template lookup and rendering.
//!
//! Templates are plain text with `{{ name }}` placeholders. Note kinds hand
//! structured data to a [`TemplateRenderer`], which owns lookup and rendering.

pub mod builtin;
pub mod discovery;
pub mod engine;
pub mod install;
pub mod renderer;
pub mod repository;

pub use renderer::{DeadlineRenderer, TemplateError, TemplateRenderer};
pub use repository::{TemplateRepository, TemplateSource};
