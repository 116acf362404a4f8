//! Recognition service for textgrab.
//!
//! The service owns one lazily loaded OCR engine, runs recognition on the
//! blocking pool, and reports synthetic progress through a cancellable
//! periodic ticker while a call is in flight. Configuration is layered
//! CLI > environment > config file > defaults.

pub mod cli;
pub mod config;
pub mod error;
pub mod progress;
pub mod service;
pub mod settings;

pub use config::{Backend, Configuration};
pub use error::{ExtractError, ExtractResult};
pub use progress::{ProgressSink, ProgressTicker};
pub use service::RecognitionService;
