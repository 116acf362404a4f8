//! OCR engine abstraction for textgrab.
//!
//! The crate defines a minimal engine interface ([`OcrEngine`]) plus the
//! payload and result types that cross it. Concrete recognizers live in
//! feature-gated backend modules so that the default build stays free of
//! native dependencies: `backend-mock` (default) provides a deterministic
//! engine for tests and CI, `backend-tesseract` wraps a local Tesseract
//! installation through `leptess`.

mod backends;
mod engine;
mod error;
mod language;
mod payload;
mod recognition;

#[cfg(feature = "backend-mock")]
pub use backends::mock::MockEngine;
#[cfg(feature = "backend-tesseract")]
pub use backends::tesseract::TesseractEngine;
pub use engine::OcrEngine;
pub use error::OcrError;
pub use language::Language;
pub use payload::ImagePayload;
pub use recognition::Recognition;
