use crate::error::OcrError;
use crate::payload::ImagePayload;
use crate::recognition::Recognition;

/// Common interface for all OCR engines.
///
/// An engine is loaded by its backend constructor, used for any number of
/// recognition calls, and released exactly once. Engines are moved onto the
/// blocking thread pool for recognition, so implementations must be `Send`
/// but are never shared between threads.
pub trait OcrEngine: Send + 'static {
    fn name(&self) -> &'static str;

    fn recognize(&mut self, payload: &ImagePayload) -> Result<Recognition, OcrError>;

    /// Release engine resources. The default drops the engine in place,
    /// which is sufficient for backends without out-of-process state.
    fn release(self: Box<Self>) {}
}
