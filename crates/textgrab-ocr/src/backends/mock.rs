use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use std::time::Duration;

use crate::engine::OcrEngine;
use crate::error::OcrError;
use crate::payload::ImagePayload;
use crate::recognition::Recognition;

/// Deterministic engine used by tests and CI.
///
/// Returns canned text or a scripted failure, optionally after an artificial
/// recognition delay. The delay runs on the blocking pool like a real
/// engine's work would, so callers can observe progress reporting while a
/// call is in flight.
pub struct MockEngine {
    text: String,
    failure: Option<String>,
    delay: Duration,
    calls: Arc<AtomicUsize>,
}

impl MockEngine {
    pub fn returning(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            failure: None,
            delay: Duration::ZERO,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn failing(message: impl Into<String>) -> Self {
        let mut engine = Self::returning("");
        engine.failure = Some(message.into());
        engine
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Shared counter incremented on every `recognize` call.
    pub fn call_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }
}

impl Default for MockEngine {
    fn default() -> Self {
        Self::returning("")
    }
}

impl OcrEngine for MockEngine {
    fn name(&self) -> &'static str {
        "mock"
    }

    fn recognize(&mut self, _payload: &ImagePayload) -> Result<Recognition, OcrError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            thread::sleep(self.delay);
        }
        match &self.failure {
            Some(message) => Err(OcrError::recognize(message.clone())),
            None => Ok(Recognition::new(self.text.clone()).with_confidence(0.99)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload() -> ImagePayload {
        ImagePayload::from_bytes(vec![0u8; 8]).unwrap()
    }

    #[test]
    fn returns_canned_text() {
        let mut engine = MockEngine::returning("hello");
        let recognition = engine.recognize(&payload()).unwrap();
        assert_eq!(recognition.text, "hello");
        assert_eq!(recognition.confidence, Some(0.99));
    }

    #[test]
    fn scripted_failure_surfaces_as_recognize_error() {
        let mut engine = MockEngine::failing("bad image");
        let err = engine.recognize(&payload()).unwrap_err();
        assert!(matches!(err, OcrError::Recognize { .. }));
    }

    #[test]
    fn call_counter_tracks_invocations() {
        let mut engine = MockEngine::returning("x");
        let calls = engine.call_counter();
        engine.recognize(&payload()).unwrap();
        engine.recognize(&payload()).unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
