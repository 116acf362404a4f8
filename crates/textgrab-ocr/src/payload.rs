use std::path::{Path, PathBuf};

use crate::error::OcrError;

/// Encoded image bytes for a single recognition call.
///
/// The payload is consumed by one call and never retained by the service.
/// Validation happens at construction so backends can assume a non-empty
/// buffer.
#[derive(Debug, Clone)]
pub struct ImagePayload {
    bytes: Vec<u8>,
    source: Option<PathBuf>,
}

impl ImagePayload {
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, OcrError> {
        if bytes.is_empty() {
            return Err(OcrError::EmptyPayload);
        }
        Ok(Self {
            bytes,
            source: None,
        })
    }

    /// Attach the originating path, used only for diagnostics.
    pub fn with_source(mut self, path: impl Into<PathBuf>) -> Self {
        self.source = Some(path.into());
        self
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }
}
