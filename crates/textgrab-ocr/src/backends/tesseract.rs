use std::path::Path;

use leptess::LepTess;

use crate::engine::OcrEngine;
use crate::error::OcrError;
use crate::language::Language;
use crate::payload::ImagePayload;
use crate::recognition::Recognition;

/// Local Tesseract engine via `leptess`.
///
/// Loading initializes a Tesseract session for a fixed language; the session
/// is reused across recognition calls until released.
pub struct TesseractEngine {
    inner: LepTess,
}

impl TesseractEngine {
    pub fn load(language: &Language, datapath: Option<&Path>) -> Result<Self, OcrError> {
        let datapath = match datapath {
            Some(path) => Some(path.to_str().ok_or_else(|| {
                OcrError::load(format!("tessdata path '{}' is not UTF-8", path.display()))
            })?),
            None => None,
        };
        let inner = LepTess::new(datapath, language.as_str())
            .map_err(|err| OcrError::load(err.to_string()))?;
        Ok(Self { inner })
    }
}

// The engine owns its Tesseract session exclusively and is only ever moved
// between threads, never shared.
unsafe impl Send for TesseractEngine {}

impl OcrEngine for TesseractEngine {
    fn name(&self) -> &'static str {
        "tesseract"
    }

    fn recognize(&mut self, payload: &ImagePayload) -> Result<Recognition, OcrError> {
        self.inner
            .set_image_from_mem(payload.bytes())
            .map_err(|err| OcrError::recognize(err.to_string()))?;
        let text = self
            .inner
            .get_utf8_text()
            .map_err(|err| OcrError::recognize(err.to_string()))?;
        let confidence = self.inner.mean_text_conf();
        Ok(Recognition::new(text).with_confidence(confidence as f32 / 100.0))
    }
}
