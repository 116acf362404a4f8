use thiserror::Error;

#[derive(Debug, Error)]
pub enum OcrError {
    #[error("image payload is empty")]
    EmptyPayload,
    #[error("invalid language code '{code}'")]
    InvalidLanguage { code: String },
    #[error("engine load failed: {message}")]
    Load { message: String },
    #[error("recognition failed: {message}")]
    Recognize { message: String },
}

impl OcrError {
    pub fn load(message: impl Into<String>) -> Self {
        Self::Load {
            message: message.into(),
        }
    }

    pub fn recognize(message: impl Into<String>) -> Self {
        Self::Recognize {
            message: message.into(),
        }
    }
}
