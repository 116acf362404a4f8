use thiserror::Error;

/// Errors surfaced by [`crate::RecognitionService`] and the configuration
/// layer. Messages are stable and user-presentable; the underlying backend
/// detail is logged at the service boundary and never carried here.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("failed to load the text recognition engine")]
    EngineLoad,
    #[error("failed to extract text from the image")]
    Recognition,
    #[error("another extraction is already in progress")]
    ConcurrentRequest,
    #[error("configuration error: {message}")]
    Configuration { message: String },
}

impl ExtractError {
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}

pub type ExtractResult<T> = Result<T, ExtractError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_do_not_leak_backend_detail() {
        assert_eq!(
            ExtractError::Recognition.to_string(),
            "failed to extract text from the image"
        );
        assert_eq!(
            ExtractError::EngineLoad.to_string(),
            "failed to load the text recognition engine"
        );
    }
}
