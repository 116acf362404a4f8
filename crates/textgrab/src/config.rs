use std::env;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use textgrab_ocr::{Language, OcrEngine, OcrError};

use crate::error::{ExtractError, ExtractResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    Mock,
    Tesseract,
}

impl FromStr for Backend {
    type Err = ExtractError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mock" => Ok(Backend::Mock),
            "tesseract" => Ok(Backend::Tesseract),
            other => Err(ExtractError::configuration(format!(
                "unknown backend '{other}'"
            ))),
        }
    }
}

impl Backend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Backend::Mock => "mock",
            Backend::Tesseract => "tesseract",
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn compiled_backends() -> Vec<Backend> {
    let mut backends = Vec::new();
    #[cfg(feature = "backend-tesseract")]
    {
        backends.push(Backend::Tesseract);
    }
    #[cfg(feature = "backend-mock")]
    {
        backends.push(Backend::Mock);
    }
    backends
}

pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(300);

#[derive(Debug, Clone)]
pub struct Configuration {
    pub backend: Backend,
    pub language: Language,
    pub tick_interval: Duration,
    pub tessdata_dir: Option<PathBuf>,
}

impl Default for Configuration {
    fn default() -> Self {
        let backend = compiled_backends().into_iter().next().unwrap_or(Backend::Mock);
        Self {
            backend,
            language: Language::default(),
            tick_interval: DEFAULT_TICK_INTERVAL,
            tessdata_dir: None,
        }
    }
}

impl Configuration {
    /// Defaults overlaid with `TEXTGRAB_*` environment variables.
    pub fn from_env() -> ExtractResult<Self> {
        let mut config = Configuration::default();
        config.apply_env()?;
        Ok(config)
    }

    pub(crate) fn apply_env(&mut self) -> ExtractResult<()> {
        if let Ok(backend) = env::var("TEXTGRAB_BACKEND") {
            self.backend = backend.parse()?;
        }
        if let Ok(language) = env::var("TEXTGRAB_LANGUAGE") {
            self.language = parse_language(&language)?;
        }
        if let Ok(interval) = env::var("TEXTGRAB_TICK_INTERVAL_MS") {
            let millis: u64 = interval.parse().map_err(|_| {
                ExtractError::configuration(format!(
                    "failed to parse TEXTGRAB_TICK_INTERVAL_MS='{interval}' as a positive integer"
                ))
            })?;
            self.tick_interval = tick_interval_from_millis(millis)?;
        }
        if let Ok(path) = env::var("TEXTGRAB_TESSDATA") {
            self.tessdata_dir = Some(PathBuf::from(path));
        }
        Ok(())
    }

    pub fn available_backends() -> Vec<Backend> {
        compiled_backends()
    }

    /// Load an engine for the configured backend. This is the factory the
    /// recognition service calls on first use and after termination.
    pub fn create_engine(&self) -> Result<Box<dyn OcrEngine>, OcrError> {
        match self.backend {
            Backend::Mock => {
                #[cfg(feature = "backend-mock")]
                {
                    Ok(Box::new(textgrab_ocr::MockEngine::default()) as Box<dyn OcrEngine>)
                }
                #[cfg(not(feature = "backend-mock"))]
                {
                    Err(OcrError::load("mock backend is not compiled into this build"))
                }
            }
            Backend::Tesseract => {
                #[cfg(feature = "backend-tesseract")]
                {
                    let engine = textgrab_ocr::TesseractEngine::load(
                        &self.language,
                        self.tessdata_dir.as_deref(),
                    )?;
                    Ok(Box::new(engine) as Box<dyn OcrEngine>)
                }
                #[cfg(not(feature = "backend-tesseract"))]
                {
                    Err(OcrError::load(
                        "tesseract backend is not compiled into this build",
                    ))
                }
            }
        }
    }
}

pub(crate) fn parse_language(code: &str) -> ExtractResult<Language> {
    code.parse()
        .map_err(|err: OcrError| ExtractError::configuration(err.to_string()))
}

pub(crate) fn tick_interval_from_millis(millis: u64) -> ExtractResult<Duration> {
    if millis == 0 {
        return Err(ExtractError::configuration(
            "tick interval must be greater than zero",
        ));
    }
    Ok(Duration::from_millis(millis))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_round_trips_through_strings() {
        assert_eq!("mock".parse::<Backend>().unwrap(), Backend::Mock);
        assert_eq!("Tesseract".parse::<Backend>().unwrap(), Backend::Tesseract);
        assert_eq!(Backend::Mock.to_string(), "mock");
        assert!("carrier-pigeon".parse::<Backend>().is_err());
    }

    #[test]
    fn default_configuration_uses_a_compiled_backend() {
        let config = Configuration::default();
        assert!(Configuration::available_backends().contains(&config.backend));
        assert_eq!(config.tick_interval, DEFAULT_TICK_INTERVAL);
        assert_eq!(config.language.as_str(), "eng");
    }

    #[test]
    fn zero_tick_interval_is_rejected() {
        assert!(tick_interval_from_millis(0).is_err());
        assert_eq!(
            tick_interval_from_millis(250).unwrap(),
            Duration::from_millis(250)
        );
    }

    #[cfg(feature = "backend-mock")]
    #[test]
    fn mock_engine_factory_succeeds() {
        let config = Configuration {
            backend: Backend::Mock,
            ..Configuration::default()
        };
        let engine = config.create_engine().unwrap();
        assert_eq!(engine.name(), "mock");
    }
}
