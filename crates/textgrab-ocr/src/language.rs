use std::fmt;
use std::str::FromStr;

use crate::error::OcrError;

/// Recognition language passed to the engine, in the ISO 639 form Tesseract
/// expects (`eng`, `deu`, combined codes like `eng+deu`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Language(String);

impl Language {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Language {
    fn default() -> Self {
        Self("eng".to_string())
    }
}

impl FromStr for Language {
    type Err = OcrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim();
        let valid = !code.is_empty()
            && code
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '+');
        if !valid {
            return Err(OcrError::InvalidLanguage {
                code: s.to_string(),
            });
        }
        Ok(Self(code.to_string()))
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
