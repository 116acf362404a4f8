use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::Deserialize;

use crate::cli::CliArgs;
use crate::config::{Configuration, parse_language, tick_interval_from_millis};
use crate::error::{ExtractError, ExtractResult};

const CONFIG_FILE_NAME: &str = "textgrab.toml";

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FileConfig {
    backend: Option<String>,
    language: Option<String>,
    tick_interval_ms: Option<u64>,
    tessdata_dir: Option<String>,
}

impl FileConfig {
    fn apply(&self, config: &mut Configuration) -> ExtractResult<()> {
        if let Some(backend) = &self.backend {
            config.backend = backend.parse()?;
        }
        if let Some(language) = &self.language {
            config.language = parse_language(language)?;
        }
        if let Some(millis) = self.tick_interval_ms {
            config.tick_interval = tick_interval_from_millis(millis)?;
        }
        if let Some(dir) = &self.tessdata_dir {
            config.tessdata_dir = Some(PathBuf::from(dir));
        }
        Ok(())
    }
}

/// Build the effective configuration with precedence
/// CLI > environment > config file > defaults.
pub fn resolve(cli: &CliArgs) -> ExtractResult<Configuration> {
    let mut config = Configuration::default();

    if let Some(file) = load_file_config(cli.config.as_deref())? {
        file.apply(&mut config)?;
    }
    config.apply_env()?;

    if let Some(backend) = &cli.backend {
        config.backend = backend.parse()?;
    }
    if let Some(language) = &cli.lang {
        config.language = parse_language(language)?;
    }
    if let Some(millis) = cli.tick_interval_ms {
        config.tick_interval = tick_interval_from_millis(millis)?;
    }
    if let Some(dir) = &cli.tessdata {
        config.tessdata_dir = Some(dir.clone());
    }

    Ok(config)
}

fn load_file_config(explicit: Option<&Path>) -> ExtractResult<Option<FileConfig>> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => match default_config_path() {
            Some(path) if path.exists() => path,
            _ => return Ok(None),
        },
    };
    let contents = fs::read_to_string(&path).map_err(|err| {
        ExtractError::configuration(format!(
            "failed to read config file '{}': {err}",
            path.display()
        ))
    })?;
    let parsed = toml::from_str(&contents).map_err(|err| {
        ExtractError::configuration(format!(
            "failed to parse config file '{}': {err}",
            path.display()
        ))
    })?;
    Ok(Some(parsed))
}

fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "textgrab").map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn cli_with_config(path: PathBuf) -> CliArgs {
        CliArgs {
            input: None,
            output: None,
            backend: None,
            lang: None,
            config: Some(path),
            tick_interval_ms: None,
            tessdata: None,
            list_backends: false,
        }
    }

    #[test]
    fn file_values_override_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "backend = \"mock\"\nlanguage = \"deu\"\ntick_interval_ms = 150"
        )
        .unwrap();

        let config = resolve(&cli_with_config(file.path().to_path_buf())).unwrap();
        assert_eq!(config.backend, crate::Backend::Mock);
        assert_eq!(config.language.as_str(), "deu");
        assert_eq!(config.tick_interval, std::time::Duration::from_millis(150));
    }

    #[test]
    fn cli_values_override_file_values() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "language = \"deu\"").unwrap();

        let mut cli = cli_with_config(file.path().to_path_buf());
        cli.lang = Some("fra".to_string());
        let config = resolve(&cli).unwrap();
        assert_eq!(config.language.as_str(), "fra");
    }

    #[test]
    fn invalid_file_values_are_configuration_errors() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "backend = \"carrier-pigeon\"").unwrap();

        let err = resolve(&cli_with_config(file.path().to_path_buf())).unwrap_err();
        assert!(matches!(err, ExtractError::Configuration { .. }));
    }

    #[test]
    fn missing_explicit_config_file_is_an_error() {
        let err = resolve(&cli_with_config(PathBuf::from("/nonexistent/textgrab.toml")))
            .unwrap_err();
        assert!(matches!(err, ExtractError::Configuration { .. }));
    }
}
