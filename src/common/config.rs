//! Configuration file handling

use serde::Deserialize;
use std::path::Path;

use super::paths::config_path;
use super::{Error, Result};

/// Main configuration structure
#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct Config {
    /// Reporter output settings
    #[serde(default)]
    pub output: OutputConfig,

    /// Runner behavior
    #[serde(default)]
    pub runner: RunnerConfig,
}

/// Which reporter the CLI subscribes
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// Colored, human-readable lines
    #[default]
    Console,
    /// One JSON object per event
    Json,
}

/// Terminal color handling for the console reporter
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ColorChoice {
    /// Let `colored` decide from the environment
    #[default]
    Auto,
    Always,
    Never,
}

/// What the runner does with a series entry that is not registered
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum UnknownTestPolicy {
    /// Stop the series with `Error::UnknownTestCase`
    #[default]
    Abort,
    /// Log a warning, note the name in the summary and keep going
    Skip,
}

/// Output settings
#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,

    /// Print every assertion, not only test verdicts
    #[serde(default)]
    pub verbose: bool,

    #[serde(default)]
    pub color: ColorChoice,
}

/// Runner settings
#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct RunnerConfig {
    #[serde(default)]
    pub on_unknown: UnknownTestPolicy,
}

impl Config {
    /// Load configuration from the default config file
    ///
    /// Returns default configuration if file doesn't exist
    pub fn load() -> Result<Self> {
        if let Some(path) = config_path() {
            if path.exists() {
                return Self::load_from(&path);
            }
        }
        Ok(Self::default())
    }

    /// Load configuration from an explicit path, which must exist
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::file_read(path, &e))?;
        Self::parse(&content)
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::ConfigParse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_is_default() {
        assert_eq!(Config::parse("").unwrap(), Config::default());
    }

    #[test]
    fn test_parse_all_sections() {
        let config = Config::parse(
            r#"
[output]
format = "json"
verbose = true
color = "never"

[runner]
on_unknown = "skip"
"#,
        )
        .unwrap();

        assert_eq!(config.output.format, OutputFormat::Json);
        assert!(config.output.verbose);
        assert_eq!(config.output.color, ColorChoice::Never);
        assert_eq!(config.runner.on_unknown, UnknownTestPolicy::Skip);
    }

    #[test]
    fn test_unknown_policy_rejected() {
        let err = Config::parse("[runner]\non_unknown = \"ignore\"\n").unwrap_err();
        assert!(matches!(err, Error::ConfigParse(_)));
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let err = Config::load_from(Path::new("/definitely/not/here/config.toml")).unwrap_err();
        assert!(matches!(err, Error::FileRead { .. }));
    }
}
