//! Config file loading and the merged runtime settings.
//!
//! Precedence is: command-line flag, then config file, then built-in default.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use super::Args;
use crate::error::{Error, Result};
use crate::models::LlmModel;
use crate::remote::RetryPolicy;

const DEFAULT_ENDPOINT: &str = crate::remote::DEFAULT_ENDPOINT;
const DEFAULT_INTERVAL_MS: u64 = 3000;
const MIN_INTERVAL_MS: u64 = 100;
const DEFAULT_TIMEOUT_SECS: u64 = 60;
const DEFAULT_RETRY_DELAY_MS: u64 = 500;

/// Contents of `config.toml`. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub endpoint: Option<String>,
    pub interval_ms: Option<u64>,
    pub timeout_secs: Option<u64>,
    pub retry_delay_ms: Option<u64>,
    pub max_retries: Option<u32>,
    pub white: Option<LlmModel>,
    pub black: Option<LlmModel>,
    pub fen: Option<String>,
    pub log_file: Option<PathBuf>,
    pub autostart: Option<bool>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::Config {
            path: path.to_path_buf(),
            source: Box::new(e),
        })?;
        toml::from_str(&content).map_err(|e| Error::Config {
            path: path.to_path_buf(),
            source: Box::new(e),
        })
    }
}

/// `<config dir>/llm-chess/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("llm-chess").join("config.toml"))
}

/// `<data dir>/llm-chess/llm-chess.log`, falling back to the temp dir
pub fn default_log_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("llm-chess")
        .join("llm-chess.log")
}

/// Fully resolved runtime configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub endpoint: String,
    pub poll_interval: Duration,
    pub request_timeout: Duration,
    pub retry: RetryPolicy,
    pub white: LlmModel,
    pub black: LlmModel,
    pub start_fen: String,
    pub log_file: PathBuf,
    pub autostart: bool,
}

impl Settings {
    /// Load the config file named by `--config` (must exist) or the default
    /// one (may be missing) and merge it with the arguments.
    pub fn resolve(args: &Args) -> Result<Self> {
        let file = match &args.config {
            Some(path) => FileConfig::load(path)?,
            None => match default_config_path() {
                Some(path) if path.exists() => FileConfig::load(&path)?,
                _ => FileConfig::default(),
            },
        };
        Self::merge(args, file)
    }

    pub fn merge(args: &Args, file: FileConfig) -> Result<Self> {
        let white = match &args.white {
            Some(id) => id.parse()?,
            None => file.white.unwrap_or_default(),
        };
        let black = match &args.black {
            Some(id) => id.parse()?,
            None => file.black.unwrap_or_default(),
        };

        let interval_ms = args
            .interval_ms
            .or(file.interval_ms)
            .unwrap_or(DEFAULT_INTERVAL_MS)
            .max(MIN_INTERVAL_MS);
        let timeout_secs = args
            .timeout_secs
            .or(file.timeout_secs)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);
        let retry_delay_ms = args
            .retry_delay_ms
            .or(file.retry_delay_ms)
            .unwrap_or(DEFAULT_RETRY_DELAY_MS);

        Ok(Self {
            endpoint: args
                .endpoint
                .clone()
                .or(file.endpoint)
                .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
            poll_interval: Duration::from_millis(interval_ms),
            request_timeout: Duration::from_secs(timeout_secs),
            retry: RetryPolicy {
                delay: Duration::from_millis(retry_delay_ms),
                max_retries: args.max_retries.or(file.max_retries),
            },
            white,
            black,
            start_fen: args
                .fen
                .clone()
                .or(file.fen)
                .unwrap_or_else(|| "start".to_string()),
            log_file: args
                .log_file
                .clone()
                .or(file.log_file)
                .unwrap_or_else(default_log_path),
            autostart: args.start || file.autostart.unwrap_or(false),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let settings = Settings::merge(&Args::default(), FileConfig::default()).unwrap();
        assert_eq!(settings.endpoint, "https://chess-backend-rt09.onrender.com/move");
        assert_eq!(settings.poll_interval, Duration::from_millis(3000));
        assert_eq!(settings.request_timeout, Duration::from_secs(60));
        assert_eq!(settings.retry, RetryPolicy::default());
        assert_eq!(settings.white, LlmModel::Gpt35TurboInstruct);
        assert_eq!(settings.black, LlmModel::Gpt35TurboInstruct);
        assert_eq!(settings.start_fen, "start");
        assert!(!settings.autostart);
    }

    #[test]
    fn test_load_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            r#"
endpoint = "http://localhost:9000/move"
interval_ms = 1000
max_retries = 3
white = "mistral-7b-instruct"
autostart = true
"#,
        )
        .unwrap();

        let file = FileConfig::load(&path).unwrap();
        assert_eq!(file.endpoint.as_deref(), Some("http://localhost:9000/move"));
        assert_eq!(file.interval_ms, Some(1000));
        assert_eq!(file.max_retries, Some(3));
        assert_eq!(file.white, Some(LlmModel::Mistral7bInstruct));
        assert_eq!(file.black, None);
        assert_eq!(file.autostart, Some(true));
    }

    #[test]
    fn test_load_rejects_unknown_model() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "black = \"gpt-9\"\n").unwrap();
        assert!(matches!(FileConfig::load(&path), Err(Error::Config { .. })));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nope.toml");
        assert!(matches!(FileConfig::load(&path), Err(Error::Config { .. })));
    }

    #[test]
    fn test_args_override_file() {
        let file = FileConfig {
            endpoint: Some("http://file/move".to_string()),
            interval_ms: Some(1000),
            white: Some(LlmModel::Gemma7bIt),
            black: Some(LlmModel::OpenChat7b),
            max_retries: Some(2),
            ..FileConfig::default()
        };
        let args = Args {
            endpoint: Some("http://args/move".to_string()),
            white: Some("nous-capybara-7b".to_string()),
            ..Args::default()
        };

        let settings = Settings::merge(&args, file).unwrap();
        assert_eq!(settings.endpoint, "http://args/move");
        assert_eq!(settings.poll_interval, Duration::from_millis(1000));
        assert_eq!(settings.white, LlmModel::NousCapybara7b);
        assert_eq!(settings.black, LlmModel::OpenChat7b);
        assert_eq!(settings.retry.max_retries, Some(2));
    }

    #[test]
    fn test_unknown_model_argument() {
        let args = Args {
            black: Some("claude-9".to_string()),
            ..Args::default()
        };
        assert!(matches!(
            Settings::merge(&args, FileConfig::default()),
            Err(Error::UnknownModel(_))
        ));
    }

    #[test]
    fn test_interval_has_floor() {
        let args = Args {
            interval_ms: Some(0),
            ..Args::default()
        };
        let settings = Settings::merge(&args, FileConfig::default()).unwrap();
        assert_eq!(settings.poll_interval, Duration::from_millis(MIN_INTERVAL_MS));
    }

    #[test]
    fn test_resolve_with_explicit_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        fs::write(&path, "timeout_secs = 5\nretry_delay_ms = 0\n").unwrap();
        let args = Args {
            config: Some(path),
            ..Args::default()
        };
        let settings = Settings::resolve(&args).unwrap();
        assert_eq!(settings.request_timeout, Duration::from_secs(5));
        assert_eq!(settings.retry.delay, Duration::ZERO);
    }
}
