// Configuration loading and parsing (config/tradewise.toml).

use chrono::{Datelike, NaiveDate, Utc};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tradewise_football::source::DEFAULT_SLEEPER_URL;

/// Name of the single config file, both in `defaults/` and `config/`.
pub const CONFIG_FILE: &str = "tradewise.toml";

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },

    #[error("failed to initialize config from defaults: {message}")]
    DefaultsCopyError { message: String },
}

// ---------------------------------------------------------------------------
// Config structs
// ---------------------------------------------------------------------------

/// The loaded configuration plus the directory it was resolved against.
#[derive(Debug, Clone)]
pub struct Config {
    pub data: DataConfig,
    pub sleeper: SleeperConfig,
    pub output: OutputConfig,
    pub logging: LoggingConfig,
    pub base_dir: PathBuf,
}

/// Raw deserialization target for tradewise.toml.
#[derive(Debug, Clone, Deserialize)]
struct ConfigFile {
    data: DataConfig,
    sleeper: SleeperConfig,
    #[serde(default)]
    output: OutputConfig,
    #[serde(default)]
    logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DataConfig {
    /// Valued player table (CSV).
    pub players: String,
    /// Directory holding saved league snapshots.
    #[serde(default = "default_snapshots_dir")]
    pub snapshots: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SleeperConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Defaults to the NFL season in progress.
    #[serde(default = "current_season")]
    pub season: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_filter")]
    pub filter: String,
    #[serde(default = "default_log_dir")]
    pub directory: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            filter: default_log_filter(),
            directory: default_log_dir(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_SLEEPER_URL.into()
}

fn current_season() -> String {
    season_for(Utc::now().date_naive())
}

/// NFL season a date falls in. January and February belong to the season
/// that started the previous September.
pub fn season_for(date: NaiveDate) -> String {
    let year = if date.month() <= 2 {
        date.year() - 1
    } else {
        date.year()
    };
    year.to_string()
}

fn default_snapshots_dir() -> String {
    "data/snapshots".into()
}

fn default_log_filter() -> String {
    "tradewise=info,warn".into()
}

fn default_log_dir() -> String {
    "logs".into()
}

impl Config {
    /// Path of the player table, resolved against `base_dir`.
    pub fn players_path(&self) -> PathBuf {
        self.resolve(&self.data.players)
    }

    pub fn snapshots_dir(&self) -> PathBuf {
        self.resolve(&self.data.snapshots)
    }

    pub fn log_dir(&self) -> PathBuf {
        self.resolve(&self.logging.directory)
    }

    pub fn sleeper_timeout(&self) -> Duration {
        Duration::from_secs(self.sleeper.timeout_secs)
    }

    fn resolve(&self, path: &str) -> PathBuf {
        let path = Path::new(path);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate `config/tradewise.toml` relative to `base_dir`.
///
/// Does not copy defaults; `load_config` does that first.
pub fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let path = base_dir.join("config").join(CONFIG_FILE);
    let text = std::fs::read_to_string(&path)
        .map_err(|_| ConfigError::FileNotFound { path: path.clone() })?;
    let file: ConfigFile = toml::from_str(&text).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        source: e,
    })?;

    let config = Config {
        data: file.data,
        sleeper: file.sleeper,
        output: file.output,
        logging: file.logging,
        base_dir: base_dir.to_path_buf(),
    };

    validate(&config)?;

    Ok(config)
}

/// Copy every file in `defaults/` that is missing from `config/`. Existing
/// files are never overwritten. Returns the files that were written.
pub fn ensure_config_files(base_dir: &Path) -> Result<Vec<PathBuf>, ConfigError> {
    let defaults_dir = base_dir.join("defaults");
    let config_dir = base_dir.join("config");
    let copy_err = |message: String| ConfigError::DefaultsCopyError { message };

    if !defaults_dir.is_dir() {
        if config_dir.is_dir() {
            return Ok(vec![]);
        }
        return Err(copy_err(format!(
            "neither defaults/ nor config/ directory found in {}",
            base_dir.display()
        )));
    }

    std::fs::create_dir_all(&config_dir)
        .map_err(|e| copy_err(format!("failed to create config directory: {e}")))?;

    let entries = std::fs::read_dir(&defaults_dir)
        .map_err(|e| copy_err(format!("failed to read defaults directory: {e}")))?;

    let mut copied = Vec::new();
    for entry in entries {
        let source = entry
            .map_err(|e| copy_err(format!("failed to read defaults entry: {e}")))?
            .path();
        let Some(file_name) = source.file_name().filter(|_| source.is_file()) else {
            continue;
        };
        let target = config_dir.join(file_name);

        match std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&target)
        {
            Ok(mut dest) => {
                let content = std::fs::read(&source)
                    .map_err(|e| copy_err(format!("failed to read {}: {e}", source.display())))?;
                std::io::Write::write_all(&mut dest, &content)
                    .map_err(|e| copy_err(format!("failed to write {}: {e}", target.display())))?;
                copied.push(target);
            }
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {}
            Err(e) => {
                return Err(copy_err(format!(
                    "failed to create {}: {e}",
                    target.display()
                )));
            }
        }
    }

    Ok(copied)
}

/// Copy defaults if needed, then load config from `base_dir`.
pub fn load_config(base_dir: &Path) -> Result<Config, ConfigError> {
    ensure_config_files(base_dir)?;
    load_config_from(base_dir)
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn invalid(field: &str, message: impl Into<String>) -> ConfigError {
    ConfigError::ValidationError {
        field: field.into(),
        message: message.into(),
    }
}

fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.data.players.trim().is_empty() {
        return Err(invalid("data.players", "must not be empty"));
    }

    let url = &config.sleeper.base_url;
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(invalid(
            "sleeper.base_url",
            format!("must be an http(s) URL, got `{url}`"),
        ));
    }

    let season = &config.sleeper.season;
    if season.len() != 4 || !season.chars().all(|c| c.is_ascii_digit()) {
        return Err(invalid(
            "sleeper.season",
            format!("must be a four-digit year, got `{season}`"),
        ));
    }

    if config.sleeper.timeout_secs == 0 {
        return Err(invalid("sleeper.timeout_secs", "must be greater than 0"));
    }

    if config.logging.filter.trim().is_empty() {
        return Err(invalid("logging.filter", "must not be empty"));
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
