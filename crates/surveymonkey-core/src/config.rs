use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::code::{DEFAULT_CODE_LENGTH, MAX_CODE_LENGTH, MIN_CODE_LENGTH};
use crate::error::{Result, SurveyError};

pub const DB_PATH_ENV: &str = "SURVEYMONKEY_DB_PATH";
pub const HOST_ENV: &str = "SURVEYMONKEY_HOST";
pub const PORT_ENV: &str = "SURVEYMONKEY_PORT";
pub const STRICT_ANSWERS_ENV: &str = "SURVEYMONKEY_STRICT_ANSWERS";
pub const CODE_LENGTH_ENV: &str = "SURVEYMONKEY_CODE_LENGTH";
pub const LOG_ENV: &str = "SURVEYMONKEY_LOG";

pub const DEFAULT_DB_FILE: &str = "surveymonkey.sqlite3";
pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_LOG_FILTER: &str = "surveymonkey=info";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    /// Explicit database path; `None` means `<root>/surveymonkey.sqlite3`.
    pub db_path: Option<PathBuf>,
    pub host: String,
    pub port: u16,
    /// Reject histogram/option answers that do not fit the question.
    pub strict_answers: bool,
    pub code_length: usize,
    pub log_filter: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            db_path: None,
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            strict_answers: false,
            code_length: DEFAULT_CODE_LENGTH,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

/// On-disk form; every key is optional and overrides the defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    db_path: Option<PathBuf>,
    host: Option<String>,
    port: Option<u16>,
    strict_answers: Option<bool>,
    code_length: Option<usize>,
    log_filter: Option<String>,
}

impl ServiceConfig {
    /// Defaults, then the optional TOML file, then environment variables.
    pub fn load(file: Option<&Path>) -> Result<Self> {
        let mut config = Self::default();
        if let Some(path) = file {
            let raw = std::fs::read_to_string(path)?;
            config.apply_file(toml::from_str(&raw)?);
        }
        config.apply_env();
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let mut config = Self::default();
        config.apply_file(toml::from_str(raw)?);
        config.validate()?;
        Ok(config)
    }

    #[must_use]
    pub fn resolve_db_path(&self, root: &Path) -> PathBuf {
        self.db_path
            .clone()
            .unwrap_or_else(|| root.join(DEFAULT_DB_FILE))
    }

    fn apply_file(&mut self, file: ConfigFile) {
        if let Some(db_path) = file.db_path {
            self.db_path = Some(db_path);
        }
        if let Some(host) = file.host {
            self.host = host;
        }
        if let Some(port) = file.port {
            self.port = port;
        }
        if let Some(strict) = file.strict_answers {
            self.strict_answers = strict;
        }
        if let Some(code_length) = file.code_length {
            self.code_length = code_length;
        }
        if let Some(filter) = file.log_filter {
            self.log_filter = filter;
        }
    }

    fn apply_env(&mut self) {
        if let Some(path) = read_non_empty_env(DB_PATH_ENV) {
            self.db_path = Some(PathBuf::from(path));
        }
        if let Some(host) = read_non_empty_env(HOST_ENV) {
            self.host = host;
        }
        if let Some(port) = read_env_u16(PORT_ENV) {
            self.port = port;
        }
        if let Some(raw) = read_non_empty_env(STRICT_ANSWERS_ENV) {
            self.strict_answers = parse_env_bool(&raw);
        }
        if let Some(code_length) = read_env_usize(CODE_LENGTH_ENV) {
            self.code_length = code_length;
        }
        if let Some(filter) = read_non_empty_env(LOG_ENV) {
            self.log_filter = filter;
        }
    }

    fn validate(&self) -> Result<()> {
        if self.host.trim().is_empty() {
            return Err(SurveyError::Config("host must not be empty".to_string()));
        }
        if !(MIN_CODE_LENGTH..=MAX_CODE_LENGTH).contains(&self.code_length) {
            return Err(SurveyError::Config(format!(
                "code_length must be within [{MIN_CODE_LENGTH}, {MAX_CODE_LENGTH}], got {}",
                self.code_length
            )));
        }
        Ok(())
    }
}

fn read_non_empty_env(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|raw| raw.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn read_env_u16(name: &str) -> Option<u16> {
    std::env::var(name)
        .ok()
        .and_then(|raw| raw.trim().parse::<u16>().ok())
}

fn read_env_usize(name: &str) -> Option<usize> {
    std::env::var(name)
        .ok()
        .and_then(|raw| raw.trim().parse::<usize>().ok())
}

fn parse_env_bool(raw: &str) -> bool {
    matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
