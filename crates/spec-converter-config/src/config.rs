// crates/spec-converter-config/src/config.rs
// ============================================================================
// Module: Converter Configuration
// Description: Configuration loading and validation for the converter.
// Purpose: Provide strict, fail-closed config parsing with hard limits.
// Dependencies: serde, thiserror, toml, url
// ============================================================================

//! ## Overview
//! Configuration is loaded from a TOML file with strict size and path limits.
//! Every setting has a default, so an empty file is valid. Unknown keys are
//! rejected.
//!
//! Secrets never live in the file: `completion.api_key_env` and
//! `submission.password_env` name environment variables read on demand.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::env;
use std::fs;
use std::path::Path;
use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;
use url::Url;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default configuration filename when no path is specified.
pub const DEFAULT_CONFIG_NAME: &str = "spec-converter.toml";
/// Environment variable holding the configuration path.
pub const CONFIG_ENV_VAR: &str = "SPEC_CONVERTER_CONFIG";
/// Maximum configuration file size.
const MAX_CONFIG_FILE_SIZE: usize = 1024 * 1024;
/// Maximum length of one path component.
const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum total path length.
const MAX_TOTAL_PATH_LENGTH: usize = 4096;
/// Maximum request timeout for either endpoint.
const MAX_TIMEOUT_MS: u64 = 600_000;
/// Maximum response token cap.
const MAX_COMPLETION_TOKENS: u32 = 131_072;
/// Maximum sampling temperature.
const MAX_TEMPERATURE: f64 = 2.0;

// ============================================================================
// SECTION: Root
// ============================================================================

/// Converter configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConverterConfig {
    /// Input locations.
    #[serde(default)]
    pub paths: PathsConfig,
    /// Completion service settings.
    #[serde(default)]
    pub completion: CompletionConfig,
    /// Report submission settings.
    #[serde(default)]
    pub submission: SubmissionConfig,
}

impl ConverterConfig {
    /// Loads configuration from disk using the default resolution rules.
    ///
    /// Resolution order: explicit `path`, then [`CONFIG_ENV_VAR`], then
    /// [`DEFAULT_CONFIG_NAME`] in the working directory.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when loading or validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let resolved = resolve_path(path)?;
        validate_path(&resolved)?;
        let bytes = fs::read(&resolved).map_err(|err| ConfigError::Io(err.to_string()))?;
        Self::from_bytes(&bytes)
    }

    /// Loads configuration when a file is present, defaults otherwise.
    ///
    /// An explicit `path` or [`CONFIG_ENV_VAR`] must exist; only the default
    /// file name may be absent.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a present file fails to load.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        if path.is_none() && env::var_os(CONFIG_ENV_VAR).is_none() {
            let default_path = Path::new(DEFAULT_CONFIG_NAME);
            if !default_path.exists() {
                let config = Self::default();
                config.validate()?;
                return Ok(config);
            }
        }
        Self::load(path)
    }

    /// Parses and validates configuration bytes.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the bytes are oversized, not UTF-8, not
    /// TOML, or fail validation.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ConfigError> {
        if bytes.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
        }
        let content = std::str::from_utf8(bytes)
            .map_err(|_| ConfigError::Invalid("config file must be utf-8".to_string()))?;
        let config: Self =
            toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first offending setting.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.paths.validate()?;
        self.completion.validate()?;
        self.submission.validate()
    }
}

// ============================================================================
// SECTION: Paths
// ============================================================================

/// Input locations.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PathsConfig {
    /// Directory holding source documents, scenario tables and side files.
    #[serde(default = "default_docs_dir")]
    pub docs_dir: PathBuf,
    /// Target field schema file.
    #[serde(default = "default_schema_path")]
    pub schema_path: PathBuf,
    /// Cell scenario table, relative to `docs_dir` unless absolute.
    #[serde(default = "default_cell_scenario")]
    pub cell_scenario: PathBuf,
    /// UE scenario table, relative to `docs_dir` unless absolute.
    #[serde(default = "default_ue_scenario")]
    pub ue_scenario: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            docs_dir: default_docs_dir(),
            schema_path: default_schema_path(),
            cell_scenario: default_cell_scenario(),
            ue_scenario: default_ue_scenario(),
        }
    }
}

impl PathsConfig {
    /// Returns the resolved cell scenario path.
    #[must_use]
    pub fn cell_scenario_path(&self) -> PathBuf {
        self.docs_dir.join(&self.cell_scenario)
    }

    /// Returns the resolved UE scenario path.
    #[must_use]
    pub fn ue_scenario_path(&self) -> PathBuf {
        self.docs_dir.join(&self.ue_scenario)
    }

    /// Validates path lengths.
    fn validate(&self) -> Result<(), ConfigError> {
        validate_path_setting("paths.docs_dir", &self.docs_dir)?;
        validate_path_setting("paths.schema_path", &self.schema_path)?;
        validate_path_setting("paths.cell_scenario", &self.cell_scenario)?;
        validate_path_setting("paths.ue_scenario", &self.ue_scenario)
    }
}

// ============================================================================
// SECTION: Completion
// ============================================================================

/// Completion service settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CompletionConfig {
    /// API root of an OpenAI-compatible service.
    #[serde(default = "default_completion_base_url")]
    pub base_url: String,
    /// Model identifier.
    #[serde(default = "default_model")]
    pub model: String,
    /// Environment variable holding the API key.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
    /// Sampling temperature.
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    /// Nucleus sampling mass.
    #[serde(default = "default_top_p")]
    pub top_p: f64,
    /// Response token cap.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// Whole-request timeout in milliseconds.
    #[serde(default = "default_completion_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            base_url: default_completion_base_url(),
            model: default_model(),
            api_key_env: default_api_key_env(),
            temperature: default_temperature(),
            top_p: default_top_p(),
            max_tokens: default_max_tokens(),
            timeout_ms: default_completion_timeout_ms(),
        }
    }
}

impl CompletionConfig {
    /// Returns the parsed API root.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when the URL is not http(s).
    pub fn base_url(&self) -> Result<Url, ConfigError> {
        parse_http_url("completion.base_url", &self.base_url)
    }

    /// Returns the request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Reads the API key from the configured environment variable.
    #[must_use]
    pub fn api_key(&self) -> Option<String> {
        env::var(&self.api_key_env).ok().filter(|key| !key.trim().is_empty())
    }

    /// Validates URL, sampling and timeout settings.
    fn validate(&self) -> Result<(), ConfigError> {
        self.base_url()?;
        if self.model.trim().is_empty() {
            return Err(ConfigError::Invalid("completion.model must be non-empty".to_string()));
        }
        validate_env_name("completion.api_key_env", &self.api_key_env)?;
        if !(0.0..=MAX_TEMPERATURE).contains(&self.temperature) {
            return Err(ConfigError::Invalid(format!(
                "completion.temperature must be between 0 and {MAX_TEMPERATURE}"
            )));
        }
        if !(self.top_p > 0.0 && self.top_p <= 1.0) {
            return Err(ConfigError::Invalid("completion.top_p must be in (0, 1]".to_string()));
        }
        if self.max_tokens == 0 || self.max_tokens > MAX_COMPLETION_TOKENS {
            return Err(ConfigError::Invalid(format!(
                "completion.max_tokens must be between 1 and {MAX_COMPLETION_TOKENS}"
            )));
        }
        validate_timeout("completion.timeout_ms", self.timeout_ms)
    }
}

// ============================================================================
// SECTION: Submission
// ============================================================================

/// Report submission settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SubmissionConfig {
    /// Service root.
    #[serde(default = "default_submission_base_url")]
    pub base_url: String,
    /// Path under which reports are keyed by test id.
    #[serde(default = "default_path_prefix")]
    pub path_prefix: String,
    /// Whole-request timeout in milliseconds.
    #[serde(default = "default_submission_timeout_ms")]
    pub timeout_ms: u64,
    /// Basic-auth user for retrieval.
    #[serde(default)]
    pub username: Option<String>,
    /// Environment variable holding the basic-auth password.
    #[serde(default)]
    pub password_env: Option<String>,
}

impl Default for SubmissionConfig {
    fn default() -> Self {
        Self {
            base_url: default_submission_base_url(),
            path_prefix: default_path_prefix(),
            timeout_ms: default_submission_timeout_ms(),
            username: None,
            password_env: None,
        }
    }
}

impl SubmissionConfig {
    /// Returns the parsed service root.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when the URL is not http(s).
    pub fn base_url(&self) -> Result<Url, ConfigError> {
        parse_http_url("submission.base_url", &self.base_url)
    }

    /// Returns the request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Reads the basic-auth password from the configured environment variable.
    #[must_use]
    pub fn password(&self) -> Option<String> {
        self.password_env.as_ref().and_then(|name| env::var(name).ok())
    }

    /// Validates URL, path prefix, auth and timeout settings.
    fn validate(&self) -> Result<(), ConfigError> {
        self.base_url()?;
        if !self.path_prefix.is_empty() && !self.path_prefix.starts_with('/') {
            return Err(ConfigError::Invalid(
                "submission.path_prefix must start with '/'".to_string(),
            ));
        }
        if self.path_prefix.contains(['?', '#']) {
            return Err(ConfigError::Invalid(
                "submission.path_prefix must not contain a query or fragment".to_string(),
            ));
        }
        if let Some(name) = &self.password_env {
            validate_env_name("submission.password_env", name)?;
            if self.username.is_none() {
                return Err(ConfigError::Invalid(
                    "submission.password_env requires submission.username".to_string(),
                ));
            }
        }
        if self.username.as_deref().is_some_and(|user| user.is_empty() || user.contains(':')) {
            return Err(ConfigError::Invalid(
                "submission.username must be non-empty and must not contain ':'".to_string(),
            ));
        }
        validate_timeout("submission.timeout_ms", self.timeout_ms)
    }
}

// ============================================================================
// SECTION: Defaults
// ============================================================================

/// Default docs directory.
fn default_docs_dir() -> PathBuf {
    PathBuf::from("docs")
}

/// Default target schema path.
fn default_schema_path() -> PathBuf {
    PathBuf::from("docs/json_schema.json")
}

/// Default cell scenario table.
fn default_cell_scenario() -> PathBuf {
    PathBuf::from("cell-scenario.csv")
}

/// Default UE scenario table.
fn default_ue_scenario() -> PathBuf {
    PathBuf::from("ue-scenario.csv")
}

/// Default completion API root.
fn default_completion_base_url() -> String {
    "https://integrate.api.nvidia.com/v1".to_string()
}

/// Default completion model.
fn default_model() -> String {
    "meta/llama-3.3-70b-instruct".to_string()
}

/// Default API key variable.
fn default_api_key_env() -> String {
    "NVIDIA_API_KEY".to_string()
}

/// Default sampling temperature.
const fn default_temperature() -> f64 {
    0.1
}

/// Default nucleus sampling mass.
const fn default_top_p() -> f64 {
    0.7
}

/// Default response token cap.
const fn default_max_tokens() -> u32 {
    1024
}

/// Default completion timeout.
const fn default_completion_timeout_ms() -> u64 {
    60_000
}

/// Default submission service root.
fn default_submission_base_url() -> String {
    "http://localhost:8000".to_string()
}

/// Default submission path prefix.
fn default_path_prefix() -> String {
    "/ProvMnS/v1alpha1/SubNetwork".to_string()
}

/// Default submission timeout.
const fn default_submission_timeout_ms() -> u64 {
    10_000
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration loading or validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O failure while reading configuration.
    #[error("config io error: {0}")]
    Io(String),
    /// TOML parsing error.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Invalid configuration data.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Resolves the config path from CLI or environment defaults.
fn resolve_path(path: Option<&Path>) -> Result<PathBuf, ConfigError> {
    if let Some(path) = path {
        return Ok(path.to_path_buf());
    }
    if let Ok(env_path) = env::var(CONFIG_ENV_VAR) {
        if env_path.len() > MAX_TOTAL_PATH_LENGTH {
            return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
        }
        return Ok(PathBuf::from(env_path));
    }
    Ok(PathBuf::from(DEFAULT_CONFIG_NAME))
}

/// Validates the resolved path against length limits.
fn validate_path(path: &Path) -> Result<(), ConfigError> {
    if path.as_os_str().len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
    }
    if path.components().any(|c| c.as_os_str().len() > MAX_PATH_COMPONENT_LENGTH) {
        return Err(ConfigError::Invalid("config path component too long".to_string()));
    }
    Ok(())
}

/// Validates a configured path against length limits.
fn validate_path_setting(field: &str, path: &Path) -> Result<(), ConfigError> {
    if path.as_os_str().is_empty() {
        return Err(ConfigError::Invalid(format!("{field} must be non-empty")));
    }
    validate_path(path).map_err(|_| ConfigError::Invalid(format!("{field} exceeds path limits")))
}

/// Parses an http(s) URL setting.
fn parse_http_url(field: &str, value: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(value)
        .map_err(|err| ConfigError::Invalid(format!("{field} is not a valid url: {err}")))?;
    match url.scheme() {
        "http" | "https" if url.has_host() => Ok(url),
        _ => Err(ConfigError::Invalid(format!("{field} must be an http or https url"))),
    }
}

/// Validates an environment variable name.
fn validate_env_name(field: &str, name: &str) -> Result<(), ConfigError> {
    let valid = !name.is_empty()
        && !name.starts_with(|c: char| c.is_ascii_digit())
        && name.chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_');
    if valid {
        Ok(())
    } else {
        Err(ConfigError::Invalid(format!("{field} must match [A-Z_][A-Z0-9_]*")))
    }
}

/// Validates a timeout against the allowed range.
fn validate_timeout(field: &str, value: u64) -> Result<(), ConfigError> {
    if value == 0 || value > MAX_TIMEOUT_MS {
        return Err(ConfigError::Invalid(format!("{field} must be between 1 and {MAX_TIMEOUT_MS}")));
    }
    Ok(())
}
