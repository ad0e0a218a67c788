// crates/spec-converter-config/src/lib.rs
// ============================================================================
// Module: Spec Converter Config
// Description: Configuration model and loader for the converter.
// Purpose: Supply explicit paths and endpoint settings to every component.
// Dependencies: serde, thiserror, toml, url
// ============================================================================

//! ## Overview
//! [`ConverterConfig`] is read once from TOML and passed by value into the
//! assembler, mapper and transport constructors. Nothing is read from
//! process-wide state after loading except the secret environment variables
//! the config names.

pub mod config;

pub use config::CONFIG_ENV_VAR;
pub use config::CompletionConfig;
pub use config::ConfigError;
pub use config::ConverterConfig;
pub use config::DEFAULT_CONFIG_NAME;
pub use config::PathsConfig;
pub use config::SubmissionConfig;
