use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{ArgMatches, CommandFactory, FromArgMatches};

use crate::args::{PollArgs, parse_header, parse_interval_secs, parse_timeout_secs};
use crate::config::apply_config;
use crate::config::types::ConfigFile;
use crate::error::{AppError, AppResult, ConfigError};
use crate::output::format_body;
use crate::poll::PollConfig;

const FUZZ_SOURCE: &str = "<fuzz input>";

thread_local! {
    static BASE_MATCHES: ArgMatches = PollArgs::command().get_matches_from(["restpoll"]);
}

/// Parses a header string in `NAME=VALUE` format.
///
/// # Errors
///
/// Returns an error when the header is malformed.
pub fn parse_header_input(input: &str) -> AppResult<(String, String)> {
    parse_header(input).map_err(AppError::from)
}

/// Parses an interval in seconds (e.g. `0.5`, `0`).
///
/// # Errors
///
/// Returns an error when the value is not a non-negative number.
pub fn parse_interval_input(input: &str) -> AppResult<Duration> {
    parse_interval_secs(input).map_err(AppError::from)
}

/// Parses a timeout in seconds (e.g. `1`, `0.25`).
///
/// # Errors
///
/// Returns an error when the value is not a positive number.
pub fn parse_timeout_input(input: &str) -> AppResult<Duration> {
    parse_timeout_secs(input).map_err(AppError::from)
}

#[must_use]
pub fn format_body_input(body: &str, raw: bool) -> String {
    format_body(body, raw)
}

/// Parses TOML config and applies it to defaults.
///
/// # Errors
///
/// Returns an error when parsing or validation fails.
pub fn apply_config_from_toml(input: &str) -> AppResult<PollConfig> {
    let config: ConfigFile = toml::from_str(input).map_err(|err| {
        AppError::config(ConfigError::ParseToml {
            path: PathBuf::from(FUZZ_SOURCE),
            source: err,
        })
    })?;
    apply_config_to_defaults(&config)
}

/// Parses JSON config and applies it to defaults.
///
/// # Errors
///
/// Returns an error when parsing or validation fails.
pub fn apply_config_from_json(input: &[u8]) -> AppResult<PollConfig> {
    let config: ConfigFile = serde_json::from_slice(input).map_err(|err| {
        AppError::config(ConfigError::ParseJson {
            path: PathBuf::from(FUZZ_SOURCE),
            source: err,
        })
    })?;
    apply_config_to_defaults(&config)
}

/// Loads a config file from disk to exercise extension handling.
///
/// # Errors
///
/// Returns an error when the config file cannot be read or parsed.
pub fn load_config_file_input(path: &Path) -> AppResult<()> {
    crate::config::load_config_file(path).map(|_| ())
}

fn apply_config_to_defaults(config: &ConfigFile) -> AppResult<PollConfig> {
    BASE_MATCHES.with(|matches| {
        let mut args = PollArgs::from_arg_matches(matches)?;
        apply_config(&mut args, matches, config)?;
        PollConfig::from_args(&args)
    })
}
