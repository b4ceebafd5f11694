use clap::ArgMatches;
use clap::parser::ValueSource;

use crate::args::{PollArgs, parse_header, parse_interval_secs, parse_timeout_secs};
use crate::error::ConfigError;

use super::types::ConfigFile;

/// Applies configuration values to CLI arguments.
///
/// Values set on the command line or through the environment are left alone.
///
/// # Errors
///
/// Returns an error when a config value fails the same validation as its CLI
/// counterpart.
pub fn apply_config(
    args: &mut PollArgs,
    matches: &ArgMatches,
    config: &ConfigFile,
) -> Result<(), ConfigError> {
    if !is_explicit(matches, "url")
        && let Some(url) = config.url.clone()
    {
        args.url = url;
    }

    if !is_explicit(matches, "interval")
        && let Some(interval) = config.interval.as_ref()
    {
        args.interval = parse_interval_secs(&interval.as_text())
            .map_err(|err| ConfigError::InvalidField {
                field: "interval",
                source: err,
            })?;
    }

    if !is_explicit(matches, "timeout")
        && let Some(timeout) = config.timeout.as_ref()
    {
        args.timeout = parse_timeout_secs(&timeout.as_text())
            .map_err(|err| ConfigError::InvalidField {
                field: "timeout",
                source: err,
            })?;
    }

    if !is_explicit(matches, "count")
        && let Some(count) = config.count
    {
        args.count = count;
    }

    if !is_explicit(matches, "headers")
        && let Some(headers) = config.headers.as_ref()
    {
        let mut parsed = Vec::with_capacity(headers.len());
        for header in headers {
            parsed.push(
                parse_header(header).map_err(|err| ConfigError::InvalidHeader { source: err })?,
            );
        }
        args.headers = parsed;
    }

    if !is_explicit(matches, "insecure")
        && let Some(insecure) = config.insecure
    {
        args.insecure = insecure;
    }

    if !is_explicit(matches, "raw")
        && let Some(raw) = config.raw
    {
        args.raw = raw;
    }

    if !is_explicit(matches, "verbose")
        && let Some(verbose) = config.verbose
    {
        args.verbose = verbose;
    }

    if !is_explicit(matches, "no_color")
        && let Some(no_color) = config.no_color
    {
        args.no_color = no_color;
    }

    Ok(())
}

fn is_explicit(matches: &ArgMatches, name: &str) -> bool {
    matches!(
        matches.value_source(name),
        Some(ValueSource::CommandLine | ValueSource::EnvVariable)
    )
}
