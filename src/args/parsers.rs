use std::time::Duration;

use crate::error::{AppError, AppResult, NumberKind, ValidationError};

/// Parses a `NAME=VALUE` header. The name is trimmed and must not be empty;
/// the value is kept verbatim and may be empty.
pub(crate) fn parse_header(s: &str) -> Result<(String, String), ValidationError> {
    let Some((name, value)) = s.split_once('=') else {
        return Err(ValidationError::InvalidHeaderFormat {
            value: s.to_owned(),
        });
    };
    let name = name.trim();
    if name.is_empty() {
        return Err(ValidationError::EmptyHeaderName);
    }
    Ok((name.to_owned(), value.to_owned()))
}

/// Interval between attempts: any finite number of seconds >= 0.
pub(crate) fn parse_interval_secs(s: &str) -> Result<Duration, ValidationError> {
    let value = parse_seconds(s)?;
    if value < 0.0 {
        return Err(ValidationError::Negative {
            value: s.trim().to_owned(),
        });
    }
    seconds_to_duration(s, value)
}

/// Per-request timeout: any finite number of seconds > 0.
pub(crate) fn parse_timeout_secs(s: &str) -> Result<Duration, ValidationError> {
    let value = parse_seconds(s)?;
    if value <= 0.0 {
        return Err(ValidationError::NotPositive {
            value: s.trim().to_owned(),
        });
    }
    let duration = seconds_to_duration(s, value)?;
    if duration.is_zero() {
        return Err(ValidationError::NotPositive {
            value: s.trim().to_owned(),
        });
    }
    Ok(duration)
}

pub(crate) fn parse_count(s: &str) -> Result<u64, ValidationError> {
    let trimmed = s.trim();
    if let Some(rest) = trimmed.strip_prefix('-')
        && !rest.is_empty()
        && rest.bytes().all(|byte| byte.is_ascii_digit())
    {
        return Err(ValidationError::Negative {
            value: trimmed.to_owned(),
        });
    }
    trimmed
        .parse::<u64>()
        .map_err(|_err| ValidationError::NotANumber {
            value: trimmed.to_owned(),
            kind: NumberKind::Integer,
        })
}

pub(crate) fn parse_bool_env(s: &str) -> AppResult<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "y" | "on" => Ok(true),
        "0" | "false" | "no" | "n" | "off" => Ok(false),
        _ => Err(AppError::validation(ValidationError::InvalidBoolean {
            value: s.to_owned(),
        })),
    }
}

fn parse_seconds(s: &str) -> Result<f64, ValidationError> {
    let trimmed = s.trim();
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        Ok(_) | Err(_) => Err(ValidationError::NotANumber {
            value: trimmed.to_owned(),
            kind: NumberKind::Float,
        }),
    }
}

fn seconds_to_duration(raw: &str, value: f64) -> Result<Duration, ValidationError> {
    Duration::try_from_secs_f64(value).map_err(|_err| ValidationError::DurationOverflow {
        value: raw.trim().to_owned(),
    })
}
