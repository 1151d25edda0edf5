//! Short duration strings for ban lifetimes.
//!
//! `<count><unit>` where unit is `w`, `d`, `h` or `m`. A bare count is days,
//! and `0` (or nothing) means a permanent ban.

use chrono::Duration;
use thiserror::Error;

/// Why a ban lifetime string was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DurationError {
    #[error("unknown unit '{0}' (expected w, d, h or m)")]
    UnknownUnit(String),
    #[error("'{0}' is not a whole number")]
    InvalidNumber(String),
    #[error("duration must be positive, got {0}")]
    NotPositive(i64),
    #[error("'{0}' is too long to represent")]
    OutOfRange(String),
}

/// Parse a ban lifetime like `2w`, `30d`, `24h` or `15m`.
///
/// `Ok(None)` means no expiry.
pub fn parse_duration(s: &str) -> Result<Option<Duration>, DurationError> {
    let s = s.trim();
    if s.is_empty() || s == "0" {
        return Ok(None);
    }

    let split = s
        .find(|c: char| !(c.is_ascii_digit() || c == '-' || c == '+'))
        .unwrap_or(s.len());
    let (count, unit) = s.split_at(split);

    let count: i64 = count
        .parse()
        .map_err(|_| DurationError::InvalidNumber(count.to_string()))?;
    if count <= 0 {
        return Err(DurationError::NotPositive(count));
    }

    let duration = match unit {
        "w" => Duration::try_weeks(count),
        "" | "d" => Duration::try_days(count),
        "h" => Duration::try_hours(count),
        "m" => Duration::try_minutes(count),
        other => return Err(DurationError::UnknownUnit(other.to_string())),
    };
    duration
        .map(Some)
        .ok_or_else(|| DurationError::OutOfRange(s.to_string()))
}
