//! Type definitions for the ban store.

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use super::lenient;

/// One entry of the persisted ban list.
///
/// Field names are the on-disk keys. Optional fields are omitted when unset.
/// Decoding never rejects a JSON object: missing fields default, and fields
/// of the wrong type are coerced (see [`lenient`](super::lenient)).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BanRecord {
    /// Opaque unique identifier.
    #[serde(default, deserialize_with = "lenient::string")]
    pub id: String,
    /// Banned single address.
    #[serde(default, deserialize_with = "lenient::string")]
    pub ip_address: String,
    /// Lower bound of an additional banned range (string comparison).
    #[serde(
        default,
        deserialize_with = "lenient::optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub ip_range_start: Option<String>,
    /// Upper bound of an additional banned range (string comparison).
    #[serde(
        default,
        deserialize_with = "lenient::optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub ip_range_end: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub reason: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub banned_by: Option<String>,
    /// Creation time, ISO-8601.
    #[serde(default, deserialize_with = "lenient::string")]
    pub banned_at: String,
    /// Expiry time, ISO-8601. None = permanent.
    #[serde(
        default,
        deserialize_with = "lenient::optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub expires_at: Option<String>,
    /// False once administratively revoked.
    #[serde(default, deserialize_with = "lenient::truthy")]
    pub is_active: bool,
}

/// Parsed view of a record's `expires_at`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expiry {
    /// No expiry stored (absent or empty).
    Never,
    /// Expires at this instant.
    At(DateTime<Utc>),
    /// A value is stored but is not a recognisable timestamp.
    Unparseable,
}

impl Expiry {
    fn from_field(field: Option<&str>) -> Self {
        match field {
            None | Some("") => Expiry::Never,
            Some(raw) => parse_timestamp(raw).map_or(Expiry::Unparseable, Expiry::At),
        }
    }
}

impl BanRecord {
    /// Classify this record's expiry.
    pub fn expiry(&self) -> Expiry {
        Expiry::from_field(self.expires_at.as_deref())
    }

    /// True if the stored expiry lies strictly before `now`.
    ///
    /// Unparseable expiries never count as expired here.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        matches!(self.expiry(), Expiry::At(at) if at < now)
    }

    /// Active and not expired.
    pub fn is_current_at(&self, now: DateTime<Utc>) -> bool {
        self.is_active && !self.is_expired_at(now)
    }

    /// Kept by expiry cleanup: no expiry, or an expiry at or after `now`.
    pub fn survives_cleanup_at(&self, now: DateTime<Utc>) -> bool {
        match self.expiry() {
            Expiry::Never => true,
            Expiry::At(at) => at >= now,
            Expiry::Unparseable => false,
        }
    }

    /// The range bounds, when both are present and non-empty.
    pub fn range(&self) -> Option<(&str, &str)> {
        match (self.ip_range_start.as_deref(), self.ip_range_end.as_deref()) {
            (Some(start), Some(end)) if !start.is_empty() && !end.is_empty() => Some((start, end)),
            _ => None,
        }
    }

    /// Exact address match, or lexicographic membership in the range.
    ///
    /// Range bounds are compared as plain strings. This only agrees with
    /// address order when all operands share one fixed-width representation.
    pub fn matches_address(&self, address: &str) -> bool {
        if self.ip_address == address {
            return true;
        }
        match self.range() {
            Some((start, end)) => address >= start && address <= end,
            None => false,
        }
    }

    /// Whether this ban blocks `address` at `now`.
    pub fn is_in_effect_at(&self, address: &str, now: DateTime<Utc>) -> bool {
        self.is_current_at(now) && self.matches_address(address)
    }
}

/// Options for [`BanStore::add_ban`](super::BanStore::add_ban).
#[derive(Debug, Clone, Default)]
pub struct AddBanOptions {
    pub reason: Option<String>,
    pub banned_by: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
    pub ip_range_start: Option<String>,
    pub ip_range_end: Option<String>,
}

impl AddBanOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    pub fn banned_by(mut self, banned_by: impl Into<String>) -> Self {
        self.banned_by = Some(banned_by.into());
        self
    }

    pub fn expires_at(mut self, expires_at: DateTime<Utc>) -> Self {
        self.expires_at = Some(expires_at);
        self
    }

    pub fn range(mut self, start: impl Into<String>, end: impl Into<String>) -> Self {
        self.ip_range_start = Some(start.into());
        self.ip_range_end = Some(end.into());
        self
    }
}

/// Render a timestamp the way the store writes it: `2024-01-01T00:00:00.000Z`.
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Parse a stored timestamp.
///
/// Accepts RFC 3339 and ISO-8601 date-times with or without seconds, with a
/// `Z`, a numeric offset, or no zone (taken as UTC), and a bare date
/// (midnight UTC).
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M%:z") {
        return Some(dt.with_timezone(&Utc));
    }

    let local = raw.strip_suffix(['Z', 'z']).unwrap_or(raw);
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(local, format) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
