//! Date range validation for banner create/update

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Which end of a range a value belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DateBound {
    Start,
    End,
}

impl fmt::Display for DateBound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Start => "start_date",
            Self::End => "end_date",
        })
    }
}

/// Rejected date range
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateRangeError {
    #[error("Invalid {bound}: {value:?} is not a valid date")]
    Unparseable { bound: DateBound, value: String },

    #[error("end_date ({end}) must be after start_date ({start})")]
    EndNotAfterStart {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },
}

impl DateRangeError {
    /// The bound a parse error refers to, if any
    pub fn bound(&self) -> Option<DateBound> {
        match self {
            Self::Unparseable { bound, .. } => Some(*bound),
            Self::EndNotAfterStart { .. } => None,
        }
    }
}

/// A validated pair of optional bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DateRange {
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

/// Formats accepted from `datetime-local` inputs; interpreted as UTC.
const NAIVE_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"];

/// Parse a single instant: RFC 3339, or a zone-less local form treated as UTC
pub fn parse_instant(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .map(|naive| naive.and_utc())
}

fn parse_bound(bound: DateBound, value: Option<&str>) -> Result<Option<DateTime<Utc>>, DateRangeError> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => parse_instant(raw)
            .map(Some)
            .ok_or_else(|| DateRangeError::Unparseable {
                bound,
                value: raw.to_string(),
            }),
    }
}

/// Validate raw form input for a banner's date range.
///
/// Blank values count as absent. Each present value must parse; when both
/// are present `end` must be strictly after `start`.
pub fn validate_date_range(
    start: Option<&str>,
    end: Option<&str>,
) -> Result<DateRange, DateRangeError> {
    let start = parse_bound(DateBound::Start, start)?;
    let end = parse_bound(DateBound::End, end)?;
    check_date_range(start, end)?;
    Ok(DateRange { start, end })
}

/// Check already-parsed bounds
pub fn check_date_range(
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
) -> Result<(), DateRangeError> {
    match (start, end) {
        (Some(start), Some(end)) if end <= start => {
            Err(DateRangeError::EndNotAfterStart { start, end })
        }
        _ => Ok(()),
    }
}
