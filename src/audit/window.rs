//! Trailing review window
//!
//! Timestamps are compared as strings. That ordering matches chronological
//! ordering only while every timestamp uses the same fixed-width, zero-padded
//! UTC profile, which [`is_normalized_timestamp`] checks.

use chrono::{DateTime, Months, SecondsFormat, Utc};

use crate::error::{TrailError, TrailResult};

/// The `[reference - lookback, ∞)` window documents must fall in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeWindow {
    threshold: String,
}

impl TimeWindow {
    /// Build the window ending at `reference` and reaching back
    /// `lookback_months` calendar months
    ///
    /// Day-of-month clamps to the last valid day, so 31 March minus one month
    /// is the last day of February.
    pub fn new(reference: DateTime<Utc>, lookback_months: u32) -> TrailResult<Self> {
        let start = reference
            .checked_sub_months(Months::new(lookback_months))
            .ok_or_else(|| {
                TrailError::Config(format!(
                    "Lookback of {} months from {} is out of range",
                    lookback_months,
                    format_timestamp(reference)
                ))
            })?;

        Ok(Self {
            threshold: format_timestamp(start),
        })
    }

    /// The inclusive lower bound, formatted like stored timestamps
    pub fn threshold(&self) -> &str {
        &self.threshold
    }

    /// Whether a stored `modified.at` value falls inside the window
    ///
    /// Future timestamps pass; there is no upper bound.
    pub fn contains(&self, modified_at: &str) -> bool {
        timestamp_at_or_after(modified_at, &self.threshold)
    }
}

/// One-shot form of [`TimeWindow::contains`]
pub fn in_window(
    modified_at: &str,
    reference: DateTime<Utc>,
    lookback_months: u32,
) -> TrailResult<bool> {
    Ok(TimeWindow::new(reference, lookback_months)?.contains(modified_at))
}

/// Lexical timestamp ordering: `timestamp >= threshold`
pub fn timestamp_at_or_after(timestamp: &str, threshold: &str) -> bool {
    timestamp >= threshold
}

/// Format an instant in the stored profile, e.g. `2024-06-15T12:00:00Z`
pub fn format_timestamp(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Length of `YYYY-MM-DDTHH:MM:SSZ`
const NORMALIZED_LEN: usize = 20;

/// Whether a stored timestamp uses the same profile as the threshold
///
/// Only `YYYY-MM-DDTHH:MM:SSZ` qualifies. Fractional seconds do not: `.`
/// sorts before `Z`, so `12:00:00.500Z` compares below a `12:00:00Z`
/// threshold.
pub fn is_normalized_timestamp(timestamp: &str) -> bool {
    let bytes = timestamp.as_bytes();
    if bytes.len() != NORMALIZED_LEN || bytes[10] != b'T' || !timestamp.ends_with('Z') {
        return false;
    }
    DateTime::parse_from_rfc3339(timestamp).is_ok()
}
