// Sample domain models - one sensor reading per CSV line
use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

/// Reason a line of the data file was rejected
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LineError {
    #[error("expected 2 fields, found {0}")]
    FieldCount(usize),
    #[error("invalid timestamp '{0}'")]
    InvalidTimestamp(String),
    #[error("timestamp {0} is out of range")]
    TimestampOutOfRange(String),
    #[error("invalid value '{0}'")]
    InvalidValue(String),
    #[error("value '{0}' is not finite")]
    NonFiniteValue(String),
    #[error("line is not valid UTF-8")]
    InvalidUtf8,
}

/// A reading exactly as the sensor server wrote it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawSample {
    pub captured_at: DateTime<Utc>,
    pub raw_value: f64,
}

impl RawSample {
    pub fn new(captured_at: DateTime<Utc>, raw_value: f64) -> Self {
        Self {
            captured_at,
            raw_value,
        }
    }

    pub fn normalize(&self) -> NormalizedSample {
        NormalizedSample::new(self.captured_at, self.raw_value * 100.0)
    }

    /// Parse the two fields of a record: epoch seconds and the raw reading
    pub fn from_fields(timestamp: &str, value: &str) -> Result<Self, LineError> {
        let timestamp = timestamp.trim();
        let value = value.trim();

        let captured_at = parse_epoch(timestamp)?;
        let raw_value = value
            .parse::<f64>()
            .map_err(|_| LineError::InvalidValue(value.to_string()))?;
        if !raw_value.is_finite() {
            return Err(LineError::NonFiniteValue(value.to_string()));
        }

        Ok(Self::new(captured_at, raw_value))
    }
}

/// Convert epoch seconds (integral or fractional) to an instant
fn parse_epoch(field: &str) -> Result<DateTime<Utc>, LineError> {
    let out_of_range = || LineError::TimestampOutOfRange(field.to_string());

    if let Ok(seconds) = field.parse::<i64>() {
        return DateTime::from_timestamp(seconds, 0).ok_or_else(out_of_range);
    }

    let seconds = field
        .parse::<f64>()
        .map_err(|_| LineError::InvalidTimestamp(field.to_string()))?;
    if !seconds.is_finite() {
        return Err(LineError::InvalidTimestamp(field.to_string()));
    }
    if seconds < i64::MIN as f64 || seconds >= i64::MAX as f64 {
        return Err(out_of_range());
    }

    let whole = seconds.floor();
    let nanos = ((seconds - whole) * 1e9).round().min(999_999_999.0) as u32;
    DateTime::from_timestamp(whole as i64, nanos).ok_or_else(out_of_range)
}

/// A reading ready for display: UTC instant plus moisture in percent
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NormalizedSample {
    pub timestamp: DateTime<Utc>,
    pub percentage: f64,
}

impl NormalizedSample {
    pub fn new(timestamp: DateTime<Utc>, percentage: f64) -> Self {
        Self {
            timestamp,
            percentage,
        }
    }
}

/// Classification of a single record of the data file
#[derive(Debug, Clone, PartialEq)]
pub enum LineOutcome {
    Sample(RawSample),
    Blank,
    Malformed(LineError),
}

impl LineOutcome {
    /// Classify the fields of one CSV record
    pub fn classify(fields: &[&[u8]]) -> Self {
        if fields.iter().all(|f| f.trim_ascii().is_empty()) {
            return LineOutcome::Blank;
        }
        let [timestamp, value] = fields else {
            return LineOutcome::Malformed(LineError::FieldCount(fields.len()));
        };
        let (Ok(timestamp), Ok(value)) =
            (std::str::from_utf8(timestamp), std::str::from_utf8(value))
        else {
            return LineOutcome::Malformed(LineError::InvalidUtf8);
        };
        match RawSample::from_fields(timestamp, value) {
            Ok(sample) => LineOutcome::Sample(sample),
            Err(e) => LineOutcome::Malformed(e),
        }
    }
}
