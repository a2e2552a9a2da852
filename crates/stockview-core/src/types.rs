//! Core data types for time series data.
//!
//! This module defines the fundamental data structures:
//!
//! - [`Symbol`] - Validated trading symbol/ticker
//! - [`RawSeries`] - Provider-native timestamp → field → value mapping
//! - [`SeriesTimestamp`] - Date or date-time of a point
//! - [`OhlcvRecord`] - Parsed OHLCV point

use chrono::{NaiveDate, NaiveDateTime};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{DataError, Result};

/// Format of a daily, weekly or monthly timestamp.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Format of an intraday timestamp.
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Field labels of a single raw point, in provider order.
pub type RawFields = IndexMap<String, String>;

/// Raw time series keyed by timestamp string, newest first as delivered.
pub type RawSeries = IndexMap<String, RawFields>;

/// Returns true if `s` is non-empty and made only of letters and digits.
#[must_use]
pub fn is_valid_symbol(s: &str) -> bool {
    !s.is_empty() && s.chars().all(char::is_alphanumeric)
}

/// A trading symbol/ticker.
///
/// Symbols are trimmed and uppercased on creation and contain only
/// alphanumeric characters.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Symbol(String);

impl Symbol {
    /// Creates a symbol from user input, trimming and uppercasing it.
    ///
    /// # Errors
    ///
    /// Returns [`DataError::InvalidParameter`] if the normalized input is empty
    /// or contains anything other than letters and digits.
    pub fn parse(s: &str) -> Result<Self> {
        let normalized = s.trim().to_uppercase();
        if is_valid_symbol(&normalized) {
            Ok(Self(normalized))
        } else {
            Err(DataError::InvalidParameter(format!("invalid symbol: {s:?}")))
        }
    }

    /// Returns the symbol as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Symbol {
    type Err = DataError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// The five numeric fields of a series point.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OhlcvField {
    /// Opening price.
    Open,
    /// Highest price.
    High,
    /// Lowest price.
    Low,
    /// Closing price.
    Close,
    /// Traded volume.
    Volume,
}

impl OhlcvField {
    /// All fields in OHLCV order.
    pub const ALL: [Self; 5] = [Self::Open, Self::High, Self::Low, Self::Close, Self::Volume];

    /// Lowercase field name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::High => "high",
            Self::Low => "low",
            Self::Close => "close",
            Self::Volume => "volume",
        }
    }

    /// Returns true if a provider label such as `"4. close"` names this field.
    #[must_use]
    pub fn matches_label(&self, label: &str) -> bool {
        let bare = label.split_once(". ").map_or(label, |(_, rest)| rest);
        bare.trim().eq_ignore_ascii_case(self.name())
    }

    /// Looks up this field's raw value in a point's field map.
    #[must_use]
    pub fn find<'a>(&self, fields: &'a RawFields) -> Option<&'a str> {
        fields
            .iter()
            .find(|(label, _)| self.matches_label(label))
            .map(|(_, value)| value.as_str())
    }
}

impl fmt::Display for OhlcvField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Timestamp of a series point: a calendar date or a date-time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SeriesTimestamp {
    /// Daily, weekly or monthly point.
    Date(NaiveDate),
    /// Intraday point.
    DateTime(NaiveDateTime),
}

impl SeriesTimestamp {
    /// Parses a provider timestamp.
    ///
    /// A string containing `:` carries a time component and is parsed with
    /// [`DATETIME_FORMAT`]; anything else is parsed as a date with [`DATE_FORMAT`].
    ///
    /// # Errors
    ///
    /// Returns [`DataError::FieldParse`] if the string does not match the
    /// selected format.
    pub fn parse(raw: &str) -> Result<Self> {
        let parsed = if raw.contains(':') {
            NaiveDateTime::parse_from_str(raw, DATETIME_FORMAT).map(Self::DateTime)
        } else {
            NaiveDate::parse_from_str(raw, DATE_FORMAT).map(Self::Date)
        };
        parsed.map_err(|_| DataError::FieldParse {
            timestamp: raw.to_string(),
            field: "timestamp".to_string(),
            value: raw.to_string(),
        })
    }

    /// Returns true if the timestamp carries a time component.
    #[must_use]
    pub const fn has_time(&self) -> bool {
        matches!(self, Self::DateTime(_))
    }

    /// Calendar date of the point.
    #[must_use]
    pub fn date(&self) -> NaiveDate {
        match self {
            Self::Date(d) => *d,
            Self::DateTime(dt) => dt.date(),
        }
    }
}

impl fmt::Display for SeriesTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Date(d) => write!(f, "{}", d.format(DATE_FORMAT)),
            Self::DateTime(dt) => write!(f, "{}", dt.format(DATETIME_FORMAT)),
        }
    }
}

/// OHLCV (Open, High, Low, Close, Volume) record parsed from a raw point.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OhlcvRecord {
    /// Timestamp of the point.
    pub timestamp: SeriesTimestamp,
    /// Opening price.
    pub open: f64,
    /// Highest price during the period.
    pub high: f64,
    /// Lowest price during the period.
    pub low: f64,
    /// Closing price.
    pub close: f64,
    /// Trading volume.
    pub volume: f64,
}

impl OhlcvRecord {
    /// Creates a new OHLCV record.
    #[must_use]
    pub const fn new(
        timestamp: SeriesTimestamp,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: f64,
    ) -> Self {
        Self {
            timestamp,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    /// Parses a raw point into a record.
    ///
    /// # Errors
    ///
    /// Fails on an unparseable timestamp, a missing field, or a field that is
    /// not a finite number. No value is ever defaulted.
    pub fn from_raw(timestamp: &str, fields: &RawFields) -> Result<Self> {
        let ts = SeriesTimestamp::parse(timestamp)?;
        let value = |field: OhlcvField| -> Result<f64> {
            let raw = field.find(fields).ok_or_else(|| DataError::MissingField {
                timestamp: timestamp.to_string(),
                field: field.name().to_string(),
            })?;
            raw.trim()
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| DataError::FieldParse {
                    timestamp: timestamp.to_string(),
                    field: field.name().to_string(),
                    value: raw.to_string(),
                })
        };

        Ok(Self::new(
            ts,
            value(OhlcvField::Open)?,
            value(OhlcvField::High)?,
            value(OhlcvField::Low)?,
            value(OhlcvField::Close)?,
            value(OhlcvField::Volume)?,
        ))
    }

    /// Returns true if the period closed at or above its open.
    #[must_use]
    pub fn is_up(&self) -> bool {
        self.close >= self.open
    }
}
