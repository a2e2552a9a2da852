#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/stockview/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Core traits and types for stockview.
//!
//! - [`TimeSeriesProvider`](provider::TimeSeriesProvider) - Fetch seam returning a [`FetchOutcome`]
//! - [`shape`](shape::shape) - Raw series to chronological OHLCV records
//! - [`DataError`](error::DataError) - Error taxonomy

/// Error types for data operations.
pub mod error;
/// Time series granularity.
pub mod frequency;
/// Provider trait and fetch outcomes.
pub mod provider;
/// Raw series shaping.
pub mod shape;
/// Core data types (Symbol, OhlcvRecord, RawSeries, etc.).
pub mod types;

// Re-export commonly used items at crate root
pub use error::{DataError, Result};
pub use frequency::{Granularity, INTRADAY_INTERVAL};
pub use provider::{FetchOutcome, TimeSeriesProvider};
pub use shape::{DEFAULT_WINDOW, shape};
pub use types::{
    OhlcvField, OhlcvRecord, RawFields, RawSeries, SeriesTimestamp, Symbol, is_valid_symbol,
};
