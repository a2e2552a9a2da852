#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/stockview/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Interactive stock time series viewer.
//!
//! - [`prompt`] - Input collection with pure validators
//! - [`table`] - Most recent raw points as text
//! - [`chart`] - Terminal line, bar and candlestick charts
//! - [`export`] - Raw series to CSV
//! - [`app`] - The pipeline tying them together

/// The interactive pipeline.
pub mod app;
/// Terminal chart rendering.
pub mod chart;
/// Startup configuration.
pub mod config;
/// CSV export.
pub mod export;
/// Input collection.
pub mod prompt;
/// Request and presentation choices.
pub mod request;
/// Text table output.
pub mod table;

pub use app::{RunOutcome, run};
pub use chart::{ChartRenderer, PriceChart, TerminalChart};
pub use config::Config;
pub use prompt::{Prompter, ValidationError};
pub use request::{ChartStyle, DisplayMode, TimeSeriesRequest};
