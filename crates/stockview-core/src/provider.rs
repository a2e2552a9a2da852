//! Provider trait for fetching time series data.
//!
//! A [`TimeSeriesProvider`] performs a single fetch and reports the result as
//! a [`FetchOutcome`]. Failures are outcomes, not errors: callers decide
//! whether to continue based on the variant.

use async_trait::async_trait;
use std::fmt::Debug;

use crate::{
    frequency::Granularity,
    types::{RawSeries, Symbol},
};

/// Classified result of a time series fetch.
#[derive(Clone, Debug, PartialEq)]
pub enum FetchOutcome {
    /// The expected payload was present.
    Success(RawSeries),
    /// The provider rejected the symbol or the requested function.
    InvalidSymbolOrFunction(String),
    /// The provider's call frequency limit was reached.
    RateLimited(String),
    /// Transport error, malformed body, or an unrecognized response.
    UnknownFailure(String),
}

impl FetchOutcome {
    /// Returns true for [`FetchOutcome::Success`].
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Consumes the outcome and returns the series on success.
    #[must_use]
    pub fn into_series(self) -> Option<RawSeries> {
        match self {
            Self::Success(series) => Some(series),
            _ => None,
        }
    }

    /// User-facing diagnostic for a failed fetch; `None` on success.
    #[must_use]
    pub const fn diagnostic(&self) -> Option<&'static str> {
        match self {
            Self::Success(_) => None,
            Self::InvalidSymbolOrFunction(_) => {
                Some("Error: Invalid symbol or unsupported function.")
            }
            Self::RateLimited(_) => {
                Some("API call frequency limit reached. Please wait and try again.")
            }
            Self::UnknownFailure(_) => {
                Some("Failed to retrieve data. Please check your input or API key.")
            }
        }
    }
}

/// Source of raw time series.
///
/// Implementations perform exactly one request per call.
#[async_trait]
pub trait TimeSeriesProvider: Send + Sync + Debug {
    /// Returns the name of this provider (e.g., "Alpha Vantage").
    fn name(&self) -> &str;

    /// Fetches the raw series for `symbol` at `granularity`.
    ///
    /// `interval` is `Some` exactly when `granularity` is intraday.
    async fn fetch_series(
        &self,
        symbol: &Symbol,
        granularity: Granularity,
        interval: Option<&str>,
    ) -> FetchOutcome;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_accessors() {
        let ok = FetchOutcome::Success(RawSeries::new());
        assert!(ok.is_success());
        assert_eq!(ok.diagnostic(), None);
        assert_eq!(ok.into_series(), Some(RawSeries::new()));

        let limited = FetchOutcome::RateLimited("slow down".to_string());
        assert!(!limited.is_success());
        assert!(limited.diagnostic().is_some_and(|d| d.contains("frequency limit")));
        assert_eq!(limited.into_series(), None);
    }
}
