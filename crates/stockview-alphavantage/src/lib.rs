#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/stockview/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Alpha Vantage time series provider.
//!
//! # Usage
//!
//! ```rust,ignore
//! use stockview_alphavantage::AlphaVantageProvider;
//! use stockview_core::{FetchOutcome, Granularity, Symbol, TimeSeriesProvider};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let provider = AlphaVantageProvider::new(std::env::var("ALPHAVANTAGE_API_KEY")?);
//!     let symbol = Symbol::parse("AAPL")?;
//!
//!     match provider.fetch_series(&symbol, Granularity::Daily, None).await {
//!         FetchOutcome::Success(series) => println!("{} points", series.len()),
//!         other => eprintln!("{}", other.diagnostic().unwrap_or_default()),
//!     }
//!     Ok(())
//! }
//! ```

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{Map, Value};
use std::fmt;
use stockview_core::{
    DataError, FetchOutcome, Granularity, INTRADAY_INTERVAL, RawSeries, Result, Symbol,
    TimeSeriesProvider,
};
use tracing::{debug, info, warn};

/// Alpha Vantage query endpoint.
pub const ALPHAVANTAGE_QUERY_URL: &str = "https://www.alphavantage.co/query";

/// Response key carrying an invalid symbol/function message.
const ERROR_MESSAGE_KEY: &str = "Error Message";

/// Response key carrying a call frequency notice.
const NOTE_KEY: &str = "Note";

/// Alpha Vantage `function` parameter for a granularity.
#[must_use]
pub const fn function_name(granularity: Granularity) -> &'static str {
    match granularity {
        Granularity::Intraday => "TIME_SERIES_INTRADAY",
        Granularity::Daily => "TIME_SERIES_DAILY",
        Granularity::Weekly => "TIME_SERIES_WEEKLY",
        Granularity::Monthly => "TIME_SERIES_MONTHLY",
    }
}

/// Response key holding the series for a granularity.
///
/// Intraday keys embed the interval, e.g. `"Time Series (5min)"`.
#[must_use]
pub fn payload_key(granularity: Granularity, interval: Option<&str>) -> String {
    match granularity {
        Granularity::Intraday => {
            format!("Time Series ({})", interval.unwrap_or(INTRADAY_INTERVAL))
        }
        Granularity::Daily => "Time Series (Daily)".to_string(),
        Granularity::Weekly => "Weekly Time Series".to_string(),
        Granularity::Monthly => "Monthly Time Series".to_string(),
    }
}

/// Query parameters for one time series request.
///
/// Intraday requests carry `interval` and `outputsize=compact`; every other
/// granularity asks for `outputsize=full` and no interval.
#[must_use]
pub fn query_params(
    symbol: &Symbol,
    granularity: Granularity,
    interval: Option<&str>,
    api_key: &str,
) -> Vec<(&'static str, String)> {
    let mut params = vec![
        ("function", function_name(granularity).to_string()),
        ("symbol", symbol.as_str().to_string()),
        ("apikey", api_key.to_string()),
        ("datatype", "json".to_string()),
    ];

    if granularity.is_intraday() {
        let interval = interval.unwrap_or(INTRADAY_INTERVAL);
        params.push(("interval", interval.to_string()));
        params.push(("outputsize", "compact".to_string()));
    } else {
        params.push(("outputsize", "full".to_string()));
    }

    params
}

/// Classifies a decoded response body.
///
/// First match wins: payload present, then `"Error Message"`, then `"Note"`.
#[must_use]
pub fn classify(body: &Map<String, Value>, payload_key: &str) -> FetchOutcome {
    if let Some(payload) = body.get(payload_key) {
        return match serde_json::from_value::<RawSeries>(payload.clone()) {
            Ok(series) => FetchOutcome::Success(series),
            Err(e) => FetchOutcome::UnknownFailure(format!("malformed {payload_key:?}: {e}")),
        };
    }
    if let Some(message) = body.get(ERROR_MESSAGE_KEY) {
        return FetchOutcome::InvalidSymbolOrFunction(message_text(message));
    }
    if let Some(note) = body.get(NOTE_KEY) {
        return FetchOutcome::RateLimited(message_text(note));
    }

    let keys: Vec<&str> = body.keys().map(String::as_str).collect();
    FetchOutcome::UnknownFailure(format!("unrecognized response keys: {keys:?}"))
}

fn message_text(value: &Value) -> String {
    value
        .as_str()
        .map_or_else(|| value.to_string(), str::to_string)
}

/// Alpha Vantage time series provider.
///
/// Each fetch is a single request; there is no retry or backoff.
#[derive(Clone)]
pub struct AlphaVantageProvider {
    client: Client,
    api_key: String,
    base_url: String,
}

impl fmt::Debug for AlphaVantageProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AlphaVantageProvider")
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

impl AlphaVantageProvider {
    /// Create a new provider with the given API key.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_client(Client::new(), api_key)
    }

    /// Create a new provider with a custom HTTP client.
    #[must_use]
    pub fn with_client(client: Client, api_key: impl Into<String>) -> Self {
        Self {
            client,
            api_key: api_key.into(),
            base_url: ALPHAVANTAGE_QUERY_URL.to_string(),
        }
    }

    /// Point the provider at a different query endpoint.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// The query endpoint in use.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Make a GET request and decode the body as a JSON object.
    async fn get_object(&self, params: &[(&'static str, String)]) -> Result<Map<String, Value>> {
        let response = self
            .client
            .get(&self.base_url)
            .query(params)
            .send()
            .await
            .map_err(|e| DataError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(DataError::Network(format!("HTTP {status}: {text}")));
        }

        let text = response
            .text()
            .await
            .map_err(|e| DataError::Network(e.to_string()))?;

        match serde_json::from_str::<Value>(&text) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(other) => Err(DataError::Parse(format!("expected JSON object, got {other}"))),
            Err(e) => Err(DataError::Parse(format!("{e}: {text}"))),
        }
    }
}

#[async_trait]
impl TimeSeriesProvider for AlphaVantageProvider {
    fn name(&self) -> &str {
        "Alpha Vantage"
    }

    async fn fetch_series(
        &self,
        symbol: &Symbol,
        granularity: Granularity,
        interval: Option<&str>,
    ) -> FetchOutcome {
        let params = query_params(symbol, granularity, interval, &self.api_key);
        let key = payload_key(granularity, interval);
        debug!(
            symbol = %symbol,
            function = function_name(granularity),
            interval = interval.unwrap_or("-"),
            "Alpha Vantage request"
        );

        let body = match self.get_object(&params).await {
            Ok(body) => body,
            Err(e) => {
                warn!(symbol = %symbol, error = %e, "Alpha Vantage request failed");
                return FetchOutcome::UnknownFailure(e.to_string());
            }
        };

        let outcome = classify(&body, &key);
        match &outcome {
            FetchOutcome::Success(series) => {
                info!(symbol = %symbol, points = series.len(), "Retrieved time series");
            }
            FetchOutcome::InvalidSymbolOrFunction(msg) => {
                warn!(symbol = %symbol, message = %msg, "Invalid symbol or function");
            }
            FetchOutcome::RateLimited(msg) => {
                warn!(symbol = %symbol, message = %msg, "Rate limited");
            }
            FetchOutcome::UnknownFailure(reason) => {
                warn!(symbol = %symbol, reason = %reason, "Unrecognized response");
            }
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("not an object: {other}"),
        }
    }

    fn param<'a>(params: &'a [(&'static str, String)], name: &str) -> Option<&'a str> {
        params
            .iter()
            .find(|(k, _)| *k == name)
            .map(|(_, v)| v.as_str())
    }

    #[test]
    fn test_query_params_per_granularity() {
        let symbol = Symbol::parse("AAPL").unwrap();
        for g in Granularity::ALL {
            let params = query_params(&symbol, g, g.interval(), "test_key");

            assert_eq!(param(&params, "function"), Some(function_name(g)));
            assert_eq!(param(&params, "symbol"), Some("AAPL"));
            assert_eq!(param(&params, "apikey"), Some("test_key"));
            assert_eq!(param(&params, "datatype"), Some("json"));

            let expected_size = if g.is_intraday() { "compact" } else { "full" };
            assert_eq!(param(&params, "outputsize"), Some(expected_size), "{g:?}");
            assert_eq!(param(&params, "interval").is_some(), g.is_intraday(), "{g:?}");
        }
    }

    #[test]
    fn test_intraday_interval_param() {
        let symbol = Symbol::parse("IBM").unwrap();
        let params = query_params(&symbol, Granularity::Intraday, Some("5min"), "k");
        assert_eq!(param(&params, "interval"), Some("5min"));
    }

    #[test]
    fn test_payload_keys() {
        assert_eq!(
            payload_key(Granularity::Intraday, Some("5min")),
            "Time Series (5min)"
        );
        assert_eq!(payload_key(Granularity::Daily, None), "Time Series (Daily)");
        assert_eq!(payload_key(Granularity::Weekly, None), "Weekly Time Series");
        assert_eq!(payload_key(Granularity::Monthly, None), "Monthly Time Series");
    }

    #[test]
    fn test_classify_success_preserves_order() {
        let body = object(json!({
            "Meta Data": {"2. Symbol": "AAPL"},
            "Time Series (Daily)": {
                "2024-03-15": {"1. open": "171.17", "2. high": "172.62", "3. low": "170.29", "4. close": "172.62", "5. volume": "121664700"},
                "2024-03-14": {"1. open": "172.91", "2. high": "174.31", "3. low": "172.05", "4. close": "173.00", "5. volume": "72913507"}
            }
        }));

        let series = classify(&body, "Time Series (Daily)")
            .into_series()
            .expect("success");
        let dates: Vec<&str> = series.keys().map(String::as_str).collect();
        assert_eq!(dates, ["2024-03-15", "2024-03-14"]);
        let labels: Vec<&str> = series[0].keys().map(String::as_str).collect();
        assert_eq!(labels, ["1. open", "2. high", "3. low", "4. close", "5. volume"]);
    }

    #[test]
    fn test_classify_failures() {
        let key = "Time Series (Daily)";
        assert!(matches!(
            classify(&object(json!({"Error Message": "x"})), key),
            FetchOutcome::InvalidSymbolOrFunction(m) if m == "x"
        ));
        assert!(matches!(
            classify(&object(json!({"Note": "x"})), key),
            FetchOutcome::RateLimited(m) if m == "x"
        ));
        assert!(matches!(
            classify(&object(json!({})), key),
            FetchOutcome::UnknownFailure(_)
        ));
        assert!(matches!(
            classify(&object(json!({"Information": "premium endpoint"})), key),
            FetchOutcome::UnknownFailure(_)
        ));
    }

    #[test]
    fn test_classify_first_match_wins() {
        let body = object(json!({
            "Note": "slow down",
            "Error Message": "bad",
            "Time Series (Daily)": {}
        }));
        assert!(classify(&body, "Time Series (Daily)").is_success());

        let body = object(json!({"Note": "slow down", "Error Message": "bad"}));
        assert!(matches!(
            classify(&body, "Time Series (Daily)"),
            FetchOutcome::InvalidSymbolOrFunction(_)
        ));
    }

    #[test]
    fn test_classify_wrong_granularity_key() {
        let body = object(json!({"Weekly Time Series": {}}));
        assert!(matches!(
            classify(&body, "Time Series (Daily)"),
            FetchOutcome::UnknownFailure(_)
        ));
    }

    #[test]
    fn test_classify_malformed_payload() {
        let body = object(json!({"Time Series (Daily)": ["not", "a", "map"]}));
        assert!(matches!(
            classify(&body, "Time Series (Daily)"),
            FetchOutcome::UnknownFailure(_)
        ));
    }

    #[test]
    fn test_provider_metadata() {
        let provider = AlphaVantageProvider::new("test_key");
        assert_eq!(provider.name(), "Alpha Vantage");
        assert_eq!(provider.base_url(), ALPHAVANTAGE_QUERY_URL);

        let provider = provider.with_base_url("http://127.0.0.1:9/query");
        assert_eq!(provider.base_url(), "http://127.0.0.1:9/query");
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let provider = AlphaVantageProvider::new("secret_key_12345");
        let debug_str = format!("{provider:?}");
        assert!(!debug_str.contains("secret_key_12345"));
        assert!(debug_str.contains("[REDACTED]"));
    }

    #[tokio::test]
    async fn test_transport_error_is_unknown_failure() {
        // Port 9 (discard) on localhost is not expected to serve HTTP.
        let provider =
            AlphaVantageProvider::new("k").with_base_url("http://127.0.0.1:9/query");
        let symbol = Symbol::parse("AAPL").unwrap();
        let outcome = provider
            .fetch_series(&symbol, Granularity::Daily, None)
            .await;
        assert!(matches!(outcome, FetchOutcome::UnknownFailure(_)));
    }
}
