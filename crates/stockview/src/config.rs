//! Startup configuration.
//!
//! Every value can come from a flag or an environment variable; the API key
//! has no default and is never printed.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use stockview_alphavantage::{ALPHAVANTAGE_QUERY_URL, AlphaVantageProvider};

/// Command-line configuration.
#[derive(Parser, Clone)]
#[command(
    name = "stockview",
    version,
    about = "Fetch a stock time series, show it as a table or terminal chart, and export it to CSV"
)]
pub struct Config {
    /// Alpha Vantage API key.
    #[arg(long, env = "ALPHAVANTAGE_API_KEY", hide_env_values = true)]
    pub api_key: String,

    /// Query endpoint.
    #[arg(long, env = "ALPHAVANTAGE_BASE_URL", default_value = ALPHAVANTAGE_QUERY_URL)]
    pub base_url: String,

    /// Request timeout in seconds. The request is still attempted only once.
    #[arg(long, env = "STOCKVIEW_TIMEOUT_SECS", default_value_t = 30)]
    pub timeout_secs: u64,

    /// Directory for `{SYMBOL}_data.csv`.
    #[arg(long, env = "STOCKVIEW_OUTPUT_DIR", default_value = ".")]
    pub output_dir: PathBuf,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .field("output_dir", &self.output_dir)
            .finish()
    }
}

impl Config {
    /// Request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Builds the provider with this configuration's key, endpoint and timeout.
    ///
    /// # Errors
    ///
    /// Fails if the HTTP client cannot be constructed.
    pub fn provider(&self) -> Result<AlphaVantageProvider> {
        let client = reqwest::Client::builder()
            .timeout(self.timeout())
            .build()
            .context("building HTTP client")?;
        Ok(AlphaVantageProvider::with_client(client, self.api_key.clone())
            .with_base_url(self.base_url.clone()))
    }
}
