//! Time series granularity.
//!
//! [`Granularity`] selects the sampling frequency of the requested series.
//! Only intraday requests carry an interval.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Interval used for every intraday request.
pub const INTRADAY_INTERVAL: &str = "5min";

/// Sampling frequency of a requested time series.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Granularity {
    /// Five-minute intraday bars.
    Intraday,
    /// Daily bars.
    Daily,
    /// Weekly bars.
    Weekly,
    /// Monthly bars.
    Monthly,
}

impl Granularity {
    /// All granularities, in menu order.
    pub const ALL: [Self; 4] = [Self::Intraday, Self::Daily, Self::Weekly, Self::Monthly];

    /// Returns true for intraday granularity.
    #[must_use]
    pub const fn is_intraday(&self) -> bool {
        matches!(self, Self::Intraday)
    }

    /// Short name, e.g. `Intraday`; [`Display`](fmt::Display) gives the menu text.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Intraday => "Intraday",
            Self::Daily => "Daily",
            Self::Weekly => "Weekly",
            Self::Monthly => "Monthly",
        }
    }

    /// The bar interval, present only for intraday requests.
    #[must_use]
    pub const fn interval(&self) -> Option<&'static str> {
        match self {
            Self::Intraday => Some(INTRADAY_INTERVAL),
            Self::Daily | Self::Weekly | Self::Monthly => None,
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Intraday => "Intraday (5 min intervals)",
            Self::Daily => "Daily",
            Self::Weekly => "Weekly",
            Self::Monthly => "Monthly",
        };
        f.write_str(label)
    }
}
