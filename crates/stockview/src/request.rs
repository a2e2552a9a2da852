//! User choices for a single run.

use std::fmt;
use stockview_core::{Granularity, Symbol};

/// How the closing prices (or candles) are drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ChartStyle {
    /// Closing price line.
    Line,
    /// Closing price bars.
    Bar,
    /// OHLC candles with a volume panel.
    Candlestick,
}

impl ChartStyle {
    /// Menu label, also used in chart titles.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Line => "Line Chart",
            Self::Bar => "Bar Chart",
            Self::Candlestick => "Candlestick Chart",
        }
    }
}

impl fmt::Display for ChartStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Which presentations a run produces.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DisplayMode {
    /// Text table only.
    Table,
    /// Chart only.
    Chart,
    /// Table, then chart.
    Both,
}

impl DisplayMode {
    /// Returns true if the text table is printed.
    #[must_use]
    pub const fn shows_table(&self) -> bool {
        matches!(self, Self::Table | Self::Both)
    }

    /// Returns true if the chart is rendered.
    #[must_use]
    pub const fn shows_chart(&self) -> bool {
        matches!(self, Self::Chart | Self::Both)
    }
}

impl fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Table => "Table",
            Self::Chart => "Chart",
            Self::Both => "Both",
        };
        f.write_str(label)
    }
}

/// Validated choices for one run. Immutable once built.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TimeSeriesRequest {
    symbol: Symbol,
    granularity: Granularity,
    interval: Option<String>,
    chart_style: ChartStyle,
    display_mode: DisplayMode,
}

impl TimeSeriesRequest {
    /// Builds a request; the intraday interval is derived from `granularity`.
    #[must_use]
    pub fn new(
        symbol: Symbol,
        granularity: Granularity,
        chart_style: ChartStyle,
        display_mode: DisplayMode,
    ) -> Self {
        Self {
            symbol,
            granularity,
            interval: granularity.interval().map(str::to_string),
            chart_style,
            display_mode,
        }
    }

    /// Requested ticker.
    #[must_use]
    pub const fn symbol(&self) -> &Symbol {
        &self.symbol
    }

    /// Requested granularity.
    #[must_use]
    pub const fn granularity(&self) -> Granularity {
        self.granularity
    }

    /// Bar interval; `Some` exactly for intraday requests.
    #[must_use]
    pub fn interval(&self) -> Option<&str> {
        self.interval.as_deref()
    }

    /// Chart style.
    #[must_use]
    pub const fn chart_style(&self) -> ChartStyle {
        self.chart_style
    }

    /// Display mode.
    #[must_use]
    pub const fn display_mode(&self) -> DisplayMode {
        self.display_mode
    }
}
