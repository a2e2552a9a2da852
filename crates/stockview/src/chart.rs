//! Terminal charts for shaped records.
//!
//! [`PriceChart`] draws closing prices as a line or bars, or OHLC candles
//! over a volume panel. [`TerminalChart`] shows it full screen and blocks
//! until the viewer closes it.

use std::io::{self, Stdout};

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols,
    text::Span,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Widget},
};
use stockview_core::{OhlcvRecord, Symbol};
use tracing::debug;

use crate::request::ChartStyle;

const ACCENT: Color = Color::Cyan;
const POSITIVE: Color = Color::Green;
const NEGATIVE: Color = Color::Red;
const MUTED: Color = Color::DarkGray;

/// Width reserved for price labels left of the plot.
const LABEL_WIDTH: u16 = 10;

/// Something that can present shaped records to the user.
pub trait ChartRenderer {
    /// Presents `records` (oldest first) and returns once the viewer is done.
    ///
    /// # Errors
    ///
    /// Terminal or drawing failures.
    fn render(&self, symbol: &Symbol, style: ChartStyle, records: &[OhlcvRecord]) -> Result<()>;
}

/// Full-screen chart on the alternate screen; closes on `q`, `Esc` or `Enter`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalChart;

/// Restores the terminal even if drawing fails part-way.
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

impl ChartRenderer for TerminalChart {
    fn render(&self, symbol: &Symbol, style: ChartStyle, records: &[OhlcvRecord]) -> Result<()> {
        debug!(symbol = %symbol, style = %style, points = records.len(), "Opening chart");

        enable_raw_mode()?;
        let guard = TerminalGuard;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        terminal.clear()?;

        let result = run_viewer(&mut terminal, symbol, style, records);

        drop(guard);
        terminal.show_cursor()?;
        result
    }
}

fn run_viewer(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    symbol: &Symbol,
    style: ChartStyle,
    records: &[OhlcvRecord],
) -> Result<()> {
    loop {
        terminal.draw(|frame| {
            frame.render_widget(PriceChart::new(symbol, style, records), frame.area());
        })?;

        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press
                && matches!(key.code, KeyCode::Char('q') | KeyCode::Esc | KeyCode::Enter)
            {
                return Ok(());
            }
        }
    }
}

/// Chart widget over shaped records, oldest first.
#[derive(Debug)]
pub struct PriceChart<'a> {
    symbol: &'a Symbol,
    style: ChartStyle,
    records: &'a [OhlcvRecord],
}

impl<'a> PriceChart<'a> {
    /// Creates the widget.
    #[must_use]
    pub const fn new(symbol: &'a Symbol, style: ChartStyle, records: &'a [OhlcvRecord]) -> Self {
        Self {
            symbol,
            style,
            records,
        }
    }

    fn render_close_chart(&self, area: Rect, buf: &mut Buffer) {
        let points: Vec<(f64, f64)> = self
            .records
            .iter()
            .enumerate()
            .map(|(i, r)| (i as f64, r.close))
            .collect();
        let x_max = self.records.len().saturating_sub(1).max(1) as f64;
        let (y_lower, y_upper) = padded_bounds(self.records.iter().map(|r| r.close));

        // Dotted guide lines at the quartiles stand in for a grid.
        let guides: Vec<[(f64, f64); 2]> = [0.25, 0.5, 0.75]
            .iter()
            .map(|q| {
                let y = y_lower + (y_upper - y_lower) * q;
                [(0.0, y), (x_max, y)]
            })
            .collect();

        let mut datasets: Vec<Dataset<'_>> = guides
            .iter()
            .map(|line| {
                Dataset::default()
                    .marker(symbols::Marker::Dot)
                    .graph_type(GraphType::Line)
                    .style(Style::default().fg(MUTED))
                    .data(line)
            })
            .collect();

        let graph_type = match self.style {
            ChartStyle::Bar => GraphType::Bar,
            ChartStyle::Line | ChartStyle::Candlestick => GraphType::Line,
        };
        datasets.push(
            Dataset::default()
                .name("Close")
                .marker(symbols::Marker::Braille)
                .graph_type(graph_type)
                .style(Style::default().fg(ACCENT))
                .data(&points),
        );

        let y_mid = (y_lower + y_upper) / 2.0;
        let chart = Chart::new(datasets)
            .x_axis(
                Axis::default()
                    .title(Span::styled("Date", Style::default().fg(MUTED)))
                    .style(Style::default().fg(MUTED))
                    .bounds([0.0, x_max])
                    .labels(date_labels(self.records)),
            )
            .y_axis(
                Axis::default()
                    .title(Span::styled("Close Price", Style::default().fg(MUTED)))
                    .style(Style::default().fg(MUTED))
                    .bounds([y_lower, y_upper])
                    .labels([
                        format!("{y_lower:.2}"),
                        format!("{y_mid:.2}"),
                        format!("{y_upper:.2}"),
                    ]),
            );

        chart.render(area, buf);
    }
}

impl Widget for PriceChart<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let title = if self.records.is_empty() {
            format!(" {} - {} [No Data] ", self.symbol, self.style)
        } else {
            format!(
                " {} - {} | {} points ",
                self.symbol,
                self.style,
                self.records.len()
            )
        };
        let block = Block::default()
            .title(Span::styled(
                title,
                Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
            ))
            .title_bottom(" q / Esc / Enter: close ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(ACCENT));
        let inner = block.inner(area);
        block.render(area, buf);

        if self.records.is_empty() || inner.width <= LABEL_WIDTH || inner.height < 3 {
            return;
        }

        match self.style {
            ChartStyle::Line | ChartStyle::Bar => self.render_close_chart(inner, buf),
            ChartStyle::Candlestick => {
                let [candles, volume] =
                    Layout::vertical([Constraint::Percentage(75), Constraint::Percentage(25)])
                        .areas(inner);
                CandlePanel::new(self.records).render(candles, buf);
                VolumePanel::new(self.records).render(volume, buf);
            }
        }
    }
}

/// OHLC candles drawn cell by cell: wick `│`, body `█` (up) or `▓` (down).
#[derive(Debug)]
struct CandlePanel<'a> {
    records: &'a [OhlcvRecord],
}

impl<'a> CandlePanel<'a> {
    const fn new(records: &'a [OhlcvRecord]) -> Self {
        Self { records }
    }
}

impl Widget for CandlePanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(" Price ")
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(MUTED));
        let inner = block.inner(area);
        block.render(area, buf);

        // Bottom row of the panel carries the date labels.
        let plot_left = inner.x + LABEL_WIDTH;
        let plot_width = inner.width.saturating_sub(LABEL_WIDTH);
        let plot_height = inner.height.saturating_sub(1);
        if plot_width == 0 || plot_height == 0 {
            return;
        }

        let visible = visible_tail(self.records, plot_width);
        let y_min = visible.iter().map(|r| r.low).fold(f64::INFINITY, f64::min);
        let y_max = visible
            .iter()
            .map(|r| r.high)
            .fold(f64::NEG_INFINITY, f64::max);
        let (y_lower, y_upper) = padded_bounds([y_min, y_max].into_iter());

        let label_rows = [0, plot_height / 2, plot_height.saturating_sub(1)];
        for row in label_rows {
            let price = y_upper - (y_upper - y_lower) * f64::from(row)
                / f64::from(plot_height.saturating_sub(1).max(1));
            buf.set_string(
                inner.x,
                inner.y + row,
                format!("{price:>9.2}"),
                Style::default().fg(MUTED),
            );
            for x in plot_left..plot_left + plot_width {
                buf.set_string(x, inner.y + row, "·", Style::default().fg(MUTED));
            }
        }

        let step = (plot_width / visible.len().max(1) as u16).max(1);
        for (i, record) in visible.iter().enumerate() {
            let x = plot_left + i as u16 * step + step / 2;
            if x >= plot_left + plot_width {
                break;
            }
            let color = if record.is_up() { POSITIVE } else { NEGATIVE };
            let style = Style::default().fg(color);

            let high_y = price_to_row(record.high, y_lower, y_upper, plot_height);
            let low_y = price_to_row(record.low, y_lower, y_upper, plot_height);
            let body_top = price_to_row(record.open.max(record.close), y_lower, y_upper, plot_height);
            let body_bot = price_to_row(record.open.min(record.close), y_lower, y_upper, plot_height);

            for y in high_y..body_top {
                buf.set_string(x, inner.y + y, "│", style);
            }
            let body = if record.is_up() { "█" } else { "▓" };
            for y in body_top..=body_bot {
                buf.set_string(x, inner.y + y, body, style);
            }
            for y in (body_bot + 1)..=low_y {
                buf.set_string(x, inner.y + y, "│", style);
            }
        }

        let label_y = inner.y + plot_height;
        if let (Some(first), Some(last)) = (visible.first(), visible.last()) {
            let first = first.timestamp.to_string();
            let last = last.timestamp.to_string();
            let muted = Style::default().fg(MUTED);
            buf.set_stringn(plot_left, label_y, &first, plot_width as usize, muted);
            let last_width = last.chars().count() as u16;
            if last_width + first.chars().count() as u16 + 1 < plot_width {
                buf.set_string(plot_left + plot_width - last_width, label_y, &last, muted);
            }
        }
    }
}

/// Volume bars aligned with the candle columns.
#[derive(Debug)]
struct VolumePanel<'a> {
    records: &'a [OhlcvRecord],
}

impl<'a> VolumePanel<'a> {
    const fn new(records: &'a [OhlcvRecord]) -> Self {
        Self { records }
    }
}

impl Widget for VolumePanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let plot_left = area.x + LABEL_WIDTH;
        let plot_width = area.width.saturating_sub(LABEL_WIDTH);
        if plot_width == 0 || area.height == 0 {
            return;
        }

        buf.set_string(area.x, area.y, "Volume", Style::default().fg(MUTED));

        let visible = visible_tail(self.records, plot_width);
        let max_volume = visible.iter().map(|r| r.volume).fold(0.0, f64::max);
        if max_volume <= 0.0 {
            return;
        }
        if area.height > 1 {
            buf.set_string(
                area.x,
                area.y + 1,
                format!("{:>9}", compact_volume(max_volume)),
                Style::default().fg(MUTED),
            );
        }

        let step = (plot_width / visible.len().max(1) as u16).max(1);
        for (i, record) in visible.iter().enumerate() {
            let x = plot_left + i as u16 * step + step / 2;
            if x >= plot_left + plot_width {
                break;
            }
            let color = if record.is_up() { POSITIVE } else { NEGATIVE };
            let height = ((record.volume / max_volume) * f64::from(area.height)).round() as u16;
            for offset in 0..height.min(area.height) {
                let y = area.y + area.height - 1 - offset;
                buf.set_string(x, y, "█", Style::default().fg(color));
            }
        }
    }
}

/// The most recent records that fit in `width` columns.
fn visible_tail(records: &[OhlcvRecord], width: u16) -> &[OhlcvRecord] {
    let start = records.len().saturating_sub(width as usize);
    &records[start..]
}

/// Min/max of `values` widened by 5% (or 1.0 for a flat series).
fn padded_bounds(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let (min, max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    if !min.is_finite() || !max.is_finite() {
        return (0.0, 1.0);
    }
    let range = max - min;
    let pad = if range > 0.0 { range * 0.05 } else { 1.0 };
    (min - pad, max + pad)
}

/// Maps a price to a row in a plot of `height` rows, 0 at the top.
fn price_to_row(price: f64, lower: f64, upper: f64, height: u16) -> u16 {
    if (upper - lower).abs() < 1e-9 || height == 0 {
        return 0;
    }
    let last = f64::from(height.saturating_sub(1));
    let frac = (price - lower) / (upper - lower);
    (last * (1.0 - frac)).round().clamp(0.0, last) as u16
}

/// First, middle and last timestamps as axis labels.
fn date_labels(records: &[OhlcvRecord]) -> Vec<String> {
    match records {
        [] => Vec::new(),
        [only] => vec![only.timestamp.to_string()],
        [first, .., last] => vec![
            first.timestamp.to_string(),
            records[records.len() / 2].timestamp.to_string(),
            last.timestamp.to_string(),
        ],
    }
}

/// 53704400.0 -> "53.7M".
fn compact_volume(volume: f64) -> String {
    match volume {
        v if v >= 1e9 => format!("{:.1}B", v / 1e9),
        v if v >= 1e6 => format!("{:.1}M", v / 1e6),
        v if v >= 1e3 => format!("{:.1}K", v / 1e3),
        v => format!("{v:.0}"),
    }
}
