//! The interactive pipeline: collect → fetch → present → export.

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use stockview_core::{DEFAULT_WINDOW, FetchOutcome, TimeSeriesProvider, shape};
use tracing::{debug, warn};

use crate::chart::ChartRenderer;
use crate::export::export_csv;
use crate::prompt::Prompter;
use crate::table::{TABLE_ROWS, write_recent};

/// How a run ended.
#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcome {
    /// The fetch did not succeed; nothing was presented.
    FetchFailed(FetchOutcome),
    /// Presentation finished; `exported` is the CSV path if one was written.
    Completed {
        /// Path of the written CSV file.
        exported: Option<PathBuf>,
    },
}

/// Runs one session against `provider`, drawing charts with `renderer` and
/// writing CSV files into `output_dir`.
///
/// A failed fetch is reported to the user and returns
/// [`RunOutcome::FetchFailed`]. An empty series ends the run right after the
/// success line, with no table, chart or CSV prompt. A malformed point inside
/// the chart window is an error and ends the run.
///
/// # Errors
///
/// I/O errors on the prompter, shaping failures, chart failures and export
/// failures.
pub async fn run<P, C, R, W>(
    provider: &P,
    renderer: &C,
    prompter: &mut Prompter<R, W>,
    output_dir: &Path,
) -> Result<RunOutcome>
where
    P: TimeSeriesProvider + ?Sized,
    C: ChartRenderer + ?Sized,
    R: BufRead,
    W: Write,
{
    let request = prompter.collect_request()?;
    let symbol = request.symbol();
    debug!(?request, provider = provider.name(), "Collected request");

    let outcome = provider
        .fetch_series(symbol, request.granularity(), request.interval())
        .await;
    let raw = match outcome {
        FetchOutcome::Success(raw) => raw,
        failure => {
            if let Some(diagnostic) = failure.diagnostic() {
                writeln!(prompter.output(), "\n{diagnostic}")?;
            }
            return Ok(RunOutcome::FetchFailed(failure));
        }
    };

    let out = prompter.output();
    writeln!(
        out,
        "\nData successfully retrieved for {symbol} ({}).",
        request.granularity().name()
    )?;

    // An empty payload has nothing to show or save.
    if raw.is_empty() {
        debug!(symbol = %symbol, "Empty series, nothing to present");
        return Ok(RunOutcome::Completed { exported: None });
    }

    writeln!(
        out,
        "\nDisplaying data for {symbol} using a {}.",
        request.chart_style().label().to_lowercase()
    )?;

    if request.display_mode().shows_table() {
        write_recent(out, &raw, TABLE_ROWS)?;
    }
    out.flush()?;

    if request.display_mode().shows_chart() {
        let records = shape(&raw, DEFAULT_WINDOW)
            .with_context(|| format!("shaping {symbol} series for charting"))?;
        renderer.render(symbol, request.chart_style(), &records)?;
    }

    let exported = if prompter.confirm("\nWould you like to download this data as a CSV? (y/n): ")? {
        let path = export_csv(&raw, symbol, output_dir)
            .inspect_err(|e| warn!(error = %e, "CSV export failed"))?;
        let name = path.file_name().map_or_else(
            || path.display().to_string(),
            |n| n.to_string_lossy().into_owned(),
        );
        writeln!(prompter.output(), "Data saved as {name}")?;
        Some(path)
    } else {
        writeln!(prompter.output(), "Skipped CSV download.")?;
        None
    };

    Ok(RunOutcome::Completed { exported })
}
