//! Series shaping.
//!
//! Converts a provider-ordered [`RawSeries`] into the chronological
//! [`OhlcvRecord`] sequence used for charting.

use tracing::debug;

use crate::{
    error::Result,
    types::{OhlcvRecord, RawSeries},
};

/// Number of most recent points kept for charting.
pub const DEFAULT_WINDOW: usize = 30;

/// Takes the first `window` entries of `raw` (the newest, as delivered) and
/// returns them parsed, oldest first.
///
/// Shaping is all-or-nothing: the first point that fails to parse aborts
/// the whole transform.
///
/// # Errors
///
/// Returns the parse error of the first malformed point in the window.
pub fn shape(raw: &RawSeries, window: usize) -> Result<Vec<OhlcvRecord>> {
    let mut records = raw
        .iter()
        .take(window)
        .map(|(timestamp, fields)| OhlcvRecord::from_raw(timestamp, fields))
        .collect::<Result<Vec<_>>>()?;
    records.reverse();

    debug!(
        available = raw.len(),
        window,
        shaped = records.len(),
        "Shaped raw series"
    );
    Ok(records)
}
