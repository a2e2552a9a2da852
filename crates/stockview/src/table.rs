//! Text table of the most recent raw points.

use std::io::{self, Write};

use stockview_core::RawSeries;

/// Number of raw points printed by the table view.
pub const TABLE_ROWS: usize = 3;

/// Prints the first `rows` raw entries in provider order (newest first),
/// each with every field label and value exactly as delivered.
///
/// # Errors
///
/// Propagates write errors.
pub fn write_recent<W: Write>(out: &mut W, raw: &RawSeries, rows: usize) -> io::Result<()> {
    writeln!(out, "\nMost recent {rows} data points:")?;
    for (timestamp, fields) in raw.iter().take(rows) {
        writeln!(out, "\nDate: {timestamp}")?;
        for (label, value) in fields {
            writeln!(out, "  {label}: {value}")?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockview_core::RawFields;

    fn point(close: &str) -> RawFields {
        [("1. open", "10.00"), ("4. close", close)]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_table_keeps_raw_order_and_values() {
        let raw: RawSeries = [
            ("2024-03-15", "12.50"),
            ("2024-03-14", "11.25"),
            ("2024-03-13", "10.75"),
            ("2024-03-12", "9.00"),
        ]
        .into_iter()
        .map(|(d, c)| (d.to_string(), point(c)))
        .collect();

        let mut out = Vec::new();
        write_recent(&mut out, &raw, TABLE_ROWS).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert_eq!(
            text,
            "\nMost recent 3 data points:\n\
             \nDate: 2024-03-15\n  1. open: 10.00\n  4. close: 12.50\n\
             \nDate: 2024-03-14\n  1. open: 10.00\n  4. close: 11.25\n\
             \nDate: 2024-03-13\n  1. open: 10.00\n  4. close: 10.75\n"
        );
    }

    #[test]
    fn test_table_short_series() {
        let raw: RawSeries = [("2024-03-15".to_string(), point("1"))].into_iter().collect();
        let mut out = Vec::new();
        write_recent(&mut out, &raw, TABLE_ROWS).unwrap();
        assert_eq!(String::from_utf8(out).unwrap().matches("Date: ").count(), 1);
    }
}
