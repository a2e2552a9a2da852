//! Interactive input collection.
//!
//! Each question is a pure validator (`validate_symbol`, `parse_chart_style`,
//! ...) wrapped by [`Prompter`], which owns the reader/writer pair and
//! re-asks until the validator accepts.

use std::fmt::Display;
use std::io::{self, BufRead, Write};

use stockview_core::{Granularity, Symbol};
use thiserror::Error;

use crate::request::{ChartStyle, DisplayMode, TimeSeriesRequest};

/// Chart style menu.
pub const CHART_MENU: &[(&str, ChartStyle)] = &[
    ("1", ChartStyle::Line),
    ("2", ChartStyle::Bar),
    ("3", ChartStyle::Candlestick),
];

/// Granularity menu.
pub const GRANULARITY_MENU: &[(&str, Granularity)] = &[
    ("1", Granularity::Intraday),
    ("2", Granularity::Daily),
    ("3", Granularity::Weekly),
    ("4", Granularity::Monthly),
];

/// Display mode menu.
pub const DISPLAY_MENU: &[(&str, DisplayMode)] = &[
    ("1", DisplayMode::Table),
    ("2", DisplayMode::Chart),
    ("3", DisplayMode::Both),
];

/// Rejected user input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Ticker was empty or had a non-alphanumeric character.
    #[error("Invalid symbol. Please enter a valid stock ticker.")]
    InvalidSymbol,

    /// Input did not match any menu key.
    #[error("Invalid choice. Please select {0}.")]
    InvalidChoice(String),
}

/// Validates a ticker after trimming and uppercasing it.
///
/// # Errors
///
/// [`ValidationError::InvalidSymbol`] on empty or non-alphanumeric input.
pub fn validate_symbol(input: &str) -> Result<Symbol, ValidationError> {
    Symbol::parse(input).map_err(|_| ValidationError::InvalidSymbol)
}

/// Looks up a trimmed menu key.
///
/// # Errors
///
/// [`ValidationError::InvalidChoice`] listing the valid keys.
pub fn pick<T: Copy>(input: &str, menu: &[(&str, T)]) -> Result<T, ValidationError> {
    let key = input.trim();
    menu.iter()
        .find(|(k, _)| *k == key)
        .map(|(_, v)| *v)
        .ok_or_else(|| ValidationError::InvalidChoice(key_list(menu)))
}

/// Parses a chart style menu answer.
///
/// # Errors
///
/// [`ValidationError::InvalidChoice`] for anything but a menu key.
pub fn parse_chart_style(input: &str) -> Result<ChartStyle, ValidationError> {
    pick(input, CHART_MENU)
}

/// Parses a granularity menu answer.
///
/// # Errors
///
/// [`ValidationError::InvalidChoice`] for anything but a menu key.
pub fn parse_granularity(input: &str) -> Result<Granularity, ValidationError> {
    pick(input, GRANULARITY_MENU)
}

/// Parses a display mode menu answer.
///
/// # Errors
///
/// [`ValidationError::InvalidChoice`] for anything but a menu key.
pub fn parse_display_mode(input: &str) -> Result<DisplayMode, ValidationError> {
    pick(input, DISPLAY_MENU)
}

/// `y` (any case, surrounding whitespace ignored) is yes; everything else is no.
#[must_use]
pub fn is_yes(input: &str) -> bool {
    input.trim().eq_ignore_ascii_case("y")
}

/// "1, 2, or 3" style list of menu keys.
fn key_list<T>(menu: &[(&str, T)]) -> String {
    match menu {
        [] => String::new(),
        [(only, _)] => (*only).to_string(),
        [init @ .., (last, _)] => {
            let head: Vec<&str> = init.iter().map(|(k, _)| *k).collect();
            format!("{}, or {last}", head.join(", "))
        }
    }
}

/// Line-oriented question/answer loop over any reader and writer.
#[derive(Debug)]
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    /// Wraps a reader/writer pair.
    pub const fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Writer used for prompts and other user-facing output.
    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }

    /// Consumes the prompter, returning the writer.
    pub fn into_output(self) -> W {
        self.output
    }

    /// Prints `prompt` and returns one line of input without its newline.
    ///
    /// # Errors
    ///
    /// [`io::ErrorKind::UnexpectedEof`] once the input is exhausted.
    pub fn read_line(&mut self, prompt: &str) -> io::Result<String> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "input closed while waiting for an answer",
            ));
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    /// Asks until `validate` accepts, printing each rejection.
    ///
    /// # Errors
    ///
    /// Only I/O errors; invalid answers are retried without limit.
    pub fn ask<T>(
        &mut self,
        prompt: &str,
        validate: impl Fn(&str) -> Result<T, ValidationError>,
    ) -> io::Result<T> {
        loop {
            let line = self.read_line(prompt)?;
            match validate(&line) {
                Ok(value) => return Ok(value),
                Err(e) => writeln!(self.output, "{e}")?,
            }
        }
    }

    /// Prints a numbered menu, asks until a key matches, and echoes the choice.
    ///
    /// # Errors
    ///
    /// Only I/O errors.
    pub fn select<T: Copy + Display>(
        &mut self,
        heading: &str,
        prompt: &str,
        menu: &[(&str, T)],
    ) -> io::Result<T> {
        writeln!(self.output, "\n{heading}")?;
        for (key, value) in menu {
            writeln!(self.output, "{key}. {value}")?;
        }
        let choice = self.ask(prompt, |line| pick(line, menu))?;
        writeln!(self.output, "\nYou selected: {choice}")?;
        Ok(choice)
    }

    /// Yes/no question; only `y` counts as yes.
    ///
    /// # Errors
    ///
    /// Only I/O errors.
    pub fn confirm(&mut self, prompt: &str) -> io::Result<bool> {
        self.read_line(prompt).map(|line| is_yes(&line))
    }

    /// Runs the four questions of a session.
    ///
    /// # Errors
    ///
    /// Only I/O errors.
    pub fn collect_request(&mut self) -> io::Result<TimeSeriesRequest> {
        let symbol = self.ask(
            "Enter the stock symbol for the company (e.g., AAPL, MSFT): ",
            validate_symbol,
        )?;
        let chart_style = self.select(
            "Select the chart type:",
            "Enter the number corresponding to your chart type: ",
            CHART_MENU,
        )?;
        let granularity = self.select(
            "Select the time series function:",
            "Enter the number corresponding to your selection: ",
            GRANULARITY_MENU,
        )?;
        let display_mode = self.select(
            "How would you like the data to be displayed?",
            "Enter the number of your preference: ",
            DISPLAY_MENU,
        )?;

        Ok(TimeSeriesRequest::new(
            symbol,
            granularity,
            chart_style,
            display_mode,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn prompter(input: &str) -> Prompter<Cursor<Vec<u8>>, Vec<u8>> {
        Prompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    fn output(p: Prompter<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8(p.into_output()).unwrap()
    }

    #[test]
    fn test_validate_symbol() {
        assert_eq!(validate_symbol(" aapl ").unwrap().as_str(), "AAPL");
        assert_eq!(validate_symbol("Brk1").unwrap().as_str(), "BRK1");
        assert_eq!(validate_symbol(""), Err(ValidationError::InvalidSymbol));
        assert_eq!(validate_symbol("BRK.B"), Err(ValidationError::InvalidSymbol));
        assert_eq!(validate_symbol("^GSPC"), Err(ValidationError::InvalidSymbol));
    }

    #[test]
    fn test_menu_parsers() {
        assert_eq!(parse_chart_style("3"), Ok(ChartStyle::Candlestick));
        assert_eq!(parse_chart_style(" 1\t"), Ok(ChartStyle::Line));
        assert_eq!(parse_granularity("1"), Ok(Granularity::Intraday));
        assert_eq!(parse_granularity("4"), Ok(Granularity::Monthly));
        assert_eq!(parse_display_mode("2"), Ok(DisplayMode::Chart));

        assert!(parse_chart_style("line").is_err());
        assert!(parse_chart_style("4").is_err());
        assert!(parse_granularity("0").is_err());
        assert!(parse_display_mode("").is_err());
    }

    #[test]
    fn test_choice_error_lists_keys() {
        assert_eq!(
            parse_granularity("x").unwrap_err().to_string(),
            "Invalid choice. Please select 1, 2, 3, or 4."
        );
        assert_eq!(
            parse_display_mode("x").unwrap_err().to_string(),
            "Invalid choice. Please select 1, 2, or 3."
        );
    }

    #[test]
    fn test_is_yes() {
        assert!(is_yes("y"));
        assert!(is_yes(" Y \n"));
        assert!(!is_yes("yes"));
        assert!(!is_yes(""));
        assert!(!is_yes("n"));
    }

    #[test]
    fn test_ask_retries_until_valid() {
        let mut p = prompter("BRK.B\n\nmsft\n");
        let symbol = p.ask("Symbol: ", validate_symbol).unwrap();
        assert_eq!(symbol.as_str(), "MSFT");

        let out = output(p);
        assert_eq!(out.matches("Symbol: ").count(), 3);
        assert_eq!(
            out.matches("Invalid symbol. Please enter a valid stock ticker.")
                .count(),
            2
        );
    }

    #[test]
    fn test_eof_is_an_error() {
        let mut p = prompter("9\n");
        let err = p
            .select("Pick:", "> ", CHART_MENU)
            .expect_err("input runs out");
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }

    #[test]
    fn test_collect_request() {
        let mut p = prompter("ibm\n7\n1\n1\n3\n");
        let request = p.collect_request().unwrap();

        assert_eq!(request.symbol().as_str(), "IBM");
        assert_eq!(request.chart_style(), ChartStyle::Line);
        assert_eq!(request.granularity(), Granularity::Intraday);
        assert_eq!(request.interval(), Some("5min"));
        assert_eq!(request.display_mode(), DisplayMode::Both);

        let out = output(p);
        assert!(out.contains("1. Line Chart\n2. Bar Chart\n3. Candlestick Chart\n"));
        assert!(out.contains("1. Intraday (5 min intervals)\n2. Daily\n3. Weekly\n4. Monthly\n"));
        assert!(out.contains("Invalid choice. Please select 1, 2, or 3."));
        assert!(out.contains("You selected: Line Chart"));
        assert!(out.contains("You selected: Both"));
    }
}
