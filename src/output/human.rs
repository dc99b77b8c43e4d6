#![forbid(unsafe_code)]

//! Human-readable output
//!
//! Successful invocations print only the canonical version so the output
//! can be captured directly by build scripts. Errors go to stderr with an
//! optionally colored `Error:` prefix.

use crate::engine::VersionReport;
use std::io::{self, IsTerminal};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// Human-readable formatter
pub struct HumanFormatter;

impl HumanFormatter {
    pub fn new() -> Self {
        HumanFormatter
    }

    /// Format a report as the canonical version followed by a newline
    pub fn format(&self, report: &VersionReport) -> String {
        format!("{}\n", report.record)
    }
}

impl Default for HumanFormatter {
    fn default() -> Self {
        Self::new()
    }
}

/// Writes `Error: <message>` to a color-capable writer
pub fn write_error<W: WriteColor>(out: &mut W, message: &str) -> io::Result<()> {
    out.set_color(ColorSpec::new().set_fg(Some(Color::Red)).set_bold(true))?;
    write!(out, "Error:")?;
    out.reset()?;
    writeln!(out, " {}", message)
}

/// Prints an error line to stderr
///
/// `Auto` only colors when stderr is a terminal.
pub fn print_error(message: &str, choice: ColorChoice) {
    let choice = match choice {
        ColorChoice::Auto if !io::stderr().is_terminal() => ColorChoice::Never,
        other => other,
    };
    let mut stderr = StandardStream::stderr(choice);
    if write_error(&mut stderr, message).is_err() {
        eprintln!("Error: {}", message);
    }
}
