//! Report rendering in text or JSON
//!
//! Every subcommand produces a report struct and hands it to
//! [`OutputWriter`]; the chosen `--output` format decides how it reaches
//! stdout. Handlers never branch on the format themselves.

use std::io::Write;

use serde::Serialize;

use crate::cli::OutputFormat;
use crate::error::CliError;

/// Writes command reports to stdout in the selected format.
///
/// A report must implement both [`Render`] (text) and
/// [`serde::Serialize`] (JSON).
pub struct OutputWriter {
    format: OutputFormat,
}

impl OutputWriter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Render one report to stdout.
    ///
    /// Text goes through [`Render::render_text`]; JSON is pretty-printed
    /// with a trailing newline.
    pub fn render<T: Render + Serialize>(&self, payload: &T) -> Result<(), CliError> {
        let stdout = std::io::stdout();
        let mut handle = stdout.lock();
        match self.format {
            OutputFormat::Text => {
                payload.render_text(&mut handle)?;
            }
            OutputFormat::Json => {
                serde_json::to_writer_pretty(&mut handle, payload)?;
                writeln!(handle)?;
            }
        }
        Ok(())
    }
}

/// Human-readable rendering of a command report.
pub trait Render {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()>;
}
