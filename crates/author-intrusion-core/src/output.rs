//! Output sinks for analysis diagnostics.
//!
//! Two formats are provided:
//!
//! - [`JsonOutput`]: a JSON array of diagnostic objects, one per line.
//! - [`GccOutput`]: `path:line:column: LEVEL: message` lines for editors and
//!   terminals.

use crate::types::{Location, Severity};
use serde::Serialize;
use std::io::{self, Write};

/// Receives the diagnostics of one pipeline run.
///
/// Writes never fail toward the caller; a sink that cannot write logs the
/// failure and drops the message.
pub trait AnalysisOutput {
    /// Called once before the first analysis runs.
    fn write_start(&mut self);

    /// Called once after the last analysis ran or the run was aborted.
    fn write_end(&mut self);

    /// Writes a progress message.
    fn write_info(&mut self, message: &str);

    /// Writes a warning diagnostic.
    fn write_warning(&mut self, message: &str, location: Option<&Location>);

    /// Writes an error diagnostic.
    fn write_error(&mut self, message: &str, location: Option<&Location>);

    /// Writes a diagnostic of the given severity.
    fn write(&mut self, severity: Severity, message: &str, location: Option<&Location>) {
        match severity {
            Severity::Info => self.write_info(message),
            Severity::Warning => self.write_warning(message, location),
            Severity::Error => self.write_error(message, location),
        }
    }
}

fn report_failure(result: io::Result<()>) {
    if let Err(e) = result {
        tracing::warn!("Failed to write diagnostic output: {}", e);
    }
}

/// One element of the JSON diagnostic array.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonRecord<'a> {
    #[serde(rename = "type")]
    kind: Severity,
    text: &'a str,
    file_path: Option<String>,
    range: Option<[[usize; 2]; 2]>,
}

impl<'a> JsonRecord<'a> {
    fn new(kind: Severity, text: &'a str, location: Option<&Location>) -> Self {
        Self {
            kind,
            text,
            file_path: location.map(|l| l.path().display().to_string()),
            range: location.map(|l| {
                [
                    [l.begin_line(), l.begin_column()],
                    [l.end_line(), l.end_column()],
                ]
            }),
        }
    }
}

/// Machine-readable sink producing a JSON array.
///
/// Positions are written zero-based, exactly as stored. Progress messages
/// are not part of the stream.
#[derive(Debug)]
pub struct JsonOutput<W: Write = io::Stdout> {
    writer: W,
    is_first: bool,
}

impl JsonOutput<io::Stdout> {
    /// Creates a sink writing to standard output.
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> JsonOutput<W> {
    /// Creates a sink writing to `writer`.
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            is_first: true,
        }
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_record(&mut self, kind: Severity, message: &str, location: Option<&Location>) {
        let record = JsonRecord::new(kind, message, location);
        let json = match serde_json::to_string(&record) {
            Ok(json) => json,
            Err(e) => {
                tracing::warn!("Failed to serialize diagnostic: {}", e);
                return;
            }
        };

        let separator = if self.is_first { "" } else { "," };
        self.is_first = false;
        report_failure(writeln!(self.writer, "{separator}{json}"));
    }
}

impl<W: Write> AnalysisOutput for JsonOutput<W> {
    fn write_start(&mut self) {
        self.is_first = true;
        report_failure(writeln!(self.writer, "["));
    }

    fn write_end(&mut self) {
        report_failure(writeln!(self.writer, "]").and_then(|()| self.writer.flush()));
    }

    fn write_info(&mut self, _message: &str) {}

    fn write_warning(&mut self, message: &str, location: Option<&Location>) {
        self.write_record(Severity::Warning, message, location);
    }

    fn write_error(&mut self, message: &str, location: Option<&Location>) {
        self.write_record(Severity::Error, message, location);
    }
}

/// Human-readable sink in the GCC diagnostic style.
///
/// Progress goes to `out`; warnings and errors go to `err` with one-based
/// positions.
#[derive(Debug)]
pub struct GccOutput<O: Write = io::Stdout, E: Write = io::Stderr> {
    out: O,
    err: E,
}

impl GccOutput<io::Stdout, io::Stderr> {
    /// Creates a sink writing to standard output and standard error.
    #[must_use]
    pub fn console() -> Self {
        Self::new(io::stdout(), io::stderr())
    }
}

impl<O: Write, E: Write> GccOutput<O, E> {
    /// Creates a sink writing progress to `out` and diagnostics to `err`.
    pub fn new(out: O, err: E) -> Self {
        Self { out, err }
    }

    /// Returns the progress and diagnostic writers.
    pub fn into_inner(self) -> (O, E) {
        (self.out, self.err)
    }

    fn write_diagnostic(&mut self, severity: Severity, message: &str, location: Option<&Location>) {
        let label = severity.gcc_label();
        let result = match location {
            Some(location) => writeln!(self.err, "{location}: {label}: {message}"),
            None => writeln!(self.err, "{label}: {message}"),
        };
        report_failure(result);
    }
}

impl<O: Write, E: Write> AnalysisOutput for GccOutput<O, E> {
    fn write_start(&mut self) {}

    fn write_end(&mut self) {}

    fn write_info(&mut self, message: &str) {
        report_failure(writeln!(self.out, "{message}"));
    }

    fn write_warning(&mut self, message: &str, location: Option<&Location>) {
        self.write_diagnostic(Severity::Warning, message, location);
    }

    fn write_error(&mut self, message: &str, location: Option<&Location>) {
        self.write_diagnostic(Severity::Error, message, location);
    }
}
