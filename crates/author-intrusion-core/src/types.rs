//! Core value types: severities, locations and lines.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Severity level for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational message, never counted as a finding.
    Info,
    /// Warning that should be addressed.
    Warning,
    /// Error that must be fixed.
    Error,
}

impl Severity {
    /// Parses a severity name as written in project settings.
    ///
    /// Accepts `info`, `warning`/`warn` and `error`, ignoring ASCII case.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "info" => Some(Self::Info),
            "warning" | "warn" => Some(Self::Warning),
            "error" => Some(Self::Error),
            _ => None,
        }
    }

    /// Label used by the GCC style formatter.
    #[must_use]
    pub fn gcc_label(self) -> &'static str {
        match self {
            Self::Info => "INFO",
            Self::Warning => "WARN",
            Self::Error => "ERROR",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Info => write!(f, "info"),
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Errors raised when building a [`Location`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LocationError {
    /// The end of the range lies before its beginning.
    #[error("range ends at {end_line}:{end_column} before it begins at {begin_line}:{begin_column}")]
    InvertedRange {
        /// Zero-based first line.
        begin_line: usize,
        /// Zero-based first column.
        begin_column: usize,
        /// Zero-based last line.
        end_line: usize,
        /// Zero-based end column.
        end_column: usize,
    },
}

/// A half-open range inside a document.
///
/// Lines and columns are zero-based. Human-facing formatters add one when
/// rendering. A location cannot be changed once built.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Location {
    path: PathBuf,
    begin_line: usize,
    begin_column: usize,
    end_line: usize,
    end_column: usize,
}

impl Location {
    /// Creates a location, checking that the range is not inverted.
    ///
    /// # Errors
    ///
    /// Returns [`LocationError::InvertedRange`] when the end position comes
    /// before the begin position.
    pub fn new(
        path: impl Into<PathBuf>,
        begin_line: usize,
        begin_column: usize,
        end_line: usize,
        end_column: usize,
    ) -> Result<Self, LocationError> {
        if (end_line, end_column) < (begin_line, begin_column) {
            return Err(LocationError::InvertedRange {
                begin_line,
                begin_column,
                end_line,
                end_column,
            });
        }

        Ok(Self {
            path: path.into(),
            begin_line,
            begin_column,
            end_line,
            end_column,
        })
    }

    /// Creates an empty range at a single position.
    #[must_use]
    pub fn point(path: impl Into<PathBuf>, line: usize, column: usize) -> Self {
        Self {
            path: path.into(),
            begin_line: line,
            begin_column: column,
            end_line: line,
            end_column: column,
        }
    }

    /// Creates a range between two columns of the same line.
    ///
    /// The columns may be given in either order.
    #[must_use]
    pub fn on_line(
        path: impl Into<PathBuf>,
        line: usize,
        column_a: usize,
        column_b: usize,
    ) -> Self {
        Self {
            path: path.into(),
            begin_line: line,
            begin_column: column_a.min(column_b),
            end_line: line,
            end_column: column_a.max(column_b),
        }
    }

    /// Path of the document this location points into.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Zero-based first line.
    #[must_use]
    pub fn begin_line(&self) -> usize {
        self.begin_line
    }

    /// Zero-based first column.
    #[must_use]
    pub fn begin_column(&self) -> usize {
        self.begin_column
    }

    /// Zero-based last line.
    #[must_use]
    pub fn end_line(&self) -> usize {
        self.end_line
    }

    /// Zero-based column just past the range.
    #[must_use]
    pub fn end_column(&self) -> usize {
        self.end_column
    }

    /// Narrows this location to a column span on its first line.
    #[must_use]
    pub fn columns(&self, begin: usize, end: usize) -> Self {
        Self::on_line(self.path.clone(), self.begin_line, begin, end)
    }
}

impl std::fmt::Display for Location {
    /// Renders `path:line:column` with one-based numbers.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{}:{}",
            self.path.display(),
            self.begin_line + 1,
            self.begin_column + 1
        )
    }
}

/// A single physical line of a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    location: Location,
    text: String,
}

impl Line {
    /// Creates a line from its location and text.
    #[must_use]
    pub fn new(location: Location, text: impl Into<String>) -> Self {
        Self {
            location,
            text: text.into(),
        }
    }

    /// Location of the line in its original document.
    #[must_use]
    pub fn location(&self) -> &Location {
        &self.location
    }

    /// Text of the line, without the line feed.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Zero-based row in the original document.
    #[must_use]
    pub fn row(&self) -> usize {
        self.location.begin_line
    }
}
