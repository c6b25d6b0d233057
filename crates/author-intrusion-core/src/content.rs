//! In-memory documents split into addressable lines.

use crate::metadata::{self, MetadataError};
use crate::project::Project;
use crate::types::{Line, Location};

use serde_json::Value;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// A loaded document: its lines, optional metadata header and owning project.
///
/// Lines are only rearranged while loading (the metadata header is removed);
/// afterwards the content is read-only. Every line keeps the location it had
/// in the original file, so diagnostics point at the real row even after the
/// header is gone.
#[derive(Debug, Clone)]
pub struct Content {
    path: PathBuf,
    project: Option<Arc<Project>>,
    pub(crate) lines: Vec<Line>,
    pub(crate) metadata: Option<Value>,
}

impl Content {
    /// Splits `text` on line feeds without looking for a metadata header.
    ///
    /// Each line spans from column 0 to one past its last character. Columns
    /// count Unicode scalar values, so a character outside the Basic
    /// Multilingual Plane (an emoji, say) is one column, not two UTF-16
    /// units. A trailing line feed produces a final empty line.
    #[must_use]
    pub fn split(path: impl Into<PathBuf>, text: &str) -> Self {
        let path = path.into();
        let lines = text
            .split('\n')
            .enumerate()
            .map(|(row, line)| {
                let location = Location::on_line(path.clone(), row, 0, line.chars().count() + 1);
                Line::new(location, line)
            })
            .collect();

        Self {
            path,
            project: None,
            lines,
            metadata: None,
        }
    }

    /// Builds a content from document text, attaching `project` and
    /// extracting the metadata header.
    ///
    /// # Errors
    ///
    /// Returns an error if a delimited metadata header is not valid YAML.
    pub fn parse(
        path: impl Into<PathBuf>,
        text: &str,
        project: Option<Arc<Project>>,
    ) -> Result<Self, MetadataError> {
        let mut content = Self::split(path, text).with_project(project);
        metadata::extract_metadata(&mut content)?;
        Ok(content)
    }

    /// Attaches the owning project.
    #[must_use]
    pub fn with_project(mut self, project: Option<Arc<Project>>) -> Self {
        self.project = project;
        self
    }

    /// Path the content was loaded from.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Project that owns this content.
    #[must_use]
    pub fn project(&self) -> Option<&Arc<Project>> {
        self.project.as_ref()
    }

    /// Body lines, in document order.
    #[must_use]
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Line at `index` in the body (not the original row).
    #[must_use]
    pub fn line(&self, index: usize) -> Option<&Line> {
        self.lines.get(index)
    }

    /// Number of body lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the body has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Parsed metadata header, if the document had one.
    #[must_use]
    pub fn metadata(&self) -> Option<&Value> {
        self.metadata.as_ref()
    }

    /// Looks up a top-level metadata key.
    #[must_use]
    pub fn metadata_value(&self, key: &str) -> Option<&Value> {
        self.metadata.as_ref().and_then(|m| m.get(key))
    }

    /// Returns the index of the first line at or after `from` whose text is
    /// exactly `needle`.
    #[must_use]
    pub fn index_of_text(&self, needle: &str, from: usize) -> Option<usize> {
        self.lines
            .get(from..)?
            .iter()
            .position(|line| line.text() == needle)
            .map(|offset| from + offset)
    }

    /// Joins the text of lines `[from, to)` with line feeds.
    ///
    /// The range is clamped to the available lines.
    #[must_use]
    pub fn get_text(&self, from: usize, to: usize) -> String {
        let to = to.min(self.lines.len());
        if from >= to {
            return String::new();
        }

        self.lines[from..to]
            .iter()
            .map(Line::text)
            .collect::<Vec<_>>()
            .join("\n")
    }
}
