//! Extraction of the YAML metadata header at the top of a document.
//!
//! A header starts on the very first line with a line that is exactly `---`
//! and ends at the next such line:
//!
//! ```text
//! ---
//! title: Test
//! ---
//! Hello world.
//! ```
//!
//! Without a closing marker the opening line is ordinary text.

use crate::content::Content;
use miette::Diagnostic;
use serde_json::Value;
use std::path::PathBuf;
use tracing::debug;

/// Line that opens and closes a metadata header.
pub const HEADER_MARKER: &str = "---";

/// Errors parsing a metadata header.
#[derive(Debug, thiserror::Error, Diagnostic)]
pub enum MetadataError {
    /// The delimited header is not valid YAML.
    #[error("Invalid metadata header in {path}: {source}")]
    #[diagnostic(
        code(author_intrusion::metadata::yaml),
        help("the lines between the two `---` markers must form a YAML document")
    )]
    Yaml {
        /// Content whose header failed to parse.
        path: PathBuf,
        /// Underlying YAML error.
        source: serde_yaml::Error,
    },
}

/// Parses and removes the metadata header of a freshly split content.
///
/// On success the header lines, closing marker included, are gone from
/// `content.lines()` and the parsed value is available through
/// [`Content::metadata`]. A header that parses to nothing (such as an empty
/// header) leaves the metadata unset. Content without a terminated header is
/// left untouched.
///
/// # Errors
///
/// Returns [`MetadataError::Yaml`] if the header is delimited but not valid
/// YAML. The content is left untouched in that case.
pub fn extract_metadata(content: &mut Content) -> Result<(), MetadataError> {
    if content.lines.first().map(|l| l.text()) != Some(HEADER_MARKER) {
        return Ok(());
    }

    let Some(close) = content.index_of_text(HEADER_MARKER, 1) else {
        debug!(
            "Unterminated metadata header in {}, treating as text",
            content.path().display()
        );
        return Ok(());
    };

    // The opening marker stays in the parsed text; YAML reads it as a
    // document start.
    let text = content.get_text(0, close);
    let value: Value = serde_yaml::from_str(&text).map_err(|e| MetadataError::Yaml {
        path: content.path().to_path_buf(),
        source: e,
    })?;

    content.lines.drain(..=close);
    content.metadata = if value.is_null() { None } else { Some(value) };

    debug!(
        "Extracted {}-line metadata header from {}",
        close + 1,
        content.path().display()
    );
    Ok(())
}
