//! Plugin flagging a word written twice in a row, such as "the the".
//!
//! Words are compared ignoring case and only within a single line.
//!
//! # Settings
//!
//! - `ignore`: Words that may legitimately repeat (e.g. `["had", "that"]`)
//! - `severity`: `warning` (default) or `error`

use author_intrusion_core::{AnalysisArguments, AnalysisPlugin, PluginError, Severity};

/// Plugin id for repeated-words.
pub const ID: &str = "repeated-words";

/// Flags immediately repeated words.
#[derive(Debug, Clone, Default)]
pub struct RepeatedWords;

impl RepeatedWords {
    /// Creates the plugin.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

/// A word and its character columns on the line.
#[derive(Debug, PartialEq, Eq)]
struct Word {
    text: String,
    begin: usize,
    end: usize,
}

/// Splits a line into words made of alphanumerics and apostrophes.
fn words(text: &str) -> Vec<Word> {
    let mut words = Vec::new();
    let mut current: Option<Word> = None;

    for (column, c) in text.chars().enumerate() {
        if c.is_alphanumeric() || c == '\'' {
            let word = current.get_or_insert_with(|| Word {
                text: String::new(),
                begin: column,
                end: column,
            });
            word.text.extend(c.to_lowercase());
            word.end = column + 1;
        } else if let Some(word) = current.take() {
            words.push(word);
        }
    }
    words.extend(current);

    words
}

impl AnalysisPlugin for RepeatedWords {
    fn id(&self) -> &'static str {
        ID
    }

    fn description(&self) -> &'static str {
        "Flags a word repeated immediately"
    }

    fn process(&self, args: &mut AnalysisArguments<'_>) -> Result<(), PluginError> {
        let severity = args.analysis.severity_or(Severity::Warning);
        let ignored: Vec<String> = args
            .analysis
            .get_str_array("ignore")
            .iter()
            .map(|w| w.to_lowercase())
            .collect();

        for line in args.content.lines() {
            let words = words(line.text());
            for pair in words.windows(2) {
                let (first, second) = (&pair[0], &pair[1]);
                if first.text != second.text || ignored.contains(&second.text) {
                    continue;
                }

                args.output.write(
                    severity,
                    &format!("Repeated word '{}'", second.text),
                    Some(&line.location().columns(first.begin, second.end)),
                );
            }
        }

        Ok(())
    }
}
