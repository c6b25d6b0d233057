//! Plugin flagging whitespace at the end of lines.
//!
//! A carriage return left over from CRLF line endings is not counted as
//! trailing whitespace.

use author_intrusion_core::{AnalysisArguments, AnalysisPlugin, PluginError, Severity};

/// Plugin id for trailing-whitespace.
pub const ID: &str = "trailing-whitespace";

/// Flags spaces and tabs at the end of a line.
#[derive(Debug, Clone, Default)]
pub struct TrailingWhitespace;

impl TrailingWhitespace {
    /// Creates the plugin.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl AnalysisPlugin for TrailingWhitespace {
    fn id(&self) -> &'static str {
        ID
    }

    fn description(&self) -> &'static str {
        "Flags spaces or tabs at the end of a line"
    }

    fn process(&self, args: &mut AnalysisArguments<'_>) -> Result<(), PluginError> {
        let severity = args.analysis.severity_or(Severity::Warning);

        for line in args.content.lines() {
            let text = line.text().trim_end_matches('\r');
            let kept = text.trim_end_matches([' ', '\t']);
            if kept.len() == text.len() {
                continue;
            }

            let begin = kept.chars().count();
            let end = text.chars().count();
            args.output.write(
                severity,
                "Trailing whitespace",
                Some(&line.location().columns(begin, end)),
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::run;
    use author_intrusion_core::Analysis;

    fn check(text: &str) -> Vec<crate::test_support::Captured> {
        run(&TrailingWhitespace::new(), &Analysis::new("ws", ID), text).unwrap()
    }

    #[test]
    fn test_flags_spaces_and_tabs() {
        let diagnostics = check("clean\ndirty  \ntabbed\t\n");
        assert_eq!(diagnostics.len(), 2);

        let first = diagnostics[0].location.as_ref().unwrap();
        assert_eq!(first.begin_line(), 1);
        assert_eq!(first.begin_column(), 5);
        assert_eq!(first.end_column(), 7);
        assert_eq!(diagnostics[1].location.as_ref().unwrap().begin_line(), 2);
    }

    #[test]
    fn test_ignores_crlf() {
        assert!(check("one\r\ntwo\r\n").is_empty());
        assert_eq!(check("one \r\ntwo").len(), 1);
    }

    #[test]
    fn test_blank_line_of_spaces() {
        let diagnostics = check("a\n   \nb");
        assert_eq!(diagnostics.len(), 1);
        let location = diagnostics[0].location.as_ref().unwrap();
        assert_eq!(location.begin_column(), 0);
        assert_eq!(location.end_column(), 3);
    }
}
