//! # author-intrusion-plugins
//!
//! Built-in analysis plugins for author-intrusion.
//!
//! ## Available Plugins
//!
//! | Id | Description |
//! |----|-------------|
//! | `line-length` | Flags lines longer than a maximum number of characters |
//! | `trailing-whitespace` | Flags spaces or tabs at the end of a line |
//! | `repeated-words` | Flags a word repeated immediately (`the the`) |
//! | `required-metadata` | Requires keys in the metadata header |
//!
//! ## Usage
//!
//! ```ignore
//! use author_intrusion_core::Pipeline;
//! use author_intrusion_plugins::builtin_registry;
//!
//! let registry = builtin_registry();
//! let report = Pipeline::new(&registry).run(Some(&content), &mut output);
//! ```
//!
//! A project enables a plugin by naming its id:
//!
//! ```json
//! { "analysis": [ { "name": "length", "plugin": "line-length", "max": 100 } ] }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod line_length;
mod registry;
mod repeated_words;
mod required_metadata;
mod trailing_whitespace;

pub use line_length::LineLength;
pub use registry::{builtin_plugins, builtin_registry};
pub use repeated_words::RepeatedWords;
pub use required_metadata::RequiredMetadata;
pub use trailing_whitespace::TrailingWhitespace;

/// Re-export core types for convenience.
pub use author_intrusion_core::{AnalysisArguments, AnalysisPlugin, PluginError, Severity};

#[cfg(test)]
pub(crate) mod test_support {
    use author_intrusion_core::{
        Analysis, AnalysisArguments, AnalysisOutput, AnalysisPlugin, Content, Location,
        PluginError, Severity,
    };

    /// A diagnostic captured from a plugin.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct Captured {
        pub severity: Severity,
        pub message: String,
        pub location: Option<Location>,
    }

    #[derive(Default)]
    struct Capture {
        diagnostics: Vec<Captured>,
    }

    impl AnalysisOutput for Capture {
        fn write_start(&mut self) {}
        fn write_end(&mut self) {}
        fn write_info(&mut self, _message: &str) {}
        fn write_warning(&mut self, message: &str, location: Option<&Location>) {
            self.diagnostics.push(Captured {
                severity: Severity::Warning,
                message: message.to_string(),
                location: location.cloned(),
            });
        }
        fn write_error(&mut self, message: &str, location: Option<&Location>) {
            self.diagnostics.push(Captured {
                severity: Severity::Error,
                message: message.to_string(),
                location: location.cloned(),
            });
        }
    }

    /// Runs `plugin` over `text` (header included) with `analysis` settings.
    pub fn run(
        plugin: &dyn AnalysisPlugin,
        analysis: &Analysis,
        text: &str,
    ) -> Result<Vec<Captured>, PluginError> {
        let content = Content::parse("test.md", text, None).expect("valid header");
        let mut capture = Capture::default();
        let mut args = AnalysisArguments {
            content: &content,
            analysis,
            output: &mut capture,
        };
        plugin.process(&mut args)?;
        Ok(capture.diagnostics)
    }
}
