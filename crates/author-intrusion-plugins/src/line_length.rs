//! Plugin flagging lines that are too long.
//!
//! # Settings
//!
//! - `max`: Maximum number of characters per line (default: 80)
//! - `severity`: `warning` (default) or `error`

use author_intrusion_core::{AnalysisArguments, AnalysisPlugin, PluginError, Severity};

/// Plugin id for line-length.
pub const ID: &str = "line-length";

/// Flags lines longer than a configured number of characters.
#[derive(Debug, Clone)]
pub struct LineLength {
    /// Maximum used when the analysis does not set `max`.
    pub max: usize,
    /// Severity used when the analysis does not set `severity`.
    pub severity: Severity,
}

impl Default for LineLength {
    fn default() -> Self {
        Self::new()
    }
}

impl LineLength {
    /// Creates the plugin with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            max: 80,
            severity: Severity::Warning,
        }
    }

    /// Sets the default maximum line length.
    #[must_use]
    pub fn max(mut self, max: usize) -> Self {
        self.max = max;
        self
    }

    fn configured_max(&self, args: &AnalysisArguments<'_>) -> Result<usize, PluginError> {
        match args.analysis.settings.get("max") {
            None => Ok(self.max),
            Some(value) => value
                .as_u64()
                .and_then(|v| usize::try_from(v).ok())
                .ok_or_else(|| {
                    PluginError::setting("max", format!("expected a positive integer, got {value}"))
                }),
        }
    }
}

impl AnalysisPlugin for LineLength {
    fn id(&self) -> &'static str {
        ID
    }

    fn description(&self) -> &'static str {
        "Flags lines longer than `max` characters"
    }

    fn process(&self, args: &mut AnalysisArguments<'_>) -> Result<(), PluginError> {
        let max = self.configured_max(args)?;
        let severity = args.analysis.severity_or(self.severity);

        for line in args.content.lines() {
            let length = line.text().trim_end_matches('\r').chars().count();
            if length > max {
                let location = line.location().columns(max, length);
                args.output.write(
                    severity,
                    &format!("Line is {length} characters long (max {max})"),
                    Some(&location),
                );
            }
        }

        Ok(())
    }
}
