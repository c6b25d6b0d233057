//! Plugin requiring keys in the document's metadata header.
//!
//! # Settings
//!
//! - `keys`: Metadata keys every document must define (required)
//! - `severity`: `error` (default) or `warning`

use author_intrusion_core::{
    AnalysisArguments, AnalysisPlugin, Location, PluginError, Severity,
};

/// Plugin id for required-metadata.
pub const ID: &str = "required-metadata";

/// Requires metadata keys listed in the `keys` setting.
#[derive(Debug, Clone, Default)]
pub struct RequiredMetadata;

impl RequiredMetadata {
    /// Creates the plugin.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl AnalysisPlugin for RequiredMetadata {
    fn id(&self) -> &'static str {
        ID
    }

    fn description(&self) -> &'static str {
        "Requires the metadata keys listed in `keys`"
    }

    fn process(&self, args: &mut AnalysisArguments<'_>) -> Result<(), PluginError> {
        let keys: Vec<String> = args
            .analysis
            .get_option("keys")
            .ok_or_else(|| PluginError::setting("keys", "expected a list of metadata key names"))?;
        let severity = args.analysis.severity_or(Severity::Error);
        let location = Location::point(args.content.path(), 0, 0);

        if args.content.metadata().is_none() {
            if !keys.is_empty() {
                args.output.write(
                    severity,
                    &format!("Missing metadata header (requires: {})", keys.join(", ")),
                    Some(&location),
                );
            }
            return Ok(());
        }

        for key in &keys {
            if args.content.metadata_value(key).is_none() {
                tracing::debug!("{} lacks metadata key '{}'", args.content.path().display(), key);
                args.output.write(
                    severity,
                    &format!("Missing metadata key '{key}'"),
                    Some(&location),
                );
            }
        }

        Ok(())
    }
}
