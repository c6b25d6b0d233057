//! The registry of built-in plugins.

use crate::{LineLength, RepeatedWords, RequiredMetadata, TrailingWhitespace};
use author_intrusion_core::{PluginBox, PluginRegistry};

/// Returns every built-in plugin.
///
/// Includes:
/// - `line-length` - Flags long lines
/// - `trailing-whitespace` - Flags trailing spaces and tabs
/// - `repeated-words` - Flags "the the"
/// - `required-metadata` - Requires metadata header keys
#[must_use]
pub fn builtin_plugins() -> Vec<PluginBox> {
    vec![
        Box::new(LineLength::new()),
        Box::new(TrailingWhitespace::new()),
        Box::new(RepeatedWords::new()),
        Box::new(RequiredMetadata::new()),
    ]
}

/// Returns a registry with every built-in plugin under its id.
#[must_use]
pub fn builtin_registry() -> PluginRegistry {
    builtin_plugins()
        .into_iter()
        .fold(PluginRegistry::new(), PluginRegistry::plugin_box)
}
