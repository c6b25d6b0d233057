//! Analysis plugin trait and the registry that resolves plugin identifiers.

use crate::content::Content;
use crate::output::AnalysisOutput;
use crate::project::Analysis;

use std::collections::BTreeMap;

/// Everything a plugin receives for one invocation.
pub struct AnalysisArguments<'a> {
    /// Content under analysis.
    pub content: &'a Content,
    /// Configured analysis, including the plugin's settings.
    pub analysis: &'a Analysis,
    /// Sink for the plugin's diagnostics.
    pub output: &'a mut dyn AnalysisOutput,
}

impl std::fmt::Debug for AnalysisArguments<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnalysisArguments")
            .field("content", &self.content.path())
            .field("analysis", &self.analysis.name)
            .finish_non_exhaustive()
    }
}

/// An analysis that runs over a loaded content.
///
/// Plugins report findings only through `args.output`. Returning an error
/// stops the remaining analyses configured for the same content.
///
/// # Example
///
/// ```ignore
/// use author_intrusion_core::{AnalysisArguments, AnalysisPlugin, PluginError};
///
/// pub struct NoTabs;
///
/// impl AnalysisPlugin for NoTabs {
///     fn id(&self) -> &'static str { "no-tabs" }
///
///     fn process(&self, args: &mut AnalysisArguments<'_>) -> Result<(), PluginError> {
///         for line in args.content.lines() {
///             if line.text().contains('\t') {
///                 args.output.write_warning("tab character", Some(line.location()));
///             }
///         }
///         Ok(())
///     }
/// }
/// ```
pub trait AnalysisPlugin: Send + Sync {
    /// Identifier used in the `plugin` field of a project's analyses.
    fn id(&self) -> &'static str;

    /// Returns a brief description of what this plugin checks.
    fn description(&self) -> &'static str {
        ""
    }

    /// Runs the analysis.
    ///
    /// # Errors
    ///
    /// Returns an error when the plugin cannot complete, for example because
    /// its settings are invalid.
    fn process(&self, args: &mut AnalysisArguments<'_>) -> Result<(), PluginError>;
}

/// Type alias for boxed `AnalysisPlugin` trait objects.
pub type PluginBox = Box<dyn AnalysisPlugin>;

/// Errors a plugin can fail with.
#[derive(Debug, thiserror::Error)]
pub enum PluginError {
    /// A setting has the wrong shape.
    #[error("invalid setting `{key}`: {message}")]
    Setting {
        /// Setting name.
        key: String,
        /// What is wrong with it.
        message: String,
    },

    /// Any other failure.
    #[error("{0}")]
    Failed(String),
}

impl PluginError {
    /// Creates a setting error.
    #[must_use]
    pub fn setting(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Setting {
            key: key.into(),
            message: message.into(),
        }
    }

    /// Creates a generic failure.
    #[must_use]
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed(message.into())
    }
}

/// Errors resolving a plugin identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    /// No plugin is registered under the identifier.
    #[error("Cannot find plugin '{0}'")]
    UnknownPlugin(String),
}

/// Maps plugin identifiers to implementations.
#[derive(Default)]
pub struct PluginRegistry {
    plugins: BTreeMap<String, PluginBox>,
}

impl PluginRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a plugin under its own [`AnalysisPlugin::id`].
    #[must_use]
    pub fn plugin<P: AnalysisPlugin + 'static>(self, plugin: P) -> Self {
        self.plugin_box(Box::new(plugin))
    }

    /// Registers a boxed plugin under its own [`AnalysisPlugin::id`].
    #[must_use]
    pub fn plugin_box(mut self, plugin: PluginBox) -> Self {
        self.register(plugin.id(), plugin);
        self
    }

    /// Registers a plugin under an explicit identifier, replacing any
    /// previous registration.
    pub fn register(&mut self, id: impl Into<String>, plugin: PluginBox) {
        let id = id.into();
        if self.plugins.insert(id.clone(), plugin).is_some() {
            tracing::warn!("Plugin '{}' registered twice, keeping the last one", id);
        }
    }

    /// Resolves an identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::UnknownPlugin`] if nothing is registered
    /// under `id`.
    pub fn resolve(&self, id: &str) -> Result<&dyn AnalysisPlugin, ResolveError> {
        self.plugins
            .get(id)
            .map(|p| &**p)
            .ok_or_else(|| ResolveError::UnknownPlugin(id.to_string()))
    }

    /// Returns the registered identifiers with their plugins, sorted by id.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &dyn AnalysisPlugin)> {
        self.plugins.iter().map(|(id, p)| (id.as_str(), &**p))
    }

    /// Number of registered plugins.
    #[must_use]
    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    /// Whether no plugin is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }
}

impl std::fmt::Debug for PluginRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.plugins.keys()).finish()
    }
}
