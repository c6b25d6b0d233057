//! # author-intrusion-core
//!
//! Core of the author-intrusion prose analyzer.
//!
//! This crate prepares documents for analysis and mediates diagnostics; it
//! performs no analysis itself. It includes:
//!
//! - [`Content`], [`Line`] and [`Location`] for location-addressable documents
//! - [`extract_metadata`] for the optional `---` delimited YAML header
//! - [`Project`] and [`Analysis`] loaded from `project.aipj` files
//! - [`Loader`] for resolving projects and loading contents
//! - [`AnalysisPlugin`] and [`PluginRegistry`] for the analyses themselves
//! - [`Pipeline`] for running a project's analyses over a content
//! - [`AnalysisOutput`] with the [`JsonOutput`] and [`GccOutput`] formats
//!
//! ## Example
//!
//! ```ignore
//! use author_intrusion_core::{GccOutput, LoadOptions, Loader, Pipeline, PluginRegistry};
//!
//! let registry = PluginRegistry::new().plugin(MyPlugin);
//! let loader = Loader::new();
//!
//! let content = loader.load_content(path, &LoadOptions::new()).await?;
//! let report = Pipeline::new(&registry).run(content.as_ref(), &mut GccOutput::console());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod content;
mod loader;
mod metadata;
mod output;
mod pipeline;
mod plugin;
mod project;
mod types;

/// Project file discovery.
pub mod resolver;

pub use content::Content;
pub use loader::{LoadError, LoadOptions, Loader};
pub use metadata::{extract_metadata, MetadataError, HEADER_MARKER};
pub use output::{AnalysisOutput, GccOutput, JsonOutput};
pub use pipeline::{DiagnosticCounts, Pipeline, RunOutcome, RunReport};
pub use plugin::{
    AnalysisArguments, AnalysisPlugin, PluginBox, PluginError, PluginRegistry, ResolveError,
};
pub use project::{Analysis, Project, ProjectError};
pub use resolver::{ProjectSource, PROJECT_FILE_NAME};
pub use types::{Line, Location, LocationError, Severity};
