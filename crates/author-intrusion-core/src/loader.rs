//! Loading content files together with their projects.

use crate::content::Content;
use crate::metadata::MetadataError;
use crate::project::{Project, ProjectError};
use crate::resolver::{self, ProjectSource};

use miette::Diagnostic;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};
use thiserror::Error;
use tracing::debug;

/// Options shared by every load.
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    /// Project file to use instead of searching upward from each content.
    pub project_path: Option<PathBuf>,
}

impl LoadOptions {
    /// Creates options that search for the project of each content.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses `path` as the project for every content.
    #[must_use]
    pub fn project_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.project_path = Some(path.into());
        self
    }
}

/// Errors that abort loading a single content.
#[derive(Debug, Error, Diagnostic)]
pub enum LoadError {
    /// The project file exists but could not be loaded.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Project(#[from] ProjectError),

    /// The content file exists but could not be read.
    #[error("Failed to read {path}: {source}")]
    #[diagnostic(code(author_intrusion::content::io))]
    Io {
        /// Content path.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// The content's metadata header is malformed.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Metadata(#[from] MetadataError),
}

/// Loads contents and the projects they belong to.
///
/// Projects are cached by path, so every content that resolves to the same
/// project file shares one [`Arc<Project>`]. A loader can be shared between
/// tasks; loads of different paths are independent.
#[derive(Debug, Default)]
pub struct Loader {
    projects: Mutex<HashMap<PathBuf, Arc<Project>>>,
}

impl Loader {
    /// Creates a loader with an empty project cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads `content_path` and its project.
    ///
    /// Returns `Ok(None)` when the content file does not exist. A missing
    /// project is not an error either; the content is returned without one.
    ///
    /// # Errors
    ///
    /// Returns an error if the project file is not valid JSON, if a file
    /// cannot be read, or if the metadata header is not valid YAML.
    pub async fn load_content(
        &self,
        content_path: &Path,
        options: &LoadOptions,
    ) -> Result<Option<Content>, LoadError> {
        let project = self.load_project(content_path, options).await?;

        if !exists(content_path).await.map_err(|e| LoadError::Io {
            path: content_path.to_path_buf(),
            source: e,
        })? {
            debug!("Skipping missing content: {}", content_path.display());
            return Ok(None);
        }

        debug!("Loading content: {}", content_path.display());
        let text = tokio::fs::read_to_string(content_path)
            .await
            .map_err(|e| LoadError::Io {
                path: content_path.to_path_buf(),
                source: e,
            })?;

        let content = Content::parse(content_path, &text, project)?;
        debug!(
            "Loaded {} with {} body lines",
            content_path.display(),
            content.len()
        );
        Ok(Some(content))
    }

    /// Resolves and loads the project for `content_path`.
    ///
    /// Returns `Ok(None)` when no project file exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the project file cannot be read or parsed.
    pub async fn load_project(
        &self,
        content_path: &Path,
        options: &LoadOptions,
    ) -> Result<Option<Arc<Project>>, ProjectError> {
        let source = resolver::resolve(content_path, options.project_path.as_deref()).await;
        let Some(path) = source.path() else {
            return Ok(None);
        };

        if let Some(project) = self.cached(path) {
            return Ok(Some(project));
        }

        let io_error = |e| ProjectError::Io {
            path: path.to_path_buf(),
            source: e,
        };
        if !exists(path).await.map_err(io_error)? {
            if matches!(source, ProjectSource::Explicit(_)) {
                tracing::warn!("Project file {} does not exist", path.display());
            }
            return Ok(None);
        }

        debug!("Loading project: {}", path.display());
        let data = tokio::fs::read_to_string(path).await.map_err(io_error)?;
        let project = Arc::new(Project::parse_at(path, &data)?);

        // Another task may have loaded the same project meanwhile; keep the
        // first one so all contents share it.
        let mut projects = self.projects.lock().unwrap_or_else(PoisonError::into_inner);
        let shared = projects
            .entry(path.to_path_buf())
            .or_insert(project)
            .clone();
        Ok(Some(shared))
    }

    fn cached(&self, path: &Path) -> Option<Arc<Project>> {
        self.projects
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(path)
            .cloned()
    }
}

async fn exists(path: &Path) -> std::io::Result<bool> {
    tokio::fs::try_exists(path).await
}
