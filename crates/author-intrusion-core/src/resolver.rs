//! Project file resolution for a content path.
//!
//! Resolves the project file in this order:
//!
//! 1. An explicit project path (`--project`), used as given
//! 2. The nearest `project.aipj` (any ASCII case) in the content's directory
//!    or one of its ancestors
//! 3. No project

use std::path::{Path, PathBuf};

/// File name of a project file, compared ignoring ASCII case.
pub const PROJECT_FILE_NAME: &str = "project.aipj";

/// Where the project for a content was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectSource {
    /// Explicitly specified; not checked for existence.
    Explicit(PathBuf),
    /// Found by searching upward from the content.
    Discovered(PathBuf),
    /// No project file in any ancestor directory.
    NotFound,
}

impl ProjectSource {
    /// Returns the resolved path, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Explicit(p) | Self::Discovered(p) => Some(p),
            Self::NotFound => None,
        }
    }
}

/// Resolves the project file for `content_path`.
///
/// See module-level docs for resolution order.
pub async fn resolve(content_path: &Path, explicit: Option<&Path>) -> ProjectSource {
    if let Some(p) = explicit {
        return ProjectSource::Explicit(p.to_path_buf());
    }

    let Some(start) = search_start(content_path) else {
        return ProjectSource::NotFound;
    };

    for dir in start.ancestors() {
        if let Some(found) = find_in_dir(dir).await {
            tracing::debug!("Found project file: {}", found.display());
            return ProjectSource::Discovered(found);
        }
    }

    tracing::debug!("No {} above {}", PROJECT_FILE_NAME, content_path.display());
    ProjectSource::NotFound
}

/// Directory the upward search starts in: the content's parent, made
/// absolute against the working directory.
fn search_start(content_path: &Path) -> Option<PathBuf> {
    let absolute = if content_path.is_absolute() {
        content_path.to_path_buf()
    } else {
        std::env::current_dir().ok()?.join(content_path)
    };
    absolute.parent().map(Path::to_path_buf)
}

/// Looks for a project file directly inside `dir`.
async fn find_in_dir(dir: &Path) -> Option<PathBuf> {
    let mut entries = match tokio::fs::read_dir(dir).await {
        Ok(entries) => entries,
        Err(e) => {
            tracing::debug!("Skipping unreadable directory {}: {}", dir.display(), e);
            return None;
        }
    };

    while let Ok(Some(entry)) = entries.next_entry().await {
        let name = entry.file_name();
        let matches = name
            .to_str()
            .is_some_and(|n| n.eq_ignore_ascii_case(PROJECT_FILE_NAME));
        if matches && entry.file_type().await.is_ok_and(|t| !t.is_dir()) {
            return Some(entry.path());
        }
    }

    None
}
