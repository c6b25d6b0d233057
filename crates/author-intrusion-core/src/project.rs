//! Project configuration loaded from `project.aipj` files.

use crate::types::Severity;
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

/// A project: the ordered analyses to run over every content it owns.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Project {
    /// Analyses in execution order.
    pub analysis: Vec<Analysis>,

    /// Fields the core does not read, kept as written.
    #[serde(flatten)]
    pub extra: Map<String, Value>,

    /// File the project was loaded from, if any.
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

impl Project {
    /// Creates an empty project.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an analysis at the end of the list.
    #[must_use]
    pub fn with_analysis(mut self, analysis: Analysis) -> Self {
        self.analysis.push(analysis);
        self
    }

    /// Parses a project from JSON text.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is invalid or lacks an `analysis` list.
    pub fn parse(content: &str) -> Result<Self, ProjectError> {
        serde_json::from_str(content).map_err(|e| ProjectError::Parse {
            path: None,
            source: e,
        })
    }

    /// Parses a project from JSON text read from `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is invalid or lacks an `analysis` list.
    pub fn parse_at(path: &Path, content: &str) -> Result<Self, ProjectError> {
        let mut project: Self =
            serde_json::from_str(content).map_err(|e| ProjectError::Parse {
                path: Some(path.to_path_buf()),
                source: e,
            })?;
        project.source = Some(path.to_path_buf());
        Ok(project)
    }

    /// Finds an analysis by name.
    #[must_use]
    pub fn analysis_named(&self, name: &str) -> Option<&Analysis> {
        self.analysis.iter().find(|a| a.name == name)
    }
}

/// One configured unit of work.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    /// Display name used in diagnostics.
    pub name: String,

    /// Registry identifier of the plugin to run.
    pub plugin: String,

    /// Every other field of the entry, forwarded to the plugin.
    #[serde(flatten)]
    pub settings: Map<String, Value>,
}

impl Analysis {
    /// Creates an analysis without settings.
    #[must_use]
    pub fn new(name: impl Into<String>, plugin: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            plugin: plugin.into(),
            settings: Map::new(),
        }
    }

    /// Sets a plugin setting.
    #[must_use]
    pub fn with_setting(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.settings.insert(key.into(), value.into());
        self
    }

    /// Gets a setting deserialized into `T`.
    #[must_use]
    pub fn get_option<T: serde::de::DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.settings
            .get(key)
            .and_then(|v| T::deserialize(v).ok())
    }

    /// Gets a boolean setting with a default value.
    #[must_use]
    pub fn get_bool(&self, key: &str, default: bool) -> bool {
        self.settings
            .get(key)
            .and_then(Value::as_bool)
            .unwrap_or(default)
    }

    /// Gets an integer setting with a default value.
    #[must_use]
    pub fn get_int(&self, key: &str, default: i64) -> i64 {
        self.settings
            .get(key)
            .and_then(Value::as_i64)
            .unwrap_or(default)
    }

    /// Gets a string setting with a default value.
    #[must_use]
    pub fn get_str<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.settings
            .get(key)
            .and_then(Value::as_str)
            .unwrap_or(default)
    }

    /// Gets a string array setting, skipping non-string entries.
    #[must_use]
    pub fn get_str_array(&self, key: &str) -> Vec<String> {
        self.settings
            .get(key)
            .and_then(Value::as_array)
            .map(|arr| {
                arr.iter()
                    .filter_map(|v| v.as_str().map(String::from))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Reads the `severity` setting, falling back to `default`.
    #[must_use]
    pub fn severity_or(&self, default: Severity) -> Severity {
        self.settings
            .get("severity")
            .and_then(Value::as_str)
            .and_then(Severity::parse)
            .unwrap_or(default)
    }
}

/// Errors reading a project file.
#[derive(Debug, thiserror::Error, Diagnostic)]
pub enum ProjectError {
    /// IO error reading the project file.
    #[error("Failed to read project file {path}: {source}")]
    #[diagnostic(code(author_intrusion::project::io))]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// The project file is not valid project JSON.
    #[error("Failed to parse project{}: {source}", display_path(.path.as_deref()))]
    #[diagnostic(
        code(author_intrusion::project::parse),
        help("a project file is a JSON object with an `analysis` list whose entries name a `plugin`")
    )]
    Parse {
        /// Path of the project file, when parsed from disk.
        path: Option<PathBuf>,
        /// Underlying JSON error.
        source: serde_json::Error,
    },
}

fn display_path(path: Option<&Path>) -> String {
    path.map(|p| format!(" {}", p.display())).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parse_keeps_analysis_order() {
        let project = Project::parse(
            r#"{"analysis":[
                {"name":"spell","plugin":"./spellcheck"},
                {"name":"length","plugin":"line-length","max":72}
            ]}"#,
        )
        .expect("Failed to parse");

        let names: Vec<&str> = project.analysis.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, ["spell", "length"]);
        assert_eq!(project.analysis[0].plugin, "./spellcheck");
        assert!(project.source.is_none());
    }

    #[test]
    fn unknown_fields_become_settings() {
        let project = Project::parse(
            r#"{"analysis":[{"name":"length","plugin":"line-length","max":72,"severity":"error"}],
                "title":"My Novel"}"#,
        )
        .unwrap();

        let analysis = &project.analysis[0];
        assert_eq!(analysis.get_int("max", 80), 72);
        assert_eq!(analysis.severity_or(Severity::Warning), Severity::Error);
        assert!(!analysis.settings.contains_key("name"));
        assert_eq!(project.extra.get("title"), Some(&json!("My Novel")));
    }

    #[test]
    fn missing_analysis_is_a_parse_error() {
        let err = Project::parse(r#"{"title":"x"}"#).unwrap_err();
        assert!(matches!(err, ProjectError::Parse { .. }));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = Project::parse("{ analysis: ").unwrap_err();
        assert!(err.to_string().starts_with("Failed to parse project:"));
    }

    #[test]
    fn parse_at_records_source_and_path_in_errors() {
        let path = Path::new("books/project.aipj");
        let project = Project::parse_at(path, r#"{"analysis":[]}"#).unwrap();
        assert_eq!(project.source.as_deref(), Some(path));

        let err = Project::parse_at(path, "[").unwrap_err();
        assert!(err.to_string().contains("books/project.aipj"));
    }

    #[test]
    fn setting_accessors_fall_back_to_defaults() {
        let analysis = Analysis::new("words", "repeated-words")
            .with_setting("ignore", json!(["had", 3, "that"]))
            .with_setting("strict", true)
            .with_setting("mode", "fast");

        assert_eq!(analysis.get_str_array("ignore"), ["had", "that"]);
        assert!(analysis.get_bool("strict", false));
        assert!(analysis.get_bool("missing", true));
        assert_eq!(analysis.get_str("mode", "slow"), "fast");
        assert_eq!(analysis.get_int("mode", 5), 5);
        assert_eq!(analysis.get_option::<Vec<String>>("ignore"), None);
        assert_eq!(analysis.severity_or(Severity::Info), Severity::Info);
    }

    #[test]
    fn analysis_named_finds_first_match() {
        let project = Project::new()
            .with_analysis(Analysis::new("a", "p1"))
            .with_analysis(Analysis::new("b", "p2"));
        assert_eq!(project.analysis_named("b").map(|a| a.plugin.as_str()), Some("p2"));
        assert!(project.analysis_named("c").is_none());
    }
}
