//! Integration test: loading fixture documents and running the pipeline.
//!
//! Uses fixture files under `tests/fixtures/` to verify that project
//! discovery, metadata extraction, plugin resolution and both output formats
//! work together.

use author_intrusion_core::{
    AnalysisArguments, AnalysisPlugin, GccOutput, JsonOutput, LoadError, LoadOptions, Loader,
    Pipeline, PluginError, PluginRegistry, RunOutcome,
};
use serde_json::json;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

fn fixture(path: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(path)
}

/// Remembers every body it was invoked with.
#[derive(Clone, Default)]
struct SpellCheck {
    seen: Arc<Mutex<Vec<Vec<String>>>>,
}

impl AnalysisPlugin for SpellCheck {
    fn id(&self) -> &'static str {
        "./spellcheck"
    }

    fn process(&self, args: &mut AnalysisArguments<'_>) -> Result<(), PluginError> {
        let texts = args
            .content
            .lines()
            .iter()
            .map(|l| l.text().to_string())
            .collect();
        self.seen.lock().unwrap().push(texts);

        for line in args.content.lines() {
            if line.text().contains("wrold") {
                args.output
                    .write_warning("misspelled word 'wrold'", Some(line.location()));
            }
        }
        Ok(())
    }
}

/// Echoes each line as a warning using the `prefix` setting.
struct EchoLines;

impl AnalysisPlugin for EchoLines {
    fn id(&self) -> &'static str {
        "echo-lines"
    }

    fn process(&self, args: &mut AnalysisArguments<'_>) -> Result<(), PluginError> {
        let prefix = args.analysis.get_str("prefix", "line");
        for line in args.content.lines() {
            args.output
                .write_warning(&format!("{prefix}: {}", line.text()), Some(line.location()));
        }
        Ok(())
    }
}

fn registry(spell: &SpellCheck) -> PluginRegistry {
    PluginRegistry::new().plugin(spell.clone()).plugin(EchoLines)
}

// ── Scenario: header, discovery from a nested directory ──

#[tokio::test]
async fn scenario_document_runs_through_pipeline() {
    let path = fixture("novel/chapters/chapter-01.md");
    let content = Loader::new()
        .load_content(&path, &LoadOptions::new())
        .await
        .expect("load should succeed")
        .expect("fixture exists");

    assert_eq!(content.metadata(), Some(&json!({"title": "Test"})));
    assert_eq!(content.len(), 1);
    assert_eq!(content.lines()[0].text(), "Hello world.");
    assert_eq!(content.lines()[0].location().begin_line(), 3);

    let project = content.project().expect("project discovered");
    assert_eq!(project.extra.get("title"), Some(&json!("Fixture Novel")));

    let spell = SpellCheck::default();
    let registry = registry(&spell);
    let mut output = JsonOutput::new(Vec::new());
    let report = Pipeline::new(&registry).run(Some(&content), &mut output);

    assert_eq!(report.outcome, RunOutcome::Completed);
    assert_eq!(*spell.seen.lock().unwrap(), [vec!["Hello world.".to_string()]]);

    let text = String::from_utf8(output.into_inner()).unwrap();
    let diagnostics: serde_json::Value = serde_json::from_str(&text).expect("valid JSON array");
    assert_eq!(
        diagnostics,
        json!([{
            "type": "warning",
            "text": "saw: Hello world.",
            "filePath": path.display().to_string(),
            "range": [[3, 0], [3, 13]],
        }])
    );
}

#[tokio::test]
async fn document_without_header_keeps_all_lines() {
    let path = fixture("novel/chapters/notes.md");
    let content = Loader::new()
        .load_content(&path, &LoadOptions::new())
        .await
        .unwrap()
        .unwrap();

    assert!(content.metadata().is_none());
    assert_eq!(
        content.get_text(0, content.len()),
        "Plain notes without a header.\nSecond line.\n"
    );

    let spell = SpellCheck::default();
    let registry = registry(&spell);
    let mut output = GccOutput::new(Vec::new(), Vec::new());
    let report = Pipeline::new(&registry).run(Some(&content), &mut output);
    assert_eq!(report.counts.warnings, 3);

    let (out, err) = output.into_inner();
    let out = String::from_utf8(out).unwrap();
    let err = String::from_utf8(err).unwrap();
    assert!(out.starts_with("Running analysis: spell\nRunning analysis: echo\n"));
    assert!(out.ends_with("notes.md: Finished analyzing\n"));
    assert!(err.contains("notes.md:1:1: WARN: saw: Plain notes without a header.\n"));
    assert!(err.contains("notes.md:2:1: WARN: saw: Second line.\n"));
}

// ── Absent and broken inputs ──

#[tokio::test]
async fn missing_content_produces_nothing() {
    let content = Loader::new()
        .load_content(&fixture("novel/chapters/missing.md"), &LoadOptions::new())
        .await
        .unwrap();
    assert!(content.is_none());

    let registry = PluginRegistry::new();
    let mut output = JsonOutput::new(Vec::new());
    let report = Pipeline::new(&registry).run(content.as_ref(), &mut output);
    assert_eq!(report.outcome, RunOutcome::Skipped);
    assert!(output.into_inner().is_empty());
}

#[tokio::test]
async fn broken_project_fails_only_its_own_load() {
    let loader = Loader::new();
    let options = LoadOptions::new();

    let broken = loader.load_content(&fixture("broken/doc.md"), &options).await;
    assert!(matches!(broken, Err(LoadError::Project(_))));

    let fine = loader
        .load_content(&fixture("novel/chapters/notes.md"), &options)
        .await;
    assert!(matches!(fine, Ok(Some(_))));
}

#[tokio::test]
async fn concurrent_loads_share_the_project() {
    let loader = Arc::new(Loader::new());
    let options = LoadOptions::new();

    let mut tasks = tokio::task::JoinSet::new();
    for name in ["novel/chapters/chapter-01.md", "novel/chapters/notes.md"] {
        let loader = Arc::clone(&loader);
        let options = options.clone();
        let path = fixture(name);
        tasks.spawn(async move { loader.load_content(&path, &options).await });
    }

    let mut projects = Vec::new();
    while let Some(joined) = tasks.join_next().await {
        let content = joined.unwrap().unwrap().unwrap();
        projects.push(Arc::clone(content.project().unwrap()));
    }

    assert_eq!(projects.len(), 2);
    assert!(Arc::ptr_eq(&projects[0], &projects[1]));
}
