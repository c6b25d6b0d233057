//! Lint command implementation.

use author_intrusion_core::{
    AnalysisOutput, Content, GccOutput, JsonOutput, LoadError, LoadOptions, Loader, Pipeline,
    PluginRegistry, RunOutcome,
};
use author_intrusion_plugins::builtin_registry;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use tokio::task::JoinSet;

use crate::OutputFormat;

/// What one load task hands back: the path and its load result.
type LoadedPath = (PathBuf, Result<Option<Content>, LoadError>);

/// Totals over every path of one invocation.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct LintSummary {
    /// Paths whose analyses all ran.
    pub completed: usize,
    /// Paths whose run stopped at a failing analysis.
    pub aborted: usize,
    /// Paths skipped because the file or its project is missing.
    pub skipped: usize,
    /// Paths that failed to load, including load tasks that panicked.
    pub load_failures: usize,
    /// Warning diagnostics written.
    pub warnings: usize,
    /// Error diagnostics written.
    pub errors: usize,
}

impl LintSummary {
    /// Returns true if anything failed or reported an error.
    #[must_use]
    pub fn failed(&self) -> bool {
        self.load_failures > 0 || self.errors > 0
    }
}

/// Runs the lint command.
pub async fn run(
    paths: Vec<PathBuf>,
    project: Option<PathBuf>,
    format: OutputFormat,
) -> ExitCode {
    let registry = builtin_registry();
    let options = LoadOptions {
        project_path: project,
    };

    tracing::info!(
        "Analyzing {} path(s) with {} plugin(s)",
        paths.len(),
        registry.len()
    );

    let summary = lint_paths(paths, &options, &registry, |_| new_output(format)).await;

    tracing::info!(
        "Done: {} completed, {} aborted, {} skipped, {} failed to load",
        summary.completed,
        summary.aborted,
        summary.skipped,
        summary.load_failures
    );

    if summary.failed() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn new_output(format: OutputFormat) -> Box<dyn AnalysisOutput> {
    match format {
        OutputFormat::Gcc => Box::new(GccOutput::console()),
        OutputFormat::Json => Box::new(JsonOutput::stdout()),
    }
}

/// Loads every path concurrently and runs the pipeline over each content as
/// soon as it is loaded.
///
/// A path that fails to load is reported on stderr and counted; the other
/// paths still run.
pub async fn lint_paths<F>(
    paths: Vec<PathBuf>,
    options: &LoadOptions,
    registry: &PluginRegistry,
    make_output: F,
) -> LintSummary
where
    F: FnMut(&Path) -> Box<dyn AnalysisOutput>,
{
    let loader = Arc::new(Loader::new());
    let mut tasks = JoinSet::new();

    for path in paths {
        let loader = Arc::clone(&loader);
        let options = options.clone();
        tasks.spawn(async move {
            let result = loader.load_content(&path, &options).await;
            (path, result)
        });
    }

    analyze_loaded(tasks, registry, make_output).await
}

/// Runs the pipeline over each load task's content in completion order.
async fn analyze_loaded<F>(
    mut tasks: JoinSet<LoadedPath>,
    registry: &PluginRegistry,
    mut make_output: F,
) -> LintSummary
where
    F: FnMut(&Path) -> Box<dyn AnalysisOutput>,
{
    let pipeline = Pipeline::new(registry);
    let mut summary = LintSummary::default();

    while let Some(joined) = tasks.join_next().await {
        let (path, result) = match joined {
            Ok(loaded) => loaded,
            Err(e) => {
                tracing::error!("Load task failed: {}", e);
                eprintln!("error: load task failed: {e}");
                summary.load_failures += 1;
                continue;
            }
        };

        let content = match result {
            Ok(content) => content,
            Err(e) => {
                tracing::debug!("Failed to load {}: {:?}", path.display(), e);
                eprintln!("{:?}", miette::Report::new(e));
                summary.load_failures += 1;
                continue;
            }
        };

        let mut output = make_output(&path);
        let report = pipeline.run(content.as_ref(), output.as_mut());

        match report.outcome {
            RunOutcome::Skipped => summary.skipped += 1,
            RunOutcome::Completed => summary.completed += 1,
            RunOutcome::Aborted { .. } => summary.aborted += 1,
        }
        summary.warnings += report.counts.warnings;
        summary.errors += report.counts.errors;
    }

    summary
}
