//! Pipeline driver: runs a project's analyses over a content.

use crate::content::Content;
use crate::output::AnalysisOutput;
use crate::plugin::{AnalysisArguments, PluginRegistry};
use crate::types::Location;

use tracing::{debug, error, info, warn};

/// How a pipeline run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// No content, or content without a project; nothing ran.
    Skipped,
    /// Every analysis ran.
    Completed,
    /// An analysis failed and the remaining ones were not run.
    Aborted {
        /// Name of the analysis that failed.
        analysis: String,
    },
}

/// Warning and error diagnostics written during a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiagnosticCounts {
    /// Number of warnings.
    pub warnings: usize,
    /// Number of errors.
    pub errors: usize,
}

/// Result of running the pipeline over one content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    /// How the run ended.
    pub outcome: RunOutcome,
    /// Diagnostics routed to the output.
    pub counts: DiagnosticCounts,
}

impl RunReport {
    fn skipped() -> Self {
        Self {
            outcome: RunOutcome::Skipped,
            counts: DiagnosticCounts::default(),
        }
    }

    /// Returns true if any error diagnostic was written.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.counts.errors > 0
    }
}

/// Counts diagnostics on their way to the real output.
struct Tally<'a> {
    inner: &'a mut dyn AnalysisOutput,
    counts: DiagnosticCounts,
}

impl AnalysisOutput for Tally<'_> {
    fn write_start(&mut self) {
        self.inner.write_start();
    }

    fn write_end(&mut self) {
        self.inner.write_end();
    }

    fn write_info(&mut self, message: &str) {
        self.inner.write_info(message);
    }

    fn write_warning(&mut self, message: &str, location: Option<&Location>) {
        self.counts.warnings += 1;
        self.inner.write_warning(message, location);
    }

    fn write_error(&mut self, message: &str, location: Option<&Location>) {
        self.counts.errors += 1;
        self.inner.write_error(message, location);
    }
}

/// Runs the analyses of a content's project in order, stopping at the first
/// failure.
///
/// # Example
///
/// ```ignore
/// use author_intrusion_core::{GccOutput, Pipeline, PluginRegistry};
///
/// let registry = PluginRegistry::new().plugin(MyPlugin);
/// let pipeline = Pipeline::new(&registry);
/// let report = pipeline.run(Some(&content), &mut GccOutput::console());
/// ```
#[derive(Debug)]
pub struct Pipeline<'r> {
    registry: &'r PluginRegistry,
}

impl<'r> Pipeline<'r> {
    /// Creates a pipeline resolving plugins from `registry`.
    #[must_use]
    pub fn new(registry: &'r PluginRegistry) -> Self {
        Self { registry }
    }

    /// Runs every analysis of the content's project.
    ///
    /// Missing content or content without a project is skipped without
    /// writing anything. Otherwise the output sees `write_start`, one info
    /// message per analysis, the plugins' diagnostics, `write_end` and a
    /// final info message, even when an analysis fails. A plugin that cannot
    /// be resolved or returns an error is reported as an error at the start
    /// of the content and ends the run.
    pub fn run(&self, content: Option<&Content>, output: &mut dyn AnalysisOutput) -> RunReport {
        let Some(content) = content else {
            return RunReport::skipped();
        };
        let Some(project) = content.project() else {
            debug!("Skipping {}: no project", content.path().display());
            return RunReport::skipped();
        };

        let mut tally = Tally {
            inner: output,
            counts: DiagnosticCounts::default(),
        };
        let mut outcome = RunOutcome::Completed;

        tally.write_start();

        for analysis in &project.analysis {
            tally.write_info(&format!("Running analysis: {}", analysis.name));
            let failure_location = Location::point(content.path(), 0, 0);

            let plugin = match self.registry.resolve(&analysis.plugin) {
                Ok(plugin) => plugin,
                Err(e) => {
                    warn!("Analysis '{}' on {}: {}", analysis.name, content.path().display(), e);
                    tally.write_error(&format!("{}: {e}", analysis.name), Some(&failure_location));
                    outcome = RunOutcome::Aborted {
                        analysis: analysis.name.clone(),
                    };
                    break;
                }
            };

            debug!(
                "Running plugin '{}' for analysis '{}' on {}",
                analysis.plugin,
                analysis.name,
                content.path().display()
            );

            let mut args = AnalysisArguments {
                content,
                analysis,
                output: &mut tally,
            };

            if let Err(e) = plugin.process(&mut args) {
                error!(
                    "Analysis '{}' (plugin '{}') failed on {}: {:?}",
                    analysis.name,
                    analysis.plugin,
                    content.path().display(),
                    e
                );
                tally.write_error(&format!("{}: {e}", analysis.name), Some(&failure_location));
                outcome = RunOutcome::Aborted {
                    analysis: analysis.name.clone(),
                };
                break;
            }
        }

        tally.write_end();
        tally.write_info(&format!("{}: Finished analyzing", content.path().display()));

        info!(
            "Analyzed {}: {} warning(s), {} error(s)",
            content.path().display(),
            tally.counts.warnings,
            tally.counts.errors
        );

        RunReport {
            outcome,
            counts: tally.counts,
        }
    }
}
