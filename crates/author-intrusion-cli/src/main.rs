//! author-intrusion CLI tool.
//!
//! Usage:
//! ```bash
//! author-intrusion lint [OPTIONS] <PATHS>...
//! author-intrusion list-plugins
//! author-intrusion init
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod commands;

/// Prose analyzer running project-configured plugins over text documents
#[derive(Parser)]
#[command(name = "author-intrusion")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the project's analyses over documents
    Lint {
        /// Documents to analyze
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Project file to use instead of searching for project.aipj
        #[arg(short, long, env = "AUTHOR_INTRUSION_PROJECT")]
        project: Option<PathBuf>,

        /// Output format
        #[arg(short, long, default_value = "gcc")]
        format: OutputFormat,
    },

    /// List built-in plugins
    ListPlugins,

    /// Create a project.aipj in the current directory
    Init {
        /// Overwrite an existing project file
        #[arg(long)]
        force: bool,
    },
}

/// Output format for diagnostics.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// `path:line:column: LEVEL: message` lines on stderr.
    #[default]
    Gcc,
    /// A JSON array of diagnostics on stdout.
    Json,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Lint {
            paths,
            project,
            format,
        } => Ok(commands::lint::run(paths, project, format).await),
        Commands::ListPlugins => {
            commands::list_plugins::run();
            Ok(ExitCode::SUCCESS)
        }
        Commands::Init { force } => {
            commands::init::run(std::path::Path::new("."), force)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn lint_defaults_to_gcc() {
        let cli = Cli::try_parse_from(["author-intrusion", "lint", "a.md", "b.md"]).unwrap();
        let Commands::Lint { paths, format, .. } = cli.command else {
            panic!("expected lint");
        };
        assert_eq!(paths, [PathBuf::from("a.md"), PathBuf::from("b.md")]);
        assert_eq!(format, OutputFormat::Gcc);
    }

    #[test]
    fn lint_accepts_json_and_project() {
        let cli = Cli::try_parse_from([
            "author-intrusion",
            "lint",
            "--format",
            "json",
            "--project",
            "book/project.aipj",
            "a.md",
        ])
        .unwrap();
        let Commands::Lint {
            project, format, ..
        } = cli.command
        else {
            panic!("expected lint");
        };
        assert_eq!(project, Some(PathBuf::from("book/project.aipj")));
        assert_eq!(format, OutputFormat::Json);
    }

    #[test]
    fn lint_requires_a_path() {
        assert!(Cli::try_parse_from(["author-intrusion", "lint"]).is_err());
    }
}
