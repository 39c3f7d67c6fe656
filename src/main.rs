use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::EnvFilter;

use tappr::cli::{self, ChangelogArgs, ReleaseArgs, TestArgs};
use tappr::config::{self, Config};
use tappr::git::{Git2LogSource, LogSource, TextLogSource};
use tappr::output::{OutputTarget, STDOUT};
use tappr::ui;

#[derive(Parser)]
#[command(
    name = "tappr",
    version,
    about = "Changelogs, release notes and scripted smoke tests from the command line"
)]
struct Args {
    #[arg(short, long, global = true, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(short, long, global = true, help = "Print commands, their output and debug logs")]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a changelog grouped by tag
    Changelog {
        #[arg(long, default_value = "all", help = "'all', '<rev>' or '<from>..<to>'")]
        log_range: String,

        #[arg(long, value_name = "BOOL", action = clap::ArgAction::Set)]
        ignore_dependency_bot_commits: Option<bool>,

        #[arg(long, value_name = "BOOL", action = clap::ArgAction::Set)]
        ignore_docs_commits: Option<bool>,

        #[arg(long, help = "Per-tag template file")]
        template: Option<String>,

        #[arg(short, long, default_value = STDOUT, help = "'stdout' or a file path")]
        output: String,

        #[arg(long, help = "Read 'date|subject|refs|author' records from a file ('-' for stdin)")]
        log_file: Option<String>,

        #[arg(long, default_value = ".", help = "Repository to read history from")]
        repo: String,
    },

    /// Generate release notes between two versions
    Release {
        /// Previous version, or 'init' for the first release
        since_ver: String,

        release_ver: String,

        #[arg(long, help = "Release notes template file")]
        template: Option<String>,

        #[arg(
            long,
            help = "Base URL for pull request links (required unless release.pr_path is set)"
        )]
        pr_path: Option<String>,

        #[arg(long, value_name = "BOOL", action = clap::ArgAction::Set)]
        ignore_dependency_bot_commits: Option<bool>,

        #[arg(long, value_name = "BOOL", action = clap::ArgAction::Set)]
        ignore_docs_commits: Option<bool>,

        #[arg(short, long, default_value = STDOUT, help = "'stdout' or a file path")]
        output: String,

        #[arg(long, help = "Read 'date|subject|refs|author' records from a file ('-' for stdin)")]
        log_file: Option<String>,

        #[arg(long, default_value = ".", help = "Repository to read history from")]
        repo: String,
    },

    /// Run the scenarios of a JSON or YAML test document
    Test {
        test_file: String,

        #[arg(short, long, default_value = STDOUT, help = "Value bound to {$$output}")]
        output: String,
    },
}

fn init_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn open_source(log_file: Option<&str>, repo: &str) -> tappr::Result<Box<dyn LogSource>> {
    match log_file {
        Some(path) => Ok(Box::new(TextLogSource::read(path)?)),
        None => Ok(Box::new(Git2LogSource::open(repo)?)),
    }
}

fn report_document(result: &cli::WorkflowResult) {
    for warning in &result.warnings {
        ui::display_boundary_warning(warning);
    }
    if let OutputTarget::File(path) = &result.target {
        ui::display_success(&format!(
            "Wrote {} ({} commits)",
            path, result.entries
        ));
    }
}

fn run(args: Args, config: Config) -> tappr::Result<()> {
    match args.command {
        Commands::Changelog {
            log_range,
            ignore_dependency_bot_commits,
            ignore_docs_commits,
            template,
            output,
            log_file,
            repo,
        } => {
            let source = open_source(log_file.as_deref(), &repo)?;
            let workflow_args = ChangelogArgs {
                log_range,
                ignore_dependency_bot_commits,
                ignore_docs_commits,
                template,
                output,
                today: chrono::Local::now().format("%Y-%m-%d").to_string(),
            };
            let result = cli::run_changelog(source.as_ref(), &workflow_args, &config)?;
            report_document(&result);
        }
        Commands::Release {
            since_ver,
            release_ver,
            template,
            pr_path,
            ignore_dependency_bot_commits,
            ignore_docs_commits,
            output,
            log_file,
            repo,
        } => {
            let source = open_source(log_file.as_deref(), &repo)?;
            let workflow_args = ReleaseArgs {
                since_ver,
                release_ver,
                template,
                pr_path,
                ignore_dependency_bot_commits,
                ignore_docs_commits,
                output,
            };
            let result = cli::run_release(source.as_ref(), &workflow_args, &config)?;
            report_document(&result);
        }
        Commands::Test { test_file, output } => {
            let workflow_args = TestArgs {
                test_file,
                output,
                verbose: args.verbose,
            };
            let report = cli::run_tests(&workflow_args, &config)?;
            ui::display_run_report(&report);
            ui::display_success("All tests passed");
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    // Load configuration
    let config = match config::load_config(args.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            ui::display_error(&e.to_string());
            std::process::exit(1);
        }
    };

    if let Err(e) = run(args, config) {
        ui::display_error(&e.to_string());
        std::process::exit(1);
    }
    Ok(())
}
