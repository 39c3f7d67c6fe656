//! Workflow orchestration for each subcommand
//!
//! `main.rs` only parses arguments and picks a log source; everything from
//! reading history to writing the document happens here. Callers supply the
//! [`LogSource`], so the workflows run the same against a repository, captured
//! log text or a mock.

use std::fs;
use std::path::Path;

use tracing::{debug, info};

use crate::boundary::{self, BoundaryWarning};
use crate::classifier::Classifier;
use crate::config::Config;
use crate::error::{Result, TapprError};
use crate::git::{LogRange, LogSource};
use crate::output::OutputTarget;
use crate::render::{changelog, release_notes, ChangelogRenderer, ReleaseNotesRenderer};
use crate::scenario::{RunReport, ScenarioDocument, ScenarioRunner, ShellExecutor};
use crate::template::RenderContext;

/// Context key holding the `--output` value during scenario runs
pub const OUTPUT_CONTEXT_KEY: &str = "output";

/// Arguments for the changelog workflow
///
/// Flags left as `None` fall back to the configuration file.
#[derive(Debug, Clone, PartialEq)]
pub struct ChangelogArgs {
    /// `all`, `<rev>` or `<from>..<to>`
    pub log_range: String,

    pub ignore_dependency_bot_commits: Option<bool>,

    pub ignore_docs_commits: Option<bool>,

    /// Per-tag template file
    pub template: Option<String>,

    /// `stdout` or a file path
    pub output: String,

    /// Date used for the untagged group, `YYYY-MM-DD`
    pub today: String,
}

/// Arguments for the release notes workflow
#[derive(Debug, Clone, PartialEq)]
pub struct ReleaseArgs {
    /// Previous version, or `init` for a first release
    pub since_ver: String,

    pub release_ver: String,

    pub template: Option<String>,

    /// Base URL that `(#12)` markers are rewritten against
    pub pr_path: Option<String>,

    pub ignore_dependency_bot_commits: Option<bool>,

    pub ignore_docs_commits: Option<bool>,

    pub output: String,
}

/// Arguments for a scenario run
#[derive(Debug, Clone, PartialEq)]
pub struct TestArgs {
    pub test_file: String,

    /// Bound into the context as `{$$output}`
    pub output: String,

    /// Print resolved commands and their output
    pub verbose: bool,
}

/// Result of a document workflow
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowResult {
    /// The rendered document
    pub document: String,

    /// Where it was written
    pub target: OutputTarget,

    /// Number of log entries that went into the document
    pub entries: usize,

    /// Non-fatal issues found along the way
    pub warnings: Vec<BoundaryWarning>,
}

fn load_template(path: Option<&str>) -> Result<Option<String>> {
    match path {
        Some(path) => fs::read_to_string(path)
            .map(Some)
            .map_err(|e| TapprError::malformed(format!("Cannot read template {}: {}", path, e))),
        None => Ok(None),
    }
}

/// Placeholders worth warning about given the ignore flags
fn expected_placeholders<'a>(
    names: &[&'a str],
    deps_name: &str,
    docs_name: &str,
    ignore_deps: bool,
    ignore_docs: bool,
) -> Vec<&'a str> {
    names
        .iter()
        .copied()
        .filter(|n| !(ignore_deps && *n == deps_name) && !(ignore_docs && *n == docs_name))
        .collect()
}

/// Read history for `range`, classify it by tag and render a changelog.
pub fn render_changelog<S: LogSource + ?Sized>(
    source: &S,
    args: &ChangelogArgs,
    config: &Config,
) -> Result<(String, usize, Vec<BoundaryWarning>)> {
    let range = LogRange::parse(&args.log_range);
    let entries = source.log(&range)?;
    if entries.is_empty() {
        return Err(TapprError::empty_log(range.to_string()));
    }

    let ignore_deps = args
        .ignore_dependency_bot_commits
        .unwrap_or(config.changelog.ignore_dependency_bot_commits);
    let ignore_docs = args
        .ignore_docs_commits
        .unwrap_or(config.changelog.ignore_docs_commits);

    let mut renderer = ChangelogRenderer::new(ignore_deps, ignore_docs);
    let mut warnings = Vec::new();
    let template_path = args.template.as_deref().or(config.changelog.template.as_deref());
    if let Some(template) = load_template(template_path)? {
        let expected = expected_placeholders(
            &changelog::PLACEHOLDERS,
            "dependencies_list",
            "docs_list",
            ignore_deps,
            ignore_docs,
        );
        warnings.extend(boundary::check_template(
            template_path.unwrap_or_default(),
            &template,
            &expected,
        ));
        renderer = renderer.with_template(template);
    }

    let classifier = Classifier::new(config.classifier.dependency_bot.clone());
    let groups = classifier.group_by_tag(&entries, &args.today);
    debug!(range = %range, groups = groups.len(), "rendering changelog");

    Ok((renderer.render(&groups), entries.len(), warnings))
}

/// Read history between two versions and render release notes.
pub fn render_release_notes<S: LogSource + ?Sized>(
    source: &S,
    args: &ReleaseArgs,
    config: &Config,
) -> Result<(String, usize, Vec<BoundaryWarning>)> {
    let mut warnings: Vec<BoundaryWarning> = [&args.since_ver, &args.release_ver]
        .into_iter()
        .filter_map(|v| boundary::check_version(v))
        .collect();

    // Without a base path the (#N) markers would reach the notes unlinked
    let pr_path = args
        .pr_path
        .as_ref()
        .or(config.release.pr_path.as_ref())
        .ok_or_else(|| {
            TapprError::config(
                "release notes need a pull request base path: pass --pr-path or set release.pr_path",
            )
        })?;

    let range = LogRange::for_release(&args.since_ver, &args.release_ver);
    let entries = source.log(&range)?;
    if entries.is_empty() {
        return Err(TapprError::empty_log(range.to_string()));
    }

    let ignore_deps = args
        .ignore_dependency_bot_commits
        .unwrap_or(config.release.ignore_dependency_bot_commits);
    let ignore_docs = args
        .ignore_docs_commits
        .unwrap_or(config.release.ignore_docs_commits);

    let mut renderer =
        ReleaseNotesRenderer::new(ignore_deps, ignore_docs).with_pr_path(pr_path.clone());
    let template_path = args.template.as_deref().or(config.release.template.as_deref());
    if let Some(template) = load_template(template_path)? {
        let expected = expected_placeholders(
            &release_notes::PLACEHOLDERS,
            "deps",
            "docs",
            ignore_deps,
            ignore_docs,
        );
        warnings.extend(boundary::check_template(
            template_path.unwrap_or_default(),
            &template,
            &expected,
        ));
        renderer = renderer.with_template(template);
    }

    let classifier = Classifier::new(config.classifier.dependency_bot.clone());
    let buckets = classifier.classify_all(&entries);
    debug!(range = %range, entries = buckets.len(), "rendering release notes");

    Ok((
        renderer.render(&args.since_ver, &args.release_ver, &buckets),
        entries.len(),
        warnings,
    ))
}

/// Render a changelog and write it to the requested destination
pub fn run_changelog<S: LogSource + ?Sized>(
    source: &S,
    args: &ChangelogArgs,
    config: &Config,
) -> Result<WorkflowResult> {
    let (document, entries, warnings) = render_changelog(source, args, config)?;
    finish(document, entries, warnings, &args.output)
}

/// Render release notes and write them to the requested destination
pub fn run_release<S: LogSource + ?Sized>(
    source: &S,
    args: &ReleaseArgs,
    config: &Config,
) -> Result<WorkflowResult> {
    let (document, entries, warnings) = render_release_notes(source, args, config)?;
    finish(document, entries, warnings, &args.output)
}

fn finish(
    document: String,
    entries: usize,
    warnings: Vec<BoundaryWarning>,
    output: &str,
) -> Result<WorkflowResult> {
    let target = OutputTarget::parse(output);
    target.write(&document)?;
    info!(entries, bytes = document.len(), "document written");

    Ok(WorkflowResult {
        document,
        target,
        entries,
        warnings,
    })
}

/// Build the initial context for a scenario document.
///
/// Environment indirections are resolved here, before anything executes.
pub fn prepare_context(
    document: &ScenarioDocument,
    args: &TestArgs,
    config: &Config,
) -> Result<RenderContext> {
    let mut context =
        RenderContext::from_config(&config.runner).with_values(document.context.clone());
    context.insert(OUTPUT_CONTEXT_KEY, args.output.clone());
    context.resolve_env()?;
    Ok(context)
}

/// Load a scenario document and run every scenario through the configured shell
pub fn run_tests(args: &TestArgs, config: &Config) -> Result<RunReport> {
    let document = ScenarioDocument::load(Path::new(&args.test_file))?;
    let context = prepare_context(&document, args, config)?;
    info!(
        file = %args.test_file,
        scenarios = document.tests.len(),
        "running scenarios"
    );

    let executor = ShellExecutor::new(config.runner.shell.clone());
    let mut runner = ScenarioRunner::new(executor, context).with_verbose(args.verbose);
    runner.run(&document.tests)
}
