// crates/spec-converter-cli/src/main.rs
// ============================================================================
// Module: Spec Converter CLI Entry Point
// Description: Command dispatcher for conversion, validation and submission.
// Purpose: Expose the converter pipeline as the `spec-converter` binary.
// Dependencies: clap, serde_json, spec-converter-*, thiserror, tracing-subscriber
// ============================================================================

//! ## Overview
//! Subcommands:
//! - `consolidate`: extract and consolidate sources, print normalized records.
//! - `map`: run the full batch pipeline, print per-source outcomes.
//! - `assemble`: build a report from a template and the scenario tables.
//! - `validate`: validate a report file.
//! - `submit` / `fetch`: exchange reports with the provisioning service.
//!
//! Results go to stdout as JSON; logs and errors go to stderr. Security
//! posture: input files are untrusted and size-capped before parsing.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::ArgAction;
use clap::Args;
use clap::CommandFactory;
use clap::Parser;
use clap::Subcommand;
use serde::Serialize;
use serde_json::Value;
use spec_converter_cli::BatchPipeline;
use spec_converter_cli::assemble_report;
use spec_converter_cli::consolidate_source;
use spec_converter_cli::discover_sources;
use spec_converter_config::ConverterConfig;
use spec_converter_core::Entity;
use spec_converter_core::TestId;
use spec_converter_core::TestResultsSummary;
use spec_converter_ingest::ConfigurationAssembler;
use spec_converter_ingest::FragmentFileExtractor;
use spec_converter_ingest::load_scenario_csv;
use spec_converter_mapper::OpenAiCompletionClient;
use spec_converter_mapper::OpenAiSettings;
use spec_converter_mapper::SchemaMapper;
use spec_converter_mapper::TargetSchema;
use spec_converter_transport::HttpReportTransport;
use spec_converter_transport::HttpTransportSettings;
use spec_converter_transport::ReportTransport;
use thiserror::Error;
use tracing::warn;
use tracing_subscriber::EnvFilter;

#[cfg(test)]
mod main_tests;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Cap on report and template files read by the CLI.
const MAX_DOCUMENT_BYTES: u64 = 16 * 1024 * 1024;

/// Filter applied when `RUST_LOG` is unset.
const DEFAULT_LOG_FILTER: &str = "info";

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(name = "spec-converter", disable_help_subcommand = true, disable_version_flag = true)]
struct Cli {
    /// Print version information and exit.
    #[arg(long = "version", action = ArgAction::SetTrue, global = true)]
    show_version: bool,
    /// Configuration file (overrides `SPEC_CONVERTER_CONFIG`).
    #[arg(long, value_name = "PATH", global = true)]
    config: Option<PathBuf>,
    /// Selected subcommand to execute.
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Supported CLI subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Extract and consolidate tables without mapping.
    Consolidate(SourcesCommand),
    /// Consolidate, map and validate every record.
    Map(SourcesCommand),
    /// Assemble a report from a template and scenario tables.
    Assemble(AssembleCommand),
    /// Validate a report file.
    Validate(ReportFileCommand),
    /// Submit a report to the provisioning service.
    Submit(ReportFileCommand),
    /// Fetch a report from the provisioning service.
    Fetch(FetchCommand),
}

/// Arguments naming source documents.
#[derive(Args, Debug)]
struct SourcesCommand {
    /// Source files or directories; defaults to `paths.docs_dir`.
    #[arg(value_name = "SOURCE")]
    sources: Vec<PathBuf>,
}

/// Arguments for `assemble`.
#[derive(Args, Debug)]
struct AssembleCommand {
    /// Report template JSON.
    #[arg(long, value_name = "PATH")]
    template: PathBuf,
    /// Cell scenario table (defaults to the configured path).
    #[arg(long, value_name = "PATH")]
    cells: Option<PathBuf>,
    /// UE scenario table (defaults to the configured path).
    #[arg(long, value_name = "PATH")]
    ues: Option<PathBuf>,
    /// Replace the template test id with a generated UUID.
    #[arg(long, action = ArgAction::SetTrue)]
    generate_test_id: bool,
    /// Write the report here instead of stdout.
    #[arg(long, value_name = "PATH")]
    output: Option<PathBuf>,
}

/// Arguments naming one report file.
#[derive(Args, Debug)]
struct ReportFileCommand {
    /// Report JSON file.
    #[arg(value_name = "PATH")]
    report: PathBuf,
}

/// Arguments for `fetch`.
#[derive(Args, Debug)]
struct FetchCommand {
    /// Test id the report is stored under.
    #[arg(value_name = "TEST_ID")]
    test_id: String,
    /// Write the report here instead of stdout.
    #[arg(long, value_name = "PATH")]
    output: Option<PathBuf>,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// CLI error wrapper carrying a user-facing message.
#[derive(Debug, Error)]
#[error("{message}")]
struct CliError {
    /// Human-readable error message.
    message: String,
}

impl CliError {
    /// Constructs a new [`CliError`].
    const fn new(message: String) -> Self {
        Self { message }
    }
}

/// Converts any displayable error into a [`CliError`] with context.
fn cli_error(context: &str, err: impl std::fmt::Display) -> CliError {
    CliError::new(format!("{context}: {err}"))
}

/// CLI result alias for fallible operations.
type CliResult<T> = Result<T, CliError>;

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// CLI entry point returning an exit code.
fn main() -> ExitCode {
    init_tracing();
    match run() {
        Ok(code) => code,
        Err(err) => emit_error(&err.to_string()),
    }
}

/// Installs the stderr log subscriber.
fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let _ =
        tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).try_init();
}

/// Parses process arguments and dispatches.
fn run() -> CliResult<ExitCode> {
    dispatch(Cli::parse())
}

/// Executes the CLI command dispatcher.
fn dispatch(cli: Cli) -> CliResult<ExitCode> {
    if cli.show_version {
        write_stdout_line(&format!("spec-converter {}", env!("CARGO_PKG_VERSION")))?;
        return Ok(ExitCode::SUCCESS);
    }
    let Some(command) = cli.command else {
        let mut command = Cli::command();
        write_stdout_line(&command.render_help().to_string())?;
        return Ok(ExitCode::SUCCESS);
    };
    let config = ConverterConfig::load_or_default(cli.config.as_deref())
        .map_err(|err| cli_error("failed to load configuration", err))?;

    match command {
        Commands::Consolidate(command) => command_consolidate(&config, &command),
        Commands::Map(command) => command_map(&config, &command),
        Commands::Assemble(command) => command_assemble(&config, &command),
        Commands::Validate(command) => command_validate(&command),
        Commands::Submit(command) => command_submit(&config, &command),
        Commands::Fetch(command) => command_fetch(&config, &command),
    }
}

// ============================================================================
// SECTION: Commands
// ============================================================================

/// Consolidated view of one source for `consolidate` output.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ConsolidatedOutput {
    /// Source path.
    source: PathBuf,
    /// Canonical columns.
    columns: Vec<String>,
    /// Normalized records.
    records: Vec<Value>,
    /// Fallback fragments, verbatim.
    fallback: Vec<Vec<Vec<String>>>,
    /// Header mismatch warnings.
    warnings: Vec<String>,
}

/// Executes `consolidate`.
fn command_consolidate(config: &ConverterConfig, command: &SourcesCommand) -> CliResult<ExitCode> {
    let extractor = FragmentFileExtractor::default();
    let sources = resolve_sources(&extractor, config, &command.sources)?;
    let mut outputs = Vec::with_capacity(sources.len());
    for source in sources {
        match consolidate_source(&extractor, &source) {
            Ok(table) => outputs.push(ConsolidatedOutput {
                columns: table.columns.clone(),
                records: table.records().iter().map(|record| record.to_json()).collect(),
                fallback: table.fallback.iter().map(|fragment| fragment.rows().to_vec()).collect(),
                warnings: table.warnings.iter().map(ToString::to_string).collect(),
                source,
            }),
            Err(err) => warn!(source = %source.display(), error = %err, "skipping source"),
        }
    }
    write_json(&outputs)?;
    Ok(ExitCode::SUCCESS)
}

/// Executes `map`.
fn command_map(config: &ConverterConfig, command: &SourcesCommand) -> CliResult<ExitCode> {
    let extractor = FragmentFileExtractor::default();
    let sources = resolve_sources(&extractor, config, &command.sources)?;
    let schema = TargetSchema::load(&config.paths.schema_path)
        .map_err(|err| cli_error("failed to load target schema", err))?;
    let completion = &config.completion;
    let api_key = completion.api_key();
    if api_key.is_none() {
        warn!(variable = %completion.api_key_env, "completion api key is not set");
    }
    let client = OpenAiCompletionClient::new(OpenAiSettings {
        base_url: completion.base_url().map_err(|err| cli_error("invalid configuration", err))?,
        model: completion.model.clone(),
        temperature: completion.temperature,
        top_p: completion.top_p,
        max_tokens: completion.max_tokens,
        timeout: completion.timeout(),
        api_key,
    })
    .map_err(|err| cli_error("failed to build completion client", err))?;
    let pipeline = BatchPipeline::new(extractor, SchemaMapper::new(client, schema));
    let report = pipeline.run(&sources);
    write_json(&report)?;
    Ok(if report.all_sources_skipped() { ExitCode::FAILURE } else { ExitCode::SUCCESS })
}

/// Executes `assemble`.
fn command_assemble(config: &ConverterConfig, command: &AssembleCommand) -> CliResult<ExitCode> {
    let template: Value = serde_json::from_str(&read_document(&command.template)?)
        .map_err(|err| cli_error("template is not valid json", err))?;
    let cells_path = command.cells.clone().unwrap_or_else(|| config.paths.cell_scenario_path());
    let ues_path = command.ues.clone().unwrap_or_else(|| config.paths.ue_scenario_path());
    let cells = load_scenario_csv(&cells_path).map_err(|err| cli_error("cell scenario", err))?;
    let ues = load_scenario_csv(&ues_path).map_err(|err| cli_error("ue scenario", err))?;
    let assembled = ConfigurationAssembler::new(&config.paths.docs_dir)
        .assemble_tables(&cells, &ues)
        .map_err(|err| cli_error("assembly failed", err))?;
    let test_id = command.generate_test_id.then(TestId::generate);
    let report = assemble_report(&template, &assembled, test_id.as_ref())
        .map_err(|err| cli_error("assembled report is invalid", err))?;
    write_report(&report, command.output.as_deref())?;
    Ok(ExitCode::SUCCESS)
}

/// Executes `validate`.
fn command_validate(command: &ReportFileCommand) -> CliResult<ExitCode> {
    let report = load_report(&command.report)?;
    write_stdout_line(&format!(
        "{} is valid: test id {}, {} test case(s)",
        command.report.display(),
        report.test_id(),
        report.case_count()
    ))?;
    Ok(ExitCode::SUCCESS)
}

/// Executes `submit`.
fn command_submit(config: &ConverterConfig, command: &ReportFileCommand) -> CliResult<ExitCode> {
    let report = load_report(&command.report)?;
    transport(config)?.submit(&report).map_err(|err| cli_error("submission failed", err))?;
    write_stdout_line(&format!("submitted {}", report.test_id()))?;
    Ok(ExitCode::SUCCESS)
}

/// Executes `fetch`.
fn command_fetch(config: &ConverterConfig, command: &FetchCommand) -> CliResult<ExitCode> {
    let test_id = TestId::parse(&command.test_id)
        .map_err(|err| cli_error(&format!("invalid test id {:?}", command.test_id), err))?;
    let report =
        transport(config)?.fetch(&test_id).map_err(|err| cli_error("retrieval failed", err))?;
    write_report(&report, command.output.as_deref())?;
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Expands source arguments, defaulting to the configured docs directory.
fn resolve_sources(
    extractor: &FragmentFileExtractor,
    config: &ConverterConfig,
    arguments: &[PathBuf],
) -> CliResult<Vec<PathBuf>> {
    let roots = if arguments.is_empty() {
        vec![config.paths.docs_dir.clone()]
    } else {
        arguments.to_vec()
    };
    let mut sources = Vec::new();
    for root in roots {
        if root.is_dir() {
            let found = discover_sources(extractor, &root)
                .map_err(|err| cli_error(&format!("failed to list {}", root.display()), err))?;
            sources.extend(found);
        } else {
            sources.push(root);
        }
    }
    Ok(sources)
}

/// Builds the report transport from configuration.
fn transport(config: &ConverterConfig) -> CliResult<HttpReportTransport> {
    let submission = &config.submission;
    HttpReportTransport::new(HttpTransportSettings {
        base_url: submission.base_url().map_err(|err| cli_error("invalid configuration", err))?,
        path_prefix: submission.path_prefix.clone(),
        timeout: submission.timeout(),
        username: submission.username.clone(),
        password: submission.password(),
    })
    .map_err(|err| cli_error("failed to build transport", err))
}

/// Reads a size-capped UTF-8 document.
fn read_document(path: &Path) -> CliResult<String> {
    let context = format!("failed to read {}", path.display());
    let size = fs::metadata(path).map_err(|err| cli_error(&context, err))?.len();
    if size > MAX_DOCUMENT_BYTES {
        return Err(CliError::new(format!("{context}: file exceeds {MAX_DOCUMENT_BYTES} bytes")));
    }
    fs::read_to_string(path).map_err(|err| cli_error(&context, err))
}

/// Reads and validates a report file.
fn load_report(path: &Path) -> CliResult<TestResultsSummary> {
    TestResultsSummary::from_json_str(&read_document(path)?)
        .map_err(|err| cli_error(&format!("{} is invalid", path.display()), err))
}

/// Writes a report to `output` or stdout.
fn write_report(report: &TestResultsSummary, output: Option<&Path>) -> CliResult<()> {
    let text = report.to_json_string().map_err(|err| cli_error("serialization failed", err))?;
    match output {
        Some(path) => fs::write(path, format!("{text}\n"))
            .map_err(|err| cli_error(&format!("failed to write {}", path.display()), err)),
        None => write_stdout_line(&text),
    }
}

/// Writes a value as pretty JSON to stdout.
fn write_json<T: Serialize>(value: &T) -> CliResult<()> {
    let text =
        serde_json::to_string_pretty(value).map_err(|err| cli_error("serialization failed", err))?;
    write_stdout_line(&text)
}

/// Writes a line to stdout.
fn write_stdout_line(message: &str) -> CliResult<()> {
    let mut stdout = std::io::stdout();
    writeln!(&mut stdout, "{message}").map_err(|err| cli_error("failed to write stdout", err))
}

/// Writes a line to stderr.
fn write_stderr_line(message: &str) -> std::io::Result<()> {
    let mut stderr = std::io::stderr();
    writeln!(&mut stderr, "{message}")
}

/// Emits an error message to stderr and returns a failure exit code.
fn emit_error(message: &str) -> ExitCode {
    let _ = write_stderr_line(message);
    ExitCode::FAILURE
}
