// crates/spec-converter-cli/src/main_tests.rs
// ============================================================================
// Module: CLI Dispatch Tests
// Description: Unit tests for argument parsing and command dispatch.
// Purpose: Drive commands end to end against temp files without a subprocess.
// Dependencies: spec-converter-cli main helpers, tempfile
// ============================================================================

//! ## Overview
//! Parses argument vectors with [`Cli`] and runs them through [`dispatch`],
//! reading configuration, templates, and scenario tables from temp dirs.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::path::Path;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use spec_converter_core::Entity;
use spec_converter_core::TestResultsSummary;
use tempfile::TempDir;

use super::Cli;
use super::Commands;
use super::MAX_DOCUMENT_BYTES;
use super::dispatch;
use super::read_document;

// ============================================================================
// SECTION: Helpers
// ============================================================================

const TEMPLATE: &str =
    include_str!("../../spec-converter-core/tests/fixtures/minimal_report.json");

const TEMPLATE_TEST_ID: &str = "ORAN240001";

/// Writes scenario tables, a coordinates side file, a target schema, a
/// template, and a config pointing at them.
fn workspace() -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let docs = dir.path().join("docs");
    fs::create_dir_all(&docs).unwrap();
    fs::write(
        docs.join("cell-scenario.csv"),
        "deployment Scale,antenna Azimuth,antenna Tilt,antenna Height,number Of Cells,Band 5G,tdd Dl Ul Ratio,total Transmit Power Into Antenna\n\
         macro,120,-6,25,3,n78,4:1,43\n",
    )
    .unwrap();
    fs::write(
        docs.join("ue-scenario.csv"),
        "number Of UE,location,target Throughput,slice,qos Id,mobility Model,mobility Speed\n\
         40,cell-edge,50Mbps,eMBB,9,random-walk,3kmph\n",
    )
    .unwrap();
    fs::write(
        docs.join("macro_cell_coordinates.json"),
        r#"{"cellsCoordinate": [{"x": 121.5654, "y": 25.033}]}"#,
    )
    .unwrap();
    fs::write(
        docs.join("json_schema.json"),
        r#"{"type": "object", "properties": {"azimuth": {"type": "integer"}}}"#,
    )
    .unwrap();
    fs::write(dir.path().join("template.json"), TEMPLATE).unwrap();

    let config = dir.path().join("converter.toml");
    fs::write(
        &config,
        format!(
            "[paths]\ndocs_dir = '{docs}'\nschema_path = '{schema}'\n",
            docs = docs.display(),
            schema = docs.join("json_schema.json").display()
        ),
    )
    .unwrap();
    (dir, config)
}

fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(std::iter::once("spec-converter").chain(args.iter().copied())).unwrap()
}

fn path_arg(path: &Path) -> String {
    path.display().to_string()
}

fn read_report(path: &Path) -> TestResultsSummary {
    TestResultsSummary::from_json_str(&fs::read_to_string(path).unwrap()).unwrap()
}

// ============================================================================
// SECTION: Parsing
// ============================================================================

#[test]
fn config_flag_is_accepted_after_the_subcommand() {
    let cli = parse(&["validate", "report.json", "--config", "custom.toml"]);
    assert_eq!(cli.config, Some(PathBuf::from("custom.toml")));
    assert!(matches!(cli.command, Some(Commands::Validate(_))));

    let cli = parse(&["--config", "custom.toml", "map", "a.json", "b.json"]);
    assert_eq!(cli.config, Some(PathBuf::from("custom.toml")));
    let Some(Commands::Map(command)) = cli.command else {
        panic!("expected map");
    };
    assert_eq!(command.sources, vec![PathBuf::from("a.json"), PathBuf::from("b.json")]);
}

#[test]
fn assemble_requires_a_template() {
    assert!(Cli::try_parse_from(["spec-converter", "assemble", "--generate-test-id"]).is_err());
    let cli = parse(&["assemble", "--template", "t.json", "--generate-test-id"]);
    let Some(Commands::Assemble(command)) = cli.command else {
        panic!("expected assemble");
    };
    assert!(command.generate_test_id);
    assert!(command.cells.is_none());
}

// ============================================================================
// SECTION: Configuration
// ============================================================================

#[test]
fn missing_explicit_config_fails_before_running_the_command() {
    let dir = tempfile::tempdir().unwrap();
    let missing = path_arg(&dir.path().join("absent.toml"));
    let err = dispatch(parse(&["--config", &missing, "validate", "report.json"])).unwrap_err();
    assert!(err.to_string().starts_with("failed to load configuration"), "{err}");
}

#[test]
fn invalid_config_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("bad.toml");
    fs::write(&config, "[completion]\nbase_url = 'ftp://example.org'\n").unwrap();
    let err = dispatch(parse(&["--config", &path_arg(&config), "validate", "r.json"])).unwrap_err();
    assert!(err.to_string().contains("completion.base_url"), "{err}");
}

#[test]
fn configured_docs_dir_supplies_default_scenario_tables() {
    let (dir, config) = workspace();
    let output = dir.path().join("report.json");
    let code = dispatch(parse(&[
        "--config",
        &path_arg(&config),
        "assemble",
        "--template",
        &path_arg(&dir.path().join("template.json")),
        "--output",
        &path_arg(&output),
    ]))
    .unwrap();
    assert_eq!(code, ExitCode::SUCCESS);

    let report = read_report(&output);
    assert_eq!(report.test_id().as_str(), TEMPLATE_TEST_ID);
    let parameters = report.test_metadata.configuration_parameters.as_deref().unwrap();
    assert_eq!(parameters[0].azimuth, Some(120));
}

// ============================================================================
// SECTION: Commands
// ============================================================================

#[test]
fn assemble_generate_test_id_replaces_the_template_id() {
    let (dir, config) = workspace();
    let output = dir.path().join("report.json");
    dispatch(parse(&[
        "assemble",
        "--config",
        &path_arg(&config),
        "--template",
        &path_arg(&dir.path().join("template.json")),
        "--generate-test-id",
        "--output",
        &path_arg(&output),
    ]))
    .unwrap();

    let report = read_report(&output);
    let test_id = report.test_id().as_str();
    assert_ne!(test_id, TEMPLATE_TEST_ID);
    assert_eq!(test_id.len(), 36);
    assert_eq!(test_id.matches('-').count(), 4);
}

#[test]
fn assemble_reports_missing_scenario_tables() {
    let (dir, config) = workspace();
    let err = dispatch(parse(&[
        "assemble",
        "--config",
        &path_arg(&config),
        "--template",
        &path_arg(&dir.path().join("template.json")),
        "--cells",
        &path_arg(&dir.path().join("nowhere.csv")),
    ]))
    .unwrap_err();
    assert!(err.to_string().starts_with("cell scenario"), "{err}");
}

#[test]
fn map_fails_when_every_source_is_skipped() {
    let (dir, config) = workspace();
    let broken = dir.path().join("broken.json");
    fs::write(&broken, "{not json").unwrap();
    let code = dispatch(parse(&[
        "map",
        "--config",
        &path_arg(&config),
        &path_arg(&broken),
        &path_arg(&dir.path().join("missing.json")),
    ]))
    .unwrap();
    assert_eq!(code, ExitCode::FAILURE);
}

#[test]
fn map_succeeds_over_an_empty_source_directory() {
    let (dir, config) = workspace();
    let empty = dir.path().join("empty");
    fs::create_dir_all(&empty).unwrap();
    let code = dispatch(parse(&["map", "--config", &path_arg(&config), &path_arg(&empty)])).unwrap();
    assert_eq!(code, ExitCode::SUCCESS);
}

#[test]
fn validate_accepts_the_template_and_rejects_edits() {
    let (dir, config) = workspace();
    let template = dir.path().join("template.json");
    let code =
        dispatch(parse(&["validate", "--config", &path_arg(&config), &path_arg(&template)]))
            .unwrap();
    assert_eq!(code, ExitCode::SUCCESS);

    let edited = dir.path().join("edited.json");
    fs::write(&edited, TEMPLATE.replace(TEMPLATE_TEST_ID, "not an id")).unwrap();
    let err = dispatch(parse(&["validate", "--config", &path_arg(&config), &path_arg(&edited)]))
        .unwrap_err();
    assert!(err.to_string().contains("is invalid"), "{err}");
}

// ============================================================================
// SECTION: Helpers Under Test
// ============================================================================

#[test]
fn oversized_documents_are_refused_before_reading() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("huge.json");
    let file = fs::File::create(&path).unwrap();
    file.set_len(MAX_DOCUMENT_BYTES + 1).unwrap();
    let err = read_document(&path).unwrap_err();
    assert!(err.to_string().contains("exceeds"), "{err}");
}
