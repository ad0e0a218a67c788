// crates/spec-converter-cli/tests/batch_pipeline.rs
// ============================================================================
// Module: Batch Pipeline Tests
// Description: Per-source and per-record outcome reporting.
// Purpose: Ensure one failing source or record never stops the batch.
// ============================================================================
//! ## Overview
//! Runs the pipeline over temp sources with a scripted completion client.

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

use std::cell::RefCell;
use std::collections::VecDeque;
use std::fs;
use std::path::PathBuf;

use serde_json::json;
use spec_converter_cli::BatchPipeline;
use spec_converter_cli::RecordStatus;
use spec_converter_cli::SourceStatus;
use spec_converter_cli::discover_sources;
use spec_converter_ingest::FragmentFileExtractor;
use spec_converter_mapper::CompletionClient;
use spec_converter_mapper::CompletionError;
use spec_converter_mapper::SchemaMapper;
use spec_converter_mapper::TargetSchema;

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Completion client replaying canned replies in order.
struct ScriptedClient {
    replies: RefCell<VecDeque<Result<String, CompletionError>>>,
    prompts: RefCell<Vec<String>>,
}

impl ScriptedClient {
    fn new(replies: Vec<Result<String, CompletionError>>) -> Self {
        Self { replies: RefCell::new(replies.into()), prompts: RefCell::new(Vec::new()) }
    }
}

impl CompletionClient for ScriptedClient {
    fn complete(&self, prompt: &str) -> Result<String, CompletionError> {
        self.prompts.borrow_mut().push(prompt.to_string());
        self.replies
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(CompletionError::Transport("script exhausted".to_string())))
    }
}

fn schema() -> TargetSchema {
    TargetSchema::from_value(json!({
        "type": "object",
        "properties": {
            "deploymentScale": {"type": "string"},
            "azimuth": {"type": "integer"},
            "band5G": {"type": "array", "items": {"type": "string"}}
        }
    }))
    .unwrap()
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[test]
fn failures_are_isolated_per_source_and_record() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    fs::write(
        dir.path().join("a_cells.json"),
        r#"[
            [["0", "deployment Scale", "antenna Azimuth"], ["1", "macro", "120"], ["2", "micro", "90"]],
            [["3", "pico", "45"], ["4", "femto", "30"]]
        ]"#,
    )?;
    fs::write(dir.path().join("b_empty.json"), "[]")?;
    fs::write(dir.path().join("c_broken.json"), "{not json")?;
    fs::write(dir.path().join("d_notes.txt"), "ignored")?;

    let extractor = FragmentFileExtractor::default();
    let sources = discover_sources(&extractor, dir.path())?;
    let names: Vec<String> = sources
        .iter()
        .filter_map(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
        .collect();
    assert_eq!(names, vec!["a_cells.json", "b_empty.json", "c_broken.json"]);

    let client = ScriptedClient::new(vec![
        Ok("```json\n{\"deploymentScale\": \"macro\", \"azimuth\": 120}\n```".to_string()),
        Ok("I could not map this row.".to_string()),
        Ok("{\"deploymentScale\": \"pico\", \"azimuth\": \"45\"}".to_string()),
        Err(CompletionError::Timeout),
    ]);
    let pipeline = BatchPipeline::new(extractor, SchemaMapper::new(&client, schema()));
    let report = pipeline.run(&sources);

    assert_eq!(report.sources.len(), 3);
    let SourceStatus::Processed { columns, records, .. } = &report.sources[0].status else {
        panic!("first source should be processed");
    };
    assert_eq!(columns, &vec!["deployment Scale".to_string(), "antenna Azimuth".to_string()]);
    assert_eq!(records.len(), 4);
    assert!(matches!(&records[0].status, RecordStatus::Mapped { configuration } if configuration.azimuth == Some(120)));
    assert!(matches!(records[1].status, RecordStatus::ParseFailed { .. }));
    let RecordStatus::Rejected { violations } = &records[2].status else {
        panic!("string azimuth should be rejected");
    };
    assert!(violations.iter().any(|v| v.starts_with("/azimuth")));
    assert!(matches!(records[3].status, RecordStatus::CompletionFailed { .. }));

    assert!(matches!(report.sources[1].status, SourceStatus::Skipped { .. }));
    assert!(matches!(report.sources[2].status, SourceStatus::Skipped { .. }));
    assert_eq!(report.mapped().len(), 1);
    assert_eq!(report.failed_records(), 3);
    assert_eq!(client.prompts.borrow().len(), 4);
    Ok(())
}

#[test]
fn report_serializes_with_status_tags() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let source = dir.path().join("cells.csv");
    fs::write(&source, "deploymentScale,azimuth\nmacro,120\n")?;
    let client = ScriptedClient::new(vec![Ok(
        "{\"deploymentScale\": \"macro\", \"azimuth\": 120, \"band5G\": [\"n78\"]}".to_string(),
    )]);
    let pipeline =
        BatchPipeline::new(FragmentFileExtractor::default(), SchemaMapper::new(&client, schema()));
    let report = pipeline.run(&[source, PathBuf::from("/nonexistent/missing.csv")]);

    let rendered = serde_json::to_value(&report)?;
    let first = &rendered["sources"][0];
    assert_eq!(first["status"], json!("processed"));
    assert_eq!(first["fallbackTables"], json!(0));
    assert_eq!(first["records"][0]["status"], json!("mapped"));
    assert_eq!(first["records"][0]["configuration"]["band5G"], json!(["n78"]));
    assert_eq!(rendered["sources"][1]["status"], json!("skipped"));
    assert!(!report.all_sources_skipped());
    Ok(())
}

#[test]
fn all_skipped_requires_at_least_one_source() {
    let client = ScriptedClient::new(Vec::new());
    let pipeline =
        BatchPipeline::new(FragmentFileExtractor::default(), SchemaMapper::new(&client, schema()));

    let report = pipeline.run(&[]);
    assert!(!report.all_sources_skipped());

    let report = pipeline.run(&[
        PathBuf::from("/nonexistent/a.csv"),
        PathBuf::from("/nonexistent/b.json"),
    ]);
    assert!(report.all_sources_skipped());
    assert!(client.prompts.borrow().is_empty());
}
