//! Validate command implementation
//!
//! Validates a curve document and its parameters without converting anything.

use anyhow::{Context, Result};
use colored::Colorize;
use std::path::Path;
use std::process::ExitCode;
use std::time::Instant;
use svgwave_spec::{canonical_document_hash, validate_document};

use super::json_output::{
    input_error_to_json, validation_error_to_json, validation_warning_to_json, JsonError,
    JsonWarning, ValidateOutput, ValidateResult,
};
use super::reporting::{print_validation_results, short_hash, Console};
use crate::input::{load_document, LoadResult};

/// Run the validate command
///
/// # Arguments
/// * `input_path` - Path to the curve document (.json, .path or .txt)
/// * `json_output` - Whether to output machine-readable JSON diagnostics
///
/// # Returns
/// Exit code: 0 if valid, 1 if invalid
pub fn run(input_path: &str, json_output: bool) -> Result<ExitCode> {
    if json_output {
        run_json(input_path)
    } else {
        run_human(input_path)
    }
}

/// Run validate with human-readable (colored) output
fn run_human(input_path: &str) -> Result<ExitCode> {
    let start = Instant::now();

    println!("{} {}", "Validating:".cyan().bold(), input_path);

    let LoadResult {
        document,
        source_kind,
        source_hash,
    } = load_document(Path::new(input_path))
        .with_context(|| format!("Failed to load curve document: {}", input_path))?;

    println!(
        "{} {} ({})",
        "Source:".dimmed(),
        source_kind.as_str(),
        short_hash(&source_hash)
    );

    let validation_result = validate_document(&document);
    let duration_ms = start.elapsed().as_millis() as u64;

    print_validation_results(Console::stdout(), &validation_result);

    if validation_result.is_ok() {
        let document_hash = canonical_document_hash(&document)
            .with_context(|| format!("Failed to hash curve document: {}", input_path))?;
        println!(
            "{} {}",
            "Document hash:".dimmed(),
            short_hash(&document_hash)
        );
        println!(
            "\n{} {} curve(s) valid ({}ms)",
            "SUCCESS".green().bold(),
            document.curves.len(),
            duration_ms
        );
        Ok(ExitCode::SUCCESS)
    } else {
        println!(
            "\n{} Document has {} error(s) ({}ms)",
            "FAILED".red().bold(),
            validation_result.errors.len(),
            duration_ms
        );
        Ok(ExitCode::from(1))
    }
}

/// Run validate with machine-readable JSON output
fn run_json(input_path: &str) -> Result<ExitCode> {
    let output = match load_document(Path::new(input_path)) {
        Ok(loaded) => validate_loaded(loaded),
        Err(e) => {
            let error = input_error_to_json(&e, Some(input_path));
            ValidateOutput::failure(vec![error], vec![], None, None)
        }
    };

    let json = serde_json::to_string_pretty(&output)
        .expect("ValidateOutput serialization should not fail");
    println!("{}", json);

    if output.success {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::from(1))
    }
}

fn validate_loaded(loaded: LoadResult) -> ValidateOutput {
    let LoadResult {
        document,
        source_kind,
        source_hash,
    } = loaded;

    let validation_result = validate_document(&document);
    let warnings: Vec<JsonWarning> = validation_result
        .warnings
        .iter()
        .map(validation_warning_to_json)
        .collect();

    // Hashing only fails on non-finite numbers, which validation reports.
    let document_hash = canonical_document_hash(&document).ok();

    if !validation_result.is_ok() {
        let errors: Vec<JsonError> = validation_result
            .errors
            .iter()
            .map(validation_error_to_json)
            .collect();
        return ValidateOutput::failure(errors, warnings, document_hash, Some(source_hash));
    }

    let result = ValidateResult {
        source_kind: source_kind.as_str().to_string(),
        curve_count: document.curves.len(),
        sample_rate: document.params.sample_rate,
        oversample: document.params.oversample,
    };
    ValidateOutput::success(
        result,
        document_hash.unwrap_or_else(|| "unknown".to_string()),
        source_hash,
        warnings,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use svgwave_spec::{CurveDocument, CurveEntry};

    fn write_document(dir: &tempfile::TempDir, filename: &str, doc: &CurveDocument) -> String {
        let path = dir.path().join(filename);
        std::fs::write(&path, doc.to_json_pretty().unwrap()).unwrap();
        path.to_str().unwrap().to_string()
    }

    #[test]
    fn validate_accepts_valid_document() {
        let tmp = tempfile::tempdir().unwrap();
        let doc = CurveDocument::builder()
            .curve(CurveEntry::new("M0 0 L256 256").with_id("saw"))
            .build();
        let path = write_document(&tmp, "curves.json", &doc);

        assert_eq!(run(&path, false).unwrap(), ExitCode::SUCCESS);
        assert_eq!(run(&path, true).unwrap(), ExitCode::SUCCESS);
    }

    #[test]
    fn validate_rejects_bad_ids() {
        let tmp = tempfile::tempdir().unwrap();
        let doc = CurveDocument::builder()
            .curve(CurveEntry::new("M0 0 L256 256").with_id("Not Valid"))
            .build();
        let path = write_document(&tmp, "curves.json", &doc);

        assert_eq!(run(&path, false).unwrap(), ExitCode::from(1));
        assert_eq!(run(&path, true).unwrap(), ExitCode::from(1));
    }

    #[test]
    fn validate_json_output_reports_errors() {
        let tmp = tempfile::tempdir().unwrap();
        let doc = CurveDocument::builder()
            .curve(CurveEntry::new("").with_id("empty"))
            .build();
        let path = write_document(&tmp, "curves.json", &doc);

        let loaded = load_document(Path::new(&path)).unwrap();
        let output = validate_loaded(loaded);
        assert!(!output.success);
        assert!(output.errors.iter().any(|e| e.code == "E005"));
        assert!(output.document_hash.is_some());
    }

    #[test]
    fn validate_json_output_reports_result() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("curves.txt");
        std::fs::write(&path, "M0 0 L256 256\n").unwrap();

        let loaded = load_document(&path).unwrap();
        let output = validate_loaded(loaded);
        assert!(output.success);
        let result = output.result.unwrap();
        assert_eq!(result.source_kind, "path_list");
        assert_eq!(result.curve_count, 1);
        assert_eq!(result.sample_rate, 256);
    }

    #[test]
    fn validate_missing_file() {
        assert!(run("/nonexistent/curves.json", false).is_err());
        assert_eq!(
            run("/nonexistent/curves.json", true).unwrap(),
            ExitCode::from(1)
        );
    }
}
