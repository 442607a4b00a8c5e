//! Convert command implementation
//!
//! Converts every curve of a document into a wavetable and writes the
//! records, plus optional WAV files. A failing curve is reported and skipped;
//! the command only fails when no curve converted.

use anyhow::{Context, Result};
use colored::Colorize;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;
use svgwave_backend_wavetable::{
    generate_document, DocumentResult, WavResult, WavetableResult, DEFAULT_WAV_RATE,
};
use svgwave_spec::canonical_document_hash;

use super::json_output::{
    error_codes, input_error_to_json, validation_error_to_json, validation_warning_to_json,
    wavetable_error_to_json, ConvertOutput, CurveReport, JsonError, JsonWarning, WavFile,
};
use super::params::ParamArgs;
use super::reporting::{print_validation_results, short_hash, Console};
use crate::input::{load_document, LoadResult};

/// Where and how to export WAV files.
#[derive(Debug, Clone)]
pub struct WavExport {
    /// Output path. With several converted curves, `_<position>` is added to the stem.
    pub path: PathBuf,
    /// Header sample rate in Hz.
    pub sample_rate: u32,
    /// Number of times the cycle is repeated.
    pub cycles: usize,
}

impl WavExport {
    /// Creates an export of one cycle at the default rate.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            sample_rate: DEFAULT_WAV_RATE,
            cycles: 1,
        }
    }
}

/// Run the convert command
///
/// # Arguments
/// * `input_path` - Path to the curve document (.json, .path or .txt)
/// * `output_path` - Record file (default: stdout)
/// * `wav` - Optional WAV export
/// * `params` - Parameter overrides from the command line
/// * `json_output` - Whether to output machine-readable JSON diagnostics
///
/// # Returns
/// Exit code: 0 if at least one curve converted, 1 otherwise
pub fn run(
    input_path: &str,
    output_path: Option<&str>,
    wav: Option<&WavExport>,
    params: &ParamArgs,
    json_output: bool,
) -> Result<ExitCode> {
    if json_output {
        run_json(input_path, output_path, wav, params)
    } else {
        run_human(input_path, output_path, wav, params)
    }
}

/// Run convert with human-readable (colored) output
fn run_human(
    input_path: &str,
    output_path: Option<&str>,
    wav: Option<&WavExport>,
    params: &ParamArgs,
) -> Result<ExitCode> {
    let start = Instant::now();
    let console = if output_path.is_some() {
        Console::stdout()
    } else {
        Console::stderr()
    };

    console.line(format!("{} {}", "Converting:".cyan().bold(), input_path));

    let LoadResult {
        document,
        source_kind,
        source_hash,
    } = load_document(Path::new(input_path))
        .with_context(|| format!("Failed to load curve document: {}", input_path))?;

    console.line(format!(
        "{} {} ({})",
        "Source:".dimmed(),
        source_kind.as_str(),
        short_hash(&source_hash)
    ));

    let (document, validation) = params.prepare(document);
    print_validation_results(console, &validation);
    if !validation.is_ok() {
        console.line(format!(
            "\n{} Document has {} error(s)",
            "FAILED".red().bold(),
            validation.errors.len()
        ));
        return Ok(ExitCode::from(1));
    }

    console.line(format!(
        "{} {} samples, {} dense points, delimiter {:?}",
        "Params:".dimmed(),
        document.params.sample_rate,
        document.params.oversample,
        document.params.delimiter.as_str()
    ));

    let result = generate_document(&document, &params.options());

    for outcome in &result.outcomes {
        match outcome.result {
            Ok(ref wavetable) => {
                let skipped = if wavetable.skipped > 0 {
                    format!(", {} point(s) skipped", wavetable.skipped)
                } else {
                    String::new()
                };
                console.line(format!(
                    "  {} curve {} ({}): {} samples, y in [{}, {}]{}",
                    "ok".green(),
                    outcome.position,
                    outcome.label,
                    wavetable.len(),
                    wavetable.y_min,
                    wavetable.y_max,
                    skipped.dimmed()
                ));
            }
            Err(_) => {
                if let Some(failure) = outcome.failure() {
                    console.line(format!("  {} {}", "x".red(), failure));
                }
            }
        }
    }

    let total = result.outcomes.len();
    let converted = result.success_count();
    if converted == 0 {
        console.line(format!(
            "\n{} None of {} curve(s) converted",
            "FAILED".red().bold(),
            total
        ));
        return Ok(ExitCode::from(1));
    }

    match output_path {
        Some(path) => {
            write_records_file(&result, Path::new(path))
                .with_context(|| format!("Failed to write records: {}", path))?;
            console.line(format!("{} {}", "Records written to:".dimmed(), path));
        }
        None => {
            let stdout = io::stdout();
            let mut lock = stdout.lock();
            result
                .write_records(&mut lock)
                .context("Failed to write records to stdout")?;
            lock.flush().context("Failed to write records to stdout")?;
        }
    }

    if let Some(export) = wav {
        for file in export_wavs(&result, export)? {
            console.line(format!(
                "{} {} ({} samples, pcm {})",
                "WAV written to:".dimmed(),
                file.path,
                file.num_samples,
                short_hash(&file.pcm_hash)
            ));
        }
    }

    console.line(format!(
        "\n{} {}/{} curve(s) converted ({}ms)",
        "SUCCESS".green().bold(),
        converted,
        total,
        start.elapsed().as_millis()
    ));
    Ok(ExitCode::SUCCESS)
}

/// Run convert with machine-readable JSON output
fn run_json(
    input_path: &str,
    output_path: Option<&str>,
    wav: Option<&WavExport>,
    params: &ParamArgs,
) -> Result<ExitCode> {
    let output = match load_document(Path::new(input_path)) {
        Ok(loaded) => convert_loaded(loaded, output_path, wav, params),
        Err(e) => {
            let error = input_error_to_json(&e, Some(input_path));
            ConvertOutput::failure(vec![error], vec![], None, None)
        }
    };

    let json = serde_json::to_string_pretty(&output)
        .expect("ConvertOutput serialization should not fail");
    println!("{}", json);

    if output.success {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::from(1))
    }
}

fn convert_loaded(
    loaded: LoadResult,
    output_path: Option<&str>,
    wav: Option<&WavExport>,
    params: &ParamArgs,
) -> ConvertOutput {
    let LoadResult {
        document,
        source_hash,
        ..
    } = loaded;

    let (document, validation) = params.prepare(document);
    let warnings: Vec<JsonWarning> = validation
        .warnings
        .iter()
        .map(validation_warning_to_json)
        .collect();
    let document_hash = canonical_document_hash(&document).ok();

    if !validation.is_ok() {
        let errors: Vec<JsonError> = validation
            .errors
            .iter()
            .map(validation_error_to_json)
            .collect();
        return ConvertOutput::failure(errors, warnings, document_hash, Some(source_hash));
    }

    let result = generate_document(&document, &params.options());
    let curves = curve_reports(&result);

    let mut errors = Vec::new();
    let mut output = None;
    let mut records = None;
    let mut wav_files = Vec::new();

    if !result.any_succeeded() {
        errors.push(JsonError::new(
            error_codes::NO_CURVE_CONVERTED,
            format!("none of {} curve(s) converted", result.outcomes.len()),
        ));
    } else {
        match output_path {
            Some(path) => match write_records_file(&result, Path::new(path)) {
                Ok(()) => output = Some(path.to_string()),
                Err(e) => errors.push(
                    JsonError::new(error_codes::OUTPUT_WRITE, e.to_string()).with_file(path),
                ),
            },
            None => records = Some(result.records()),
        }

        if let Some(export) = wav {
            match export_wavs(&result, export) {
                Ok(files) => wav_files = files,
                Err(e) => errors.push(JsonError::new(error_codes::OUTPUT_WRITE, format!("{:#}", e))),
            }
        }
    }

    ConvertOutput {
        success: errors.is_empty(),
        errors,
        warnings,
        curves,
        output,
        records,
        wav_files,
        document_hash,
        source_hash: Some(source_hash),
    }
}

fn curve_reports(result: &DocumentResult) -> Vec<CurveReport> {
    result
        .outcomes
        .iter()
        .map(|outcome| match outcome.result {
            Ok(ref wavetable) => CurveReport {
                position: outcome.position,
                id: outcome.id.clone(),
                success: true,
                samples: Some(wavetable.len()),
                y_min: Some(wavetable.y_min),
                y_max: Some(wavetable.y_max),
                skipped: Some(wavetable.skipped),
                error: None,
            },
            Err(ref e) => CurveReport {
                position: outcome.position,
                id: outcome.id.clone(),
                success: false,
                samples: None,
                y_min: None,
                y_max: None,
                skipped: None,
                error: Some(wavetable_error_to_json(e, outcome.position)),
            },
        })
        .collect()
}

fn write_records_file(result: &DocumentResult, path: &Path) -> WavetableResult<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    result.write_records(&mut writer)?;
    writer.flush()?;
    Ok(())
}

/// Writes one WAV file per converted curve.
fn export_wavs(result: &DocumentResult, export: &WavExport) -> Result<Vec<WavFile>> {
    let suffixed = result.success_count() > 1;
    let mut files = Vec::new();

    for (outcome, wavetable) in result.succeeded() {
        let path = if suffixed {
            wav_path_for(&export.path, outcome.position)
        } else {
            export.path.clone()
        };

        let wav = WavResult::from_wavetable(&wavetable.samples, export.sample_rate, export.cycles)
            .with_context(|| format!("Failed to encode WAV file: {}", path.display()))?;
        std::fs::write(&path, &wav.wav_data)
            .with_context(|| format!("Failed to write WAV file: {}", path.display()))?;

        files.push(WavFile {
            position: outcome.position,
            path: path.display().to_string(),
            pcm_hash: wav.pcm_hash,
            num_samples: wav.num_samples,
        });
    }

    Ok(files)
}

/// Inserts `_<position>` before the extension of `base`.
fn wav_path_for(base: &Path, position: usize) -> PathBuf {
    let stem = base
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = match base.extension() {
        Some(ext) => format!("{}_{}.{}", stem, position, ext.to_string_lossy()),
        None => format!("{}_{}", stem, position),
    };
    base.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use svgwave_spec::{CurveDocument, CurveEntry, WavetableParams};

    fn write_document(dir: &tempfile::TempDir, doc: &CurveDocument) -> String {
        let path = dir.path().join("curves.json");
        std::fs::write(&path, doc.to_json_pretty().unwrap()).unwrap();
        path.to_str().unwrap().to_string()
    }

    fn small_params() -> WavetableParams {
        WavetableParams {
            sample_rate: 8,
            oversample: 800,
            ..WavetableParams::default()
        }
    }

    #[test]
    fn test_wav_path_for() {
        assert_eq!(
            wav_path_for(Path::new("out/table.wav"), 2),
            PathBuf::from("out/table_2.wav")
        );
        assert_eq!(wav_path_for(Path::new("table"), 0), PathBuf::from("table_0"));
    }

    #[test]
    fn convert_writes_records_file() {
        let tmp = tempfile::tempdir().unwrap();
        let doc = CurveDocument::builder()
            .params(small_params())
            .curve(CurveEntry::new("M0 0 L8 8").with_id("saw"))
            .build();
        let input = write_document(&tmp, &doc);
        let output = tmp.path().join("saw.txt");

        let code = run(
            &input,
            Some(output.to_str().unwrap()),
            None,
            &ParamArgs::default(),
            false,
        )
        .unwrap();
        assert_eq!(code, ExitCode::SUCCESS);

        let text = std::fs::read_to_string(&output).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 9);
        assert_eq!(lines[0], "0;32767");
        assert_eq!(lines[7], "7;-32767");
        assert_eq!(lines[8], "");
    }

    #[test]
    fn convert_flags_override_document_params() {
        let tmp = tempfile::tempdir().unwrap();
        let doc = CurveDocument::builder()
            .curve(CurveEntry::new("M0 0 L4 4"))
            .build();
        let input = write_document(&tmp, &doc);
        let output = tmp.path().join("out.txt");

        let params = ParamArgs {
            sample_rate: Some(4),
            oversample: Some(400),
            delimiter: Some("t".to_string()),
            ..ParamArgs::default()
        };
        let code = run(&input, Some(output.to_str().unwrap()), None, &params, false).unwrap();
        assert_eq!(code, ExitCode::SUCCESS);

        let text = std::fs::read_to_string(&output).unwrap();
        assert_eq!(text.lines().next(), Some("0\t32767"));
    }

    #[test]
    fn convert_fails_only_when_no_curve_converts() {
        let tmp = tempfile::tempdir().unwrap();
        let doc = CurveDocument::builder()
            .params(small_params())
            .curve(CurveEntry::new("M0 5 L8 5").with_id("flat"))
            .build();
        let input = write_document(&tmp, &doc);
        let output = tmp.path().join("out.txt");

        let code = run(
            &input,
            Some(output.to_str().unwrap()),
            None,
            &ParamArgs::default(),
            false,
        )
        .unwrap();
        assert_eq!(code, ExitCode::from(1));
        assert!(!output.exists());
    }

    #[test]
    fn convert_json_reports_each_curve() {
        let tmp = tempfile::tempdir().unwrap();
        let doc = CurveDocument::builder()
            .params(small_params())
            .curve(CurveEntry::new("M0 0 L8 8").with_id("saw"))
            .curve(CurveEntry::new("M0 5 L8 5").with_id("flat"))
            .build();
        let input = write_document(&tmp, &doc);

        let loaded = load_document(Path::new(&input)).unwrap();
        let output = convert_loaded(loaded, None, None, &ParamArgs::default());

        assert!(output.success);
        assert_eq!(output.curves.len(), 2);
        assert!(output.curves[0].success);
        assert_eq!(output.curves[0].samples, Some(8));
        let error = output.curves[1].error.as_ref().unwrap();
        assert_eq!(error.code, "WAVE_002");
        assert_eq!(output.records.as_ref().map(Vec::len), Some(9));
        assert_eq!(output.document_hash.as_ref().map(String::len), Some(64));
    }

    #[test]
    fn convert_json_rejects_invalid_overrides() {
        let tmp = tempfile::tempdir().unwrap();
        let doc = CurveDocument::builder()
            .curve(CurveEntry::new("M0 0 L8 8"))
            .build();
        let input = write_document(&tmp, &doc);

        let params = ParamArgs {
            sample_rate: Some(1),
            ..ParamArgs::default()
        };
        let loaded = load_document(Path::new(&input)).unwrap();
        let output = convert_loaded(loaded, None, None, &params);

        assert!(!output.success);
        assert!(output.curves.is_empty());
        assert_eq!(output.errors[0].path.as_deref(), Some("params.sample_rate"));
    }

    #[test]
    fn convert_exports_one_wav_per_curve() {
        let tmp = tempfile::tempdir().unwrap();
        let doc = CurveDocument::builder()
            .params(small_params())
            .curve(CurveEntry::new("M0 0 L8 8"))
            .curve(CurveEntry::new("M0 8 L8 0"))
            .build();
        let input = write_document(&tmp, &doc);
        let export = WavExport {
            cycles: 2,
            ..WavExport::new(tmp.path().join("table.wav"))
        };

        let loaded = load_document(Path::new(&input)).unwrap();
        let output = convert_loaded(loaded, None, Some(&export), &ParamArgs::default());

        assert!(output.success);
        assert_eq!(output.wav_files.len(), 2);
        assert!(tmp.path().join("table_0.wav").exists());
        assert!(tmp.path().join("table_1.wav").exists());
        assert_eq!(output.wav_files[0].num_samples, 16);
        assert_ne!(output.wav_files[0].pcm_hash, output.wav_files[1].pcm_hash);
    }

    #[test]
    fn convert_missing_file_json() {
        let code = run(
            "/nonexistent/curves.json",
            None,
            None,
            &ParamArgs::default(),
            true,
        )
        .unwrap();
        assert_eq!(code, ExitCode::from(1));
    }
}
