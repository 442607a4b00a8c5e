//! Inspect command implementation
//!
//! Samples and bins each curve without normalizing, and reports where the
//! curve lands in wavetable space. Useful for finding the origin and scale
//! that make a drawing cover every index.

use anyhow::{Context, Result};
use colored::Colorize;
use std::path::Path;
use std::process::ExitCode;
use svgwave_backend_wavetable::{
    curve_transform, inspect_curve, CurveInspection, PathCurve, WavetableResult,
};
use svgwave_spec::{CurveDocument, CurveEntry};

use super::json_output::{
    input_error_to_json, validation_error_to_json, wavetable_error_to_json, InspectOutput,
    InspectReport, InspectStats,
};
use super::params::ParamArgs;
use super::reporting::{print_validation_results, Console};
use crate::input::load_document;

/// Run the inspect command
///
/// # Arguments
/// * `input_path` - Path to the curve document (.json, .path or .txt)
/// * `params` - Parameter overrides from the command line
/// * `json_output` - Whether to output machine-readable JSON diagnostics
///
/// # Returns
/// Exit code: 0 if the document is valid and at least one curve could be
/// sampled, 1 otherwise
pub fn run(input_path: &str, params: &ParamArgs, json_output: bool) -> Result<ExitCode> {
    if json_output {
        run_json(input_path, params)
    } else {
        run_human(input_path, params)
    }
}

/// Inspects every curve, returning `(position, entry, inspection)` in document order.
fn inspect_document<'a>(
    document: &'a CurveDocument,
    params: &ParamArgs,
) -> Vec<(usize, &'a CurveEntry, WavetableResult<CurveInspection>)> {
    let options = params.options();
    document
        .curves
        .iter()
        .enumerate()
        .map(|(position, entry)| {
            let transform = curve_transform(entry, &document.params, &options);
            let inspection = PathCurve::from_svg(&entry.d)
                .and_then(|curve| inspect_curve(&curve, &document.params, &transform));
            (position, entry, inspection)
        })
        .collect()
}

/// Run inspect with human-readable (colored) output
fn run_human(input_path: &str, params: &ParamArgs) -> Result<ExitCode> {
    println!("{} {}", "Inspecting:".cyan().bold(), input_path);

    let document = load_document(Path::new(input_path))
        .with_context(|| format!("Failed to load curve document: {}", input_path))?
        .document;

    let (document, validation) = params.prepare(document);
    print_validation_results(Console::stdout(), &validation);
    if !validation.is_ok() {
        println!(
            "\n{} Document has {} error(s)",
            "FAILED".red().bold(),
            validation.errors.len()
        );
        return Ok(ExitCode::from(1));
    }

    let mut inspected = 0;
    for (position, entry, inspection) in inspect_document(&document, params) {
        println!(
            "\n{} {} ({})",
            "Curve".bold(),
            position,
            entry.label(position)
        );

        match inspection {
            Ok(inspection) => {
                inspected += 1;
                print_inspection(&inspection);
            }
            Err(e) => println!("  {} {}", "x".red(), e),
        }
    }

    if inspected > 0 {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::from(1))
    }
}

fn format_range(range: Option<(f64, f64)>) -> String {
    match range {
        Some((lo, hi)) => format!("[{:.3}, {:.3}]", lo, hi),
        None => "-".to_string(),
    }
}

fn print_inspection(inspection: &CurveInspection) {
    println!(
        "  {:<16} {}",
        "Dense points:".dimmed(),
        inspection.points
    );
    println!(
        "  {:<16} {}",
        "x extent:".dimmed(),
        format_range(inspection.x_extent)
    );
    println!(
        "  {:<16} {}",
        "y extent:".dimmed(),
        format_range(inspection.y_extent)
    );

    let coverage = format!("{}/{}", inspection.filled, inspection.sample_rate);
    let coverage = if inspection.is_fully_covered() {
        coverage.green()
    } else {
        coverage.yellow()
    };
    println!("  {:<16} {}", "Filled:".dimmed(), coverage);

    if let Some(index) = inspection.first_unfilled {
        println!(
            "  {} index {} receives no point",
            "!".yellow(),
            index
        );
    }
    if inspection.out_of_range > 0 {
        println!(
            "  {} {} point(s) outside [0, {})",
            "!".yellow(),
            inspection.out_of_range,
            inspection.sample_rate
        );
    }
    if let Some(distance) = inspection.max_distance {
        println!("  {:<16} {:.4}", "Max distance:".dimmed(), distance);
    }
    println!(
        "  {:<16} {}",
        "Bucket y range:".dimmed(),
        format_range(inspection.bucket_y_range)
    );
}

/// Run inspect with machine-readable JSON output
fn run_json(input_path: &str, params: &ParamArgs) -> Result<ExitCode> {
    let output = match load_document(Path::new(input_path)) {
        Ok(loaded) => inspect_output(loaded.document, params),
        Err(e) => InspectOutput {
            success: false,
            errors: vec![input_error_to_json(&e, Some(input_path))],
            curves: Vec::new(),
        },
    };

    let json = serde_json::to_string_pretty(&output)
        .expect("InspectOutput serialization should not fail");
    println!("{}", json);

    if output.success {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::from(1))
    }
}

fn inspect_output(document: CurveDocument, params: &ParamArgs) -> InspectOutput {
    let (document, validation) = params.prepare(document);
    if !validation.is_ok() {
        return InspectOutput {
            success: false,
            errors: validation
                .errors
                .iter()
                .map(validation_error_to_json)
                .collect(),
            curves: Vec::new(),
        };
    }

    let curves: Vec<InspectReport> = inspect_document(&document, params)
        .into_iter()
        .map(|(position, entry, inspection)| match inspection {
            Ok(ref inspection) => InspectReport {
                position,
                id: entry.id.clone(),
                stats: Some(InspectStats::from(inspection)),
                error: None,
            },
            Err(ref e) => InspectReport {
                position,
                id: entry.id.clone(),
                stats: None,
                error: Some(wavetable_error_to_json(e, position)),
            },
        })
        .collect();

    InspectOutput {
        success: curves.iter().any(|c| c.stats.is_some()),
        errors: Vec::new(),
        curves,
    }
}
