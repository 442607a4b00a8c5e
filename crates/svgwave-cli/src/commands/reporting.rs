//! Human-readable console reporting shared by the commands.

use colored::Colorize;
use std::fmt::Display;
use svgwave_spec::ValidationResult;

/// Where status lines go.
///
/// Status moves to stderr whenever records are streamed to stdout, so the
/// record stream can be piped without filtering.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Console {
    to_stderr: bool,
}

impl Console {
    pub(crate) fn stdout() -> Self {
        Self { to_stderr: false }
    }

    pub(crate) fn stderr() -> Self {
        Self { to_stderr: true }
    }

    pub(crate) fn line(&self, message: impl Display) {
        if self.to_stderr {
            eprintln!("{}", message);
        } else {
            println!("{}", message);
        }
    }
}

/// Print validation errors and warnings.
pub(crate) fn print_validation_results(console: Console, result: &ValidationResult) {
    if !result.errors.is_empty() {
        console.line(format!("\n{}", "Errors:".red().bold()));
        for error in &result.errors {
            let path_info = error
                .path
                .as_ref()
                .map(|p| format!(" at {}", p))
                .unwrap_or_default();
            console.line(format!(
                "  {} [{}]{}: {}",
                "x".red(),
                error.code.to_string().red(),
                path_info.dimmed(),
                error.message
            ));
        }
    }

    if !result.warnings.is_empty() {
        console.line(format!("\n{}", "Warnings:".yellow().bold()));
        for warning in &result.warnings {
            let path_info = warning
                .path
                .as_ref()
                .map(|p| format!(" at {}", p))
                .unwrap_or_default();
            console.line(format!(
                "  {} [{}]{}: {}",
                "!".yellow(),
                warning.code.to_string().yellow(),
                path_info.dimmed(),
                warning.message
            ));
        }
    }
}

/// Shortens a hash for display.
pub(crate) fn short_hash(hash: &str) -> &str {
    &hash[..hash.len().min(16)]
}
