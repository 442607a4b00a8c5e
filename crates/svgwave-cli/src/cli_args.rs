//! CLI argument definitions for the svgwave command-line interface.
//!
//! All `#[derive(Parser)]` and `#[derive(Subcommand)]` types are defined here,
//! keeping `main.rs` focused on dispatch logic.

use clap::{Parser, Subcommand};
use svgwave_backend_wavetable::DEFAULT_WAV_RATE;
use svgwave_cli::commands::ParamArgs;

/// Upper bound for `--wav-cycles`.
pub(crate) const MAX_WAV_CYCLES: u32 = 1024;

/// svgwave - Draw a curve, get a wavetable
#[derive(Parser)]
#[command(name = "svgwave")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Convert every curve of a document into wavetable records
    Convert {
        /// Path to the curve document (.json, .path or .txt)
        #[arg(short, long)]
        input: String,

        /// Output file for the records (default: stdout)
        #[arg(short, long)]
        output: Option<String>,

        #[command(flatten)]
        params: ParamArgs,

        /// Also export each converted curve as a 16-bit mono WAV file
        #[arg(long)]
        wav: Option<String>,

        /// Sample rate written to the WAV header
        #[arg(long, default_value_t = DEFAULT_WAV_RATE)]
        wav_rate: u32,

        /// Number of times the cycle is repeated in the WAV file (1-1024)
        #[arg(
            long,
            default_value_t = 1,
            value_parser = clap::value_parser!(u32).range(1..=MAX_WAV_CYCLES as i64)
        )]
        wav_cycles: u32,

        /// Output machine-readable JSON diagnostics (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Validate a curve document without converting it
    Validate {
        /// Path to the curve document (.json, .path or .txt)
        #[arg(short, long)]
        input: String,

        /// Output machine-readable JSON diagnostics (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Report where each curve lands in wavetable space
    Inspect {
        /// Path to the curve document (.json, .path or .txt)
        #[arg(short, long)]
        input: String,

        #[command(flatten)]
        params: ParamArgs,

        /// Output machine-readable JSON diagnostics (no colored output)
        #[arg(long)]
        json: bool,
    },
}
