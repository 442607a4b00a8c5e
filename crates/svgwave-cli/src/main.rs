//! svgwave CLI - Command-line interface for curve-to-wavetable conversion
//!
//! This binary provides commands for converting, validating, and inspecting
//! svgwave curve documents.

use clap::Parser;
use std::process::ExitCode;

use svgwave_cli::commands::{self, WavExport};

mod cli_args;

use cli_args::{Cli, Commands};

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Convert {
            input,
            output,
            params,
            wav,
            wav_rate,
            wav_cycles,
            json,
        } => {
            let wav = wav.map(|path| WavExport {
                path: path.into(),
                sample_rate: wav_rate,
                cycles: wav_cycles as usize,
            });
            commands::convert::run(&input, output.as_deref(), wav.as_ref(), &params, json)
        }
        Commands::Validate { input, json } => commands::validate::run(&input, json),
        Commands::Inspect {
            input,
            params,
            json,
        } => commands::inspect::run(&input, &params, json),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_cli_parses_convert_with_overrides() {
        let cli = Cli::try_parse_from([
            "svgwave",
            "convert",
            "-i",
            "curves.json",
            "-n",
            "512",
            "-d",
            "t",
            "--xorigin",
            "-10",
            "--yo",
            "2.5",
            "--skip-out-of-range",
            "--wav",
            "table.wav",
        ])
        .unwrap();

        match cli.command {
            Commands::Convert {
                input,
                output,
                params,
                wav,
                wav_rate,
                wav_cycles,
                json,
            } => {
                assert_eq!(input, "curves.json");
                assert_eq!(output, None);
                assert_eq!(params.sample_rate, Some(512));
                assert_eq!(params.delimiter.as_deref(), Some("t"));
                assert_eq!(params.x_origin, Some(-10.0));
                assert_eq!(params.y_origin, Some(2.5));
                assert!(params.skip_out_of_range);
                assert!(!params.fit_frame);
                assert_eq!(wav.as_deref(), Some("table.wav"));
                assert_eq!(wav_rate, 44_100);
                assert_eq!(wav_cycles, 1);
                assert!(!json);
            }
            _ => panic!("expected convert command"),
        }
    }

    #[test]
    fn test_cli_parses_validate() {
        let cli = Cli::try_parse_from(["svgwave", "validate", "--input", "curves.txt", "--json"])
            .unwrap();
        match cli.command {
            Commands::Validate { input, json } => {
                assert_eq!(input, "curves.txt");
                assert!(json);
            }
            _ => panic!("expected validate command"),
        }
    }

    #[test]
    fn test_cli_parses_inspect_fit_frame() {
        let cli = Cli::try_parse_from([
            "svgwave",
            "inspect",
            "-i",
            "curves.json",
            "--fit-frame",
            "--deltax",
            "256",
            "--deltay",
            "128",
        ])
        .unwrap();
        match cli.command {
            Commands::Inspect { params, .. } => {
                assert!(params.fit_frame);
                assert_eq!(params.delta_x, Some(256.0));
                assert_eq!(params.delta_y, Some(128.0));
            }
            _ => panic!("expected inspect command"),
        }
    }

    #[test]
    fn test_cli_bounds_wav_cycles() {
        let parse = |cycles: &str| {
            Cli::try_parse_from([
                "svgwave",
                "convert",
                "-i",
                "curves.json",
                "--wav",
                "table.wav",
                "--wav-cycles",
                cycles,
            ])
        };

        assert!(parse("1024").is_ok());
        assert!(parse("0").is_err());
        assert!(parse("1025").is_err());
        assert!(parse("18446744073709551615").is_err());
    }

    #[test]
    fn test_cli_requires_input() {
        assert!(Cli::try_parse_from(["svgwave", "convert"]).is_err());
    }
}
