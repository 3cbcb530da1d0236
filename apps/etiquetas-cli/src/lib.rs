//! # Etiquetas CLI Library
//!
//! Price labels and barcodes for Argentine retailers (Resolución 04/2025).
//! This is the main entry point that parses arguments, loads configuration
//! and runs one command.
//!
//! ## Module Organization
//! ```text
//! etiquetas_cli/
//! ├── lib.rs          ◄─── You are here (startup & dispatch)
//! ├── cli.rs          ◄─── clap argument definitions
//! ├── config.rs       ◄─── AppConfig (TOML + environment)
//! ├── state/
//! │   ├── assets.rs   ◄─── Font + watermark, loaded once
//! │   └── logs.rs     ◄─── provincias.csv / calificaciones.csv
//! ├── commands/
//! │   ├── label.rs    ◄─── preview_label, download_label
//! │   ├── barcode.rs  ◄─── generate_barcode
//! │   ├── feedback.rs ◄─── submit_rating
//! │   └── session.rs  ◄─── FormSession, run_session
//! └── error.rs        ◄─── API error type for commands
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod state;

use std::fmt::Display;
use std::io::{BufRead, Write};
use std::process::ExitCode;

use clap::Parser;
use etiquetas_core::PROVINCES;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

pub use cli::{Cli, Command};
pub use config::AppConfig;
pub use error::{ApiError, ErrorCode};

use commands::barcode::generate_barcode;
use commands::feedback::submit_rating;
use commands::label::{download_label, DownloadOutcome};
use commands::session::{run_session, FormSession};
use state::{AssetState, LogState};

/// Exit code when the form only produced the inline warning.
const EXIT_WARNING: u8 = 2;

/// How a command ended when it did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Done,
    /// Nothing was produced; the warning was shown instead.
    Warned,
}

/// Runs the application.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Application Startup                               │
/// │                                                                         │
/// │  1. Initialize Logging ───────────────────────────────────────────────► │
/// │     • tracing-subscriber with env filter, written to stderr            │
/// │     • Default: INFO, can be overridden with RUST_LOG                    │
/// │                                                                         │
/// │  2. Parse Arguments ──────────────────────────────────────────────────► │
/// │                                                                         │
/// │  3. Load Configuration ───────────────────────────────────────────────► │
/// │     • --config, else platform config dir, then environment             │
/// │                                                                         │
/// │  4. Initialize State ─────────────────────────────────────────────────► │
/// │     • LogState: both CSV files created with headers                    │
/// │     • AssetState: empty, loaded on first render                        │
/// │                                                                         │
/// │  5. Run Command ──────────────────────────────────────────────────────► │
/// │     • exit 0 done, 2 inline warning, 1 error                           │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn run() -> ExitCode {
    init_tracing();

    let cli = Cli::parse();
    info!(command = ?cli.command, "Starting etiquetas");

    let config = match AppConfig::load(cli.config.clone()) {
        Ok(config) => config,
        Err(e) => {
            error!("Configuration failed: {}", e);
            eprintln!("{}", ApiError::from(e));
            return ExitCode::FAILURE;
        }
    };

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();

    match execute(cli.command, &config, stdin.lock(), &mut stdout) {
        Ok(Completion::Done) => ExitCode::SUCCESS,
        Ok(Completion::Warned) => ExitCode::from(EXIT_WARNING),
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}

/// Runs one command against `config`.
///
/// Results go to `output`; the session also reads its events from `input`.
pub fn execute<R: BufRead, W: Write>(
    command: Command,
    config: &AppConfig,
    input: R,
    output: &mut W,
) -> Result<Completion, ApiError> {
    match command {
        Command::Label(args) => {
            let assets = AssetState::new(config);
            let logs = LogState::open(config)?;

            match download_label(&assets, &logs, &args.to_form(), &args.output)? {
                DownloadOutcome::Warning(message) => {
                    say(output, message)?;
                    Ok(Completion::Warned)
                }
                DownloadOutcome::Saved {
                    path,
                    prices,
                    width,
                    height,
                    logged,
                } => {
                    if !logged.is_written() {
                        warn!("Province was not recorded");
                    }
                    say(output, format!("{} ({}x{})", path.display(), width, height))?;
                    say(output, format!("Precio final: ${}", prices.final_price))?;
                    say(output, format!("Sin impuestos nacionales: ${}", prices.price_excl_tax))?;
                    if let Some(per_unit) = prices.price_per_unit {
                        say(output, format!("Por unidad: ${}", per_unit))?;
                    }
                    Ok(Completion::Done)
                }
            }
        }

        Command::Barcode(args) => {
            let assets = AssetState::new(config);
            let request = args.to_request();
            let image = generate_barcode(&assets, &request)?;

            let path = args.output_path(&request);
            std::fs::write(&path, &image.png).map_err(|e| ApiError::write_failed(&path, e))?;
            info!(path = %path.display(), "Barcode saved");

            say(output, format!("{} ({}x{})", path.display(), image.width, image.height))?;
            Ok(Completion::Done)
        }

        Command::Rate { rating } => {
            let logs = LogState::open(config)?;
            let receipt = submit_rating(&logs, rating);
            if let Some(message) = receipt.message {
                say(output, message)?;
            }
            Ok(Completion::Done)
        }

        Command::Session => {
            let assets = AssetState::new(config);
            let logs = LogState::open(config)?;
            let mut session = FormSession::new(&assets, &logs);

            run_session(&mut session, input, &mut *output)
                .map_err(|e| ApiError::internal(format!("Session I/O failed: {}", e)))?;
            Ok(Completion::Done)
        }

        Command::Provinces => {
            for province in PROVINCES {
                say(output, province)?;
            }
            Ok(Completion::Done)
        }
    }
}

fn say<W: Write>(output: &mut W, line: impl Display) -> Result<(), ApiError> {
    writeln!(output, "{}", line).map_err(|e| ApiError::internal(format!("Output failed: {}", e)))
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=etiquetas_store=trace` - Show trace for one crate only
/// - Default: INFO level, debug for the etiquetas crates
///
/// Logs go to stderr so stdout stays clean for the session protocol.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,etiquetas=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;
    use etiquetas_core::INVALID_FORM_WARNING;

    fn test_config(dir: &Path) -> AppConfig {
        AppConfig {
            data_dir: dir.join("data"),
            font_path: dir.join("missing.ttf"),
            watermark_path: dir.join("missing.jpg"),
            retry_delay_ms: 0,
        }
    }

    fn run_cli(args: &[&str], config: &AppConfig, input: &str) -> (Result<Completion, ApiError>, String) {
        let cli = Cli::try_parse_from(args).unwrap();
        let mut output = Vec::new();
        let result = execute(cli.command, config, input.as_bytes(), &mut output);
        (result, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_provinces_lists_all() {
        let dir = tempfile::tempdir().unwrap();
        let (result, out) = run_cli(&["etiquetas", "provinces"], &test_config(dir.path()), "");

        assert_eq!(result.unwrap(), Completion::Done);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 24);
        assert_eq!(lines[0], "Buenos Aires");
        assert!(lines.contains(&"CABA"));
    }

    #[test]
    fn test_rate_prints_confirmation() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(dir.path());
        let (result, out) = run_cli(&["etiquetas", "rate", "--rating", "Regular"], &config, "");

        assert_eq!(result.unwrap(), Completion::Done);
        assert_eq!(out.trim(), "Calificación enviada exitosamente!");
        let csv = std::fs::read_to_string(config.data_dir.join("calificaciones.csv")).unwrap();
        assert_eq!(csv.lines().next(), Some("Fecha,Hora,Evaluación"));
        assert!(csv.trim_end().ends_with(",Regular"));
    }

    #[test]
    fn test_label_warning_and_asset_error() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(dir.path());
        let output = dir.path().join("etiqueta.png");
        let output_arg = output.to_str().unwrap();

        let (result, out) = run_cli(
            &["etiquetas", "label", "--price", "100", "--output", output_arg],
            &config,
            "",
        );
        assert_eq!(result.unwrap(), Completion::Warned);
        assert_eq!(out.trim(), INVALID_FORM_WARNING);

        let (result, _) = run_cli(
            &["etiquetas", "label", "--province", "Jujuy", "--price", "100", "--output", output_arg],
            &config,
            "",
        );
        assert_eq!(result.unwrap_err().code, ErrorCode::AssetError);
        assert!(!output.exists());
    }

    #[test]
    fn test_barcode_writes_png() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("bars.png");
        let (result, out) = run_cli(
            &["etiquetas", "barcode", "--format", "ean13", "--data", "7790123456787", "--output", output.to_str().unwrap()],
            &test_config(dir.path()),
            "",
        );

        assert_eq!(result.unwrap(), Completion::Done);
        assert!(out.contains("bars.png"));
        assert!(image::open(&output).is_ok());
    }

    #[test]
    fn test_session_runs_without_assets_until_render() {
        let dir = tempfile::tempdir().unwrap();
        let input = "{\"event\":\"rate\",\"value\":\"Excelente\"}\n";
        let (result, out) = run_cli(&["etiquetas", "session"], &test_config(dir.path()), input);

        assert_eq!(result.unwrap(), Completion::Done);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains(INVALID_FORM_WARNING));
        assert!(lines[1].contains("Calificación enviada exitosamente!"));
    }
}
