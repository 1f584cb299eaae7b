//! Binary entry point for the relabel CLI.
//!
//! ## Usage
//!
//! ```bash
//! # Swap two names and print the JSON report (file untouched)
//! relabel rename app.js --map a=b --map b=a
//!
//! # Apply a mapping file and write the result back
//! relabel rename app.js --mapping-file renames.json --write
//!
//! # List identifiers with first position and occurrence count
//! relabel idents app.js
//! ```

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};

use relabel::cli::{load_mapping, run_idents, run_rename};
use relabel_core::error::{OutputErrorCode, RelabelError};
use relabel_core::options::{DEFAULT_MAX_TEMP_ATTEMPTS, DEFAULT_TEMP_SENTINEL};
use relabel_core::output::{emit_response, ErrorResponse};
use relabel_core::{RenameOptions, VerifyMode};

// ============================================================================
// CLI Structure
// ============================================================================

/// Cycle-safe batch identifier renaming.
///
/// All output is JSON on stdout. Logs go to stderr.
#[derive(Parser, Debug)]
#[command(
    name = "relabel",
    version,
    about = "Cycle-safe batch identifier renaming"
)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,
    #[command(subcommand)]
    command: Command,
}

/// Global arguments shared by all subcommands.
#[derive(Parser, Debug)]
struct GlobalArgs {
    /// Log level for tracing output.
    #[arg(long, global = true, value_enum, default_value = "warn")]
    log_level: LogLevel,
}

/// Log level for tracing output.
#[derive(Clone, Copy, Debug, ValueEnum)]
enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    fn to_tracing_level(self) -> tracing::Level {
        match self {
            LogLevel::Trace => tracing::Level::TRACE,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Error => tracing::Level::ERROR,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Rename identifiers in a file as one all-or-nothing batch.
    Rename {
        /// Source file.
        file: PathBuf,

        /// Rename `OLD` to `NEW`. May be repeated.
        #[arg(long = "map", value_name = "OLD=NEW")]
        map: Vec<String>,

        /// JSON object file of `{"old": "new"}` entries.
        #[arg(long, value_name = "FILE")]
        mapping_file: Option<PathBuf>,

        /// Write the result back to the file instead of printing it.
        #[arg(long)]
        write: bool,

        /// Separator between a name and its counter in temporary names.
        #[arg(long, default_value = DEFAULT_TEMP_SENTINEL)]
        temp_sentinel: String,

        /// Temporary-name candidates tried per cycle member.
        #[arg(long, default_value_t = DEFAULT_MAX_TEMP_ATTEMPTS)]
        max_temp_attempts: usize,

        /// Skip re-parsing the result.
        #[arg(long)]
        no_verify: bool,
    },

    /// List distinct identifiers with first position and occurrence count.
    Idents {
        /// Source file.
        file: PathBuf,
    },
}

// ============================================================================
// Main Entry Point
// ============================================================================

fn main() -> ExitCode {
    let cli = Cli::parse();

    init_tracing(cli.global.log_level);

    match execute(cli) {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(err) => {
            let error_code = OutputErrorCode::from(&err);
            let response = ErrorResponse::from_error(&err);

            // Errors go to stdout as JSON, like successful responses
            let _ = emit_response(&response, &mut io::stdout());
            let _ = io::stdout().flush();

            ExitCode::from(error_code.code())
        }
    }
}

/// Initialize tracing subscriber.
fn init_tracing(level: LogLevel) {
    use tracing_subscriber::fmt::format::FmtSpan;
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.to_tracing_level().to_string()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_span_events(FmtSpan::CLOSE)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

/// Execute the CLI command.
fn execute(cli: Cli) -> Result<String, RelabelError> {
    match cli.command {
        Command::Rename {
            file,
            map,
            mapping_file,
            write,
            temp_sentinel,
            max_temp_attempts,
            no_verify,
        } => {
            let mapping = load_mapping(&map, mapping_file.as_deref())?;
            let options = RenameOptions::default()
                .with_temp_sentinel(temp_sentinel)
                .with_max_temp_attempts(max_temp_attempts)
                .with_verify(if no_verify {
                    VerifyMode::None
                } else {
                    VerifyMode::Syntax
                });
            run_rename(&file, &mapping, options, write)
        }
        Command::Idents { file } => run_idents(&file),
    }
}
