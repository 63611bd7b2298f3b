//! Tensile diagnostics CLI.
//!
//! Provides the `tensile` binary for looking up what the enforcement layer
//! reports for a given status code, and for inspecting the effective
//! configuration read from the environment.

use std::process;

use clap::{Parser, Subcommand};
use serde_json::json;

use tensile_enforce::config;
use tensile_enforce::{
    BlasStatus, DnnStatus, DriverStatus, EnforceConfig, OsStatus, RandStatus, Status,
};

/// Tensile enforcement diagnostics.
#[derive(Parser)]
#[command(name = "tensile", about = "Tensile enforcement diagnostics")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the failure description produced for a status code.
    Explain {
        /// Code family: condition, os, cuda, curand, cudnn, cublas.
        family: String,

        /// Raw status code. For `condition`, zero is false.
        #[arg(allow_hyphen_values = true)]
        code: i64,

        /// Extra text appended after the family phrase.
        #[arg(short, long, default_value = "")]
        message: String,

        /// Print a JSON object instead of plain text.
        #[arg(long)]
        json: bool,
    },
    /// Print the effective enforcement configuration.
    Config {
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let exit_code = match cli.command {
        Commands::Explain {
            family,
            code,
            message,
            json,
        } => run_explain(&family, code, &message, json),
        Commands::Config { json } => run_config(json),
    };
    process::exit(exit_code);
}

/// Execute the explain subcommand.
///
/// Returns exit code: 0 = success, 1 = bad family or code.
fn run_explain(family: &str, code: i64, message: &str, json: bool) -> i32 {
    let status = match parse_status(family, code) {
        Ok(status) => status,
        Err(msg) => {
            tracing::warn!(family, code, "rejected explain arguments");
            eprintln!("Error: {}", msg);
            return 1;
        }
    };
    tracing::debug!(family, code, ?status, "explaining status");

    println!("{}", explain(status, message, config::global(), json));
    0
}

fn explain(status: Status, message: &str, config: &EnforceConfig, json: bool) -> String {
    let success = status.is_success();
    let cause = status.into_cause_with(message, config);

    if json {
        let value = json!({
            "success": success,
            "kind": cause.kind(),
            "code": cause.code(),
            "message": if success { "" } else { cause.message() },
        });
        return serde_json::to_string_pretty(&value)
            .unwrap_or_else(|e| format!("{{\"error\": \"failed to serialize: {}\"}}", e));
    }

    if success {
        "success".to_string()
    } else {
        format!("{}: {}", cause.kind(), cause.message())
    }
}

/// Execute the config subcommand.
fn run_config(json: bool) -> i32 {
    let config = config::global();
    tracing::debug!(?config, "effective configuration");
    if json {
        match serde_json::to_string_pretty(config) {
            Ok(text) => println!("{}", text),
            Err(e) => {
                eprintln!("Error: failed to serialize config: {}", e);
                return 1;
            }
        }
    } else {
        println!("stack_limit = {}", config.effective_stack_limit());
        println!("capture_stacks = {}", config.capture_stacks);
        println!("legacy_rand_phrase = {}", config.legacy_rand_phrase);
    }
    0
}

/// Parse a family name and raw code into a `Status`.
fn parse_status(family: &str, code: i64) -> Result<Status, String> {
    if family.eq_ignore_ascii_case("condition") {
        return Ok(Status::Condition(code != 0));
    }

    let raw = i32::try_from(code)
        .map_err(|_| format!("code {} does not fit a 32-bit status", code))?;

    match family.to_ascii_lowercase().as_str() {
        "os" => Ok(OsStatus(raw).into()),
        "cuda" => Ok(DriverStatus(raw).into()),
        "curand" => Ok(RandStatus(raw).into()),
        "cudnn" => Ok(DnnStatus(raw).into()),
        "cublas" => Ok(BlasStatus(raw).into()),
        _ => Err(format!(
            "unknown family '{}', expected condition/os/cuda/curand/cudnn/cublas",
            family
        )),
    }
}
