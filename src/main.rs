use std::process;

use clap::Parser;
use devident::{
    config::Config,
    core::{FieldId, HalError, Resolver},
    logger::LoggerManager,
    print_error,
};
use serde::Serialize;
use tracing::{debug, info};

/// Queries device identity fields the same way the platform management
/// stack does.
#[derive(Parser, Debug)]
#[command(name = "devident", version, about)]
struct Cli {
    /// Fields to resolve, by name (e.g. serialnumber, estbmac).
    #[arg(short, long, value_name = "FIELD", value_parser = parse_field)]
    read: Vec<FieldId>,

    /// Resolve every known field.
    #[arg(short, long, conflicts_with = "read")]
    all: bool,

    /// List the known field names and exit.
    #[arg(short, long)]
    list: bool,

    /// Emit results as a JSON object on stdout.
    #[arg(short, long)]
    json: bool,
}

fn parse_field(name: &str) -> Result<FieldId, String> {
    FieldId::from_name(name).ok_or_else(|| format!("unknown field '{name}'"))
}

/// One resolved (or failed) field in the JSON report.
#[derive(Serialize)]
struct FieldReport {
    field: FieldId,
    #[serde(skip_serializing_if = "Option::is_none")]
    value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

fn main() {
    let cli = Cli::parse();

    if cli.list {
        for field in FieldId::ALL {
            println!("{field}");
        }
        return;
    }

    let cfg = Config::new().unwrap_or_else(|e| {
        print_error!("{}", e);
        process::exit(1);
    });

    let mut logger_manager = LoggerManager::new(cfg.logger.clone()).unwrap_or_else(|e| {
        print_error!("Failed to setup Log Manager: {}", e);
        process::exit(1);
    });
    logger_manager.init().unwrap_or_else(|e| {
        print_error!("Failed to init Log Manager: {}", e);
        process::exit(1);
    });

    info!("Starting devident version {}...", env!("CARGO_PKG_VERSION"));
    debug!("Log level: {}", cfg.logger.level);

    let fields: Vec<FieldId> = if cli.all {
        FieldId::ALL.to_vec()
    } else if cli.read.is_empty() {
        print_error!("Nothing to do: pass --read <FIELD>, --all, or --list");
        process::exit(2);
    } else {
        cli.read.clone()
    };

    let mut resolver = Resolver::new(cfg.sources.clone());
    if let Err(e) = resolver.init() {
        print_error!("Initialization failed: {}", e);
        process::exit(1);
    }

    // Batch mode keeps going past individual failures: one unreadable
    // field must not hide the rest.
    let mut reports = Vec::with_capacity(fields.len());
    let mut failures = 0usize;
    for field in fields {
        match resolver.resolve(field) {
            Ok(value) => {
                if !cli.json {
                    println!("{field}: {value} (len {})", value.len());
                }
                reports.push(FieldReport {
                    field,
                    value: Some(value.into_string()),
                    error: None,
                });
            }
            Err(e) => {
                failures += 1;
                if !cli.json {
                    println!("{field}: <{e}>");
                }
                // Unsupported is an expected outcome in --all mode.
                if !matches!(e, HalError::Unsupported { .. }) {
                    debug!(%field, error = %e, "field resolution failed");
                }
                reports.push(FieldReport {
                    field,
                    value: None,
                    error: Some(e.to_string()),
                });
            }
        }
    }

    if cli.json {
        match serde_json::to_string_pretty(&reports) {
            Ok(out) => println!("{out}"),
            Err(e) => {
                print_error!("Failed to serialize report: {}", e);
                process::exit(1);
            }
        }
    }

    if let Err(e) = resolver.term() {
        print_error!("Termination failed: {}", e);
        process::exit(1);
    }

    // Per-field failures are reported inline and do not fail the run:
    // --all legitimately includes fields this platform cannot back.
    if failures > 0 {
        debug!(failures, "completed with per-field failures");
    }
}
