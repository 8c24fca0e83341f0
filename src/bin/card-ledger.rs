use std::fs::File;

use anyhow::{Context, Result};
use card_ledger::bin_utils::{ScriptError, Service};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // stdout carries the outcome CSV, so logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let filename = std::env::args()
        .nth(1)
        .context("Expected a file name as the first argument")?;
    let file = File::open(&filename).with_context(|| format!("Failed to open `{filename}`"))?;

    let service = Service {
        input: file,
        output: &mut std::io::stdout(),
        error_printer: Box::new(|line, err: ScriptError| {
            eprintln!("Error at line {line}: {err}")
        }),
    };
    service.run()
}
