use anyhow::{Context, Result};
use clap::Parser;
use recmask_cli::{process_file, OUTPUT_FILE};
use recmask_core::Redactor;
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Flag and redact PII in a CSV of JSON records.
#[derive(Debug, Parser)]
#[command(name = "recmask", version)]
struct Args {
    /// Input CSV with `record_id` and `data_json` (or `data`) columns
    input: PathBuf,
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn,recmask_cli=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let output = Path::new(OUTPUT_FILE);
    process_file(&Redactor::default(), &args.input, output)
        .with_context(|| format!("failed to redact {}", args.input.display()))?;

    println!("Wrote: {}", output.display());
    Ok(())
}
