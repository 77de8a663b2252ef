use std::path::PathBuf;

use clap::Parser;
use reconciliation_core::report;
use reconciliation_core::{ReconciliationError, ReconciliationResult, ReconciliationService};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(error) = run(cli) {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> ReconciliationResult<()> {
    for path in [&cli.source, &cli.system] {
        if !path.exists() {
            return Err(ReconciliationError::MissingInput(path.clone()));
        }
    }

    let service = ReconciliationService::new();
    let result = service.run(&cli.source, &cli.system)?;

    report::emit(&result, &cli.report_file, &cli.summary_file)?;
    println!("{}", report::summary_text(&result));
    Ok(())
}

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Reconcile a payment provider export against the internal transaction ledger."
)]
struct Cli {
    /// Source ledger CSV (payment provider export).
    source: PathBuf,

    /// System ledger CSV (internal transactions).
    system: PathBuf,

    /// Where to persist the JSON report.
    #[arg(long, default_value = "reconciliation_report.json")]
    report_file: PathBuf,

    /// Where to persist the text summary.
    #[arg(long, default_value = "summary.txt")]
    summary_file: PathBuf,
}
