mod bootstrap;

use billing_core::error::BillingError;
use billing_data::reader;
use billing_data::report::Report;
use clap::Parser;

/// Summarise usage and cost from a GitHub Actions billing export.
#[derive(Parser, Debug)]
#[command(
    name = "actions-billing",
    about = "Summarise usage and cost from a GitHub Actions billing export",
    version
)]
struct Cli {
    /// Billing file to parse
    filename: String,

    /// Dump the parsed data
    #[arg(long)]
    dump: bool,

    /// Logging level
    #[arg(long, default_value = "WARNING", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR", "CRITICAL"])]
    log_level: String,
}

/// Verify the source, parse it, optionally dump the report to stdout.
fn run(cli: &Cli) -> Result<(), BillingError> {
    let path = reader::verify_source(&cli.filename)?;

    tracing::info!("Parsing {}", path.display());
    let mut report = Report::new();
    report.parse(&path)?;

    if cli.dump {
        let stdout = std::io::stdout();
        report.dump(&mut stdout.lock())?;
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();

    if let Err(err) = bootstrap::setup_logging(&cli.log_level) {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }

    tracing::info!("actions-billing v{} starting", env!("CARGO_PKG_VERSION"));

    if let Err(err) = run(&cli) {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
