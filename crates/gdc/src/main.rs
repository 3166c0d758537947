//! WIS2 Global Discovery Catalogue (GDC)
//!
//! Provisions the catalogue indices and registers discovery metadata records.

mod commands;
mod config;

use clap::Parser;
use tracing::info;

use config::{Cli, Command};

/// Initializes the tracing subscriber.
///
/// `RUST_LOG` takes precedence over `level`. Logs go to stderr so command
/// output on stdout stays machine readable.
fn init_logging(level: &str) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("gdc_persistence={},wis2_gdc={}", level, level))
    });

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    let kind = cli.backend_kind()?;
    let config = cli.backend_config();

    info!(
        backend = %kind,
        collection_index = %config.collection_index,
        "Starting WIS2 Global Discovery Catalogue"
    );

    match cli.command {
        Command::Setup => commands::setup(kind, config).await,
        Command::Register {
            file,
            environment,
            dry_run,
        } => {
            let record = commands::read_record(&file)?;
            let outcome = commands::register(kind, config, record, environment, dry_run).await?;
            let report = commands::report(&outcome, environment, dry_run);
            println!("{}", serde_json::to_string_pretty(&report)?);
            Ok(())
        }
    }
}
