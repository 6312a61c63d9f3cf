//! Operator command line for the maintenance store.
//!
//! Usage:
//!
//! ```text
//! maintlog [--config maintlog.toml] <command>
//! ```
//!
//! Commands print JSON on standard output; logs go to standard error.

use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};
use eyre::{Result, WrapErr};
use maintlog::app::{Maintlog, open_pool};
use maintlog::config::MaintlogConfig;
use maintlog::ledger::domain::FaultFilter;
use maintlog::telemetry;
use serde::Serialize;
use std::io::{self, Write};
use tokio::runtime::Builder;

#[derive(Debug, Parser)]
#[command(name = "maintlog", version, about = "Maintenance records for line sections")]
struct Cli {
    /// Configuration file; defaults to `maintlog.toml`.
    #[arg(long, global = true)]
    config: Option<Utf8PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Apply pending schema migrations.
    Migrate,
    /// Apply migrations and register the default catalog.
    Seed,
    /// Print every section with its scan URL.
    Sections {
        /// Base URL overriding the configured one.
        #[arg(long)]
        base_url: Option<String>,
    },
    /// Print the pending fault-report queue.
    Pending {
        /// Maximum number of reports.
        #[arg(long)]
        limit: Option<usize>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = match cli.config.as_deref() {
        Some(path) => MaintlogConfig::load_from(path),
        None => MaintlogConfig::load(),
    }
    .wrap_err("failed to load configuration")?;
    telemetry::init(&config.log_filter).wrap_err("failed to initialise logging")?;

    let runtime = Builder::new_multi_thread()
        .enable_all()
        .build()
        .wrap_err("failed to build async runtime")?;
    runtime.block_on(run(cli.command, &config))
}

async fn run(command: Command, config: &MaintlogConfig) -> Result<()> {
    match command {
        Command::Migrate => {
            open_pool(config).await.wrap_err("migration failed")?;
            Ok(())
        }
        Command::Seed => {
            let app = Maintlog::open(config).await?;
            let report = app.seed(config).await?;
            emit(&report)
        }
        Command::Sections { base_url } => {
            let app = Maintlog::open(config).await?;
            let base = base_url.as_deref().unwrap_or(&config.base_url);
            let targets = app
                .provisioning
                .scan_targets(base)
                .await
                .wrap_err("failed to render scan targets")?;
            emit(&targets)
        }
        Command::Pending { limit } => {
            let app = Maintlog::open(config).await?;
            let queue = app
                .ledger
                .fault_reports(FaultFilter::Pending, limit)
                .await
                .wrap_err("failed to load pending fault reports")?;
            emit(&queue)
        }
    }
}

fn emit<T: Serialize>(value: &T) -> Result<()> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value)?;
    writeln!(stdout)?;
    Ok(())
}
