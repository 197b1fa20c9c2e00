//! Pond analyzer CLI - pond suitability predictions from the command line.

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "pond-cli",
    version,
    about = "Pond suitability analysis toolkit"
)]
struct Cli {
    /// SQLite file holding prediction history and settings
    #[arg(
        long,
        global = true,
        env = "POND_ANALYZER_STORE",
        default_value = "pond-analyzer.db"
    )]
    store: PathBuf,

    #[command(subcommand)]
    command: pond_cmd::Command,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    log::debug!("Using store {}", cli.store.display());
    pond_cmd::run(&cli.store, cli.command).await
}
