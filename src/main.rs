use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use vigil::commands::{init, levels, sync, watch};
use vigil::libs::messages::macros::is_debug_mode;

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help(true))]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Configuration setup")]
    Init,
    #[command(about = "Run the activity-tracking agent")]
    Watch,
    #[command(about = "Deliver unsynced records to the remote store")]
    Sync,
    #[command(about = "List catalog entries and adjust attention levels")]
    Levels(levels::LevelsArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    if is_debug_mode() {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .init();
    }

    let cli = Cli::parse();

    match cli.command {
        Commands::Init => init::cmd(),
        Commands::Watch => watch::cmd().await,
        Commands::Sync => sync::cmd().await,
        Commands::Levels(args) => levels::cmd(args).await,
    }
}
