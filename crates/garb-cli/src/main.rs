mod fetch;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "garb-cli")]
#[command(about = "Apparel catalog fetch and normalization CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fetch unified products for a style, with cross-vendor fallback.
    Fetch(fetch::FetchArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Fetch(args) => fetch::run_fetch(args).await,
    }
}
