use clap::{Parser, Subcommand};

mod firms;
mod output;
mod practitioners;

#[derive(Debug, Parser)]
#[command(name = "adgmreg-cli")]
#[command(about = "ADGM public-register harvester")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Harvest the financial-services (FSRA) firms register.
    Firms,
    /// Harvest the insolvency practitioners register.
    Practitioners,
    /// Harvest both registers, firms first.
    All,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let config = adgmreg_core::load_app_config()?;

    match cli.command {
        Commands::Firms => firms::run(&config).await,
        Commands::Practitioners => practitioners::run(&config).await,
        Commands::All => {
            firms::run(&config).await?;
            practitioners::run(&config).await
        }
    }
}
