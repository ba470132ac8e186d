mod sync;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "shifter-cli")]
#[command(about = "Normalize the Stripe product catalog into indexing nodes")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fetch the catalog from Stripe and emit normalized nodes as JSON
    Sync {
        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
        /// Write nodes to this file instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Print the effective catalog configuration (defaults applied) as YAML
    Config,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let Some(command) = cli.command else {
        println!("shifter-cli: run `shifter-cli --help` for usage");
        return Ok(());
    };

    let config = shifter_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
    tracing::debug!(env = %config.env, "configuration loaded");

    match command {
        Commands::Sync { pretty, output } => {
            sync::run_sync(&config, pretty, output.as_deref()).await?;
        }
        Commands::Config => {
            let catalog = sync::load_catalog_config(&config)?;
            print!("{}", serde_yaml::to_string(&catalog)?);
        }
    }

    Ok(())
}
