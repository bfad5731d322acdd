mod cli;

use agentgate::config::{Config, ConfigError};
use clap::Parser;
use cli::{Cli, Commands, ConfigArgs};
use tracing::info;

type AnyError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), AnyError> {
    agentgate::observability::init_tracing();

    let cli = Cli::parse();

    match cli.command {
        Commands::Server(args) => {
            let mut config = load_config(&args.config)?;
            if let Some(address) = args.address {
                config.server.bind_addr = address;
            }
            agentgate::api::run(config).await?;
        }
        Commands::CheckConfig(args) => {
            let config = load_config(&args)?;
            info!(
                bind_addr = %config.server.bind_addr,
                static_dir = %config.server.static_dir.display(),
                gemini_model = %config.gemini.model,
                youtube_max_results = config.youtube.max_results,
                deepai_model = %config.deepai.model,
                request_timeout_secs = config.http.request_timeout_secs,
                "Configuration is valid"
            );
        }
    }

    Ok(())
}

fn load_config(args: &ConfigArgs) -> Result<Config, ConfigError> {
    info!("Loading configuration");
    match &args.config {
        Some(path) => Config::load_from_path(path.clone()),
        None => Config::load(),
    }
}
