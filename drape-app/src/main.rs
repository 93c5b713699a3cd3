use clap::Parser;
use drape_app::{cli::Cli, state::AppState, telemetry};
use drape_store::app_config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _env = dotenvy::dotenv();
    telemetry::init();

    // Parse first so --help works without a configured store
    let cli = Cli::parse();

    let config = Config::load()?;
    tracing::debug!("Loaded config: {:?}", config.storefront);

    let state = AppState::connect(&config).await?;
    cli.run(&state).await
}
