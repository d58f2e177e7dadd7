use anyhow::Context;
use car_api::config::Config;
use car_api::constants::API_NAME;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_level.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("{} Starting Car API server on port {}", API_NAME, config.server_port);

    car_api::server::run(config)
        .await
        .context("Car API server failed")
}
