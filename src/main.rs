use std::error::Error;

use answer_client::telemetry;
use tracing::{Level, debug};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Load environment variables from an optional .env file.
    let dotenv = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(telemetry::env_filter_with_level("warn", Level::INFO))
        .with(telemetry::layer())
        .with(telemetry::app_layer())
        .try_init()?;

    if let Err(e) = dotenv {
        debug!(error = %e, "no .env loaded");
    }

    assistant_console::start().await?;

    Ok(())
}
