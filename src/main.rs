use anyhow::Result;
use language_detection::{config, dataset};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored when variables come from the platform)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("language_detection=info".parse()?),
        )
        .init();

    info!("Starting language detection");

    // Load configuration from environment
    let config = config::Config::from_env()?;
    info!(
        "Reading {}, writing {}",
        config.input_path.display(),
        config.output_path.display()
    );

    let summary = dataset::run(&config).await?;

    info!(
        "✓ Detected languages for {} rows in {} chunks",
        summary.rows, summary.chunks
    );
    info!("Detection report: {}", serde_json::to_string(&summary.report)?);
    Ok(())
}
