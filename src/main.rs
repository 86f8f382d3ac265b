use anyhow::Result;
use gemini_relay_rs::clap::Args;
use gemini_relay_rs::config::{API_KEY_ENV, ApiKey, Config};
use gemini_relay_rs::server::Server;
use tracing::{Level, info, warn};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args = Args::parse_args();
    if args.execute_command() {
        return Ok(());
    }

    args.validate_config_path()?;
    let config = Config::from_file(&args.config)?;

    // Resolve the credential once, at startup. A missing key does not
    // stop the server; relay requests answer 500 until it is configured.
    let api_key = ApiKey::from_env();
    match &api_key {
        Some(key) => info!("Gemini API key loaded from {}: {}", API_KEY_ENV, key.masked()),
        None => warn!(
            "{} is not set; /api/generate will answer 500 until it is configured",
            API_KEY_ENV
        ),
    }

    let server = Server::new(&config, api_key);
    info!("Starting gemini-relay-rs - Gemini prompt relay on {}", server.addr);

    let listener = tokio::net::TcpListener::bind(&server.addr).await?;
    axum::serve(listener, server.router).await?;

    Ok(())
}
