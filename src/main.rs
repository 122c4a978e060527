use anyhow::Result;
use call_desk::{router, AppConfig, AppState};
use clap::Parser;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "call-server", about = "Outbound call + transcript summary service")]
struct Args {
    /// Port to listen on (overrides PORT)
    #[arg(long)]
    port: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args = Args::parse();

    // Load + validate env ONCE
    let mut config = AppConfig::load()?;
    if let Some(port) = args.port {
        config.port = port;
    }

    info!("Starting call server for agent {}", config.agent_id);
    if config.twilio.is_none() {
        warn!("Twilio credentials not set; call status polling disabled");
    }

    let state = AppState::from_config(&config)?;
    let app = router(state);

    let addr = format!("0.0.0.0:{}", config.port);
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
