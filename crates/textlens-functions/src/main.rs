use std::env;
use std::net::SocketAddr;

use tracing_subscriber::EnvFilter;

use textlens_functions::router;
use textlens_functions::state::AppState;

/// Port the Functions host assigns to a custom handler.
const PORT_VAR: &str = "FUNCTIONS_CUSTOMHANDLER_PORT";
const DEFAULT_PORT: u16 = 3000;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Structured JSON logging; the Functions host collects stdout.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    let port = match env::var(PORT_VAR) {
        Ok(raw) => raw
            .parse::<u16>()
            .map_err(|e| eyre::eyre!("invalid {PORT_VAR} {raw:?}: {e}"))?,
        Err(_) => DEFAULT_PORT,
    };

    // The Cosmos store is built on first use, so a missing connection string
    // fails requests instead of startup.
    let app = router(AppState::from_env());

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "listening");

    axum::serve(listener, app).await?;
    Ok(())
}
