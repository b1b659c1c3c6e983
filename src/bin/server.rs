//! Hedge simulation HTTP service
//!
//! Serves `POST /hedge` and the `GET /` liveness probe. Listens on
//! `HEDGE_PORT` (default 8000).

use put_hedge::run::RunConfig;
use put_hedge::server::router;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = RunConfig::from_env()?;
    let port: u16 = std::env::var("HEDGE_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8000);

    let app = router(config);
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
    info!("hedge service listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}
