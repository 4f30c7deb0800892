use tracing::info;

use ad_targeting_api::app::create_app;
use ad_targeting_api::config::Config;
use ad_targeting_api::middleware::{init_metrics, logging::init_logging};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present (development convenience)
    dotenvy::dotenv().ok();

    let config = Config::load()?;
    init_logging(&config.logging);
    init_metrics()?;

    info!(
        host = %config.server.host,
        port = config.server.port,
        "Starting ad targeting service"
    );

    let pool = persistence::db::create_pool(&config.database).await?;
    persistence::db::run_migrations(&pool).await?;
    info!("Database migrations applied");

    persistence::metrics::record_pool_metrics(&pool);

    let addr = config.socket_addr()?;
    let app = create_app(config, pool)?;

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(addr = %addr, "Listening");
    axum::serve(listener, app).await?;

    Ok(())
}
