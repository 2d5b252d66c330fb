use message_backend::{
    config::{get_config, init_config, LogFormat},
    database::pool::create_pool,
    routes::{self, RouterOptions},
    AppState,
};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    match format {
        LogFormat::Pretty => tracing_subscriber::fmt().with_env_filter(filter).init(),
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init(),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_config()?;
    let config = get_config();
    init_tracing(config.log_format);

    let pool = create_pool(config).await?;
    info!("Database connected successfully");

    sqlx::migrate!("./migrations").run(&pool).await?;

    if config.read_api_enabled {
        warn!("Read routes are public: stored names and phone numbers are readable without authentication");
    }

    let options = RouterOptions {
        read_api_enabled: config.read_api_enabled,
        cors_allowed_origins: config.cors_allowed_origins.clone(),
    };
    let app = routes::app(AppState::new(pool), &options);

    let addr: SocketAddr = config.server_address.parse()?;
    info!("Server listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
