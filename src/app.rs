use crate::infrastructure::bootstrap::build_state;
use crate::infrastructure::config::AppConfig;
use crate::interfaces::http::start_server;
use tracing::error;
use tracing_subscriber::EnvFilter;

pub async fn run() -> std::io::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();

    let config = AppConfig::load().map_err(|err| {
        error!(error = %err, "Failed to load configuration");
        std::io::Error::other(err.to_string())
    })?;

    let state = build_state(&config).await.map_err(|err| {
        error!(error = %err, "Failed to initialise services");
        std::io::Error::other(err.to_string())
    })?;

    start_server(state, &config.server)?.await
}
