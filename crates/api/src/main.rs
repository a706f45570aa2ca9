use anyhow::Context;

use shelfwatch_api::config::ApiConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    shelfwatch_observability::init();

    let config = ApiConfig::from_env().context("invalid server configuration")?;
    let app = shelfwatch_api::app::build_app();

    let listener = tokio::net::TcpListener::bind(config.socket_addr())
        .await
        .with_context(|| format!("failed to bind {}", config.socket_addr()))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
