use taskboard::{build_app, config::Config, infrastructure::sqlite_repo::{prepare_sqlite_file, SqliteRepository}};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    prepare_sqlite_file(&config.database_url)?;
    let repo = SqliteRepository::connect(&config.database_url).await?;
    repo.init().await?;
    tracing::info!(database_url = %config.database_url, "database ready");
    let router = build_app(repo);

    tracing::info!(addr = %config.addr, "listening");
    axum::serve(tokio::net::TcpListener::bind(config.addr).await?, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    use tokio::signal::ctrl_c;
    let _ = ctrl_c().await;
    tracing::info!("shutdown");
}
