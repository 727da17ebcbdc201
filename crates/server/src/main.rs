use anyhow::Context;
use server::{DeploymentImpl, config::Config, routes};
use tracing::info;
use utils::logging::init_tracing;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = Config::from_env()?;
    let addr = config.listen_addr()?;

    let deployment = DeploymentImpl::new(config).await?;
    let app = routes::router(deployment);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(%addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}
