use anyhow::Context;

use fieldops_api::config::Settings;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    fieldops_observability::init();

    let settings = Settings::from_env()?;

    // Invalid policy definitions abort startup; nothing is served half-loaded.
    let matrix = settings
        .load_policy()
        .with_context(|| format!("loading policy definitions from {}", settings.policy_source()))?;
    tracing::info!(source = %settings.policy_source(), "policy definitions loaded");

    let app = fieldops_api::app::build_app(&settings, matrix)?;

    let listener = tokio::net::TcpListener::bind(settings.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", settings.bind_addr))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
