use invention_service::config::InventionConfig;
use invention_service::services::init_metrics;
use invention_service::startup::Application;
use service_core::observability::init_tracing;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = InventionConfig::load().map_err(|e| {
        eprintln!("Failed to load configuration: {}", e);
        anyhow::anyhow!("{}", e)
    })?;

    init_tracing(
        "invention-service",
        &config.common.log_level,
        config.otlp_endpoint.as_deref(),
    );

    init_metrics();

    let app = Application::build(config).await.map_err(|e| {
        tracing::error!("Failed to build application: {}", e);
        anyhow::anyhow!("Startup error: {}", e)
    })?;

    app.run_until_stopped().await?;

    tracing::info!("Invention service stopped");
    Ok(())
}
