use anyhow::Context;
use plume_kernel::settings::Settings;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load().with_context(|| "failed to load Plume settings")?;
    plume_telemetry::init(&settings.telemetry)?;

    tracing::info!(
        env = ?settings.environment,
        host = %settings.server.host,
        port = settings.server.port,
        "plume mock backend starting"
    );

    plume_app::modules::serve_backend(&settings).await?;

    tracing::info!("plume mock backend stopped");
    Ok(())
}
