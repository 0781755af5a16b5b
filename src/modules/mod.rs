//! Backend modules that serve the sample catalog over HTTP.

pub mod books;
pub mod me;

use anyhow::Context;
use plume_kernel::{settings::Settings, InitCtx, ModuleRegistry};

use crate::seed;

/// Register the seeded mock backend with the registry
pub fn register_all(registry: &mut ModuleRegistry) {
    registry.register(books::create_module(seed::books()));
    registry.register(me::create_module(seed::user()));
}

/// Run the mock backend until the server fails or Ctrl-C arrives.
pub async fn serve_backend(settings: &Settings) -> anyhow::Result<()> {
    let mut registry = ModuleRegistry::new();
    register_all(&mut registry);

    let ctx = InitCtx { settings };
    registry.init_modules(&ctx).await?;
    registry.start_modules(&ctx).await?;

    let served = tokio::select! {
        result = plume_http::start_server(&registry, settings) => result,
        signal = tokio::signal::ctrl_c() => {
            tracing::info!("shutdown signal received");
            signal.context("failed to listen for shutdown signal")
        }
    };

    registry.stop_modules().await?;
    served
}
