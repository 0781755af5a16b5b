//! HTTP server facade for Plume backend modules.
//!
//! Hosts the catalog API the reading session talks to. In development this
//! is the seeded mock backend; every registered module is mounted under
//! `/api/{module_name}`.

use anyhow::Context;
use axum::{routing::get, Router};
use tokio::net::TcpListener;

use plume_kernel::{settings::Settings, ModuleRegistry};

pub mod error;
pub mod router;

use router::RouterBuilder;

/// Bind the configured address and serve until the process stops
pub async fn start_server(registry: &ModuleRegistry, settings: &Settings) -> anyhow::Result<()> {
    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    tracing::info!("starting HTTP server on {}", addr);

    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind to {}", addr))?;

    serve(listener, registry, settings).await
}

/// Serve all module routes on an already bound listener
pub async fn serve(
    listener: TcpListener,
    registry: &ModuleRegistry,
    settings: &Settings,
) -> anyhow::Result<()> {
    let app = build_router(registry, settings);

    let local_addr = listener
        .local_addr()
        .context("listener has no local address")?;
    tracing::info!("HTTP server listening on http://{}", local_addr);

    axum::serve(listener, app)
        .await
        .context("HTTP server failed")?;

    Ok(())
}

/// Build the main HTTP router with all module routes mounted
pub fn build_router(registry: &ModuleRegistry, settings: &Settings) -> Router {
    let mut router_builder = RouterBuilder::new()
        .route("/healthz", get(health_check));

    for module in registry.modules() {
        let module_name = module.name();
        tracing::info!(
            module = module_name,
            "mounting module routes under /api/{}",
            module_name
        );
        router_builder = router_builder.mount_module(module_name, module.routes());
    }

    // Layers wrap the routes registered above.
    router_builder
        .with_tracing()
        .with_cors()
        .with_request_id()
        .with_timeout(settings.server.request_timeout_ms)
        .build()
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "ok"
}
