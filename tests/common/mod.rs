use plume_app::api::ApiClient;
use plume_kernel::settings::{ApiSettings, Settings};
use plume_kernel::ModuleRegistry;
use tokio::net::TcpListener;

/// Serve the seeded backend on an ephemeral port and return a client for it.
pub async fn spawn_backend() -> ApiClient {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let mut registry = ModuleRegistry::new();
        plume_app::modules::register_all(&mut registry);
        plume_http::serve(listener, &registry, &Settings::default())
            .await
            .unwrap();
    });

    client_for(&format!("http://{}/api", addr))
}

pub fn client_for(base_url: &str) -> ApiClient {
    ApiClient::new(&ApiSettings {
        base_url: base_url.to_string(),
        timeout_ms: 2_000,
    })
    .unwrap()
}
