use {
    prometheus::{Encoder, Registry, TextEncoder},
    prometheus_metric_storage::StorageRegistry,
    std::{net::SocketAddr, sync::OnceLock},
};

/// Global registry that all `prometheus_metric_storage::MetricStorage`
/// structs register themselves with.
pub fn get_storage_registry() -> &'static StorageRegistry {
    static REGISTRY: OnceLock<StorageRegistry> = OnceLock::new();
    REGISTRY.get_or_init(|| StorageRegistry::new(Registry::new()))
}

pub fn encode() -> String {
    let registry: &Registry = get_storage_registry().registry();
    let mut buffer = Vec::new();
    let encoder = TextEncoder::new();
    if let Err(err) = encoder.encode(&registry.gather(), &mut buffer) {
        tracing::error!(?err, "failed to encode metrics");
        return String::new();
    }
    String::from_utf8_lossy(&buffer).into_owned()
}

/// Serves `/metrics` until the process exits.
pub async fn serve(address: SocketAddr) -> anyhow::Result<()> {
    let app = axum::Router::new().route("/metrics", axum::routing::get(|| async { encode() }));
    let listener = tokio::net::TcpListener::bind(address).await?;
    tracing::info!(%address, "serving metrics");
    axum::serve(listener, app).await?;
    Ok(())
}
