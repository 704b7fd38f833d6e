use once_cell::sync::Lazy;
use prometheus::{register_int_counter, Encoder, IntCounter, TextEncoder};

// Prometheus metrics (default registry)
pub static REPOSITORIES_CREATED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "repo_catalog_repositories_created_total",
        "Total repositories created"
    )
    .expect("register repositories_created_total")
});

pub static REPOSITORIES_DELETED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "repo_catalog_repositories_deleted_total",
        "Total repositories deleted"
    )
    .expect("register repositories_deleted_total")
});

pub static REPOSITORY_LIKES_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "repo_catalog_repository_likes_total",
        "Total like operations applied"
    )
    .expect("register repository_likes_total")
});

pub fn encode_metrics() -> (axum::http::StatusCode, String) {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        return (
            axum::http::StatusCode::INTERNAL_SERVER_ERROR,
            format!("metrics encode error: {e}"),
        );
    }
    (
        axum::http::StatusCode::OK,
        String::from_utf8(buffer).unwrap_or_default(),
    )
}
