use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post},
    Json, Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use common::types::Health;
use service::repositories::RepositoryService;

use crate::{guard, observability, openapi};

pub mod repositories;

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK")))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

pub async fn metrics() -> (axum::http::StatusCode, String) {
    observability::encode_metrics()
}

/// Build the full application router.
///
/// Id-scoped routes sit behind the two-step validation chain; the
/// `ServiceBuilder` keeps the declared order (format check, then existence).
pub fn build_router(repos: Arc<RepositoryService>, cors: CorsLayer) -> Router {
    let collection = Router::new().route(
        "/repositories",
        get(repositories::list_repositories).post(repositories::create_repository),
    );

    let member = Router::new()
        .route(
            "/repositories/:id",
            get(repositories::get_repository)
                .put(repositories::update_repository)
                .delete(repositories::delete_repository),
        )
        .route("/repositories/:id/like", post(repositories::like_repository))
        .route_layer(
            ServiceBuilder::new()
                .layer(middleware::from_fn(guard::validate_repository_id))
                .layer(middleware::from_fn_with_state(
                    Arc::clone(&repos),
                    guard::resolve_repository,
                )),
        );

    Router::new()
        .route("/health", get(health))
        .route("/metrics", get(metrics))
        .merge(collection)
        .merge(member)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", openapi::ApiDoc::openapi()))
        .with_state(repos)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                // one span per request with method and path, INFO level
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                // response events carry status and latency
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
