use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use serde::Deserialize;
use tracing::info;

use models::repository::{CreateRepository, Repository, UpdateRepository};
use service::repositories::RepositoryService;

use crate::errors::ApiError;
use crate::guard::RepositoryIndex;
use crate::observability;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub title: Option<String>,
}

/// List the collection, optionally filtered by a case-insensitive title
/// substring.
#[utoipa::path(get, path = "/repositories", tag = "repositories",
    params(("title" = Option<String>, Query, description = "Case-insensitive title substring filter")),
    responses((status = 200, description = "OK")))]
pub async fn list_repositories(
    State(repos): State<Arc<RepositoryService>>,
    Query(query): Query<ListQuery>,
) -> Json<Vec<Repository>> {
    let items = repos.list(query.title.as_deref()).await;
    info!(count = items.len(), "list repositories");
    Json(items)
}

/// Create a repository. The raw body goes through the presence check before
/// anything is stored.
#[utoipa::path(post, path = "/repositories", tag = "repositories",
    request_body = crate::openapi::CreateRepositoryDoc,
    responses((status = 201, description = "Created"), (status = 400, description = "Bad Request")))]
pub async fn create_repository(
    State(repos): State<Arc<RepositoryService>>,
    Json(body): Json<serde_json::Value>,
) -> Result<(StatusCode, Json<Repository>), ApiError> {
    let input = CreateRepository::from_value(&body).map_err(|_| ApiError::InvalidBody)?;
    let created = repos.create(input).await.map_err(ApiError::from)?;
    observability::REPOSITORIES_CREATED_TOTAL.inc();
    info!(id = %created.id, title = %created.title, "created repository");
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(get, path = "/repositories/{id}", tag = "repositories",
    params(("id" = uuid::Uuid, Path, description = "Repository id")),
    responses((status = 200, description = "OK"), (status = 400, description = "Bad Request")))]
pub async fn get_repository(
    State(repos): State<Arc<RepositoryService>>,
    Extension(RepositoryIndex(index)): Extension<RepositoryIndex>,
) -> Result<Json<Repository>, ApiError> {
    let repo = repos.get_at(index).await.map_err(ApiError::from)?;
    Ok(Json(repo))
}

/// Partial update: supplied non-empty fields win, the rest is retained.
#[utoipa::path(put, path = "/repositories/{id}", tag = "repositories",
    params(("id" = uuid::Uuid, Path, description = "Repository id")),
    request_body = crate::openapi::UpdateRepositoryDoc,
    responses((status = 200, description = "OK"), (status = 400, description = "Bad Request")))]
pub async fn update_repository(
    State(repos): State<Arc<RepositoryService>>,
    Extension(RepositoryIndex(index)): Extension<RepositoryIndex>,
    Json(patch): Json<UpdateRepository>,
) -> Result<Json<Repository>, ApiError> {
    let updated = repos.update_at(index, patch).await.map_err(ApiError::from)?;
    info!(id = %updated.id, "updated repository");
    Ok(Json(updated))
}

#[utoipa::path(delete, path = "/repositories/{id}", tag = "repositories",
    params(("id" = uuid::Uuid, Path, description = "Repository id")),
    responses((status = 204, description = "No Content"), (status = 400, description = "Bad Request")))]
pub async fn delete_repository(
    State(repos): State<Arc<RepositoryService>>,
    Extension(RepositoryIndex(index)): Extension<RepositoryIndex>,
) -> Result<StatusCode, ApiError> {
    repos.delete_at(index).await.map_err(ApiError::from)?;
    observability::REPOSITORIES_DELETED_TOTAL.inc();
    info!(index, "deleted repository");
    Ok(StatusCode::NO_CONTENT)
}

/// Increment the like counter by exactly one.
#[utoipa::path(post, path = "/repositories/{id}/like", tag = "repositories",
    params(("id" = uuid::Uuid, Path, description = "Repository id")),
    responses((status = 201, description = "Created"), (status = 400, description = "Bad Request")))]
pub async fn like_repository(
    State(repos): State<Arc<RepositoryService>>,
    Extension(RepositoryIndex(index)): Extension<RepositoryIndex>,
) -> Result<(StatusCode, Json<Repository>), ApiError> {
    let liked = repos.like_at(index).await.map_err(ApiError::from)?;
    observability::REPOSITORY_LIKES_TOTAL.inc();
    info!(id = %liked.id, likes = liked.likes, "liked repository");
    Ok((StatusCode::CREATED, Json(liked)))
}
