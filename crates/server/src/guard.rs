use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::{Path, Request, State};
use axum::middleware::Next;
use axum::response::Response;
use axum::RequestExt;
use uuid::Uuid;

use service::repositories::RepositoryService;

use crate::errors::ApiError;

/// Position of the matched record, attached to request extensions by the
/// existence check. Only meaningful within the request that resolved it.
#[derive(Clone, Copy, Debug)]
pub struct RepositoryIndex(pub usize);

async fn raw_path_id(req: &mut Request) -> Result<String, ApiError> {
    let Path(params) = req
        .extract_parts::<Path<HashMap<String, String>>>()
        .await
        .map_err(|_| ApiError::InvalidId)?;
    params.get("id").cloned().ok_or(ApiError::InvalidId)
}

/// Step 1 of the validation chain: the `:id` path parameter must be a
/// syntactically valid UUID v4.
pub async fn validate_repository_id(mut req: Request, next: Next) -> Result<Response, ApiError> {
    let raw = raw_path_id(&mut req).await?;
    let id = Uuid::try_parse(&raw).map_err(|_| ApiError::InvalidId)?;
    if id.get_version_num() != 4 {
        return Err(ApiError::InvalidId);
    }
    Ok(next.run(req).await)
}

/// Step 2: resolve the id to its position in the collection (linear scan)
/// and hand the index to the handler via request extensions.
pub async fn resolve_repository(
    State(repos): State<Arc<RepositoryService>>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let raw = raw_path_id(&mut req).await?;
    let id = Uuid::try_parse(&raw).map_err(|_| ApiError::InvalidId)?;
    let index = repos.find_index(id).await.ok_or(ApiError::NotFound)?;
    req.extensions_mut().insert(RepositoryIndex(index));
    Ok(next.run(req).await)
}
