use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;
use uuid::Uuid;

use models::repository::{CreateRepository, Repository, UpdateRepository};

use crate::errors::ServiceError;
use crate::storage::memory::SeqStore;

/// Trait abstraction for the repository collection (list/create/lookup and
/// the index-addressed mutations used after the existence check).
#[async_trait]
pub trait RepositoryCollection: Send + Sync {
    async fn list(&self, filter_title: Option<&str>) -> Vec<Repository>;
    async fn create(&self, input: CreateRepository) -> Result<Repository, ServiceError>;
    async fn find_index(&self, id: Uuid) -> Option<usize>;
    async fn get_at(&self, index: usize) -> Result<Repository, ServiceError>;
    async fn update_at(&self, index: usize, patch: UpdateRepository) -> Result<Repository, ServiceError>;
    async fn delete_at(&self, index: usize) -> Result<(), ServiceError>;
    async fn like_at(&self, index: usize) -> Result<Repository, ServiceError>;
}

/// In-memory repository collection.
///
/// Owns the backing sequence store; all mutation goes through these methods.
/// The collection starts empty and lives until process exit. Ids are
/// `Uuid::new_v4()`; collision probability is treated as negligible, so
/// uniqueness is not re-checked on insert.
pub struct RepositoryService {
    store: SeqStore<Repository>,
}

impl RepositoryService {
    pub fn new() -> Arc<Self> {
        Arc::new(Self { store: SeqStore::new() })
    }

    /// Full ordered listing, optionally narrowed to titles containing
    /// `filter_title` case-insensitively.
    pub async fn list(&self, filter_title: Option<&str>) -> Vec<Repository> {
        match filter_title {
            Some(filter) if !filter.is_empty() => {
                let needle = filter.to_lowercase();
                self.store
                    .filter(|repo| repo.title.to_lowercase().contains(&needle))
                    .await
            }
            _ => self.store.list().await,
        }
    }

    /// Validate the input, mint a fresh id and append the record.
    pub async fn create(&self, input: CreateRepository) -> Result<Repository, ServiceError> {
        input.validate()?;
        let repo = Repository {
            id: Uuid::new_v4(),
            title: input.title,
            url: input.url,
            techs: input.techs,
            likes: 0,
        };
        self.store.push(repo.clone()).await;
        debug!(id = %repo.id, "repository appended");
        Ok(repo)
    }

    /// Resolve an id to its position in the sequence (linear scan).
    pub async fn find_index(&self, id: Uuid) -> Option<usize> {
        self.store.position(|repo| repo.id == id).await
    }

    /// Record at a previously resolved index.
    pub async fn get_at(&self, index: usize) -> Result<Repository, ServiceError> {
        self.store
            .get(index)
            .await
            .ok_or_else(|| ServiceError::not_found("repository"))
    }

    /// Merge-by-presence update, replacing the record in place at `index`.
    pub async fn update_at(
        &self,
        index: usize,
        patch: UpdateRepository,
    ) -> Result<Repository, ServiceError> {
        self.store
            .update(index, |repo| *repo = patch.merge_into(repo))
            .await
            .ok_or_else(|| ServiceError::not_found("repository"))
    }

    /// Remove the record at `index`, closing the gap.
    pub async fn delete_at(&self, index: usize) -> Result<(), ServiceError> {
        self.store
            .remove(index)
            .await
            .map(|_| ())
            .ok_or_else(|| ServiceError::not_found("repository"))
    }

    /// Bump the like counter of the record at `index` by exactly one.
    pub async fn like_at(&self, index: usize) -> Result<Repository, ServiceError> {
        self.store
            .update(index, |repo| repo.likes += 1)
            .await
            .ok_or_else(|| ServiceError::not_found("repository"))
    }
}

#[async_trait]
impl RepositoryCollection for RepositoryService {
    async fn list(&self, filter_title: Option<&str>) -> Vec<Repository> {
        self.list(filter_title).await
    }
    async fn create(&self, input: CreateRepository) -> Result<Repository, ServiceError> {
        self.create(input).await
    }
    async fn find_index(&self, id: Uuid) -> Option<usize> {
        self.find_index(id).await
    }
    async fn get_at(&self, index: usize) -> Result<Repository, ServiceError> {
        self.get_at(index).await
    }
    async fn update_at(&self, index: usize, patch: UpdateRepository) -> Result<Repository, ServiceError> {
        self.update_at(index, patch).await
    }
    async fn delete_at(&self, index: usize) -> Result<(), ServiceError> {
        self.delete_at(index).await
    }
    async fn like_at(&self, index: usize) -> Result<Repository, ServiceError> {
        self.like_at(index).await
    }
}
