//! Generic repository trait for entity storage.

use std::fmt;

use async_trait::async_trait;

use crate::result::AppResult;
use crate::types::pagination::{PageRequest, PageResponse};
use crate::types::sorting::SortField;
use crate::types::specification::Specification;

/// Generic CRUD repository with specification-based queries.
///
/// Each entity gets a strongly typed repository; `Column` names the
/// queryable columns its specifications are built over. Sort properties that
/// do not name a column are rejected with a validation error.
#[async_trait]
pub trait Repository<Entity, Id>: fmt::Debug + Send + Sync + 'static
where
    Entity: Send + Sync + 'static,
    Id: Send + Sync + Copy + 'static,
{
    /// Queryable columns of `Entity`.
    type Column: Copy + Send + Sync + 'static;

    /// Find an entity by its primary key.
    async fn find_by_id(&self, id: Id) -> AppResult<Option<Entity>>;

    /// Whether an entity with this key exists.
    async fn exists_by_id(&self, id: Id) -> AppResult<bool>;

    /// All entities satisfying `spec`, ordered by `sort` (identifier
    /// ascending when empty).
    async fn find_all(
        &self,
        spec: &Specification<Self::Column>,
        sort: &[SortField],
    ) -> AppResult<Vec<Entity>>;

    /// One page of entities satisfying `spec`, with the total count taken
    /// in the same read.
    async fn find_page(
        &self,
        spec: &Specification<Self::Column>,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Entity>>;

    /// Number of entities satisfying `spec`.
    async fn count(&self, spec: &Specification<Self::Column>) -> AppResult<u64>;

    /// Persist a new entity; the store assigns its identifier.
    async fn insert(&self, entity: &Entity) -> AppResult<Entity>;

    /// Overwrite every field of an existing entity.
    async fn update(&self, entity: &Entity) -> AppResult<Entity>;

    /// Overwrite only the fields present in `patch`. Returns `None` when no
    /// entity has the patch's identifier.
    async fn merge(&self, patch: &Entity) -> AppResult<Option<Entity>>;

    /// Delete an entity by its primary key. Returns `true` if deleted.
    async fn delete_by_id(&self, id: Id) -> AppResult<bool>;

    /// Whether the backing store is reachable.
    async fn health_check(&self) -> AppResult<bool>;
}
