//! In-memory movie repository.
//!
//! Evaluates specifications with [`Specification::matches`], which follows
//! the same null semantics as the SQL rendering, and orders rows the way
//! PostgreSQL does by default (nulls last ascending, first descending).

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering as AtomicOrdering};

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use moviehub_core::error::AppError;
use moviehub_core::result::AppResult;
use moviehub_core::traits::Repository;
use moviehub_core::types::{
    FilterValue, PageRequest, PageResponse, Record, SortDirection, SortField, Specification,
};
use moviehub_entity::movie::{Movie, MovieColumn};

/// Movie store backed by a `BTreeMap` keyed by identifier.
#[derive(Debug, Clone)]
pub struct MemoryMovieRepository {
    rows: Arc<RwLock<BTreeMap<i64, Movie>>>,
    sequence: Arc<AtomicI64>,
}

impl MemoryMovieRepository {
    /// Create an empty store. Identifiers start at 1.
    pub fn new() -> Self {
        Self {
            rows: Arc::new(RwLock::new(BTreeMap::new())),
            sequence: Arc::new(AtomicI64::new(1)),
        }
    }

    async fn select(
        &self,
        spec: &Specification<MovieColumn>,
        sort: &[SortField],
    ) -> AppResult<Vec<Movie>> {
        let order = resolve_sort(sort)?;
        let rows = self.rows.read().await;
        // Rows are unique by key, so DISTINCT never removes anything here.
        let mut matched: Vec<Movie> = rows
            .values()
            .filter(|movie| spec.matches(*movie))
            .cloned()
            .collect();
        drop(rows);

        matched.sort_by(|a, b| {
            order
                .iter()
                .map(|(column, direction)| {
                    let ord = cmp_nulls_last(a.value(*column), b.value(*column));
                    match direction {
                        SortDirection::Asc => ord,
                        SortDirection::Desc => ord.reverse(),
                    }
                })
                .find(|ord| *ord != Ordering::Equal)
                .unwrap_or(Ordering::Equal)
        });
        Ok(matched)
    }
}

impl Default for MemoryMovieRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Repository<Movie, i64> for MemoryMovieRepository {
    type Column = MovieColumn;

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Movie>> {
        Ok(self.rows.read().await.get(&id).cloned())
    }

    async fn exists_by_id(&self, id: i64) -> AppResult<bool> {
        Ok(self.rows.read().await.contains_key(&id))
    }

    async fn find_all(
        &self,
        spec: &Specification<MovieColumn>,
        sort: &[SortField],
    ) -> AppResult<Vec<Movie>> {
        self.select(spec, sort).await
    }

    async fn find_page(
        &self,
        spec: &Specification<MovieColumn>,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Movie>> {
        let matched = self.select(spec, &page.sort).await?;
        let total = matched.len() as u64;
        let items = matched
            .into_iter()
            .skip(usize::try_from(page.offset()).unwrap_or(usize::MAX))
            .take(usize::try_from(page.limit()).unwrap_or(usize::MAX))
            .collect();
        Ok(PageResponse::new(items, page.page, page.size, total))
    }

    async fn count(&self, spec: &Specification<MovieColumn>) -> AppResult<u64> {
        let rows = self.rows.read().await;
        Ok(rows.values().filter(|movie| spec.matches(*movie)).count() as u64)
    }

    async fn insert(&self, movie: &Movie) -> AppResult<Movie> {
        let id = self.sequence.fetch_add(1, AtomicOrdering::SeqCst);
        let stored = Movie {
            id,
            ..movie.clone()
        };
        self.rows.write().await.insert(id, stored.clone());
        debug!(id, "Inserted movie into memory store");
        Ok(stored)
    }

    async fn update(&self, movie: &Movie) -> AppResult<Movie> {
        let mut rows = self.rows.write().await;
        let slot = rows
            .get_mut(&movie.id)
            .ok_or_else(|| AppError::not_found(format!("Movie {} not found", movie.id)))?;
        *slot = movie.clone();
        Ok(slot.clone())
    }

    async fn merge(&self, patch: &Movie) -> AppResult<Option<Movie>> {
        let mut rows = self.rows.write().await;
        Ok(rows.get_mut(&patch.id).map(|existing| {
            existing.apply_patch(patch);
            existing.clone()
        }))
    }

    async fn delete_by_id(&self, id: i64) -> AppResult<bool> {
        Ok(self.rows.write().await.remove(&id).is_some())
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }
}

fn resolve_sort(sort: &[SortField]) -> AppResult<Vec<(MovieColumn, SortDirection)>> {
    let mut order = Vec::with_capacity(sort.len() + 1);
    for field in sort {
        let column = MovieColumn::from_property(&field.field).ok_or_else(|| {
            AppError::validation(format!("Unknown sort property '{}'", field.field))
        })?;
        order.push((column, field.direction));
    }
    if !order.iter().any(|(column, _)| *column == MovieColumn::Id) {
        order.push((MovieColumn::Id, SortDirection::Asc));
    }
    Ok(order)
}

fn cmp_nulls_last(a: Option<FilterValue>, b: Option<FilterValue>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(FilterValue::Integer(x)), Some(FilterValue::Integer(y))) => x.cmp(&y),
        (Some(FilterValue::Float(x)), Some(FilterValue::Float(y))) => x.total_cmp(&y),
        (Some(FilterValue::String(x)), Some(FilterValue::String(y))) => x.cmp(&y),
        (Some(FilterValue::Boolean(x)), Some(FilterValue::Boolean(y))) => x.cmp(&y),
        _ => Ordering::Equal,
    }
}
