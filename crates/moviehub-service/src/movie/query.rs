//! Criteria-driven movie queries.

use std::sync::Arc;

use tracing::debug;

use moviehub_core::result::AppResult;
use moviehub_core::types::specification::{
    build_range_specification, build_string_specification,
};
use moviehub_core::types::{PageRequest, PageResponse, SortField, Specification};
use moviehub_database::MovieRepository;
use moviehub_entity::movie::MovieColumn;

use super::criteria::MovieCriteria;
use super::dto::MovieDto;

/// Read-only movie queries driven by [`MovieCriteria`].
#[derive(Debug, Clone)]
pub struct MovieQueryService {
    repo: Arc<MovieRepository>,
}

impl MovieQueryService {
    /// Create a new query service.
    pub fn new(repo: Arc<MovieRepository>) -> Self {
        Self { repo }
    }

    /// Compile criteria into a specification.
    ///
    /// Distinctness is set first, then each present filter is conjoined in
    /// the order id, name, category, rating. Nothing here fails: impossible
    /// combinations just match no rows.
    pub fn create_specification(criteria: &MovieCriteria) -> Specification<MovieColumn> {
        let mut spec = match criteria.distinct {
            Some(distinct) => Specification::distinct(distinct),
            None => Specification::all(),
        };
        if let Some(id) = &criteria.id {
            spec = spec.and_all(build_range_specification(id, MovieColumn::Id));
        }
        if let Some(name) = &criteria.name {
            spec = spec.and_all(build_string_specification(name, MovieColumn::Name));
        }
        if let Some(category) = &criteria.category {
            spec = spec.and_all(build_string_specification(category, MovieColumn::Category));
        }
        if let Some(rating) = &criteria.rating {
            spec = spec.and_all(build_range_specification(rating, MovieColumn::Rating));
        }
        spec
    }

    /// Every movie matching the criteria, in store order (ascending id).
    pub async fn find_by_criteria(&self, criteria: &MovieCriteria) -> AppResult<Vec<MovieDto>> {
        self.find_sorted_by_criteria(criteria, &[]).await
    }

    /// Every movie matching the criteria, in the given order.
    pub async fn find_sorted_by_criteria(
        &self,
        criteria: &MovieCriteria,
        sort: &[SortField],
    ) -> AppResult<Vec<MovieDto>> {
        debug!(criteria = %criteria, "find by criteria");
        let spec = Self::create_specification(criteria);
        let movies = self.repo.find_all(&spec, sort).await?;
        Ok(movies.into_iter().map(MovieDto::from).collect())
    }

    /// One page of movies matching the criteria, with the total match count.
    pub async fn find_page_by_criteria(
        &self,
        criteria: &MovieCriteria,
        page: &PageRequest,
    ) -> AppResult<PageResponse<MovieDto>> {
        debug!(criteria = %criteria, page = page.page, size = page.size, "find page by criteria");
        let spec = Self::create_specification(criteria);
        let movies = self.repo.find_page(&spec, page).await?;
        Ok(movies.map(MovieDto::from))
    }

    /// Number of movies matching the criteria.
    pub async fn count_by_criteria(&self, criteria: &MovieCriteria) -> AppResult<u64> {
        debug!(criteria = %criteria, "count by criteria");
        let spec = Self::create_specification(criteria);
        self.repo.count(&spec).await
    }
}
