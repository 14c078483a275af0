//! Movie CRUD operations and keyword search.

use std::sync::Arc;

use tracing::{debug, info};

use moviehub_core::error::AppError;
use moviehub_core::result::AppResult;
use moviehub_core::types::{PageRequest, PageResponse, Predicate, Specification};
use moviehub_database::MovieRepository;
use moviehub_entity::movie::{Movie, MovieColumn};

use super::dto::MovieDto;

/// Handles movie lifecycle operations.
#[derive(Debug, Clone)]
pub struct MovieService {
    repo: Arc<MovieRepository>,
}

impl MovieService {
    /// Create a new movie service.
    pub fn new(repo: Arc<MovieRepository>) -> Self {
        Self { repo }
    }

    /// Insert a new movie. Any identifier on the input is ignored; the store
    /// assigns one.
    pub async fn save(&self, dto: MovieDto) -> AppResult<MovieDto> {
        debug!(?dto, "save movie");
        let saved = self.repo.insert(&dto.to_entity(0)).await?;
        info!(id = saved.id, "Movie created");
        Ok(saved.into())
    }

    /// Overwrite every field of an existing movie.
    pub async fn update(&self, dto: MovieDto) -> AppResult<MovieDto> {
        debug!(?dto, "update movie");
        let id = dto
            .id
            .ok_or_else(|| AppError::validation("Cannot update a movie without an id"))?;
        let updated = self.repo.update(&dto.to_entity(id)).await?;
        info!(id, "Movie updated");
        Ok(updated.into())
    }

    /// Merge the non-null fields of `dto` into the stored movie.
    ///
    /// Returns `None` when no movie has the DTO's identifier.
    pub async fn partial_update(&self, dto: MovieDto) -> AppResult<Option<MovieDto>> {
        debug!(?dto, "partial update movie");
        let id = dto
            .id
            .ok_or_else(|| AppError::validation("Cannot patch a movie without an id"))?;
        let merged = self.repo.merge(&dto.to_entity(id)).await?;
        if merged.is_some() {
            info!(id, "Movie partially updated");
        }
        Ok(merged.map(MovieDto::from))
    }

    /// One page of all movies.
    pub async fn find_all(&self, page: &PageRequest) -> AppResult<PageResponse<MovieDto>> {
        debug!(page = page.page, size = page.size, "find all movies");
        let movies = self.repo.find_page(&Specification::all(), page).await?;
        Ok(movies.map(MovieDto::from))
    }

    /// Look up one movie. An absent result means "not found", not an error.
    pub async fn find_one(&self, id: i64) -> AppResult<Option<MovieDto>> {
        debug!(id, "find movie");
        Ok(self.repo.find_by_id(id).await?.map(MovieDto::from))
    }

    /// Whether a movie with this identifier exists.
    pub async fn exists(&self, id: i64) -> AppResult<bool> {
        self.repo.exists_by_id(id).await
    }

    /// Delete a movie. Deleting an absent identifier is not an error.
    pub async fn delete(&self, id: i64) -> AppResult<()> {
        debug!(id, "delete movie");
        if self.repo.delete_by_id(id).await? {
            info!(id, "Movie deleted");
        }
        Ok(())
    }

    /// Movies whose name or category starts with `keyword`, ignoring case.
    pub async fn search_by_keyword(&self, keyword: &str) -> AppResult<Vec<Movie>> {
        debug!(keyword, "search movies");
        let spec = Specification::all().and(Predicate::Or(vec![
            Predicate::starts_with(MovieColumn::Name, keyword),
            Predicate::starts_with(MovieColumn::Category, keyword),
        ]));
        self.repo.find_all(&spec, &[]).await
    }

    /// Whether the backing store is reachable.
    pub async fn health_check(&self) -> AppResult<bool> {
        self.repo.health_check().await
    }
}
