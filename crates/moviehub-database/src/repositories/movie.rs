//! PostgreSQL movie repository.

use async_trait::async_trait;
use sqlx::PgPool;

use moviehub_core::error::{AppError, ErrorKind};
use moviehub_core::result::AppResult;
use moviehub_core::traits::Repository;
use moviehub_core::types::{PageRequest, PageResponse, SortField, Specification};
use moviehub_entity::movie::{Movie, MovieColumn};

use crate::sql::{SqlFilter, order_by};

/// Repository for movie CRUD and specification queries.
#[derive(Debug, Clone)]
pub struct PgMovieRepository {
    pool: PgPool,
}

impl PgMovieRepository {
    /// Create a new movie repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn select_sql(filter: &SqlFilter, order: &str) -> String {
        let distinct = if filter.distinct { "DISTINCT " } else { "" };
        format!(
            "SELECT {distinct}* FROM movies {} {order}",
            filter.where_clause
        )
    }

    fn count_sql(filter: &SqlFilter) -> String {
        let target = if filter.distinct { "DISTINCT id" } else { "*" };
        format!("SELECT COUNT({target}) FROM movies {}", filter.where_clause)
    }

    async fn begin_read_only(&self) -> AppResult<sqlx::Transaction<'static, sqlx::Postgres>> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;
        sqlx::query("SET TRANSACTION READ ONLY")
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to start read-only transaction", e)
            })?;
        Ok(tx)
    }
}

#[async_trait]
impl Repository<Movie, i64> for PgMovieRepository {
    type Column = MovieColumn;

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Movie>> {
        sqlx::query_as::<_, Movie>("SELECT * FROM movies WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find movie by id", e))
    }

    async fn exists_by_id(&self, id: i64) -> AppResult<bool> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM movies WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to check movie", e))
    }

    async fn find_all(
        &self,
        spec: &Specification<MovieColumn>,
        sort: &[SortField],
    ) -> AppResult<Vec<Movie>> {
        let filter = SqlFilter::from_specification(spec);
        let sql = Self::select_sql(&filter, &order_by::<MovieColumn>(sort)?);

        let mut tx = self.begin_read_only().await?;
        let movies = sqlx::query_as_with::<_, Movie, _>(&sql, filter.arguments(&[])?)
            .fetch_all(&mut *tx)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to query movies", e))?;
        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit transaction", e)
        })?;
        Ok(movies)
    }

    async fn find_page(
        &self,
        spec: &Specification<MovieColumn>,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Movie>> {
        let filter = SqlFilter::from_specification(spec);
        let limit_idx = filter.next_placeholder();
        let select_sql = format!(
            "{} LIMIT ${limit_idx} OFFSET ${}",
            Self::select_sql(&filter, &order_by::<MovieColumn>(&page.sort)?),
            limit_idx + 1
        );
        let count_sql = Self::count_sql(&filter);

        let mut tx = self.begin_read_only().await?;
        let total = sqlx::query_scalar_with::<_, i64, _>(&count_sql, filter.arguments(&[])?)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count movies", e))?;

        let limit = i64::try_from(page.limit())
            .map_err(|_| AppError::validation("Page size is out of range"))?;
        let offset = i64::try_from(page.offset())
            .map_err(|_| AppError::validation("Page number is out of range"))?;
        let movies = sqlx::query_as_with::<_, Movie, _>(
            &select_sql,
            filter.arguments(&[limit, offset])?,
        )
        .fetch_all(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to query movies", e))?;
        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit transaction", e)
        })?;

        Ok(PageResponse::new(movies, page.page, page.size, total as u64))
    }

    async fn count(&self, spec: &Specification<MovieColumn>) -> AppResult<u64> {
        let filter = SqlFilter::from_specification(spec);
        let sql = Self::count_sql(&filter);

        let mut tx = self.begin_read_only().await?;
        let total = sqlx::query_scalar_with::<_, i64, _>(&sql, filter.arguments(&[])?)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count movies", e))?;
        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit transaction", e)
        })?;
        Ok(total as u64)
    }

    async fn insert(&self, movie: &Movie) -> AppResult<Movie> {
        sqlx::query_as::<_, Movie>(
            "INSERT INTO movies (name, category, rating) VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(&movie.name)
        .bind(&movie.category)
        .bind(movie.rating)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to insert movie", e))
    }

    async fn update(&self, movie: &Movie) -> AppResult<Movie> {
        sqlx::query_as::<_, Movie>(
            "UPDATE movies SET name = $2, category = $3, rating = $4 WHERE id = $1 RETURNING *",
        )
        .bind(movie.id)
        .bind(&movie.name)
        .bind(&movie.category)
        .bind(movie.rating)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update movie", e))?
        .ok_or_else(|| AppError::not_found(format!("Movie {} not found", movie.id)))
    }

    async fn merge(&self, patch: &Movie) -> AppResult<Option<Movie>> {
        sqlx::query_as::<_, Movie>(
            "UPDATE movies SET name = COALESCE($2, name), \
                               category = COALESCE($3, category), \
                               rating = COALESCE($4, rating) \
             WHERE id = $1 RETURNING *",
        )
        .bind(patch.id)
        .bind(&patch.name)
        .bind(&patch.category)
        .bind(patch.rating)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to patch movie", e))
    }

    async fn delete_by_id(&self, id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM movies WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete movie", e))?;
        Ok(result.rows_affected() > 0)
    }

    async fn health_check(&self) -> AppResult<bool> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|v| v == 1)
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Health check failed", e))
    }
}
