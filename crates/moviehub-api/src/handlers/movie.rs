//! Movie resource handlers.

use axum::extract::{OriginalUri, Path, Query, State};
use axum::http::{StatusCode, header};
use axum::{Extension, Json};
use axum::response::{IntoResponse, Response};

use moviehub_core::error::AppError;
use moviehub_entity::movie::Movie;
use moviehub_service::MovieDto;

use crate::dto::request::SearchParams;
use crate::error::ApiError;
use crate::extractors::{CriteriaQuery, Pageable};
use crate::headers::{EntityAction, HeaderAlert, pagination_headers};
use crate::state::AppState;

/// Entity name used in alert headers and error payloads.
pub const ENTITY_NAME: &str = "movies";

/// POST /api/movies
pub async fn create_movie(
    State(state): State<AppState>,
    Json(dto): Json<MovieDto>,
) -> Result<Response, ApiError> {
    if dto.id.is_some() {
        return Err(AppError::bad_request_alert(
            "A new movie cannot already have an ID",
            ENTITY_NAME,
            "idexists",
        )
        .into());
    }

    let saved = state.movie_service.save(dto).await?;
    let id = saved.id.unwrap_or_default();
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, format!("/api/movies/{id}"))],
        Extension(HeaderAlert::entity(ENTITY_NAME, EntityAction::Created, id)),
        Json(saved),
    )
        .into_response())
}

/// PUT /api/movies/{id}
pub async fn update_movie(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(dto): Json<MovieDto>,
) -> Result<Response, ApiError> {
    check_target(&state, id, &dto).await?;

    let updated = state.movie_service.update(dto).await?;
    Ok((
        Extension(HeaderAlert::entity(ENTITY_NAME, EntityAction::Updated, id)),
        Json(updated),
    )
        .into_response())
}

/// PATCH /api/movies/{id}
///
/// Accepts `application/json` and `application/merge-patch+json`. Only the
/// non-null fields of the body are written.
pub async fn partial_update_movie(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(dto): Json<MovieDto>,
) -> Result<Response, ApiError> {
    check_target(&state, id, &dto).await?;

    let merged = state
        .movie_service
        .partial_update(dto)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Movie {id} not found")))?;
    Ok((
        Extension(HeaderAlert::entity(ENTITY_NAME, EntityAction::Updated, id)),
        Json(merged),
    )
        .into_response())
}

/// GET /api/movies?field.operator=value&page=&size=&sort=
pub async fn list_movies(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    CriteriaQuery(criteria): CriteriaQuery,
    Pageable(page): Pageable,
) -> Result<Response, ApiError> {
    let result = state
        .movie_query_service
        .find_page_by_criteria(&criteria, &page)
        .await?;
    let headers = pagination_headers(&uri, &result);
    Ok((headers, Json(result.items)).into_response())
}

/// GET /api/movies/count?field.operator=value
pub async fn count_movies(
    State(state): State<AppState>,
    CriteriaQuery(criteria): CriteriaQuery,
) -> Result<Json<u64>, ApiError> {
    let count = state.movie_query_service.count_by_criteria(&criteria).await?;
    Ok(Json(count))
}

/// GET /api/movies/search?keyword=
pub async fn search_movies(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<Movie>>, ApiError> {
    let movies = state
        .movie_service
        .search_by_keyword(&params.keyword)
        .await?;
    Ok(Json(movies))
}

/// GET /api/movies/{id}
pub async fn get_movie(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<MovieDto>, ApiError> {
    state
        .movie_service
        .find_one(id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::not_found(format!("Movie {id} not found")).into())
}

/// DELETE /api/movies/{id}
pub async fn delete_movie(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Response, ApiError> {
    state.movie_service.delete(id).await?;
    Ok((
        StatusCode::NO_CONTENT,
        Extension(HeaderAlert::entity(ENTITY_NAME, EntityAction::Deleted, id)),
    )
        .into_response())
}

/// PUT/PATCH /api/movies without an id segment.
pub async fn missing_id() -> ApiError {
    AppError::method_not_allowed("Updating a movie requires its id in the path").into()
}

/// The body's id must be present, equal the path id, and exist.
async fn check_target(state: &AppState, id: i64, dto: &MovieDto) -> Result<(), AppError> {
    let Some(body_id) = dto.id else {
        return Err(AppError::bad_request_alert("Invalid id", ENTITY_NAME, "idnull"));
    };
    if body_id != id {
        return Err(AppError::bad_request_alert("Invalid ID", ENTITY_NAME, "idinvalid"));
    }
    if !state.movie_service.exists(id).await? {
        return Err(AppError::bad_request_alert(
            "Entity not found",
            ENTITY_NAME,
            "idnotfound",
        ));
    }
    Ok(())
}
