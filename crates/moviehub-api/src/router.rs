//! Route definitions for the MovieHub HTTP API.
//!
//! All routes are mounted under `/api`. Static segments (`count`, `search`)
//! take precedence over the `{id}` parameter.

use axum::Router;
use axum::routing::get;

use crate::handlers;
use crate::state::AppState;

/// Build the router with every route, threading `AppState` through.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(movie_routes())
        .merge(health_routes());

    Router::new().nest("/api", api_routes).with_state(state)
}

/// Movie CRUD, criteria queries and keyword search
fn movie_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/movies",
            get(handlers::movie::list_movies)
                .post(handlers::movie::create_movie)
                .put(handlers::movie::missing_id)
                .patch(handlers::movie::missing_id),
        )
        .route("/movies/count", get(handlers::movie::count_movies))
        .route("/movies/search", get(handlers::movie::search_movies))
        .route(
            "/movies/{id}",
            get(handlers::movie::get_movie)
                .put(handlers::movie::update_movie)
                .patch(handlers::movie::partial_update_movie)
                .delete(handlers::movie::delete_movie),
        )
}

/// Health endpoint
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}
