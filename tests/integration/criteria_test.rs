//! Integration tests for criteria filtering on the movie list and count endpoints.

mod helpers;

use http::StatusCode;
use serde_json::json;

const DEFAULT_NAME: &str = "AAAAAAAAAA";
const UPDATED_NAME: &str = "BBBBBBBBBB";
const DEFAULT_CATEGORY: &str = "AAAAAAAAAA";
const UPDATED_CATEGORY: &str = "BBBBBBBBBB";
const DEFAULT_RATING: f64 = 1.0;
const UPDATED_RATING: f64 = 2.0;

/// The list returns exactly `expected` and count agrees with it.
async fn assert_found(app: &helpers::TestApp, filter: &str, expected: &[i64]) {
    let list = app
        .request("GET", &format!("/api/movies?sort=id,asc&{filter}"), None)
        .await;
    assert_eq!(list.status, StatusCode::OK, "{filter}");
    assert_eq!(list.ids(), expected, "{filter}");

    let count = app
        .request("GET", &format!("/api/movies/count?{filter}"), None)
        .await;
    assert_eq!(count.status, StatusCode::OK, "{filter}");
    assert_eq!(count.body, json!(expected.len()), "{filter}");
}

/// The filter matches nothing on either endpoint.
async fn assert_not_found(app: &helpers::TestApp, filter: &str) {
    let list = app
        .request("GET", &format!("/api/movies?{filter}"), None)
        .await;
    assert_eq!(list.status, StatusCode::OK, "{filter}");
    assert_eq!(list.body, json!([]), "{filter}");

    let count = app
        .request("GET", &format!("/api/movies/count?{filter}"), None)
        .await;
    assert_eq!(count.body, json!(0), "{filter}");
}

async fn default_app() -> (helpers::TestApp, i64) {
    let app = helpers::TestApp::new();
    let id = app
        .create_movie(Some(DEFAULT_NAME), Some(DEFAULT_CATEGORY), Some(DEFAULT_RATING))
        .await;
    (app, id)
}

#[tokio::test]
async fn test_get_movies_by_id_filtering() {
    let (app, id) = default_app().await;

    assert_found(&app, &format!("id.equals={id}"), &[id]).await;
    assert_not_found(&app, &format!("id.notEquals={id}")).await;
    assert_found(&app, &format!("id.greaterThanOrEqual={id}"), &[id]).await;
    assert_found(&app, &format!("id.lessThanOrEqual={id}"), &[id]).await;
    assert_not_found(&app, &format!("id.lessThan={id}")).await;
    assert_not_found(&app, &format!("id.greaterThan={id}")).await;
}

#[tokio::test]
async fn test_get_movies_by_name_equals() {
    let (app, id) = default_app().await;

    assert_found(&app, &format!("name.equals={DEFAULT_NAME}"), &[id]).await;
    assert_not_found(&app, &format!("name.equals={UPDATED_NAME}")).await;
    assert_found(&app, &format!("name.notEquals={UPDATED_NAME}"), &[id]).await;
    assert_not_found(&app, &format!("name.notEquals={DEFAULT_NAME}")).await;
}

#[tokio::test]
async fn test_get_movies_by_name_in() {
    let (app, id) = default_app().await;

    assert_found(&app, &format!("name.in={DEFAULT_NAME},{UPDATED_NAME}"), &[id]).await;
    assert_not_found(&app, &format!("name.in={UPDATED_NAME}")).await;
    assert_found(&app, &format!("name.notIn={UPDATED_NAME}"), &[id]).await;
    assert_not_found(&app, &format!("name.notIn={DEFAULT_NAME},{UPDATED_NAME}")).await;
}

#[tokio::test]
async fn test_get_movies_by_name_specified() {
    let (app, id) = default_app().await;
    let unnamed = app.create_movie(None, Some(DEFAULT_CATEGORY), None).await;

    assert_found(&app, "name.specified=true", &[id]).await;
    assert_found(&app, "name.specified=false", &[unnamed]).await;
    assert_found(&app, "rating.specified=false", &[unnamed]).await;
}

#[tokio::test]
async fn test_get_movies_by_name_contains() {
    let (app, id) = default_app().await;

    assert_found(&app, &format!("name.contains={DEFAULT_NAME}"), &[id]).await;
    assert_found(&app, "name.contains=aaa", &[id]).await;
    assert_not_found(&app, &format!("name.contains={UPDATED_NAME}")).await;
    assert_not_found(&app, &format!("name.doesNotContain={DEFAULT_NAME}")).await;
    assert_found(&app, &format!("name.doesNotContain={UPDATED_NAME}"), &[id]).await;
}

#[tokio::test]
async fn test_contains_treats_wildcards_literally() {
    let app = helpers::TestApp::new();
    let percent = app.create_movie(Some("100% Love"), None, None).await;
    app.create_movie(Some("1000 Ways"), None, None).await;

    assert_found(&app, "name.contains=0%25", &[percent]).await;
    assert_not_found(&app, "name.contains=_%20W").await;
}

#[tokio::test]
async fn test_get_movies_by_category_filtering() {
    let (app, id) = default_app().await;

    assert_found(&app, &format!("category.equals={DEFAULT_CATEGORY}"), &[id]).await;
    assert_not_found(&app, &format!("category.equals={UPDATED_CATEGORY}")).await;
    assert_found(&app, &format!("category.in={DEFAULT_CATEGORY},{UPDATED_CATEGORY}"), &[id])
        .await;
    assert_found(&app, "category.specified=true", &[id]).await;
    assert_not_found(&app, "category.specified=false").await;
    assert_not_found(&app, &format!("category.doesNotContain={DEFAULT_CATEGORY}")).await;
}

#[tokio::test]
async fn test_get_movies_by_rating_filtering() {
    let (app, id) = default_app().await;

    assert_found(&app, &format!("rating.equals={DEFAULT_RATING}"), &[id]).await;
    assert_not_found(&app, &format!("rating.equals={UPDATED_RATING}")).await;
    assert_found(&app, &format!("rating.in={DEFAULT_RATING},{UPDATED_RATING}"), &[id]).await;
    assert_found(&app, &format!("rating.greaterThanOrEqual={DEFAULT_RATING}"), &[id]).await;
    assert_not_found(&app, &format!("rating.greaterThanOrEqual={UPDATED_RATING}")).await;
    assert_found(&app, &format!("rating.lessThanOrEqual={DEFAULT_RATING}"), &[id]).await;
    assert_not_found(&app, "rating.lessThanOrEqual=0.5").await;
    assert_not_found(&app, &format!("rating.lessThan={DEFAULT_RATING}")).await;
    assert_found(&app, &format!("rating.lessThan={UPDATED_RATING}"), &[id]).await;
    assert_not_found(&app, &format!("rating.greaterThan={DEFAULT_RATING}")).await;
    assert_found(&app, "rating.greaterThan=0.5", &[id]).await;
}

#[tokio::test]
async fn test_filters_are_conjoined() {
    let app = helpers::TestApp::new();
    let drama = app.create_movie(Some("Heat"), Some("Drama"), Some(4.0)).await;
    app.create_movie(Some("Alien"), Some("Horror"), Some(4.5)).await;
    app.create_movie(Some("Cube"), Some("Drama"), Some(2.0)).await;

    assert_found(&app, "category.equals=Drama&rating.greaterThan=3", &[drama]).await;
    assert_found(
        &app,
        "category.equals=Drama&rating.greaterThan=3&distinct=true",
        &[drama],
    )
    .await;
    assert_not_found(&app, "name.equals=Heat&name.equals=Cube&category.notEquals=Drama").await;
}

#[tokio::test]
async fn test_list_pages_with_filters() {
    let app = helpers::TestApp::new();
    let mut ids = Vec::new();
    for rating in [1.0, 2.0, 3.0, 4.0, 5.0] {
        ids.push(app.create_movie(Some("Movie"), Some("Drama"), Some(rating)).await);
    }

    let response = app
        .request(
            "GET",
            "/api/movies?rating.greaterThan=1&sort=rating,desc&page=1&size=2",
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.ids(), vec![ids[2], ids[1]]);
    assert_eq!(response.header("x-total-count"), Some("4"));
    let link = response.header("link").expect("link header");
    assert!(link.contains("rating.greaterThan=1"));
    assert!(link.contains("page=0&size=2>; rel=\"prev\""));
    assert!(!link.contains("rel=\"next\""));
}

#[tokio::test]
async fn test_out_of_range_page_is_rejected() {
    let (app, _) = default_app().await;

    let response = app
        .request("GET", &format!("/api/movies?page={}", u64::MAX), None)
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let far = app
        .request("GET", "/api/movies?page=1000000&size=20", None)
        .await;
    assert_eq!(far.status, StatusCode::OK);
    assert_eq!(far.body, json!([]));
    assert_eq!(far.header("x-total-count"), Some("1"));
}

#[tokio::test]
async fn test_invalid_criteria_are_rejected() {
    let (app, _) = default_app().await;

    for filter in [
        "name.greaterThan=A",
        "rating.contains=1",
        "rating.equals=high",
        "rating.lessThan=NaN",
        "rating.greaterThan=inf",
        "id.in=1,x",
        "name.specified=maybe",
        "distinct=sometimes",
    ] {
        let list = app
            .request("GET", &format!("/api/movies?{filter}"), None)
            .await;
        assert_eq!(list.status, StatusCode::BAD_REQUEST, "{filter}");

        let count = app
            .request("GET", &format!("/api/movies/count?{filter}"), None)
            .await;
        assert_eq!(count.status, StatusCode::BAD_REQUEST, "{filter}");
    }
}

#[tokio::test]
async fn test_unknown_parameters_are_ignored() {
    let (app, id) = default_app().await;

    assert_found(&app, "director.equals=Nolan&cacheBuster=1", &[id]).await;
}

#[tokio::test]
async fn test_unknown_sort_property_is_rejected() {
    let (app, _) = default_app().await;

    let response = app.request("GET", "/api/movies?sort=director,asc", None).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}
