//! Integration tests for movie CRUD endpoints.

mod helpers;

use http::StatusCode;
use serde_json::json;

const DEFAULT_NAME: &str = "AAAAAAAAAA";
const UPDATED_NAME: &str = "BBBBBBBBBB";
const DEFAULT_CATEGORY: &str = "AAAAAAAAAA";
const UPDATED_CATEGORY: &str = "BBBBBBBBBB";
const DEFAULT_RATING: f64 = 1.0;
const UPDATED_RATING: f64 = 2.0;

#[tokio::test]
async fn test_create_movie() {
    let app = helpers::TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/movies",
            Some(json!({
                "name": DEFAULT_NAME,
                "category": DEFAULT_CATEGORY,
                "rating": DEFAULT_RATING,
            })),
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    let id = response.body["id"].as_i64().expect("id");
    assert_eq!(response.header("location"), Some(format!("/api/movies/{id}").as_str()));
    assert_eq!(
        response.header("x-moviehubapp-alert"),
        Some("moviehubApp.movies.created")
    );
    assert_eq!(response.header("x-moviehubapp-params"), Some(id.to_string().as_str()));
    assert_eq!(response.body["name"], DEFAULT_NAME);
    assert_eq!(response.body["rating"], DEFAULT_RATING);

    let count = app.request("GET", "/api/movies/count", None).await;
    assert_eq!(count.body, json!(1));
}

#[tokio::test]
async fn test_create_movie_with_existing_id() {
    let app = helpers::TestApp::new();

    let response = app
        .request("POST", "/api/movies", Some(json!({ "id": 1, "name": DEFAULT_NAME })))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["errorKey"], "idexists");
    assert_eq!(response.body["entityName"], "movies");
    assert_eq!(response.header("x-moviehubapp-error"), Some("error.idexists"));

    let count = app.request("GET", "/api/movies/count", None).await;
    assert_eq!(count.body, json!(0));
}

#[tokio::test]
async fn test_get_all_movies() {
    let app = helpers::TestApp::new();
    let id = app
        .create_movie(Some(DEFAULT_NAME), Some(DEFAULT_CATEGORY), Some(DEFAULT_RATING))
        .await;

    let response = app.request("GET", "/api/movies?sort=id,desc", None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.ids(), vec![id]);
    assert_eq!(response.body[0]["category"], DEFAULT_CATEGORY);
    assert_eq!(response.header("x-total-count"), Some("1"));
    assert!(response.header("link").is_some_and(|l| l.contains("rel=\"first\"")));
}

#[tokio::test]
async fn test_get_movie() {
    let app = helpers::TestApp::new();
    let id = app
        .create_movie(Some(DEFAULT_NAME), Some(DEFAULT_CATEGORY), Some(DEFAULT_RATING))
        .await;

    let response = app.request("GET", &format!("/api/movies/{id}"), None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.body,
        json!({
            "id": id,
            "name": DEFAULT_NAME,
            "category": DEFAULT_CATEGORY,
            "rating": DEFAULT_RATING,
        })
    );
}

#[tokio::test]
async fn test_get_non_existing_movie() {
    let app = helpers::TestApp::new();

    let response = app
        .request("GET", &format!("/api/movies/{}", i64::MAX), None)
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_put_existing_movie() {
    let app = helpers::TestApp::new();
    let id = app
        .create_movie(Some(DEFAULT_NAME), Some(DEFAULT_CATEGORY), Some(DEFAULT_RATING))
        .await;

    let response = app
        .request(
            "PUT",
            &format!("/api/movies/{id}"),
            Some(json!({
                "id": id,
                "name": UPDATED_NAME,
                "category": UPDATED_CATEGORY,
                "rating": UPDATED_RATING,
            })),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.header("x-moviehubapp-alert"),
        Some("moviehubApp.movies.updated")
    );

    let stored = app.request("GET", &format!("/api/movies/{id}"), None).await;
    assert_eq!(stored.body["name"], UPDATED_NAME);
    assert_eq!(stored.body["category"], UPDATED_CATEGORY);
    assert_eq!(stored.body["rating"], UPDATED_RATING);
}

#[tokio::test]
async fn test_put_rejects_bad_ids() {
    let app = helpers::TestApp::new();
    let id = app.create_movie(Some(DEFAULT_NAME), None, None).await;
    let missing = id + 1000;

    let cases = [
        (format!("/api/movies/{id}"), json!({ "name": UPDATED_NAME }), "idnull"),
        (
            format!("/api/movies/{id}"),
            json!({ "id": missing, "name": UPDATED_NAME }),
            "idinvalid",
        ),
        (
            format!("/api/movies/{missing}"),
            json!({ "id": missing, "name": UPDATED_NAME }),
            "idnotfound",
        ),
    ];

    for (path, body, key) in cases {
        for method in ["PUT", "PATCH"] {
            let response = app.request(method, &path, Some(body.clone())).await;
            assert_eq!(response.status, StatusCode::BAD_REQUEST, "{method} {key}");
            assert_eq!(response.body["errorKey"], key, "{method} {key}");
        }
    }

    let stored = app.request("GET", &format!("/api/movies/{id}"), None).await;
    assert_eq!(stored.body["name"], DEFAULT_NAME);
}

#[tokio::test]
async fn test_update_without_id_segment_is_not_allowed() {
    let app = helpers::TestApp::new();

    for method in ["PUT", "PATCH"] {
        let response = app
            .request(method, "/api/movies", Some(json!({ "id": 1, "name": UPDATED_NAME })))
            .await;
        assert_eq!(response.status, StatusCode::METHOD_NOT_ALLOWED, "{method}");
    }
}

#[tokio::test]
async fn test_partial_update_keeps_absent_fields() {
    let app = helpers::TestApp::new();
    let id = app
        .create_movie(Some(DEFAULT_NAME), Some(DEFAULT_CATEGORY), Some(DEFAULT_RATING))
        .await;

    let response = app
        .request_with_type(
            "PATCH",
            &format!("/api/movies/{id}"),
            Some(json!({ "id": id, "category": UPDATED_CATEGORY })),
            "application/merge-patch+json",
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.body,
        json!({
            "id": id,
            "name": DEFAULT_NAME,
            "category": UPDATED_CATEGORY,
            "rating": DEFAULT_RATING,
        })
    );
}

#[tokio::test]
async fn test_full_update_with_patch() {
    let app = helpers::TestApp::new();
    let id = app
        .create_movie(Some(DEFAULT_NAME), Some(DEFAULT_CATEGORY), Some(DEFAULT_RATING))
        .await;

    let response = app
        .request(
            "PATCH",
            &format!("/api/movies/{id}"),
            Some(json!({
                "id": id,
                "name": UPDATED_NAME,
                "category": UPDATED_CATEGORY,
                "rating": UPDATED_RATING,
            })),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["name"], UPDATED_NAME);
    assert_eq!(response.body["rating"], UPDATED_RATING);
}

#[tokio::test]
async fn test_delete_movie_is_idempotent() {
    let app = helpers::TestApp::new();
    let id = app.create_movie(Some(DEFAULT_NAME), None, None).await;

    let response = app.request("DELETE", &format!("/api/movies/{id}"), None).await;
    assert_eq!(response.status, StatusCode::NO_CONTENT);
    assert_eq!(
        response.header("x-moviehubapp-alert"),
        Some("moviehubApp.movies.deleted")
    );

    let again = app.request("DELETE", &format!("/api/movies/{id}"), None).await;
    assert_eq!(again.status, StatusCode::NO_CONTENT);

    let gone = app.request("GET", &format!("/api/movies/{id}"), None).await;
    assert_eq!(gone.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_search_by_keyword() {
    let app = helpers::TestApp::new();
    let alien = app.create_movie(Some("Alien"), Some("Horror"), None).await;
    let heat = app.create_movie(Some("Heat"), Some("Crime"), None).await;
    app.create_movie(Some("Malice"), Some("Thriller"), None).await;

    let response = app.request("GET", "/api/movies/search?keyword=H", None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.ids(), vec![alien, heat]);
}

#[tokio::test]
async fn test_health() {
    let app = helpers::TestApp::new();

    let response = app.request("GET", "/api/health", None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "UP");
}
