//! Integration tests for the movie endpoints

mod common;

use axum::http::{Method, StatusCode};
use serde_json::json;

use common::{
    broken_movie_stores, build_test_app, get, issue_key, mission_impossible,
    panicking_movie_stores, request, send, state_over, test_app,
};

#[tokio::test]
async fn create_movie_then_duplicate_is_rejected() {
    let app = test_app();
    let (public, _) = issue_key(&app, "http://localhost:4600").await;

    let created = send(
        &app,
        request(Method::POST, "/movies", Some(mission_impossible()), Some(&public)),
    )
    .await;
    assert_eq!(created.status, StatusCode::CREATED);

    let body = created.json();
    assert_eq!(body["title"], "Mission Impossible");
    assert_eq!(body["subtitle"], "Beyond Missions");
    assert_eq!(body["price"], 345.0);
    assert!(body["id"].as_i64().is_some());

    let duplicate = send(
        &app,
        request(Method::POST, "/movies", Some(mission_impossible()), Some(&public)),
    )
    .await;
    assert_eq!(duplicate.status, StatusCode::BAD_REQUEST);
    assert_eq!(duplicate.json()["error"]["message"], "Movie already exists!");
}

#[tokio::test]
async fn created_movie_is_listed_and_retrievable() {
    let app = test_app();
    let (public, _) = issue_key(&app, "catalogue.example").await;

    let created = send(
        &app,
        request(Method::POST, "/movies", Some(mission_impossible()), Some(&public)),
    )
    .await
    .json();
    let id = created["id"].as_i64().unwrap();

    let listed = get(&app, "/movies").await;
    assert_eq!(listed.status, StatusCode::OK);
    let movies = listed.json();
    assert!(movies
        .as_array()
        .unwrap()
        .iter()
        .any(|movie| movie["title"] == "Mission Impossible"));

    let root = get(&app, "/").await;
    assert_eq!(root.status, StatusCode::OK);
    assert_eq!(root.json(), movies);

    let fetched = get(&app, &format!("/movies/{}", id)).await;
    assert_eq!(fetched.status, StatusCode::OK);
    assert_eq!(fetched.json(), created);
}

#[tokio::test]
async fn list_by_title_returns_at_most_one_movie() {
    let app = test_app();
    let (public, _) = issue_key(&app, "catalogue.example").await;

    for subtitle in ["Beyond Missions", "Fallout"] {
        let mut movie = mission_impossible();
        movie["subtitle"] = json!(subtitle);
        let response = send(&app, request(Method::POST, "/movies", Some(movie), Some(&public))).await;
        assert_eq!(response.status, StatusCode::CREATED);
    }

    let found = get(&app, "/movies?title=Mission%20Impossible").await.json();
    let found = found.as_array().unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0]["subtitle"], "Beyond Missions");

    let missing = get(&app, "/movies?title=Heat").await.json();
    assert!(missing.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn list_pagination() {
    let app = test_app();
    let (public, _) = issue_key(&app, "catalogue.example").await;

    for title in ["Alien", "Brazil", "Casablanca"] {
        let movie = json!({ "title": title, "price": 9.99 });
        send(&app, request(Method::POST, "/movies", Some(movie), Some(&public))).await;
    }

    let page = get(&app, "/movies?offset=1&limit=1").await.json();
    let page = page.as_array().unwrap();
    assert_eq!(page.len(), 1);
    assert_eq!(page[0]["title"], "Brazil");

    let bad = get(&app, "/movies?limit=many").await;
    assert_eq!(bad.status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn unknown_movie_is_not_found() {
    let app = test_app();
    let (public, _) = issue_key(&app, "catalogue.example").await;

    assert_eq!(get(&app, "/movies/999").await.status, StatusCode::NOT_FOUND);

    let deleted = send(&app, request(Method::DELETE, "/movies/999", None, Some(&public))).await;
    assert_eq!(deleted.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn non_numeric_movie_id_is_unprocessable() {
    let response = get(&test_app(), "/movies/abc").await;
    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn update_movie_replaces_values() {
    let app = test_app();
    let (public, _) = issue_key(&app, "catalogue.example").await;

    let id = send(
        &app,
        request(Method::POST, "/movies", Some(mission_impossible()), Some(&public)),
    )
    .await
    .json()["id"]
        .as_i64()
        .unwrap();

    let replacement = json!({
        "title": "Mission Impossible",
        "subtitle": "Fallout",
        "price": 12.5
    });
    let updated = send(
        &app,
        request(
            Method::PUT,
            &format!("/movies/{}", id),
            Some(replacement),
            Some(&public),
        ),
    )
    .await;
    assert_eq!(updated.status, StatusCode::OK);

    let body = updated.json();
    assert_eq!(body["id"], id);
    assert_eq!(body["subtitle"], "Fallout");
    assert_eq!(body["price"], 12.5);
    assert!(body["description"].is_null());
}

#[tokio::test]
async fn update_unknown_movie_is_bad_request() {
    let app = test_app();
    let (public, _) = issue_key(&app, "catalogue.example").await;

    let response = send(
        &app,
        request(
            Method::PUT,
            "/movies/999",
            Some(mission_impossible()),
            Some(&public),
        ),
    )
    .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn delete_movie() {
    let app = test_app();
    let (public, _) = issue_key(&app, "catalogue.example").await;

    let id = send(
        &app,
        request(Method::POST, "/movies", Some(mission_impossible()), Some(&public)),
    )
    .await
    .json()["id"]
        .as_i64()
        .unwrap();

    let uri = format!("/movies/{}", id);
    let deleted = send(&app, request(Method::DELETE, &uri, None, Some(&public))).await;
    assert_eq!(deleted.status, StatusCode::OK);
    assert_eq!(deleted.json(), json!("Movie deleted successfully!"));

    assert_eq!(get(&app, &uri).await.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn invalid_movie_body_is_unprocessable() {
    let app = test_app();
    let (public, _) = issue_key(&app, "catalogue.example").await;

    let long_title = json!({ "title": "t".repeat(101), "price": 1.0 });
    let response = send(&app, request(Method::POST, "/movies", Some(long_title), Some(&public))).await;
    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);

    let negative_price = json!({ "title": "Heat", "price": -1.0 });
    let response = send(
        &app,
        request(Method::POST, "/movies", Some(negative_price), Some(&public)),
    )
    .await;
    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn writes_without_authorization_are_forbidden() {
    let app = test_app();

    let missing = send(
        &app,
        request(Method::POST, "/movies", Some(mission_impossible()), None),
    )
    .await;
    assert_eq!(missing.status, StatusCode::FORBIDDEN);
    assert_eq!(missing.json()["error"]["message"], "No authorization found");

    let invalid = send(
        &app,
        request(
            Method::POST,
            "/movies",
            Some(mission_impossible()),
            Some("not-a-key"),
        ),
    )
    .await;
    assert_eq!(invalid.status, StatusCode::FORBIDDEN);
    assert_eq!(
        invalid.json()["error"]["message"],
        "Could not validate credentials"
    );

    assert!(get(&app, "/movies").await.json().as_array().unwrap().is_empty());
}

#[tokio::test]
async fn authorization_is_checked_before_the_record() {
    let app = test_app();

    let delete = send(&app, request(Method::DELETE, "/movies/999", None, None)).await;
    assert_eq!(delete.status, StatusCode::FORBIDDEN);

    let update = send(
        &app,
        request(Method::PUT, "/movies/999", Some(mission_impossible()), None),
    )
    .await;
    assert_eq!(update.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn storage_failure_reports_execution_failed() {
    let app = build_test_app(state_over(broken_movie_stores()));

    let response = get(&app, "/movies").await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let message = response.json()["error"]["message"].as_str().unwrap().to_string();
    assert_eq!(message, "Execution Failed: GET: /movies");
    assert!(!message.contains("connection refused"));
}

#[tokio::test]
async fn storage_failure_detail_can_be_exposed() {
    let app = build_test_app(state_over(broken_movie_stores()).with_error_details(true));

    let response = get(&app, "/movies/1").await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json()["error"]["message"],
        "Execution Failed: GET: /movies/1. Detail: connection refused"
    );
}

#[tokio::test]
async fn panic_in_storage_reports_execution_failed() {
    let app = build_test_app(state_over(panicking_movie_stores()).with_error_details(true));

    let response = get(&app, "/movies").await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json()["error"]["message"],
        "Execution Failed: GET: /movies. Detail: movie index corrupted"
    );
    assert!(response.headers.contains_key("x-request-id"));

    // The service keeps answering afterwards
    assert_eq!(get(&app, "/movies/1").await.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn empty_title_query_lists_all_movies() {
    let app = test_app();
    let (public, _) = issue_key(&app, "catalogue.example").await;

    let created = send(
        &app,
        request(Method::POST, "/movies", Some(mission_impossible()), Some(&public)),
    )
    .await;
    assert_eq!(created.status, StatusCode::CREATED);

    let listed = get(&app, "/movies?title=").await;
    assert_eq!(listed.status, StatusCode::OK);
    assert_eq!(listed.json().as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn offset_past_the_end_returns_empty_page() {
    let app = test_app();
    let (public, _) = issue_key(&app, "catalogue.example").await;
    send(
        &app,
        request(Method::POST, "/movies", Some(mission_impossible()), Some(&public)),
    )
    .await;

    let uri = format!("/movies?offset={}", usize::MAX);
    let page = get(&app, &uri).await;
    assert_eq!(page.status, StatusCode::OK);
    assert!(page.json().as_array().unwrap().is_empty());
}
