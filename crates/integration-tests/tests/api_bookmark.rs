//! Bookmark toggling and the bookmarked-posts listing, including the
//! cascade when a bookmarked post is deleted.

use axum::http::StatusCode;
use uuid::Uuid;

use integration_tests::{authed, body_json, delete, get, post_empty, TestApp};

#[tokio::test]
async fn toggling_requires_a_session() {
    let app = TestApp::spawn();
    let response = app
        .send(post_empty(&format!("/bookmark/{}", Uuid::now_v7())))
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn toggle_adds_then_removes() {
    let app = TestApp::spawn();
    let author = app.session_cookie("hazel", "correct horse battery").await;
    let created = app.create_post(&author, "A walk in the woods").await;
    let id = created["id"].as_str().unwrap();

    let reader = app.session_cookie("felix", "another long password").await;
    let response = app
        .send(authed(post_empty(&format!("/bookmark/{id}")), &reader))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["bookmarked"], true);
    assert_eq!(body["bookmarks"], serde_json::json!([id]));

    // A second toggle restores the prior state.
    let response = app
        .send(authed(post_empty(&format!("/bookmark/{id}")), &reader))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["bookmarked"], false);
    assert_eq!(body["bookmarks"], serde_json::json!([]));
}

#[tokio::test]
async fn toggling_an_unknown_post_is_not_found() {
    let app = TestApp::spawn();
    let cookie = app.session_cookie("hazel", "correct horse battery").await;
    let response = app
        .send(authed(
            post_empty(&format!("/bookmark/{}", Uuid::now_v7())),
            &cookie,
        ))
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn listing_requires_a_session() {
    let app = TestApp::spawn();
    let response = app.send(get("/bookmarked-posts")).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn bookmarked_posts_carry_their_authors() {
    let app = TestApp::spawn();
    let author = app.session_cookie("hazel", "correct horse battery").await;
    let created = app.create_post(&author, "A walk in the woods").await;
    let id = created["id"].as_str().unwrap();

    let reader = app.session_cookie("felix", "another long password").await;
    app.send(authed(post_empty(&format!("/bookmark/{id}")), &reader))
        .await;

    let response = app.send(authed(get("/bookmarked-posts"), &reader)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let listed = body_json(response).await;
    let listed = listed.as_array().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0]["id"], created["id"]);
    assert_eq!(listed[0]["author"]["username"], "hazel");
}

#[tokio::test]
async fn an_empty_bookmark_set_lists_nothing() {
    let app = TestApp::spawn();
    let cookie = app.session_cookie("hazel", "correct horse battery").await;
    let response = app.send(authed(get("/bookmarked-posts"), &cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, serde_json::json!([]));
}

#[tokio::test]
async fn deleting_a_post_clears_it_from_every_bookmark_set() {
    let app = TestApp::spawn();
    let author = app.session_cookie("hazel", "correct horse battery").await;
    let created = app.create_post(&author, "A walk in the woods").await;
    let id = created["id"].as_str().unwrap();

    let reader = app.session_cookie("felix", "another long password").await;
    app.send(authed(post_empty(&format!("/bookmark/{id}")), &reader))
        .await;

    let response = app.send(authed(delete(&format!("/post/{id}")), &author)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.send(authed(get("/bookmarked-posts"), &reader)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, serde_json::json!([]));
}
