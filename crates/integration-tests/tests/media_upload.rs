//! Cover upload validation: sniffing, content-addressed naming, and the
//! body-size cap.

use axum::http::StatusCode;

use integration_tests::{
    authed, body_json, MultipartForm, TestApp, JPEG_BYTES, PNG_BYTES,
};

fn post_with_file(filename: &str, content_type: &str, data: &[u8]) -> MultipartForm {
    MultipartForm::new()
        .text("title", "Untitled")
        .text("summary", "A summary")
        .text("content", "<p>Body</p>")
        .file("file", filename, content_type, data)
}

#[tokio::test]
async fn missing_file_field_is_rejected() {
    let app = TestApp::spawn();
    let cookie = app.session_cookie("hazel", "correct horse battery").await;

    let request = MultipartForm::new()
        .text("title", "Untitled")
        .text("summary", "A summary")
        .text("content", "<p>Body</p>")
        .into_request("POST", "/post");
    let response = app.send(authed(request, &cookie)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn non_image_payload_is_rejected() {
    let app = TestApp::spawn();
    let cookie = app.session_cookie("hazel", "correct horse battery").await;

    let request = post_with_file("notes.txt", "text/plain", b"definitely not an image")
        .into_request("POST", "/post");
    let response = app.send(authed(request, &cookie)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn cover_is_stored_under_a_content_hash() {
    let app = TestApp::spawn();
    let cookie = app.session_cookie("hazel", "correct horse battery").await;

    let request = post_with_file("cover.png", "image/png", PNG_BYTES).into_request("POST", "/post");
    let response = app.send(authed(request, &cookie)).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let created = body_json(response).await;
    let name = created["cover"].as_str().unwrap();
    let stem = name.strip_suffix(".png").expect("sniffed as PNG");
    assert_eq!(stem.len(), 64);
    assert!(stem.chars().all(|c| c.is_ascii_hexdigit()));

    let stored = std::fs::read(app.media_root.join(name)).unwrap();
    assert_eq!(stored, PNG_BYTES);
}

#[tokio::test]
async fn jpeg_covers_get_a_jpg_extension() {
    let app = TestApp::spawn();
    let cookie = app.session_cookie("hazel", "correct horse battery").await;

    let request =
        post_with_file("photo.jpeg", "image/jpeg", JPEG_BYTES).into_request("POST", "/post");
    let response = app.send(authed(request, &cookie)).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let created = body_json(response).await;
    assert!(created["cover"].as_str().unwrap().ends_with(".jpg"));
}

#[tokio::test]
async fn identical_uploads_share_one_file() {
    let app = TestApp::spawn();
    let cookie = app.session_cookie("hazel", "correct horse battery").await;

    let request = post_with_file("a.png", "image/png", PNG_BYTES).into_request("POST", "/post");
    let response = app.send(authed(request, &cookie)).await;
    let first = body_json(response).await;

    let request = post_with_file("b.png", "image/png", PNG_BYTES).into_request("POST", "/post");
    let response = app.send(authed(request, &cookie)).await;
    let second = body_json(response).await;

    assert_ne!(first["id"], second["id"]);
    assert_eq!(first["cover"], second["cover"]);
}

#[tokio::test]
async fn oversized_upload_is_rejected() {
    let app = TestApp::with_upload_cap(1024);
    let cookie = app.session_cookie("hazel", "correct horse battery").await;

    let mut oversized = PNG_BYTES.to_vec();
    oversized.resize(4096, 0);
    let request = post_with_file("big.png", "image/png", &oversized).into_request("POST", "/post");
    let response = app.send(authed(request, &cookie)).await;
    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
}
