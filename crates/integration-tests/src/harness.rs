//! Test harness: a fully assembled router over the in-memory stores, plus
//! request-building helpers shared by the API tests.

use std::path::PathBuf;
use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use fake::faker::lorem::en::{Paragraph, Sentence};
use fake::Fake;
use secrecy::SecretString;
use tower::ServiceExt;
use uuid::Uuid;

use api_adapters::{cors_policy, AppState};
use auth_adapters::{Argon2PasswordHasher, JwtTokenIssuer};
use services::{AuthService, BookmarkService, PostService};
use storage_adapters::media::LocalMediaStore;

use crate::{MemoryPostStore, MemoryUserStore};

/// A PNG signature; format sniffing reads no further than the magic bytes.
pub const PNG_BYTES: &[u8] = &[
    0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, b'I', b'H', b'D', b'R',
];

/// A JPEG (JFIF) signature.
pub const JPEG_BYTES: &[u8] = &[
    0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, b'J', b'F', b'I', b'F', 0x00,
];

const DEFAULT_UPLOAD_CAP: usize = 10 * 1024 * 1024;

/// The application as the browser client sees it: the real router and
/// services over in-memory stores and a scratch media directory.
pub struct TestApp {
    router: Router,
    pub media_root: PathBuf,
}

impl TestApp {
    pub fn spawn() -> Self {
        Self::with_upload_cap(DEFAULT_UPLOAD_CAP)
    }

    /// An app whose body-limit layer rejects bodies above `cap` bytes.
    pub fn with_upload_cap(cap: usize) -> Self {
        let users = Arc::new(MemoryUserStore::default());
        let posts = Arc::new(MemoryPostStore::default());
        let media_root = std::env::temp_dir().join(format!("inkcap-tests-{}", Uuid::now_v7()));
        let media = Arc::new(LocalMediaStore::new(media_root.clone()));
        let hasher = Arc::new(Argon2PasswordHasher);
        let tokens = Arc::new(JwtTokenIssuer::new(
            &SecretString::from("integration-test-secret".to_string()),
            1,
        ));

        let state = AppState {
            auth: AuthService::new(users.clone(), hasher, tokens),
            posts: PostService::new(posts.clone(), users.clone(), media),
            bookmarks: BookmarkService::new(users, posts),
        };
        let cors = cors_policy("http://localhost:3000").expect("static origin parses");
        let router = api_adapters::router(state, cors, &media_root, cap);
        Self { router, media_root }
    }

    pub async fn send(&self, request: Request<Body>) -> Response {
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible")
    }

    pub async fn register(&self, username: &str, password: &str) -> Response {
        self.send(json_post(
            "/register",
            serde_json::json!({ "username": username, "password": password }),
        ))
        .await
    }

    pub async fn login(&self, username: &str, password: &str) -> Response {
        self.send(json_post(
            "/login",
            serde_json::json!({ "username": username, "password": password }),
        ))
        .await
    }

    /// Registers the user, logs in, and returns the `token` cookie pair.
    pub async fn session_cookie(&self, username: &str, password: &str) -> String {
        let response = self.register(username, password).await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let response = self.login(username, password).await;
        assert_eq!(response.status(), StatusCode::OK);
        token_cookie(&response)
    }

    /// Publishes a post with generated prose and a PNG cover derived from
    /// the title, returning the response body.
    pub async fn create_post(&self, cookie: &str, title: &str) -> serde_json::Value {
        let request = MultipartForm::new()
            .text("title", title)
            .text("summary", &Sentence(6..12).fake::<String>())
            .text("content", &Paragraph(1..3).fake::<String>())
            .file("file", "cover.png", "image/png", &cover_bytes(title))
            .into_request("POST", "/post");
        let response = self.send(authed(request, cookie)).await;
        assert_eq!(response.status(), StatusCode::CREATED);
        body_json(response).await
    }
}

/// PNG payloads unique per seed, so covers of different posts never share
/// a content-addressed file.
pub fn cover_bytes(seed: &str) -> Vec<u8> {
    let mut data = PNG_BYTES.to_vec();
    data.extend_from_slice(seed.as_bytes());
    data
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn post_empty(uri: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn delete(uri: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn json_post(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn authed(mut request: Request<Body>, cookie: &str) -> Request<Body> {
    request
        .headers_mut()
        .insert(header::COOKIE, cookie.parse().unwrap());
    request
}

/// The `token=...` pair from the response's Set-Cookie header.
pub fn token_cookie(response: &Response) -> String {
    let raw = response
        .headers()
        .get(header::SET_COOKIE)
        .expect("response sets a cookie")
        .to_str()
        .unwrap();
    raw.split(';').next().unwrap().to_string()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).expect("response body is JSON")
}

pub async fn body_text(response: Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Hand-rolled multipart/form-data encoder for request bodies.
pub struct MultipartForm {
    boundary: String,
    buf: Vec<u8>,
}

impl MultipartForm {
    pub fn new() -> Self {
        Self {
            boundary: "inkcap-test-boundary".to_string(),
            buf: Vec::new(),
        }
    }

    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.buf.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n",
                self.boundary
            )
            .as_bytes(),
        );
        self
    }

    pub fn file(mut self, name: &str, filename: &str, content_type: &str, data: &[u8]) -> Self {
        self.buf.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{name}\"; \
                 filename=\"{filename}\"\r\nContent-Type: {content_type}\r\n\r\n",
                self.boundary
            )
            .as_bytes(),
        );
        self.buf.extend_from_slice(data);
        self.buf.extend_from_slice(b"\r\n");
        self
    }

    pub fn into_request(mut self, method: &str, uri: &str) -> Request<Body> {
        self.buf
            .extend_from_slice(format!("--{}--\r\n", self.boundary).as_bytes());
        Request::builder()
            .method(method)
            .uri(uri)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={}", self.boundary),
            )
            .body(Body::from(self.buf))
            .unwrap()
    }
}

impl Default for MultipartForm {
    fn default() -> Self {
        Self::new()
    }
}
