//! End-to-end flows through the axum router with the in-memory store,
//! real JWT tokens, bcrypt and media files in a temporary directory.

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, HeaderMap, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

use vidtube::adapters::http::{api_router, AppState};
use vidtube::adapters::{
    BcryptPasswordHasher, InMemoryDocumentStore, JwtTokenService, LocalMediaStorage,
};

const BOUNDARY: &str = "vidtube-test-boundary";

struct TestApp {
    router: Router,
    _media: TempDir,
}

struct Reply {
    status: StatusCode,
    headers: HeaderMap,
    body: Value,
}

enum Part<'a> {
    Text(&'a str, &'a str),
    File(&'a str, &'a str, &'a [u8]),
}

fn multipart(parts: &[Part<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        match part {
            Part::Text(name, value) => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n{}\r\n", name, value)
                        .as_bytes(),
                );
            }
            Part::File(name, file_name, bytes) => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n\
                         Content-Type: application/octet-stream\r\n\r\n",
                        name, file_name
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(bytes);
                body.extend_from_slice(b"\r\n");
            }
        }
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
    body
}

impl TestApp {
    fn new() -> Self {
        let media = TempDir::new().unwrap();
        let tokens = Arc::new(JwtTokenService::new(b"access-secret", b"refresh-secret", 900, 86_400));
        let state = AppState {
            store: Arc::new(InMemoryDocumentStore::new()),
            session_validator: tokens.clone(),
            token_issuer: tokens,
            password_hasher: Arc::new(BcryptPasswordHasher::new(4)),
            media: Arc::new(LocalMediaStorage::new(media.path(), "/media")),
            secure_cookies: false,
        };
        Self {
            router: api_router(state),
            _media: media,
        }
    }

    async fn send(&self, request: Request<Body>) -> Reply {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        Reply {
            status,
            headers,
            body,
        }
    }

    async fn call(&self, method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> Reply {
        let mut request = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            request = request.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let body = match body {
            Some(value) => {
                request = request.header(header::CONTENT_TYPE, "application/json");
                Body::from(value.to_string())
            }
            None => Body::empty(),
        };
        self.send(request.body(body).unwrap()).await
    }

    async fn upload(&self, method: Method, uri: &str, token: Option<&str>, parts: &[Part<'_>]) -> Reply {
        let mut request = Request::builder().method(method).uri(uri).header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        );
        if let Some(token) = token {
            request = request.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        self.send(request.body(Body::from(multipart(parts))).unwrap()).await
    }

    async fn register(&self, username: &str) -> Reply {
        let email = format!("{}@example.com", username);
        self.upload(
            Method::POST,
            "/api/v1/users/register",
            None,
            &[
                Part::Text("fullName", "Test User"),
                Part::Text("email", &email),
                Part::Text("username", username),
                Part::Text("password", "hunter22"),
                Part::File("avatar", "me.png", b"PNGDATA"),
            ],
        )
        .await
    }

    /// Registers and logs in; returns (user id, access token).
    async fn sign_up(&self, username: &str) -> (String, String) {
        let reply = self.register(username).await;
        assert_eq!(reply.status, StatusCode::CREATED, "{}", reply.body);
        let login = self
            .call(
                Method::POST,
                "/api/v1/users/login",
                None,
                Some(json!({ "username": username, "password": "hunter22" })),
            )
            .await;
        assert_eq!(login.status, StatusCode::OK, "{}", login.body);
        (
            reply.body["data"]["_id"].as_str().unwrap().to_string(),
            login.body["data"]["accessToken"].as_str().unwrap().to_string(),
        )
    }

    async fn publish(&self, token: &str, title: &str) -> String {
        let reply = self
            .upload(
                Method::POST,
                "/api/v1/videos",
                Some(token),
                &[
                    Part::Text("title", title),
                    Part::Text("description", "a video"),
                    Part::Text("duration", "42.5"),
                    Part::File("videoFile", "clip.mp4", b"MP4DATA"),
                    Part::File("thumbnail", "thumb.jpg", b"JPGDATA"),
                ],
            )
            .await;
        assert_eq!(reply.status, StatusCode::CREATED, "{}", reply.body);
        reply.body["data"]["_id"].as_str().unwrap().to_string()
    }
}

fn set_cookies(headers: &HeaderMap) -> Vec<String> {
    headers
        .get_all(header::SET_COOKIE)
        .iter()
        .map(|v| v.to_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn healthcheck_reports_ok() {
    let app = TestApp::new();
    let reply = app.call(Method::GET, "/api/v1/healthcheck", None, None).await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.body["success"], json!(true));
    assert_eq!(reply.body["data"]["status"], json!("OK"));
}

#[tokio::test]
async fn registration_login_and_current_user() {
    let app = TestApp::new();
    let registered = app.register("Ana").await;
    assert_eq!(registered.status, StatusCode::CREATED);
    assert_eq!(registered.body["statusCode"], json!(201));
    let user = &registered.body["data"];
    assert_eq!(user["username"], json!("ana"));
    assert!(user["avatar"].as_str().unwrap().starts_with("/media/"));
    assert!(user.get("password").is_none());
    assert!(user.get("refreshToken").is_none());

    let login = app
        .call(
            Method::POST,
            "/api/v1/users/login",
            None,
            Some(json!({ "email": "ANA@example.com", "password": "hunter22" })),
        )
        .await;
    assert_eq!(login.status, StatusCode::OK);
    let cookies = set_cookies(&login.headers);
    assert!(cookies.iter().any(|c| c.starts_with("accessToken=") && c.contains("HttpOnly")));
    assert!(cookies.iter().any(|c| c.starts_with("refreshToken=")));
    let token = login.body["data"]["accessToken"].as_str().unwrap();

    let me = app
        .call(Method::GET, "/api/v1/users/current-user", Some(token), None)
        .await;
    assert_eq!(me.status, StatusCode::OK);
    assert_eq!(me.body["data"]["email"], json!("ana@example.com"));
    assert!(me.body["data"].get("password").is_none());
}

#[tokio::test]
async fn registration_rejects_duplicates_and_missing_avatar() {
    let app = TestApp::new();
    assert_eq!(app.register("ana").await.status, StatusCode::CREATED);

    let duplicate = app.register("ana").await;
    assert_eq!(duplicate.status, StatusCode::CONFLICT);
    assert_eq!(duplicate.body["success"], json!(false));

    let no_avatar = app
        .upload(
            Method::POST,
            "/api/v1/users/register",
            None,
            &[
                Part::Text("fullName", "Bo"),
                Part::Text("email", "bo@example.com"),
                Part::Text("username", "bo"),
                Part::Text("password", "pw"),
            ],
        )
        .await;
    assert_eq!(no_avatar.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn wrong_password_is_unauthorized() {
    let app = TestApp::new();
    app.register("ana").await;
    let reply = app
        .call(
            Method::POST,
            "/api/v1/users/login",
            None,
            Some(json!({ "username": "ana", "password": "nope" })),
        )
        .await;
    assert_eq!(reply.status, StatusCode::UNAUTHORIZED);
    assert_eq!(reply.body["message"], json!("Invalid user credentials"));
}

#[tokio::test]
async fn refresh_token_rotates_and_cannot_be_reused() {
    let app = TestApp::new();
    app.register("ana").await;
    let login = app
        .call(
            Method::POST,
            "/api/v1/users/login",
            None,
            Some(json!({ "username": "ana", "password": "hunter22" })),
        )
        .await;
    let refresh = login.body["data"]["refreshToken"].as_str().unwrap().to_string();

    let cookie_refresh = Request::builder()
        .method(Method::POST)
        .uri("/api/v1/users/refresh-token")
        .header(header::COOKIE, format!("refreshToken={}", refresh))
        .body(Body::empty())
        .unwrap();
    let rotated = app.send(cookie_refresh).await;
    assert_eq!(rotated.status, StatusCode::OK, "{}", rotated.body);
    assert_ne!(rotated.body["data"]["refreshToken"], json!(refresh));

    let reused = app
        .call(
            Method::POST,
            "/api/v1/users/refresh-token",
            None,
            Some(json!({ "refreshToken": refresh })),
        )
        .await;
    assert_eq!(reused.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn logout_clears_cookies_and_refresh_token() {
    let app = TestApp::new();
    app.register("ana").await;
    let login = app
        .call(
            Method::POST,
            "/api/v1/users/login",
            None,
            Some(json!({ "username": "ana", "password": "hunter22" })),
        )
        .await;
    let token = login.body["data"]["accessToken"].as_str().unwrap();
    let refresh = login.body["data"]["refreshToken"].clone();

    let logout = app.call(Method::POST, "/api/v1/users/logout", Some(token), None).await;
    assert_eq!(logout.status, StatusCode::OK);
    assert!(set_cookies(&logout.headers).iter().all(|c| c.contains("Max-Age=0")));

    let refreshed = app
        .call(
            Method::POST,
            "/api/v1/users/refresh-token",
            None,
            Some(json!({ "refreshToken": refresh })),
        )
        .await;
    assert_eq!(refreshed.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn protected_routes_require_a_token() {
    let app = TestApp::new();
    let reply = app.call(Method::GET, "/api/v1/users/current-user", None, None).await;
    assert_eq!(reply.status, StatusCode::UNAUTHORIZED);
    assert_eq!(reply.body["statusCode"], json!(401));
    assert_eq!(reply.body["errors"], json!([]));

    let forged = app
        .call(Method::GET, "/api/v1/users/current-user", Some("not-a-jwt"), None)
        .await;
    assert_eq!(forged.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn stale_cookie_does_not_block_login() {
    let app = TestApp::new();
    app.register("ana").await;
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/v1/users/login")
        .header(header::COOKIE, "accessToken=expired.or.garbage")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(json!({ "username": "ana", "password": "hunter22" }).to_string()))
        .unwrap();
    assert_eq!(app.send(request).await.status, StatusCode::OK);
}

#[tokio::test]
async fn video_lifecycle_with_views_likes_and_history() {
    let app = TestApp::new();
    let (_, owner) = app.sign_up("maker").await;
    let (_, viewer) = app.sign_up("viewer").await;
    let video = app.publish(&owner, "First").await;
    app.publish(&owner, "Second").await;

    let list = app.call(Method::GET, "/api/v1/videos?page=1&limit=1", None, None).await;
    assert_eq!(list.status, StatusCode::OK);
    let page = &list.body["data"];
    assert_eq!(page["totalItems"], json!(2));
    assert_eq!(page["totalPages"], json!(2));
    assert_eq!(page["hasNext"], json!(true));
    assert_eq!(page["items"][0]["owner"]["username"], json!("maker"));
    assert!(page["items"][0]["owner"].get("password").is_none());

    let like = app
        .call(Method::POST, &format!("/api/v1/likes/toggle/v/{}", video), Some(&viewer), None)
        .await;
    assert_eq!(like.status, StatusCode::OK);
    assert_eq!(like.body["data"]["isLiked"], json!(true));

    let watched = app
        .call(Method::GET, &format!("/api/v1/videos/{}", video), Some(&viewer), None)
        .await;
    assert_eq!(watched.status, StatusCode::OK, "{}", watched.body);
    let detail = &watched.body["data"];
    assert_eq!(detail["views"], json!(1));
    assert_eq!(detail["likesCount"], json!(1));
    assert_eq!(detail["isLiked"], json!(true));
    assert_eq!(detail["duration"], json!(42.5));

    let history = app
        .call(Method::GET, "/api/v1/users/history", Some(&viewer), None)
        .await;
    assert_eq!(history.status, StatusCode::OK);
    assert_eq!(history.body["data"][0]["_id"], json!(video));

    let liked = app.call(Method::GET, "/api/v1/likes/videos", Some(&viewer), None).await;
    assert_eq!(liked.body["data"]["totalItems"], json!(1));
}

#[tokio::test]
async fn only_the_owner_may_change_a_video() {
    let app = TestApp::new();
    let (_, owner) = app.sign_up("maker").await;
    let (_, other) = app.sign_up("other").await;
    let video = app.publish(&owner, "Mine").await;
    let uri = format!("/api/v1/videos/toggle/publish/{}", video);

    let denied = app.call(Method::PATCH, &uri, Some(&other), None).await;
    assert_eq!(denied.status, StatusCode::FORBIDDEN);

    let toggled = app.call(Method::PATCH, &uri, Some(&owner), None).await;
    assert_eq!(toggled.status, StatusCode::OK);
    assert_eq!(toggled.body["data"]["isPublished"], json!(false));

    // unpublished videos are hidden from everyone else
    let hidden = app
        .call(Method::GET, &format!("/api/v1/videos/{}", video), Some(&other), None)
        .await;
    assert_eq!(hidden.status, StatusCode::NOT_FOUND);

    let deleted = app
        .call(Method::DELETE, &format!("/api/v1/videos/{}", video), Some(&owner), None)
        .await;
    assert_eq!(deleted.status, StatusCode::OK);
}

#[tokio::test]
async fn comments_are_paginated_with_author_summaries() {
    let app = TestApp::new();
    let (_, owner) = app.sign_up("maker").await;
    let video = app.publish(&owner, "Talk").await;
    let uri = format!("/api/v1/comments/{}", video);

    for text in ["one", "two", "three"] {
        let reply = app
            .call(Method::POST, &uri, Some(&owner), Some(json!({ "content": text })))
            .await;
        assert_eq!(reply.status, StatusCode::CREATED);
    }
    let blank = app
        .call(Method::POST, &uri, Some(&owner), Some(json!({ "content": "  " })))
        .await;
    assert_eq!(blank.status, StatusCode::BAD_REQUEST);

    let page = app
        .call(Method::GET, &format!("{}?page=2&limit=2", uri), None, None)
        .await;
    assert_eq!(page.status, StatusCode::OK);
    assert_eq!(page.body["data"]["items"].as_array().unwrap().len(), 1);
    assert_eq!(page.body["data"]["hasPrev"], json!(true));
    let author = &page.body["data"]["items"][0]["owner"];
    assert_eq!(author["username"], json!("maker"));
    assert!(author.get("email").is_none());
}

#[tokio::test]
async fn tweets_and_ownership() {
    let app = TestApp::new();
    let empty = app.call(Method::GET, "/api/v1/tweets", None, None).await;
    assert_eq!(empty.status, StatusCode::OK);
    assert_eq!(empty.body["data"], json!([]));

    let (user_id, author) = app.sign_up("writer").await;
    let (_, other) = app.sign_up("other").await;
    let created = app
        .call(Method::POST, "/api/v1/tweets", Some(&author), Some(json!({ "content": "hello" })))
        .await;
    assert_eq!(created.status, StatusCode::CREATED);
    let tweet = created.body["data"]["_id"].as_str().unwrap().to_string();

    let denied = app
        .call(
            Method::PATCH,
            &format!("/api/v1/tweets/{}", tweet),
            Some(&other),
            Some(json!({ "content": "hijack" })),
        )
        .await;
    assert_eq!(denied.status, StatusCode::FORBIDDEN);

    let mine = app
        .call(Method::GET, &format!("/api/v1/tweets/user/{}", user_id), None, None)
        .await;
    assert_eq!(mine.body["data"][0]["content"], json!("hello"));
}

#[tokio::test]
async fn playlists_add_and_remove_videos() {
    let app = TestApp::new();
    let (user_id, owner) = app.sign_up("curator").await;
    let video = app.publish(&owner, "Track").await;

    let created = app
        .call(
            Method::POST,
            "/api/v1/playlist",
            Some(&owner),
            Some(json!({ "name": "Mix", "description": "best" })),
        )
        .await;
    assert_eq!(created.status, StatusCode::CREATED);
    let playlist = created.body["data"]["_id"].as_str().unwrap().to_string();

    let add = format!("/api/v1/playlist/add/{}/{}", video, playlist);
    assert_eq!(app.call(Method::PATCH, &add, Some(&owner), None).await.status, StatusCode::OK);
    assert_eq!(
        app.call(Method::PATCH, &add, Some(&owner), None).await.status,
        StatusCode::BAD_REQUEST
    );

    let detail = app
        .call(Method::GET, &format!("/api/v1/playlist/{}", playlist), None, None)
        .await;
    assert_eq!(detail.status, StatusCode::OK);
    assert_eq!(detail.body["data"]["totalVideos"], json!(1));
    assert_eq!(detail.body["data"]["videos"][0]["title"], json!("Track"));

    let listed = app
        .call(Method::GET, &format!("/api/v1/playlist/user/{}", user_id), None, None)
        .await;
    assert_eq!(listed.body["data"][0]["name"], json!("Mix"));

    let remove = format!("/api/v1/playlist/remove/{}/{}", video, playlist);
    assert_eq!(app.call(Method::PATCH, &remove, Some(&owner), None).await.status, StatusCode::OK);
    assert_eq!(
        app.call(Method::PATCH, &remove, Some(&owner), None).await.status,
        StatusCode::BAD_REQUEST
    );
}

#[tokio::test]
async fn subscriptions_toggle_and_show_on_channel_profile() {
    let app = TestApp::new();
    let (channel_id, _) = app.sign_up("chan").await;
    let (fan_id, fan) = app.sign_up("fan").await;
    let uri = format!("/api/v1/subscriptions/c/{}", channel_id);

    let subscribed = app.call(Method::POST, &uri, Some(&fan), None).await;
    assert_eq!(subscribed.status, StatusCode::OK);
    assert_eq!(subscribed.body["data"]["isSubscribed"], json!(true));

    let profile = app
        .call(Method::GET, "/api/v1/users/c/CHAN", Some(&fan), None)
        .await;
    assert_eq!(profile.status, StatusCode::OK);
    assert_eq!(profile.body["data"]["subscribersCount"], json!(1));
    assert_eq!(profile.body["data"]["isSubscribed"], json!(true));

    let subscribers = app.call(Method::GET, &uri, None, None).await;
    assert_eq!(subscribers.body["data"]["items"][0]["subscriber"]["username"], json!("fan"));

    let channels = app
        .call(Method::GET, &format!("/api/v1/subscriptions/u/{}", fan_id), None, None)
        .await;
    let channel = &channels.body["data"]["items"][0]["channel"];
    assert_eq!(channel["username"], json!("chan"));
    assert_eq!(channel["subscribersCount"], json!(1));

    let self_sub = app
        .call(Method::POST, &format!("/api/v1/subscriptions/c/{}", fan_id), Some(&fan), None)
        .await;
    assert_eq!(self_sub.status, StatusCode::BAD_REQUEST);

    let unsubscribed = app.call(Method::POST, &uri, Some(&fan), None).await;
    assert_eq!(unsubscribed.body["data"]["isSubscribed"], json!(false));
}

#[tokio::test]
async fn malformed_requests_are_bad_requests() {
    let app = TestApp::new();
    let (_, token) = app.sign_up("ana").await;

    let bad_id = app
        .call(Method::GET, "/api/v1/videos/not-an-id", Some(&token), None)
        .await;
    assert_eq!(bad_id.status, StatusCode::BAD_REQUEST);

    let bad_page = app.call(Method::GET, "/api/v1/videos?page=abc", None, None).await;
    assert_eq!(bad_page.status, StatusCode::BAD_REQUEST);

    let bad_json = Request::builder()
        .method(Method::POST)
        .uri("/api/v1/tweets")
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let reply = app.send(bad_json).await;
    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert_eq!(reply.body["success"], json!(false));
}

#[tokio::test]
async fn unknown_routes_use_the_error_envelope() {
    let app = TestApp::new();
    let reply = app.call(Method::GET, "/api/v1/nothing-here", None, None).await;
    assert_eq!(reply.status, StatusCode::NOT_FOUND);
    assert_eq!(reply.body["success"], json!(false));
}
