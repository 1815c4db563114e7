use super::helpers::{
    admin_token, create_text_post, empty_request, expect_status, get, json_request, read_json,
    send, spawn_app,
};
use axum::{
    body::Body,
    http::{Request, StatusCode, header},
};
use seva_gallery::domain::preferences::quote::QUOTES;
use serde_json::{Value, json};

#[tokio::test]
async fn health_reports_database_up() {
    let app = spawn_app();
    let res = expect_status(send(&app.app, get("/health", None)).await, StatusCode::OK).await;
    let body: Value = read_json(res).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["database"], "up");
}

#[tokio::test]
async fn home_page_counts_everything_but_lists_filtered() {
    let app = spawn_app();
    let token = admin_token(&app.app).await;
    create_text_post(&app.app, &token, "विचार").await;
    let req = json_request(
        "POST",
        "/api/v1/admin/media",
        Some(&token),
        json!({
            "title": "आरती",
            "file_type": "video",
            "url": "https://storage.test/storage/v1/object/public/videos/1_aarti.mp4"
        }),
    );
    expect_status(send(&app.app, req).await, StatusCode::CREATED).await;

    let res = send(&app.app, get("/api/v1/pages/home?file_type=video", None)).await;
    let page: Value = read_json(expect_status(res, StatusCode::OK).await).await;
    assert_eq!(page["filter"], "video");
    assert_eq!(page["stats"]["total"], 2);
    assert_eq!(page["stats"]["videos"], 1);
    assert_eq!(page["stats"]["texts"], 1);
    assert_eq!(page["media"].as_array().map(Vec::len), Some(1));
    assert!(page["quote"]["text"].as_str().is_some_and(|t| !t.is_empty()));
}

#[tokio::test]
async fn media_page_bundles_likes_and_comments() {
    let app = spawn_app();
    let token = admin_token(&app.app).await;
    let id = create_text_post(&app.app, &token, "सत्संग").await;

    let req = json_request(
        "POST",
        &format!("/api/v1/media/{}/comments", id),
        None,
        json!({ "content": "जय हो" }),
    );
    expect_status(send(&app.app, req).await, StatusCode::CREATED).await;
    let likes = format!("/api/v1/media/{}/likes", id);
    send(&app.app, empty_request("POST", &likes, Some(&token))).await;

    let res = send(&app.app, get(&format!("/api/v1/pages/media/{}", id), Some(&token))).await;
    let page: Value = read_json(expect_status(res, StatusCode::OK).await).await;
    assert_eq!(page["media"]["title"], "सत्संग");
    assert_eq!(page["likes"], json!({ "liked": true, "likes_count": 1 }));
    assert_eq!(page["comments"][0]["name"], "Guest");

    let res = send(
        &app.app,
        get(&format!("/api/v1/pages/media/{}", uuid::Uuid::now_v7()), None),
    )
    .await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn daily_quote_is_one_of_the_known_quotes() {
    let app = spawn_app();
    let res = send(&app.app, get("/api/v1/quotes/daily", None)).await;
    let quote: Value = read_json(expect_status(res, StatusCode::OK).await).await;
    assert!(
        QUOTES
            .iter()
            .any(|q| quote["text"] == q.text && quote["author"] == q.author)
    );
}

#[tokio::test]
async fn theme_defaults_to_light_and_toggles_through_cookie() {
    let app = spawn_app();

    let res = send(&app.app, get("/api/v1/preferences/theme", None)).await;
    let theme: Value = read_json(res).await;
    assert_eq!(theme, json!({ "theme": "light" }));

    let res = send(
        &app.app,
        empty_request("POST", "/api/v1/preferences/theme/toggle", None),
    )
    .await;
    let res = expect_status(res, StatusCode::OK).await;
    let cookie = res
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .expect("missing set-cookie")
        .to_string();
    assert!(cookie.starts_with("theme=dark;"));
    let theme: Value = read_json(res).await;
    assert_eq!(theme["theme"], "dark");

    let req = Request::builder()
        .method("POST")
        .uri("/api/v1/preferences/theme/toggle")
        .header(header::COOKIE, "theme=dark")
        .body(Body::empty())
        .expect("failed to build request");
    let theme: Value = read_json(send(&app.app, req).await).await;
    assert_eq!(theme["theme"], "light");
}

#[tokio::test]
async fn theme_can_be_set_explicitly() {
    let app = spawn_app();
    let req = json_request(
        "PUT",
        "/api/v1/preferences/theme",
        None,
        json!({ "theme": "dark" }),
    );
    let res = expect_status(send(&app.app, req).await, StatusCode::OK).await;
    let cookie = res
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    assert!(cookie.contains("theme=dark"));
    assert!(cookie.contains("Path=/"));
}

#[tokio::test]
async fn responses_carry_request_id() {
    let app = spawn_app();
    let req = Request::builder()
        .uri("/health")
        .header("x-request-id", "req-123")
        .body(Body::empty())
        .expect("failed to build request");
    let res = send(&app.app, req).await;
    assert_eq!(
        res.headers()
            .get("x-request-id")
            .and_then(|v| v.to_str().ok()),
        Some("req-123")
    );
}

#[tokio::test]
async fn responses_carry_security_headers() {
    let app = spawn_app();
    let res = send(&app.app, get("/health", None)).await;
    let headers = res.headers();
    let value = |name: header::HeaderName| headers.get(name).and_then(|v| v.to_str().ok());
    assert_eq!(value(header::X_CONTENT_TYPE_OPTIONS), Some("nosniff"));
    assert_eq!(value(header::X_FRAME_OPTIONS), Some("DENY"));
}

#[tokio::test]
async fn declared_body_over_the_upload_cap_is_refused() {
    let app = spawn_app();
    let token = admin_token(&app.app).await;
    let req = Request::builder()
        .method("POST")
        .uri("/api/v1/admin/media/upload")
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .header(header::CONTENT_TYPE, "multipart/form-data; boundary=x")
        .header(header::CONTENT_LENGTH, (11 * 1024 * 1024).to_string())
        .body(Body::from("--x--\r\n"))
        .expect("failed to build request");
    let res = send(&app.app, req).await;
    assert_eq!(res.status(), StatusCode::PAYLOAD_TOO_LARGE);
    assert!(app.storage.objects().is_empty());
}
