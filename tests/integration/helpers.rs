use async_trait::async_trait;
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use bytes::Bytes;
use seva_gallery::{
    application::{
        auth::use_case::AuthUseCase, media::use_case::MediaUseCase,
        social::use_case::SocialUseCase,
    },
    config::Config,
    domain::{
        auth::{
            entity::{AuthSession, AuthUser},
            provider::AuthProvider,
        },
        errors::DomainError,
        media::{
            entity::{Bucket, FileType, MediaItem},
            repository::MediaRepository,
        },
        social::{
            comment::{Comment, NewComment},
            like::{Like, LikeIdentity},
            repository::SocialRepository,
        },
    },
    infrastructure::{
        auth::local_admin_provider::LocalAdminAuthProvider,
        storage::traits::StorageService,
        throttle::{redis_throttle::RedisThrottle, traits::SubmitThrottle},
    },
    presentation::http::{
        routes::{create_router, with_http_layers},
        state::AppState,
    },
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::{
    collections::HashSet,
    io::Cursor,
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
};
use tower::ServiceExt;
use uuid::Uuid;

pub const ADMIN_EMAIL: &str = "admin@example.com";
pub const ADMIN_PASSWORD: &str = "AdminPassword123!";
const STORAGE_BASE: &str = "https://storage.test/storage/v1/object/public";

type MediaTable = Arc<Mutex<Vec<MediaItem>>>;

/// Media table kept in insertion order.
#[derive(Clone, Default)]
pub struct InMemoryMediaRepository {
    rows: MediaTable,
}

#[async_trait]
impl MediaRepository for InMemoryMediaRepository {
    async fn find_all(&self, file_type: Option<FileType>) -> Result<Vec<MediaItem>, DomainError> {
        let rows = self.rows.lock().unwrap();
        let mut items: Vec<MediaItem> = rows
            .iter()
            .rev()
            .filter(|m| file_type.is_none_or(|ft| m.file_type == ft))
            .cloned()
            .collect();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(items)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<MediaItem>, DomainError> {
        Ok(self.rows.lock().unwrap().iter().find(|m| m.id == id).cloned())
    }

    async fn create(&self, item: &MediaItem) -> Result<MediaItem, DomainError> {
        self.rows.lock().unwrap().push(item.clone());
        Ok(item.clone())
    }

    async fn update(&self, item: &MediaItem) -> Result<MediaItem, DomainError> {
        let mut rows = self.rows.lock().unwrap();
        let row = rows
            .iter_mut()
            .find(|m| m.id == item.id)
            .ok_or_else(|| DomainError::NotFound(format!("media {}", item.id)))?;
        *row = item.clone();
        Ok(item.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<MediaItem, DomainError> {
        let mut rows = self.rows.lock().unwrap();
        let index = rows
            .iter()
            .position(|m| m.id == id)
            .ok_or_else(|| DomainError::NotFound(format!("media {}", id)))?;
        Ok(rows.remove(index))
    }

    async fn ping(&self) -> Result<(), DomainError> {
        Ok(())
    }
}

/// Likes and comments that reference the shared media table like foreign keys do.
#[derive(Default)]
pub struct InMemorySocialRepository {
    media: MediaTable,
    likes: Mutex<Vec<Like>>,
    comments: Mutex<Vec<Comment>>,
}

impl InMemorySocialRepository {
    fn ensure_media(&self, media_id: Uuid) -> Result<(), DomainError> {
        if self.media.lock().unwrap().iter().any(|m| m.id == media_id) {
            Ok(())
        } else {
            Err(DomainError::NotFound(format!("media {}", media_id)))
        }
    }
}

#[async_trait]
impl SocialRepository for InMemorySocialRepository {
    async fn like(&self, media_id: Uuid, identity: LikeIdentity) -> Result<Like, DomainError> {
        self.ensure_media(media_id)?;
        let mut likes = self.likes.lock().unwrap();
        if let Some(existing) = likes
            .iter()
            .find(|l| l.media_id == media_id && identity.owns(l))
        {
            return Ok(existing.clone());
        }
        let like = Like {
            id: Uuid::now_v7(),
            media_id,
            user_id: identity.user_id(),
            visitor_id: identity.visitor_id(),
            created_at: chrono::Utc::now(),
        };
        likes.push(like.clone());
        Ok(like)
    }

    async fn unlike(&self, media_id: Uuid, identity: LikeIdentity) -> Result<bool, DomainError> {
        let mut likes = self.likes.lock().unwrap();
        let before = likes.len();
        likes.retain(|l| !(l.media_id == media_id && identity.owns(l)));
        Ok(likes.len() < before)
    }

    async fn count_likes(&self, media_id: Uuid) -> Result<i64, DomainError> {
        let likes = self.likes.lock().unwrap();
        Ok(likes.iter().filter(|l| l.media_id == media_id).count() as i64)
    }

    async fn has_liked(&self, media_id: Uuid, identity: LikeIdentity) -> Result<bool, DomainError> {
        let likes = self.likes.lock().unwrap();
        Ok(likes
            .iter()
            .any(|l| l.media_id == media_id && identity.owns(l)))
    }

    async fn add_comment(&self, comment: NewComment) -> Result<Comment, DomainError> {
        self.ensure_media(comment.media_id)?;
        let stored = Comment {
            id: Uuid::now_v7(),
            media_id: comment.media_id,
            user_id: comment.user_id,
            name: comment.name,
            content: comment.content,
            created_at: chrono::Utc::now(),
        };
        self.comments.lock().unwrap().push(stored.clone());
        Ok(stored)
    }

    async fn comments_for(&self, media_id: Uuid) -> Result<Vec<Comment>, DomainError> {
        let comments = self.comments.lock().unwrap();
        Ok(comments
            .iter()
            .filter(|c| c.media_id == media_id)
            .cloned()
            .collect())
    }
}

/// Bucket storage that keeps objects in memory.
#[derive(Clone, Default)]
pub struct TestStorage {
    objects: Arc<Mutex<Vec<(Bucket, String, String)>>>,
}

impl TestStorage {
    /// `(bucket, name, content type)` of every stored object.
    pub fn objects(&self) -> Vec<(Bucket, String, String)> {
        self.objects.lock().unwrap().clone()
    }
}

#[async_trait]
impl StorageService for TestStorage {
    async fn upload(
        &self,
        bucket: Bucket,
        name: &str,
        _data: Bytes,
        content_type: &str,
    ) -> anyhow::Result<String> {
        let mut objects = self.objects.lock().unwrap();
        if objects.iter().any(|(b, n, _)| *b == bucket && n == name) {
            anyhow::bail!("object {}/{} already exists", bucket, name);
        }
        objects.push((bucket, name.to_string(), content_type.to_string()));
        Ok(self.public_url(bucket, name))
    }

    async fn delete(&self, bucket: Bucket, name: &str) -> anyhow::Result<()> {
        self.objects
            .lock()
            .unwrap()
            .retain(|(b, n, _)| !(*b == bucket && n == name));
        Ok(())
    }

    fn public_url(&self, bucket: Bucket, name: &str) -> String {
        format!("{}/{}/{}", STORAGE_BASE, bucket, name)
    }
}

/// Local admin provider that counts how often sign-in reaches it.
pub struct CountingAuthProvider {
    inner: LocalAdminAuthProvider,
    sign_ins: Arc<AtomicUsize>,
}

#[async_trait]
impl AuthProvider for CountingAuthProvider {
    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthSession, DomainError> {
        self.sign_ins.fetch_add(1, Ordering::SeqCst);
        self.inner.sign_in_with_password(email, password).await
    }

    async fn sign_out(&self, access_token: &str) -> Result<(), DomainError> {
        self.inner.sign_out(access_token).await
    }

    async fn get_user(&self, access_token: &str) -> Result<Option<AuthUser>, DomainError> {
        self.inner.get_user(access_token).await
    }
}

/// Lets each key through once, like a cooldown that never expires.
#[derive(Default)]
pub struct OnceThrottle {
    seen: Mutex<HashSet<String>>,
}

#[async_trait]
impl SubmitThrottle for OnceThrottle {
    async fn try_acquire(&self, key: &str) -> bool {
        self.seen.lock().unwrap().insert(key.to_string())
    }
}

pub struct TestApp {
    pub app: Router,
    pub storage: TestStorage,
    pub sign_ins: Arc<AtomicUsize>,
}

fn build_config(admin_password_hash: String) -> Config {
    Config {
        database_url: "postgres://unused".to_string(),
        database_max_connections: 1,
        supabase_url: "https://storage.test".to_string(),
        supabase_anon_key: "test-anon-key".to_string(),
        admin_email: ADMIN_EMAIL.to_string(),
        admin_password_hash: Some(admin_password_hash),
        jwt_secret: Some("test-jwt-secret".to_string()),
        redis_url: None,
        host: "127.0.0.1".to_string(),
        port: 0,
        max_upload_bytes: 10 * 1024 * 1024,
        remote_timeout_seconds: 5,
        comment_cooldown_seconds: 0,
        allowed_origins: Vec::new(),
        run_migrations: false,
        ignore_missing_migrations: true,
    }
}

pub fn spawn_app() -> TestApp {
    spawn_app_with_throttle(Arc::new(RedisThrottle::disabled()))
}

pub fn spawn_app_with_throttle(throttle: Arc<dyn SubmitThrottle>) -> TestApp {
    let hash = bcrypt::hash(ADMIN_PASSWORD, 4).expect("failed to hash admin password");
    let config = build_config(hash.clone());

    let media_repo = InMemoryMediaRepository::default();
    let social_repo = InMemorySocialRepository {
        media: media_repo.rows.clone(),
        ..Default::default()
    };
    let storage = TestStorage::default();
    let sign_ins = Arc::new(AtomicUsize::new(0));
    let provider = CountingAuthProvider {
        inner: LocalAdminAuthProvider::new(ADMIN_EMAIL, hash, "test-jwt-secret".to_string()),
        sign_ins: sign_ins.clone(),
    };

    let state = AppState {
        media: Arc::new(MediaUseCase::new(
            Box::new(media_repo),
            Arc::new(storage.clone()),
        )),
        social: Arc::new(SocialUseCase::new(Box::new(social_repo))),
        auth: Arc::new(AuthUseCase::new(Arc::new(provider), &config.admin_email)),
        throttle,
        config: config.clone(),
    };

    TestApp {
        app: with_http_layers(create_router(state), &config),
        storage,
        sign_ins,
    }
}

pub async fn send(app: &Router, req: Request<Body>) -> axum::response::Response {
    app.clone().oneshot(req).await.expect("request failed")
}

pub async fn read_json<T: DeserializeOwned>(res: axum::response::Response) -> T {
    let bytes = to_bytes(res.into_body(), usize::MAX)
        .await
        .expect("failed to read body");
    serde_json::from_slice(&bytes).expect("failed to parse json")
}

pub async fn read_text(res: axum::response::Response) -> String {
    let bytes = to_bytes(res.into_body(), usize::MAX)
        .await
        .expect("failed to read body");
    String::from_utf8(bytes.to_vec()).expect("invalid utf8")
}

pub async fn expect_status(
    res: axum::response::Response,
    expected: StatusCode,
) -> axum::response::Response {
    let actual = res.status();
    if actual == expected {
        return res;
    }

    let body = read_text(res).await;
    panic!(
        "HTTP status mismatch. Expected {}, got {}. Response body: {}",
        expected, actual, body
    );
}

/// A cookie-only request from the browser holding `visitor`.
pub fn visitor_request(method: &str, uri: &str, visitor: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::COOKIE, format!("visitor_id={}", visitor))
        .body(Body::empty())
        .expect("failed to build request")
}

pub fn get(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::empty()).expect("failed to build request")
}

pub fn json_request(method: &str, uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder
        .body(Body::from(body.to_string()))
        .expect("failed to build request")
}

pub fn empty_request(method: &str, uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::empty()).expect("failed to build request")
}

pub async fn admin_token(app: &Router) -> String {
    let req = json_request(
        "POST",
        "/api/v1/auth/login",
        None,
        serde_json::json!({ "email": ADMIN_EMAIL, "password": ADMIN_PASSWORD }),
    );
    let res = expect_status(send(app, req).await, StatusCode::OK).await;
    let body: Value = read_json(res).await;
    body["token"].as_str().expect("missing token").to_string()
}

/// Creates a text post through the admin API and returns its id.
pub async fn create_text_post(app: &Router, token: &str, title: &str) -> String {
    let req = json_request(
        "POST",
        "/api/v1/admin/media",
        Some(token),
        serde_json::json!({ "title": title, "description": "संदेश", "file_type": "text" }),
    );
    let res = expect_status(send(app, req).await, StatusCode::CREATED).await;
    let body: Value = read_json(res).await;
    body["id"].as_str().expect("missing media id").to_string()
}

pub fn tiny_png_bytes() -> Vec<u8> {
    let raw = vec![
        255, 153, 51, 255, 255, 255, 255, 255, 19, 136, 8, 255, 0, 0, 128, 255,
    ];
    let image = image::RgbaImage::from_raw(2, 2, raw).expect("failed to create image");
    let mut bytes = Vec::new();
    image::DynamicImage::ImageRgba8(image)
        .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
        .expect("failed to encode png");
    bytes
}

/// A file part for [`multipart_body`]: file name, content type, bytes.
pub struct FilePart<'a> {
    pub file_name: &'a str,
    pub content_type: &'a str,
    pub data: &'a [u8],
}

pub fn multipart_body(fields: &[(&str, &str)], file: Option<FilePart<'_>>) -> (String, Vec<u8>) {
    let boundary = format!("----gallery-boundary-{}", Uuid::now_v7());
    let mut body = Vec::new();

    for (name, value) in fields {
        body.extend_from_slice(format!("--{}\r\n", boundary).as_bytes());
        body.extend_from_slice(
            format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", name).as_bytes(),
        );
        body.extend_from_slice(value.as_bytes());
        body.extend_from_slice(b"\r\n");
    }

    if let Some(file) = file {
        body.extend_from_slice(format!("--{}\r\n", boundary).as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"file\"; filename=\"{}\"\r\n",
                file.file_name
            )
            .as_bytes(),
        );
        body.extend_from_slice(format!("Content-Type: {}\r\n\r\n", file.content_type).as_bytes());
        body.extend_from_slice(file.data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", boundary).as_bytes());

    (boundary, body)
}

pub fn multipart_request(uri: &str, token: &str, boundary: &str, body: Vec<u8>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", boundary),
        )
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::from(body))
        .expect("failed to build multipart request")
}
