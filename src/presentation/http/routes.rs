use super::{
    handlers::{admin, auth, health, media, pages, preferences, social},
    middleware::admin::require_admin,
    middleware::request_id::request_id_middleware,
    middleware::visitor::visitor_middleware,
    state::AppState,
};
use crate::config::Config;
use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post, put},
};
use http::{HeaderValue, Method, header};
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};

pub fn create_router(state: AppState) -> Router {
    let admin_routes = Router::new()
        .route("/api/v1/admin/dashboard", get(admin::dashboard))
        .route("/api/v1/admin/media", post(admin::create_media))
        .route("/api/v1/admin/media/upload", post(admin::upload_and_publish))
        .route(
            "/api/v1/admin/media/{id}",
            put(admin::update_media).delete(admin::delete_media),
        )
        .route("/api/v1/admin/uploads", post(admin::upload_file))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_admin));

    // Anonymous likes are tied to the visitor cookie.
    let like_routes = Router::new()
        .route(
            "/api/v1/media/{id}/likes",
            get(social::get_likes)
                .post(social::like_media)
                .delete(social::unlike_media),
        )
        .route("/api/v1/media/{id}/likes/toggle", post(social::toggle_like))
        .route("/api/v1/pages/media/{id}", get(pages::media_detail))
        .route_layer(middleware::from_fn(visitor_middleware));

    Router::new()
        // Health
        .route("/health", get(health::health_check))
        // Media
        .route("/api/v1/media", get(media::list_media))
        .route("/api/v1/media/{id}", get(media::get_media))
        // Social
        .route(
            "/api/v1/media/{id}/comments",
            get(social::get_comments).post(social::add_comment),
        )
        // Pages
        .route("/api/v1/pages/home", get(pages::home))
        // Preferences
        .route("/api/v1/quotes/daily", get(preferences::daily_quote))
        .route(
            "/api/v1/preferences/theme",
            get(preferences::get_theme).put(preferences::set_theme),
        )
        .route(
            "/api/v1/preferences/theme/toggle",
            post(preferences::toggle_theme),
        )
        // Auth
        .route("/api/v1/auth/login", post(auth::login))
        .route("/api/v1/auth/logout", post(auth::logout))
        .route("/api/v1/auth/me", get(auth::me))
        .merge(like_routes)
        // Admin (protected by bearer middleware)
        .merge(admin_routes)
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(request_id_middleware))
        .with_state(state)
}

/// Security headers, CORS and the request body cap shared by every route.
///
/// Debug builds accept any origin; release builds only `ALLOWED_ORIGINS`.
pub fn with_http_layers(router: Router, config: &Config) -> Router {
    let allowed_methods = [
        Method::GET,
        Method::POST,
        Method::PUT,
        Method::DELETE,
        Method::OPTIONS,
    ];
    let cors = if cfg!(debug_assertions) {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins = config
            .allowed_origins
            .iter()
            .filter_map(|o| HeaderValue::from_str(o).ok())
            .collect::<Vec<_>>();
        CorsLayer::new().allow_origin(AllowOrigin::list(origins))
    }
    .allow_methods(allowed_methods)
    .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT])
    .max_age(Duration::from_secs(3600));

    // Uploads are bounded by the tower-http limit, not axum's 2 MB default.
    // CorsLayer needs a `Default` response body, so the limit wraps it.
    router.layer(DefaultBodyLimit::disable()).layer(
        ServiceBuilder::new()
            .layer(SetResponseHeaderLayer::overriding(
                header::X_CONTENT_TYPE_OPTIONS,
                HeaderValue::from_static("nosniff"),
            ))
            .layer(SetResponseHeaderLayer::overriding(
                header::X_FRAME_OPTIONS,
                HeaderValue::from_static("DENY"),
            ))
            .layer(SetResponseHeaderLayer::overriding(
                header::REFERRER_POLICY,
                HeaderValue::from_static("strict-origin-when-cross-origin"),
            ))
            .layer(RequestBodyLimitLayer::new(config.max_upload_bytes))
            .layer(cors),
    )
}
