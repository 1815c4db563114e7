use seva_gallery::{
    application::{
        auth::use_case::AuthUseCase, media::use_case::MediaUseCase,
        social::use_case::SocialUseCase,
    },
    config::Config,
    domain::auth::provider::AuthProvider,
    infrastructure::{
        auth::{
            local_admin_provider::LocalAdminAuthProvider,
            supabase_auth_provider::SupabaseAuthProvider,
        },
        database::pool::{create_pool, run_migrations},
        repositories::{
            sqlx_media_repository::SqlxMediaRepository,
            sqlx_social_repository::SqlxSocialRepository,
        },
        storage::supabase_storage_service::SupabaseStorageService,
        throttle::redis_throttle::RedisThrottle,
    },
    presentation::http::{
        routes::{create_router, with_http_layers},
        state::AppState,
    },
};
use std::sync::Arc;
use std::time::Duration;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| {
            tracing_subscriber::EnvFilter::try_new("info,seva_gallery=debug,tower_http=debug")
        })
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let config = Config::from_env()?;
    let db = create_pool(&config.database_url, config.database_max_connections).await?;
    if config.run_migrations {
        run_migrations(&db, config.ignore_missing_migrations).await?;
    }

    let http_client = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.remote_timeout_seconds))
        .build()?;

    let storage = Arc::new(SupabaseStorageService::new(
        http_client.clone(),
        &config.supabase_url,
        config.supabase_anon_key.clone(),
    ));

    let auth_provider: Arc<dyn AuthProvider> = match config.local_admin_credentials() {
        Some((hash, secret)) => {
            tracing::info!("Using local admin sign-in");
            Arc::new(LocalAdminAuthProvider::new(
                &config.admin_email,
                hash.to_string(),
                secret.to_string(),
            ))
        }
        None => Arc::new(SupabaseAuthProvider::new(
            http_client,
            &config.supabase_url,
            config.supabase_anon_key.clone(),
        )),
    };

    let redis = config
        .redis_url
        .as_deref()
        .map(redis::Client::open)
        .transpose()?;
    if redis.is_none() {
        tracing::warn!("REDIS_URL not set, comment debounce disabled");
    }

    let state = AppState {
        media: Arc::new(MediaUseCase::new(
            Box::new(SqlxMediaRepository::new(db.clone())),
            storage,
        )),
        social: Arc::new(SocialUseCase::new(Box::new(SqlxSocialRepository::new(db)))),
        auth: Arc::new(AuthUseCase::new(auth_provider, &config.admin_email)),
        throttle: Arc::new(RedisThrottle::new(redis, config.comment_cooldown_seconds)),
        config: config.clone(),
    };

    let app = with_http_layers(create_router(state), &config);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Gallery API listening on {}", addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Ctrl+C received, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("SIGTERM received, initiating graceful shutdown");
        }
    }
}
