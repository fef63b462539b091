//! The Inkcap server binary: assembles the application from the adapters
//! selected at compile time.

use std::sync::Arc;

use secrecy::ExposeSecret;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_adapters::{cors_policy, AppState};
use auth_adapters::Argon2PasswordHasher;
use configs::Config;
use services::{AuthService, BookmarkService, PostService};

#[cfg(feature = "auth-jwt")]
use auth_adapters::JwtTokenIssuer;
#[cfg(feature = "media-local")]
use storage_adapters::media::LocalMediaStore;
#[cfg(feature = "db-mongo")]
use storage_adapters::mongo::{connect, MongoPostStore, MongoUserStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "inkcap=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load()?;
    tracing::info!("configuration loaded");

    #[cfg(feature = "db-mongo")]
    let (users, posts) = {
        let db = connect(config.database.uri.expose_secret(), &config.database.name).await?;
        let users = Arc::new(MongoUserStore::new_with(&db).await?);
        let posts = Arc::new(MongoPostStore::new_with(&db).await?);
        tracing::info!(database = %config.database.name, "database ready");
        (users, posts)
    };

    #[cfg(feature = "media-local")]
    let media = {
        let store = LocalMediaStore::new(config.media.root.clone());
        store.prepare().await?;
        Arc::new(store)
    };

    let hasher = Arc::new(Argon2PasswordHasher);
    #[cfg(feature = "auth-jwt")]
    let tokens = Arc::new(JwtTokenIssuer::new(
        &config.auth.jwt_secret,
        config.auth.token_ttl_hours,
    ));

    let state = AppState {
        auth: AuthService::new(users.clone(), hasher, tokens),
        posts: PostService::new(posts.clone(), users.clone(), media),
        bookmarks: BookmarkService::new(users, posts),
    };

    let cors = cors_policy(&config.server.client_origin)?;
    let app = api_adapters::router(
        state,
        cors,
        &config.media.root,
        config.media.max_upload_bytes,
    );

    let addr = format!("{}:{}", config.server.host, config.server.port);
    tracing::info!(%addr, "starting server");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
        tracing::info!("received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
        tracing::info!("received terminate signal, shutting down");
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
