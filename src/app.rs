/*
 * Responsibility
 * - Config読み込み → 依存生成 → Router 組み立て
 * - Middleware の適用 (trust resolver / CORS / trace / body limit)
 * - axum::serve() で起動
 */
use std::{panic, process, sync::Arc};

use anyhow::Result;
use axum::{Router, extract::DefaultBodyLimit};
use tower_http::{services::ServeDir, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::{
    api,
    config::Config,
    middleware::{auth::trust, cors},
    services::{
        auth::TokenVerifier,
        media::store::{self, FsMediaStore},
    },
    state::AppState,
};

fn init_tracing() {
    // Prefer RUST_LOG if set; otherwise use a sensible default.
    // Ex:
    // RUST_LOG=info,feed_server=debug,tower_http=debug cargo run
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,tower_http=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn init_panic_hook(abort_on_panic: bool) {
    // Keep the default hook as a fallback (prints to stderr with location/payload).
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        // Always surface panics via tracing so they don't get "lost"
        // (stderr can be hidden depending on how the process is launched.)
        tracing::error!(?info, "panic");

        // In development, fail fast. In production, prefer the default
        // behavior and let the server keep running.
        if abort_on_panic {
            process::abort();
        } else {
            default_hook(info);
        }
    }))
}

pub async fn run() -> Result<()> {
    init_tracing();
    let config = Config::from_env()?;
    init_panic_hook(!config.app_env.is_production());

    tracing::info!(
        "starting API in {:?} mode on {}",
        config.app_env,
        config.addr
    );

    // ServeDir and FsMediaStore both expect the asset root to exist.
    tokio::fs::create_dir_all(&config.media_root).await?;

    let state = build_state(&config);
    let app = build_router(state, &config);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn build_state(config: &Config) -> AppState {
    let verifier = TokenVerifier::new(
        &config.auth_secret,
        config.auth_issuer.as_deref(),
        config.access_token_leeway_seconds,
    );
    let media = FsMediaStore::new(config.media_root.clone());

    AppState::new(Arc::new(verifier), Arc::new(media))
}

fn build_router(state: AppState, config: &Config) -> Router {
    // Trust resolution covers the API surface; static reads stay public.
    let v1 = trust::apply(api::v1::routes(), state.clone());

    let router = Router::new()
        .nest("/api/v1", v1)
        .nest_service(&format!("/{}", store::PUBLIC_PREFIX), ServeDir::new(&config.media_root))
        .layer(DefaultBodyLimit::max(config.max_upload_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    cors::apply(router, config)
}
