/*
 * Responsibility
 * - v1 の URL 構造を定義
 * - /health, /post-image
 * - trust resolver middleware の適用範囲は app.rs 側で決める
 */
use axum::{
    Router,
    routing::{get, put},
};

use crate::api::v1::handlers::{health::health, media::put_post_image};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/post-image", put(put_post_image))
}
