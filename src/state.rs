/*
 * Responsibility
 * - Router に紐づける共有コンテキスト (AppState)
 * - Clone 前提で持つ (内部は Arc/Clone cheap)
 */
use std::sync::Arc;

use crate::services::{auth::TokenVerifier, media::store::MediaStore};

#[derive(Clone)]
pub struct AppState {
    pub verifier: Arc<TokenVerifier>,
    pub media: Arc<dyn MediaStore>,
}

impl AppState {
    pub fn new(verifier: Arc<TokenVerifier>, media: Arc<dyn MediaStore>) -> Self {
        Self { verifier, media }
    }
}
