use axum::extract::FromRequestParts;
use axum::http::{StatusCode, request::Parts};

use crate::services::auth::TrustDecision;
use crate::state::AppState;

/// Handler で、リクエストの TrustDecision を受け取るための extractor
/// middleware が TrustDecision を request.extensions() に insert 済みである前提
/// 見つからない場合は 500 を返す（anonymous 扱いにすると router の配線ミスが隠れる）
pub struct TrustCtx(pub TrustDecision);

impl FromRequestParts<AppState> for TrustCtx
where
    AppState: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<TrustDecision>()
            .cloned()
            .map(TrustCtx)
            .ok_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}
