//! Authorization ヘッダ → TrustDecision を extensions に入れる
//!
//! 認証失敗でもリクエストは落とさない（anonymous に収束させる）。
//! 認可はこの層では行わず、TrustDecision を読む側が判断する。

use axum::{
    Router,
    body::Body,
    extract::State,
    http::{Request, header},
    middleware::{self, Next},
    response::Response,
};

use crate::state::AppState;

/// Attach trust resolution to every route in `router`.
///
/// 例：
/// ```ignore
/// let v1 = trust::apply(api::v1::routes(), state.clone());
/// app = app.nest("/api/v1", v1);
/// ```
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    // axum 0.8 の from_fn は State extractor を受け取れないため、`from_fn_with_state` で明示的に state を渡す
    router.layer(middleware::from_fn_with_state(state, trust_middleware))
}

async fn trust_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let authorization = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok());

    let decision = state.verifier.resolve(authorization);

    // middleware → extractor への受け渡し
    req.extensions_mut().insert(decision);

    next.run(req).await
}
