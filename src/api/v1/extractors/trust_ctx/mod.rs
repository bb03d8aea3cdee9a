/*!
 * Trust-decision extractor
 *
 * Responsibility:
 * - resolver middleware が extensions に入れた TrustDecision を handler に渡す
 * - HTTP / axum 依存はここに閉じ込める (型定義は services::auth 側)
 *
 * Public API:
 * - TrustCtx
 */

mod core;

pub use core::TrustCtx;
