/*
 * Responsibility
 * - v1 extractors の公開インターフェース
 */
pub mod trust_ctx;

pub use trust_ctx::TrustCtx;
