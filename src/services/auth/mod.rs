pub mod context;
pub mod verifier;

pub use context::TrustDecision;
pub use verifier::TokenVerifier;
