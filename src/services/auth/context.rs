/*
 * Responsibility
 * - リクエスト単位の信頼判定 (TrustDecision) の型定義
 * - resolver middleware が生成し、request extensions 経由で handler に渡る
 */

/// Per-request trust decision.
///
/// Created once per inbound request by the resolver, read-only for the rest of
/// the request, discarded at the end. Never partially valid: verification
/// either fully succeeds or the request is anonymous, so the authenticated
/// variant is the only place a subject id can exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrustDecision {
    Anonymous,
    Authenticated { subject_id: String },
}

impl TrustDecision {
    pub fn authenticated(subject_id: impl Into<String>) -> Self {
        Self::Authenticated {
            subject_id: subject_id.into(),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated { .. })
    }

    /// Stable subject identifier; `None` for anonymous requests.
    pub fn subject_id(&self) -> Option<&str> {
        match self {
            Self::Authenticated { subject_id } => Some(subject_id),
            Self::Anonymous => None,
        }
    }
}
