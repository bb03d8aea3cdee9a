/*
 * Responsibility
 * - Bearer credential の検証 (HS256 署名 + exp/iss チェック)
 * - resolve(): Authorization ヘッダ → TrustDecision (失敗は anonymous に収束)
 */
use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use serde::Deserialize;
use thiserror::Error;

use crate::services::auth::context::TrustDecision;

// Errors returned by access-token verification + strict claim validation.
#[derive(Debug, Error)]
pub enum VerifyError {
    #[error("jwt verification failed: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),
    #[error("empty '{0}' claim")]
    EmptyClaim(&'static str),
}

/// Access token claims.
///
/// The subject identifier rides in `userId` (the issuing service's
/// convention); `sub` is not used.
#[derive(Debug, Clone, Deserialize)]
pub struct AccessClaims {
    #[serde(rename = "userId")]
    pub user_id: String,
    pub exp: u64,
}

/// Verified, application-facing view of an accepted credential.
#[derive(Debug, Clone)]
pub struct VerifiedToken {
    pub subject_id: String,
}

/// HS256 access-token verifier.
///
/// Constructed from config and injected through `AppState`; no process-wide
/// secret. Key material is intentionally not printable via Debug.
#[derive(Clone)]
pub struct TokenVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for TokenVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Do not print key material
        f.debug_struct("TokenVerifier")
            .field("validation", &self.validation)
            .finish()
    }
}

impl TokenVerifier {
    pub fn new(secret: &str, issuer: Option<&str>, leeway_seconds: u64) -> Self {
        let decoding_key = DecodingKey::from_secret(secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        if let Some(issuer) = issuer {
            validation.set_issuer(&[issuer]);
        }
        validation.leeway = leeway_seconds;

        Self {
            decoding_key,
            validation,
        }
    }

    /// Verify signature and time/issuer claims, then require a usable subject.
    ///
    /// `jsonwebtoken::Validation` already checks the signature and `exp` (and
    /// `iss` when configured); this method additionally rejects tokens whose
    /// required claims are present but empty.
    pub fn verify(&self, token: &str) -> Result<VerifiedToken, VerifyError> {
        let data =
            jsonwebtoken::decode::<AccessClaims>(token, &self.decoding_key, &self.validation)?;
        let claims = data.claims;

        if claims.user_id.trim().is_empty() {
            return Err(VerifyError::EmptyClaim("userId"));
        }
        if claims.exp == 0 {
            return Err(VerifyError::EmptyClaim("exp"));
        }

        Ok(VerifiedToken {
            subject_id: claims.user_id,
        })
    }

    /// Turn a raw `Authorization` header into a trust decision.
    ///
    /// Never fails: an absent header, a header without a second token, and
    /// every verification failure collapse into [`TrustDecision::Anonymous`].
    /// Rejecting anonymous callers is authorization, which belongs to the
    /// consumer of the decision, not to this resolver.
    pub fn resolve(&self, authorization: Option<&str>) -> TrustDecision {
        let Some(header) = authorization else {
            return TrustDecision::Anonymous;
        };

        // `Bearer <token>`: take the second whitespace-separated token.
        let Some(token) = header.split_whitespace().nth(1) else {
            return TrustDecision::Anonymous;
        };

        match self.verify(token) {
            Ok(verified) => TrustDecision::authenticated(verified.subject_id),
            Err(err) => {
                tracing::debug!(error = %err, "access token verification failed");
                TrustDecision::Anonymous
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use jsonwebtoken::{EncodingKey, Header};
    use serde_json::json;

    use super::*;

    const SECRET: &str = "test-signing-secret";

    fn sign(secret: &str, claims: &serde_json::Value) -> String {
        jsonwebtoken::encode(
            &Header::new(Algorithm::HS256),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    fn verifier() -> TokenVerifier {
        TokenVerifier::new(SECRET, None, 0)
    }

    fn future_exp() -> i64 {
        Utc::now().timestamp() + 600
    }

    #[test]
    fn missing_header_resolves_anonymous() {
        assert_eq!(verifier().resolve(None), TrustDecision::Anonymous);
    }

    #[test]
    fn header_without_token_resolves_anonymous() {
        assert_eq!(verifier().resolve(Some("Bearer")), TrustDecision::Anonymous);
        assert_eq!(verifier().resolve(Some("")), TrustDecision::Anonymous);
    }

    #[test]
    fn garbage_token_resolves_anonymous() {
        let decision = verifier().resolve(Some("Bearer not-a-jwt"));
        assert_eq!(decision, TrustDecision::Anonymous);
    }

    #[test]
    fn wrong_secret_resolves_anonymous() {
        let token = sign(
            "another-secret",
            &json!({"userId": "u42", "exp": future_exp()}),
        );
        let decision = verifier().resolve(Some(&format!("Bearer {token}")));
        assert_eq!(decision, TrustDecision::Anonymous);
    }

    #[test]
    fn expired_token_resolves_anonymous() {
        let token = sign(
            SECRET,
            &json!({"userId": "u42", "exp": Utc::now().timestamp() - 600}),
        );
        let decision = verifier().resolve(Some(&format!("Bearer {token}")));
        assert_eq!(decision, TrustDecision::Anonymous);
    }

    #[test]
    fn empty_subject_resolves_anonymous() {
        let token = sign(SECRET, &json!({"userId": "  ", "exp": future_exp()}));
        let decision = verifier().resolve(Some(&format!("Bearer {token}")));
        assert_eq!(decision, TrustDecision::Anonymous);
    }

    #[test]
    fn issuer_mismatch_resolves_anonymous() {
        let strict = TokenVerifier::new(SECRET, Some("auth.example"), 0);
        let token = sign(
            SECRET,
            &json!({"userId": "u42", "iss": "elsewhere", "exp": future_exp()}),
        );
        let decision = strict.resolve(Some(&format!("Bearer {token}")));
        assert_eq!(decision, TrustDecision::Anonymous);
    }

    #[test]
    fn valid_token_resolves_authenticated() {
        let token = sign(SECRET, &json!({"userId": "u42", "exp": future_exp()}));
        let decision = verifier().resolve(Some(&format!("Bearer {token}")));

        assert!(decision.is_authenticated());
        assert_eq!(decision.subject_id(), Some("u42"));
    }

    #[test]
    fn resolve_is_pure_for_identical_headers() {
        let token = sign(SECRET, &json!({"userId": "u42", "exp": future_exp()}));
        let header = format!("Bearer {token}");

        let v = verifier();
        assert_eq!(v.resolve(Some(&header)), v.resolve(Some(&header)));
    }
}
