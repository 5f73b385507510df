//! Bearer-token claims decoding.
//!
//! The storefront only needs the token's expiry. Signatures are the auth
//! service's concern - the client holds no key - so decoding runs with
//! signature validation disabled and the session manager enforces `exp`
//! against the wall clock itself.

use chrono::{DateTime, TimeZone, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::Deserialize;

/// Claims of interest in the auth service's access tokens.
#[derive(Debug, Deserialize)]
struct Claims {
    #[serde(default)]
    exp: Option<i64>,
}

/// Extract the expiry instant from a bearer token.
///
/// Returns `None` for a malformed token or one without a usable `exp`
/// claim; callers treat that identically to an already-expired token.
pub(crate) fn expiry(token: &str) -> Option<DateTime<Utc>> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.validate_aud = false;
    validation.required_spec_claims.clear();

    let data = decode::<Claims>(token, &DecodingKey::from_secret(&[]), &validation).ok()?;
    data.claims
        .exp
        .and_then(|exp| Utc.timestamp_opt(exp, 0).single())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use jsonwebtoken::{EncodingKey, Header, encode};
    use serde_json::json;

    fn token_with_claims(claims: &serde_json::Value) -> String {
        encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap()
    }

    #[test]
    fn test_expiry_reads_exp_claim() {
        let exp = Utc::now().timestamp() + 600;
        let token = token_with_claims(&json!({ "sub": "jane@example.com", "exp": exp }));
        let parsed = expiry(&token).unwrap();
        assert_eq!(parsed.timestamp(), exp);
    }

    #[test]
    fn test_expiry_of_expired_token_still_decodes() {
        // Expired tokens must decode so the caller can observe the past exp.
        let exp = Utc::now().timestamp() - 600;
        let token = token_with_claims(&json!({ "exp": exp }));
        let parsed = expiry(&token).unwrap();
        assert!(parsed < Utc::now());
    }

    #[test]
    fn test_missing_exp_is_none() {
        let token = token_with_claims(&json!({ "sub": "jane@example.com" }));
        assert!(expiry(&token).is_none());
    }

    #[test]
    fn test_malformed_token_is_none() {
        assert!(expiry("not-a-jwt").is_none());
        assert!(expiry("").is_none());
        assert!(expiry("a.b").is_none());
    }
}
