//! Signed, expiring admin session tokens (HS256 JWT).
//!
//! The payload is readable by anyone; integrity and expiry are what the
//! signature protects.

use chrono::{DateTime, Duration, SubsecRound, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::entities::AdminRole;

/// Claims carried by a session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    #[serde(rename = "sub")]
    pub admin_id: String,
    pub role: AdminRole,
    #[serde(rename = "iat", with = "chrono::serde::ts_seconds")]
    pub issued_at: DateTime<Utc>,
    #[serde(rename = "exp", with = "chrono::serde::ts_seconds")]
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("token is malformed")]
    Malformed,

    #[error("token signature mismatch")]
    BadSignature,

    #[error("token has expired")]
    Expired,

    #[error("token was issued in the future")]
    IssuedInFuture,

    #[error("token could not be encoded: {0}")]
    Encoding(String),
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(e: jsonwebtoken::errors::Error) -> Self {
        match e.kind() {
            ErrorKind::ExpiredSignature => TokenError::Expired,
            ErrorKind::InvalidSignature => TokenError::BadSignature,
            _ => TokenError::Malformed,
        }
    }
}

/// Issues and verifies session tokens with a shared HS256 secret.
#[derive(Clone)]
pub struct TokenSigner {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl TokenSigner {
    pub fn new(secret: impl AsRef<[u8]>, ttl: Duration) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_ref()),
            decoding_key: DecodingKey::from_secret(secret.as_ref()),
            validation,
            ttl,
        }
    }

    /// Builds claims for `admin_id` valid from `now` for the configured TTL.
    pub fn claims_for(&self, admin_id: &str, role: AdminRole, now: DateTime<Utc>) -> SessionClaims {
        let now = now.trunc_subsecs(0);
        SessionClaims {
            admin_id: admin_id.to_string(),
            role,
            issued_at: now,
            expires_at: now + self.ttl,
        }
    }

    pub fn sign(&self, claims: &SessionClaims) -> Result<String, TokenError> {
        jsonwebtoken::encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .map_err(|e| TokenError::Encoding(e.to_string()))
    }

    /// Verifies signature and expiry, then rejects tokens issued after `now`.
    pub fn verify(&self, token: &str, now: DateTime<Utc>) -> Result<SessionClaims, TokenError> {
        let claims =
            jsonwebtoken::decode::<SessionClaims>(token, &self.decoding_key, &self.validation)?
                .claims;

        if now.trunc_subsecs(0) < claims.issued_at {
            return Err(TokenError::IssuedInFuture);
        }

        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::Engine as _;
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;

    fn signer() -> TokenSigner {
        TokenSigner::new("test-signing-secret", Duration::hours(1))
    }

    #[test]
    fn test_sign_and_verify() {
        let signer = signer();
        let now = Utc::now();
        let claims = signer.claims_for("admin-1", AdminRole::SuperAdmin, now);

        let token = signer.sign(&claims).unwrap();
        let verified = signer.verify(&token, now).unwrap();

        assert_eq!(verified, claims);
        assert_eq!(token.split('.').count(), 3);
    }

    #[test]
    fn test_expired_token_rejected() {
        let signer = signer();
        let issued = Utc::now() - Duration::hours(2);
        let token = signer
            .sign(&signer.claims_for("admin-1", AdminRole::Admin, issued))
            .unwrap();

        assert_eq!(signer.verify(&token, Utc::now()), Err(TokenError::Expired));
    }

    #[test]
    fn test_future_token_rejected() {
        let signer = signer();
        let issued = Utc::now() + Duration::minutes(10);
        let token = signer
            .sign(&signer.claims_for("admin-1", AdminRole::Admin, issued))
            .unwrap();

        assert_eq!(
            signer.verify(&token, Utc::now()),
            Err(TokenError::IssuedInFuture)
        );
    }

    #[test]
    fn test_tampered_payload_rejected() {
        let signer = signer();
        let now = Utc::now();
        let token = signer
            .sign(&signer.claims_for("admin-1", AdminRole::Admin, now))
            .unwrap();
        let parts: Vec<&str> = token.split('.').collect();

        let forged_claims = signer.claims_for("admin-1", AdminRole::SuperAdmin, now);
        let forged_payload = URL_SAFE_NO_PAD.encode(serde_json::to_vec(&forged_claims).unwrap());
        let forged = format!("{}.{}.{}", parts[0], forged_payload, parts[2]);

        assert_eq!(signer.verify(&forged, now), Err(TokenError::BadSignature));
    }

    #[test]
    fn test_other_secret_rejected() {
        let now = Utc::now();
        let a = TokenSigner::new("secret-a", Duration::hours(1));
        let b = TokenSigner::new("secret-b", Duration::hours(1));

        let token = a.sign(&a.claims_for("admin-1", AdminRole::Admin, now)).unwrap();
        assert_eq!(b.verify(&token, now), Err(TokenError::BadSignature));
    }

    #[test]
    fn test_garbage_rejected() {
        let signer = signer();
        let blob = URL_SAFE_NO_PAD.encode(br#"{"adminId":"x","role":"super_admin","timestamp":1}"#);

        assert_eq!(signer.verify(&blob, Utc::now()), Err(TokenError::Malformed));
        assert_eq!(signer.verify("not.a.jwt", Utc::now()), Err(TokenError::Malformed));
    }
}
