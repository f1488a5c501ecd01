//! Access-token claim inspection.
//!
//! The client never verifies signatures (the backend is the enforcement
//! point); it only reads the claims to learn who the token belongs to and
//! whether it has expired, so a stale session can be dropped before a
//! request is wasted on a guaranteed 401.

use chrono::Utc;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::{DbId, Role, Timestamp};

/// Claims carried by a portal access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject: the account's email address.
    pub sub: String,
    /// Account role.
    pub role: Role,
    /// Account id.
    pub user_id: DbId,
    /// Expiry as a Unix timestamp in seconds.
    pub exp: i64,
}

impl TokenClaims {
    /// True when the token's expiry lies at or before `now`.
    pub fn is_expired_at(&self, now: Timestamp) -> bool {
        self.exp <= now.timestamp()
    }

    /// True when the token's expiry lies at or before the current time.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }
}

/// Decode a token's claims without verifying the signature.
///
/// Expiry is NOT validated here; callers decide what to do with an
/// expired token via [`TokenClaims::is_expired`].
pub fn decode_claims(token: &str) -> Result<TokenClaims, CoreError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;

    decode::<TokenClaims>(token, &DecodingKey::from_secret(&[]), &validation)
        .map(|data| data.claims)
        .map_err(|e| CoreError::Token(e.to_string()))
}

/// True when `token` is expired or cannot be decoded at all.
///
/// An undecodable token is treated as expired: either way the session it
/// belongs to is unusable and the user must sign in again.
pub fn is_token_expired(token: &str) -> bool {
    match decode_claims(token) {
        Ok(claims) => claims.is_expired(),
        Err(_) => true,
    }
}
