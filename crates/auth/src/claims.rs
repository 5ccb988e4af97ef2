use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use thiserror::Error;

use fieldops_core::{TenantId, UserId};

use crate::Role;

/// JWT claims model for staff sessions (transport-agnostic).
///
/// A principal authenticates with exactly one role. A token whose role string
/// is not a known [`Role`] does not decode, so it is rejected as invalid
/// rather than mapped to some default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JwtClaims {
    /// Subject / principal identifier.
    pub sub: UserId,

    /// Tenant context for the token.
    pub tenant_id: TenantId,

    /// RBAC role within the tenant context.
    pub role: Role,

    /// Issued-at timestamp.
    pub issued_at: DateTime<Utc>,

    /// Expiration timestamp.
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenValidationError {
    #[error("token has expired")]
    Expired,

    #[error("token not yet valid (issued_at is in the future)")]
    NotYetValid,

    #[error("invalid token time window (expires_at <= issued_at)")]
    InvalidTimeWindow,

    #[error("invalid token: {0}")]
    Invalid(String),
}

/// Deterministically validate a token's time window.
pub fn validate_window(
    issued_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
    now: DateTime<Utc>,
) -> Result<(), TokenValidationError> {
    if expires_at <= issued_at {
        return Err(TokenValidationError::InvalidTimeWindow);
    }
    if now < issued_at {
        return Err(TokenValidationError::NotYetValid);
    }
    if now >= expires_at {
        return Err(TokenValidationError::Expired);
    }
    Ok(())
}

/// Validate staff claims once the token has been decoded.
pub fn validate_claims(claims: &JwtClaims, now: DateTime<Utc>) -> Result<(), TokenValidationError> {
    validate_window(claims.issued_at, claims.expires_at, now)
}

/// Verifies a bearer token and yields the staff claims it carries.
pub trait JwtValidator: Send + Sync {
    fn validate(&self, token: &str, now: DateTime<Utc>) -> Result<JwtClaims, TokenValidationError>;
}

/// HS256 shared-secret validator.
#[derive(Clone)]
pub struct Hs256JwtValidator {
    key: DecodingKey,
}

impl Hs256JwtValidator {
    pub fn new(secret: impl AsRef<[u8]>) -> Self {
        Self {
            key: DecodingKey::from_secret(secret.as_ref()),
        }
    }
}

impl JwtValidator for Hs256JwtValidator {
    fn validate(&self, token: &str, now: DateTime<Utc>) -> Result<JwtClaims, TokenValidationError> {
        let claims: JwtClaims = decode_hs256(token, &self.key)?;
        validate_claims(&claims, now)?;
        Ok(claims)
    }
}

/// Decode and verify the signature of an HS256 token.
///
/// Expiry is carried in our own `expires_at` claim and checked by the
/// callers, so the registered `exp` claim is neither required nor checked.
pub(crate) fn decode_hs256<T: DeserializeOwned>(
    token: &str,
    key: &DecodingKey,
) -> Result<T, TokenValidationError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.required_spec_claims.clear();
    validation.validate_exp = false;

    decode::<T>(token, key, &validation)
        .map(|data| data.claims)
        .map_err(|e| TokenValidationError::Invalid(e.to_string()))
}
