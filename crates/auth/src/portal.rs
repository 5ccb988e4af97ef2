//! Client portal identity.
//!
//! Clients reach the portal with a signed bearer token issued by the client
//! account service. Verification here only answers "who is this client, if
//! anyone": an absent, malformed, forged or expired token means
//! unauthenticated (`None`), never an error.

use chrono::{DateTime, Utc};
use jsonwebtoken::DecodingKey;
use serde::{Deserialize, Serialize};

use fieldops_core::{ClientId, TenantId};

use crate::claims::{decode_hs256, validate_window};

/// Claims carried by a client portal token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientClaims {
    pub client_id: ClientId,
    pub tenant_id: TenantId,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

/// An authenticated portal client.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub struct ClientIdentity {
    pub client_id: ClientId,
    pub tenant_id: TenantId,
}

#[derive(Clone)]
pub struct ClientTokenVerifier {
    key: DecodingKey,
}

impl ClientTokenVerifier {
    pub fn new(secret: impl AsRef<[u8]>) -> Self {
        Self {
            key: DecodingKey::from_secret(secret.as_ref()),
        }
    }

    pub fn verify(&self, token: Option<&str>, now: DateTime<Utc>) -> Option<ClientIdentity> {
        let token = token.map(str::trim).filter(|t| !t.is_empty())?;
        let claims: ClientClaims = decode_hs256(token, &self.key).ok()?;
        validate_window(claims.issued_at, claims.expires_at, now).ok()?;
        Some(ClientIdentity {
            client_id: claims.client_id,
            tenant_id: claims.tenant_id,
        })
    }
}
