//! Process settings, read from the environment at startup.

use std::net::SocketAddr;
use std::path::PathBuf;

use thiserror::Error;

use fieldops_auth::{ConfigError, PermissionMatrix};

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

const DEV_JWT_SECRET: &str = "dev-secret";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("FIELDOPS_BIND_ADDR is not a socket address: '{0}'")]
    InvalidBindAddr(String),
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub bind_addr: SocketAddr,
    /// Shared secret for staff session tokens (HS256).
    pub jwt_secret: String,
    /// Shared secret for client portal tokens (HS256).
    pub portal_secret: String,
    /// Policy definitions file; the built-in definitions are used when unset.
    pub policy_path: Option<PathBuf>,
}

impl Settings {
    pub fn from_env() -> Result<Self, SettingsError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from an arbitrary key lookup (the environment in production).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, SettingsError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let raw_addr = lookup("FIELDOPS_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = raw_addr
            .parse()
            .map_err(|_| SettingsError::InvalidBindAddr(raw_addr.clone()))?;

        let jwt_secret = lookup("JWT_SECRET").unwrap_or_else(|| {
            tracing::warn!("JWT_SECRET not set; using insecure dev default");
            DEV_JWT_SECRET.to_string()
        });

        let portal_secret = lookup("PORTAL_TOKEN_SECRET").unwrap_or_else(|| {
            tracing::warn!("PORTAL_TOKEN_SECRET not set; reusing JWT_SECRET for portal tokens");
            jwt_secret.clone()
        });

        let policy_path = lookup("FIELDOPS_POLICY_PATH")
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from);

        Ok(Self {
            bind_addr,
            jwt_secret,
            portal_secret,
            policy_path,
        })
    }

    /// Load the permission matrix from the configured source.
    pub fn load_policy(&self) -> Result<PermissionMatrix, ConfigError> {
        match &self.policy_path {
            Some(path) => PermissionMatrix::load_file(path),
            None => PermissionMatrix::builtin(),
        }
    }

    /// Human-readable policy source for logs.
    pub fn policy_source(&self) -> String {
        match &self.policy_path {
            Some(path) => path.display().to_string(),
            None => "builtin".to_string(),
        }
    }
}
