//! `fieldops-auth` - role/action permission resolution (pure, zero-trust).
//!
//! Leaves first: the action catalog and roles, the permission matrix loaded
//! from policy definitions, the resolver, per-session permission contexts and
//! the guard evaluator built on them. Token verification for the identity
//! collaborators lives here too. Nothing in this crate knows about HTTP.

pub mod actions;
pub mod claims;
pub mod context;
pub mod guard;
pub mod matrix;
pub mod portal;
pub mod resolver;
pub mod roles;
pub mod session;
pub mod store;

pub use actions::{Action, ResourceFamily, UnknownAction};
pub use claims::{Hs256JwtValidator, JwtClaims, JwtValidator, TokenValidationError, validate_claims};
pub use context::PermissionContext;
pub use guard::{
    GuardMode, GuardRequest, GuardedOperation, InvalidGuardRequest, evaluate, evaluate_all,
    evaluate_any, evaluate_keys,
};
pub use matrix::{ConfigError, PermissionMatrix};
pub use portal::{ClientClaims, ClientIdentity, ClientTokenVerifier};
pub use resolver::{resolve, resolve_keys};
pub use roles::{Role, UnknownRole};
pub use session::SessionPermissions;
pub use store::PolicyStore;
