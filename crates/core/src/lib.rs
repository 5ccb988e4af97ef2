//! `fieldops-core` - shared primitives for the FieldOps crates.
//!
//! This crate contains **pure** building blocks (no infrastructure concerns).

pub mod error;
pub mod id;
pub mod value_object;

pub use error::InvalidId;
pub use id::{ClientId, TenantId, UserId};
pub use value_object::ValueObject;
