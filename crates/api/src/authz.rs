//! Request-admission gate.
//!
//! Turns a `false` guard result into a rejected operation before dispatch.
//! The rejection never says which action was missing or why: an unknown
//! action, an unknown role and a genuine lack of grant all look the same.

use thiserror::Error;

use fieldops_auth::{GuardedOperation, PermissionContext, evaluate};

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum AdmissionError {
    #[error("forbidden")]
    Forbidden,
}

/// Check an operation's guard against the caller's permission context.
///
/// This is intended to be called **before** dispatching the operation.
pub fn admit<O: GuardedOperation + ?Sized>(
    permissions: &PermissionContext,
    operation: &O,
) -> Result<(), AdmissionError> {
    if evaluate(permissions, &operation.guard()) {
        Ok(())
    } else {
        Err(AdmissionError::Forbidden)
    }
}
