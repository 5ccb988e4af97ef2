//! Policy resolver: the decision kernel.
//!
//! - No IO
//! - No panics
//! - No clock, no globals (pure function of its arguments)
//!
//! There is no super-role shortcut here. A role that should hold every action
//! says so in the matrix.

use crate::{Action, PermissionMatrix, Role};

/// Decide whether `role` may perform `action` under `matrix`.
pub fn resolve(matrix: &PermissionMatrix, role: Role, action: Action) -> bool {
    matrix.grants(role, action)
}

/// String-boundary variant of [`resolve`] for callers holding raw identifiers.
///
/// Unknown roles and unknown actions resolve to `false` (fail closed), so a
/// typo or a stale client can never be mistaken for a grant.
pub fn resolve_keys(matrix: &PermissionMatrix, role: &str, action: &str) -> bool {
    match (role.parse::<Role>(), action.parse::<Action>()) {
        (Ok(role), Ok(action)) => resolve(matrix, role, action),
        _ => false,
    }
}
