//! Session-scoped permission handle.
//!
//! Session management owns one [`SessionPermissions`] per authenticated
//! session. A role change (impersonation, role reassignment) builds a fresh
//! [`PermissionContext`] and swaps it in atomically: a reader sees either the
//! old context or the new one, and every `current()` after `change_role`
//! returns the new one.

use std::sync::Arc;

use arc_swap::ArcSwap;

use crate::{PermissionContext, PermissionMatrix, Role};

#[derive(Debug)]
pub struct SessionPermissions {
    current: ArcSwap<PermissionContext>,
}

impl SessionPermissions {
    pub fn new(context: PermissionContext) -> Self {
        Self {
            current: ArcSwap::from_pointee(context),
        }
    }

    /// Establish the permissions of a freshly authenticated principal.
    pub fn establish(matrix: &PermissionMatrix, role: Role) -> Self {
        Self::new(PermissionContext::build(matrix, role))
    }

    /// The live context. Hold the returned `Arc` only for one evaluation pass.
    pub fn current(&self) -> Arc<PermissionContext> {
        self.current.load_full()
    }

    pub fn role(&self) -> Role {
        self.current.load().role()
    }

    /// Discard the current context and replace it with one built for `role`.
    pub fn change_role(&self, matrix: &PermissionMatrix, role: Role) {
        self.current
            .store(Arc::new(PermissionContext::build(matrix, role)));
    }
}
