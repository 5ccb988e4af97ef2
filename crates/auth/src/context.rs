use std::collections::HashSet;

use serde::ser::{Serialize, SerializeStruct, Serializer};

use fieldops_core::ValueObject;

use crate::{Action, PermissionMatrix, Role, resolve};

/// Permission snapshot of one authenticated session.
///
/// The granted set is derived from the role by the resolver when the context
/// is built and never changes afterwards. A role change means building a new
/// context and dropping this one; there are no mutators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionContext {
    role: Role,
    granted: HashSet<Action>,
}

impl PermissionContext {
    /// Derive the context for `role`, resolving each catalog action once.
    pub fn build(matrix: &PermissionMatrix, role: Role) -> Self {
        let granted = Action::ALL
            .iter()
            .copied()
            .filter(|action| resolve(matrix, role, *action))
            .collect();
        Self { role, granted }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    /// Cached lookup; never re-resolves.
    pub fn has(&self, action: Action) -> bool {
        self.granted.contains(&action)
    }

    /// Granted actions in catalog order.
    pub fn granted_actions(&self) -> Vec<Action> {
        Action::ALL
            .iter()
            .copied()
            .filter(|action| self.granted.contains(action))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.granted.is_empty()
    }
}

impl ValueObject for PermissionContext {}

// The UI gates on this serialized form, so it carries exactly the enforced set.
// No `Deserialize`: contexts only come from `build`.
impl Serialize for PermissionContext {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("PermissionContext", 2)?;
        state.serialize_field("role", &self.role)?;
        state.serialize_field("granted_actions", &self.granted_actions())?;
        state.end()
    }
}
