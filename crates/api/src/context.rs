use std::sync::Arc;

use fieldops_auth::PermissionContext;
use fieldops_core::{TenantId, UserId};

/// Tenant context for a request.
///
/// This is immutable and must be present for all protected routes.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct TenantContext {
    tenant_id: TenantId,
}

impl TenantContext {
    pub fn new(tenant_id: TenantId) -> Self {
        Self { tenant_id }
    }

    pub fn tenant_id(&self) -> TenantId {
        self.tenant_id
    }
}

/// Principal context for a request (authenticated identity + permissions).
///
/// The permission context is built once when the request is authenticated and
/// shared read-only by every guard evaluated while serving it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrincipalContext {
    principal_id: UserId,
    permissions: Arc<PermissionContext>,
}

impl PrincipalContext {
    pub fn new(principal_id: UserId, permissions: Arc<PermissionContext>) -> Self {
        Self {
            principal_id,
            permissions,
        }
    }

    pub fn principal_id(&self) -> UserId {
        self.principal_id
    }

    pub fn permissions(&self) -> &PermissionContext {
        &self.permissions
    }
}
