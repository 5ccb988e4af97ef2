use serde::{Deserialize, Serialize};

use fieldops_auth::{Action, GuardMode, PermissionContext, ResourceFamily, Role};
use fieldops_core::{ClientId, TenantId, UserId};

use crate::app::navigation::NavEntry;

// -------------------------
// Request DTOs
// -------------------------

/// `POST /authorize`: evaluate action keys against the caller's own context.
#[derive(Debug, Deserialize)]
pub struct AuthorizeRequest {
    pub actions: Vec<String>,
    #[serde(default = "default_mode")]
    pub mode: GuardMode,
}

fn default_mode() -> GuardMode {
    GuardMode::All
}

// -------------------------
// Response DTOs
// -------------------------

#[derive(Debug, Serialize)]
pub struct AuthorizeResponse {
    pub allowed: bool,
}

#[derive(Debug, Serialize)]
pub struct MeResponse<'a> {
    pub principal_id: UserId,
    pub tenant_id: TenantId,
    pub permissions: &'a PermissionContext,
}

#[derive(Debug, Serialize)]
pub struct NavigationResponse<'a> {
    pub entries: Vec<&'a NavEntry>,
}

#[derive(Debug, Serialize)]
pub struct RoleView {
    pub role: Role,
    pub description: &'static str,
    pub actions: Vec<Action>,
}

#[derive(Debug, Serialize)]
pub struct ActionView {
    pub key: &'static str,
    pub family: ResourceFamily,
    pub description: &'static str,
}

impl From<Action> for ActionView {
    fn from(action: Action) -> Self {
        Self {
            key: action.key(),
            family: action.family(),
            description: action.description(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PortalMeResponse {
    pub client_id: ClientId,
    pub tenant_id: TenantId,
    pub permissions: PermissionContext,
}
