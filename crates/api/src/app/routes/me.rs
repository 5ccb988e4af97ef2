//! The caller's own permissions, for client-side gating.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::Extension,
    response::{IntoResponse, Response},
    routing::get,
};

use crate::app::AppState;
use crate::app::dto::{MeResponse, NavigationResponse};
use crate::context::{PrincipalContext, TenantContext};

pub fn router() -> Router {
    Router::new()
        .route("/permissions", get(permissions))
        .route("/navigation", get(navigation))
}

/// GET /me/permissions - role and granted action keys of the current session
pub async fn permissions(
    Extension(tenant): Extension<TenantContext>,
    Extension(principal): Extension<PrincipalContext>,
) -> Response {
    Json(MeResponse {
        principal_id: principal.principal_id(),
        tenant_id: tenant.tenant_id(),
        permissions: principal.permissions(),
    })
    .into_response()
}

/// GET /me/navigation - navigation entries the current session may see
pub async fn navigation(
    Extension(state): Extension<Arc<AppState>>,
    Extension(principal): Extension<PrincipalContext>,
) -> Response {
    let entries = state.navigation.visible_entries(principal.permissions());
    Json(NavigationResponse { entries }).into_response()
}
