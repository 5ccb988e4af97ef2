//! Client portal endpoints.
//!
//! Portal callers carry a client token instead of a staff session. The token
//! verifier reports a missing or invalid token as "no client", which is
//! answered with 401 here.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::Extension,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
};
use chrono::Utc;

use fieldops_auth::{PermissionContext, Role};

use crate::app::AppState;
use crate::app::dto::PortalMeResponse;
use crate::app::errors;
use crate::middleware::bearer_token;

pub fn router() -> Router {
    Router::new().route("/me", get(me))
}

/// GET /portal/me - the client's identity and portal permissions
pub async fn me(Extension(state): Extension<Arc<AppState>>, headers: HeaderMap) -> Response {
    let Some(client) = state.portal.verify(bearer_token(&headers), Utc::now()) else {
        return errors::json_error(StatusCode::UNAUTHORIZED, "unauthenticated", "client token required");
    };

    let permissions = PermissionContext::build(&state.policy.snapshot(), Role::Client);

    (
        StatusCode::OK,
        Json(PortalMeResponse {
            client_id: client.client_id,
            tenant_id: client.tenant_id,
            permissions,
        }),
    )
        .into_response()
}
