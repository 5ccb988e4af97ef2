//! Remote guard evaluation: `{actions, mode} -> {allowed}`.
//!
//! Evaluated against the caller's own permission context only; there is no
//! way to ask on behalf of another principal.

use axum::{
    Json,
    extract::Extension,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use fieldops_auth::evaluate_keys;

use crate::app::dto::{AuthorizeRequest, AuthorizeResponse};
use crate::app::errors;
use crate::context::PrincipalContext;

/// POST /authorize
pub async fn authorize(
    Extension(principal): Extension<PrincipalContext>,
    Json(body): Json<AuthorizeRequest>,
) -> Response {
    match evaluate_keys(principal.permissions(), body.mode, &body.actions) {
        Ok(allowed) => (StatusCode::OK, Json(AuthorizeResponse { allowed })).into_response(),
        Err(e) => errors::json_error(StatusCode::BAD_REQUEST, "invalid_guard_request", e.to_string()),
    }
}
