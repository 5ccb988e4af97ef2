use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::Response,
};
use chrono::Utc;

use fieldops_auth::{GuardRequest, JwtValidator, PermissionContext, PolicyStore};

use crate::app::errors;
use crate::authz;
use crate::context::{PrincipalContext, TenantContext};

#[derive(Clone)]
pub struct AuthState {
    pub jwt: Arc<dyn JwtValidator>,
    pub policy: Arc<PolicyStore>,
}

/// Authenticate a staff request and attach its tenant and permission context.
///
/// The permission context is built from the policy snapshot current at the
/// time the request arrives; a concurrent policy reload affects later
/// requests only.
pub async fn auth_middleware(
    State(state): State<AuthState>,
    mut req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Result<Response, StatusCode> {
    let token = bearer_token(req.headers()).ok_or(StatusCode::UNAUTHORIZED)?;

    let claims = state
        .jwt
        .validate(token, Utc::now())
        .map_err(|_e| StatusCode::UNAUTHORIZED)?;

    let permissions = PermissionContext::build(&state.policy.snapshot(), claims.role);

    req.extensions_mut()
        .insert(TenantContext::new(claims.tenant_id));
    req.extensions_mut().insert(PrincipalContext::new(
        claims.sub,
        Arc::new(permissions),
    ));

    Ok(next.run(req).await)
}

/// Admission gate for a route: evaluate `guard` before the handler runs.
///
/// Must be layered inside [`auth_middleware`]; a request that reaches it
/// without a principal is rejected as unauthenticated.
pub async fn require_guard(
    State(guard): State<GuardRequest>,
    req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Response {
    let Some(principal) = req.extensions().get::<PrincipalContext>() else {
        return errors::json_error(StatusCode::UNAUTHORIZED, "unauthenticated", "authentication required");
    };

    if let Err(e) = authz::admit(principal.permissions(), &guard) {
        tracing::debug!(
            principal_id = %principal.principal_id(),
            role = %principal.permissions().role(),
            path = %req.uri().path(),
            "request denied by guard"
        );
        return errors::json_error(StatusCode::FORBIDDEN, "forbidden", e.to_string());
    }

    next.run(req).await
}

/// Bearer credential from the `Authorization` header, if any.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let header = headers.get(axum::http::header::AUTHORIZATION)?;
    let header = header.to_str().ok()?;
    let token = header.strip_prefix("Bearer ")?.trim();
    if token.is_empty() {
        return None;
    }
    Some(token)
}
