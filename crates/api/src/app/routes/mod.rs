use axum::{
    Router,
    routing::{MethodRouter, post},
};

use fieldops_auth::GuardRequest;

use crate::middleware::require_guard;

pub mod authorize;
pub mod me;
pub mod portal;
pub mod rbac;
pub mod system;

/// Router for all authenticated (tenant-scoped) staff endpoints.
pub fn router() -> Router {
    Router::new()
        .nest("/me", me::router())
        .route("/authorize", post(authorize::authorize))
        .nest("/admin/rbac", rbac::router())
}

/// Put a route behind an admission guard.
pub fn guarded(route: MethodRouter, guard: impl Into<GuardRequest>) -> MethodRouter {
    route.route_layer(axum::middleware::from_fn_with_state(guard.into(), require_guard))
}
