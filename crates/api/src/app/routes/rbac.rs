//! RBAC admin endpoints: inspect the loaded policy and reload it.
//!
//! These expose the flattened permission matrix so "what can role X do?" is
//! answered from the same data the guards evaluate.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::Extension,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};

use fieldops_auth::Action;

use crate::app::dto::{ActionView, RoleView};
use crate::app::routes::guarded;
use crate::app::{AppState, errors};

// ─────────────────────────────────────────────────────────────────────────────
// Router
// ─────────────────────────────────────────────────────────────────────────────

pub fn router() -> Router {
    Router::new()
        .route("/roles", guarded(get(list_roles), Action::UsersView))
        .route("/actions", guarded(get(list_actions), Action::UsersView))
        .route("/reload", guarded(post(reload_policy), Action::UsersManage))
}

// ─────────────────────────────────────────────────────────────────────────────
// Handlers
// ─────────────────────────────────────────────────────────────────────────────

/// GET /admin/rbac/roles - every role with its flattened grants
pub async fn list_roles(Extension(state): Extension<Arc<AppState>>) -> Response {
    let matrix = state.policy.snapshot();
    let roles: Vec<RoleView> = matrix
        .roles()
        .map(|role| RoleView {
            role,
            description: role.description(),
            actions: matrix.granted_sorted(role),
        })
        .collect();

    (StatusCode::OK, Json(serde_json::json!({ "roles": roles }))).into_response()
}

/// GET /admin/rbac/actions - the action catalog
pub async fn list_actions() -> Response {
    let actions: Vec<ActionView> = Action::ALL.iter().copied().map(ActionView::from).collect();

    (StatusCode::OK, Json(serde_json::json!({ "actions": actions }))).into_response()
}

/// POST /admin/rbac/reload - re-read the policy file and publish it atomically
///
/// A rejected file leaves the current policy in force.
pub async fn reload_policy(Extension(state): Extension<Arc<AppState>>) -> Response {
    let Some(path) = state.policy_path.clone() else {
        return errors::json_error(
            StatusCode::CONFLICT,
            "policy_not_reloadable",
            "serving built-in policy definitions; no file to reload",
        );
    };

    let store = Arc::clone(&state.policy);
    let reload_path = path.clone();
    let result = match tokio::task::spawn_blocking(move || store.reload_from_file(reload_path)).await {
        Ok(result) => result,
        Err(e) => {
            return errors::json_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "reload_failed",
                e.to_string(),
            );
        }
    };

    match result {
        Ok(()) => (
            StatusCode::OK,
            Json(serde_json::json!({ "reloaded": true, "source": path.display().to_string() })),
        )
            .into_response(),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "policy reload rejected; keeping current policy");
            errors::config_error_to_response(e)
        }
    }
}
