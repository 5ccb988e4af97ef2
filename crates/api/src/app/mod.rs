//! HTTP API application wiring (Axum router + shared state).
//!
//! - `routes/`: HTTP routes + handlers (one file per area)
//! - `navigation.rs`: the rendering gate served to the UI
//! - `dto.rs`: request/response DTOs
//! - `errors.rs`: consistent error responses

use std::path::PathBuf;
use std::sync::Arc;

use axum::{Extension, Router, routing::get};
use tower::ServiceBuilder;

use fieldops_auth::{ClientTokenVerifier, Hs256JwtValidator, PermissionMatrix, PolicyStore};

use crate::config::Settings;
use crate::middleware;

pub mod dto;
pub mod errors;
pub mod navigation;
pub mod routes;

/// State shared by every handler.
pub struct AppState {
    pub policy: Arc<PolicyStore>,
    /// Where reloads read from; `None` when serving the built-in definitions.
    pub policy_path: Option<PathBuf>,
    pub navigation: navigation::Navigation,
    pub portal: ClientTokenVerifier,
}

/// Build the full HTTP router (public entrypoint used by `main.rs`).
///
/// Fails only when the navigation model holds an invalid guard, so the
/// process never starts serving with one.
pub fn build_app(settings: &Settings, matrix: PermissionMatrix) -> anyhow::Result<Router> {
    let policy = Arc::new(PolicyStore::new(matrix));
    let state = Arc::new(AppState {
        policy: Arc::clone(&policy),
        policy_path: settings.policy_path.clone(),
        navigation: navigation::Navigation::standard()?,
        portal: ClientTokenVerifier::new(settings.portal_secret.as_bytes()),
    });

    let auth_state = middleware::AuthState {
        jwt: Arc::new(Hs256JwtValidator::new(settings.jwt_secret.as_bytes())),
        policy,
    };

    // Protected routes: require a staff token + tenant context.
    let protected = routes::router().layer(axum::middleware::from_fn_with_state(
        auth_state,
        middleware::auth_middleware,
    ));

    Ok(Router::new()
        .route("/health", get(routes::system::health))
        .nest("/portal", routes::portal::router())
        .merge(protected)
        .layer(Extension(state))
        .layer(ServiceBuilder::new()))
}
