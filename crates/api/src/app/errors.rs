use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use fieldops_auth::ConfigError;

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}

/// Rejected policy definitions (admin reload). The current policy stays active.
pub fn config_error_to_response(err: ConfigError) -> axum::response::Response {
    match err {
        ConfigError::Io { .. } => json_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            "policy_unreadable",
            err.to_string(),
        ),
        other => json_error(StatusCode::UNPROCESSABLE_ENTITY, "invalid_policy", other.to_string()),
    }
}
