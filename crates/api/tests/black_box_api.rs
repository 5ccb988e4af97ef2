use std::path::PathBuf;

use chrono::{Duration as ChronoDuration, Utc};
use fieldops_api::config::Settings;
use fieldops_auth::{ClientClaims, JwtClaims, PermissionMatrix, Role};
use fieldops_core::{ClientId, TenantId, UserId};
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use reqwest::StatusCode;
use serde::Serialize;
use serde_json::json;

const JWT_SECRET: &str = "test-secret";
const PORTAL_SECRET: &str = "portal-secret";

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn(policy_path: Option<PathBuf>) -> Self {
        let settings = Settings {
            bind_addr: "127.0.0.1:0".parse().unwrap(),
            jwt_secret: JWT_SECRET.to_string(),
            portal_secret: PORTAL_SECRET.to_string(),
            policy_path,
        };
        let matrix = settings.load_policy().expect("policy must load");

        // Build app (same router as prod), but bind to an ephemeral port.
        let app = fieldops_api::app::build_app(&settings, matrix).expect("app must build");
        let listener = tokio::net::TcpListener::bind(settings.bind_addr)
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, handle }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn sign<T: Serialize>(claims: &T, secret: &str) -> String {
    jsonwebtoken::encode(
        &Header::new(Algorithm::HS256),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .expect("failed to encode jwt")
}

fn mint_jwt(tenant_id: TenantId, role: Role) -> String {
    let now = Utc::now();
    sign(
        &JwtClaims {
            sub: UserId::new(),
            tenant_id,
            role,
            issued_at: now,
            expires_at: now + ChronoDuration::minutes(10),
        },
        JWT_SECRET,
    )
}

fn mint_portal_token(client_id: ClientId, tenant_id: TenantId) -> String {
    let now = Utc::now();
    sign(
        &ClientClaims {
            client_id,
            tenant_id,
            issued_at: now,
            expires_at: now + ChronoDuration::days(1),
        },
        PORTAL_SECRET,
    )
}

/// Policy file in the temp dir, removed on drop.
struct PolicyFile(PathBuf);

impl PolicyFile {
    /// Flat policy where every role gets `grants`, except ADMIN which keeps `*`.
    fn write(grants: &[&str]) -> Self {
        let path = std::env::temp_dir().join(format!("fieldops-policy-{}.json", uuid::Uuid::now_v7()));
        std::fs::write(&path, policy_json(grants)).unwrap();
        Self(path)
    }

    fn replace(&self, grants: &[&str]) {
        std::fs::write(&self.0, policy_json(grants)).unwrap();
    }
}

impl Drop for PolicyFile {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.0);
    }
}

fn policy_json(grants: &[&str]) -> String {
    let roles: serde_json::Map<String, serde_json::Value> = Role::ALL
        .iter()
        .map(|role| {
            let entry = if *role == Role::Admin {
                json!({ "grants": ["*"] })
            } else {
                json!({ "grants": grants })
            };
            (role.as_str().to_string(), entry)
        })
        .collect();
    json!({ "roles": roles }).to_string()
}

async fn get_json(client: &reqwest::Client, url: String, token: &str) -> (StatusCode, serde_json::Value) {
    let res = client.get(url).bearer_auth(token).send().await.unwrap();
    let status = res.status();
    let body = res.json().await.unwrap_or(serde_json::Value::Null);
    (status, body)
}

#[tokio::test]
async fn health_is_public() {
    let srv = TestServer::spawn(None).await;

    let res = reqwest::get(format!("{}/health", srv.base_url)).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn auth_required_for_protected_endpoints() {
    let srv = TestServer::spawn(None).await;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/me/permissions", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let res = client
        .get(format!("{}/me/permissions", srv.base_url))
        .bearer_auth("not-a-token")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn token_with_unknown_role_is_unauthenticated() {
    let srv = TestServer::spawn(None).await;
    let now = Utc::now();
    let token = sign(
        &json!({
            "sub": UserId::new(),
            "tenant_id": TenantId::new(),
            "role": "OWNER",
            "issued_at": now,
            "expires_at": now + ChronoDuration::minutes(10),
        }),
        JWT_SECRET,
    );

    let (status, _) = get_json(
        &reqwest::Client::new(),
        format!("{}/me/permissions", srv.base_url),
        &token,
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn session_permissions_match_the_matrix() {
    let srv = TestServer::spawn(None).await;
    let tenant_id = TenantId::new();
    let token = mint_jwt(tenant_id, Role::Supervisor);

    let (status, body) = get_json(
        &reqwest::Client::new(),
        format!("{}/me/permissions", srv.base_url),
        &token,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["tenant_id"].as_str().unwrap(), tenant_id.to_string());
    assert_eq!(body["permissions"]["role"], "SUPERVISOR");

    let expected: Vec<&str> = PermissionMatrix::builtin()
        .unwrap()
        .granted_sorted(Role::Supervisor)
        .iter()
        .map(|a| a.key())
        .collect();
    let granted: Vec<&str> = body["permissions"]["granted_actions"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap())
        .collect();
    assert_eq!(granted, expected);
}

#[tokio::test]
async fn navigation_is_render_gated() {
    let srv = TestServer::spawn(None).await;
    let token = mint_jwt(TenantId::new(), Role::Hr);

    let (status, body) = get_json(
        &reqwest::Client::new(),
        format!("{}/me/navigation", srv.base_url),
        &token,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let ids: Vec<&str> = body["entries"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["attendance", "calendar", "staff"]);
}

#[tokio::test]
async fn authorize_evaluates_all_and_any() {
    let srv = TestServer::spawn(None).await;
    let token = mint_jwt(TenantId::new(), Role::Supervisor);
    let client = reqwest::Client::new();

    let cases = [
        (json!({ "actions": ["orders.view", "attendance.view"], "mode": "all" }), true),
        (json!({ "actions": ["orders.view", "payments.approve"], "mode": "all" }), false),
        (json!({ "actions": ["orders.view", "payments.approve"], "mode": "any" }), true),
        (json!({ "actions": ["orders.view", "orders.teleport"], "mode": "all" }), false),
        (json!({ "actions": ["orders.view"] }), true),
    ];

    for (body, allowed) in cases {
        let res = client
            .post(format!("{}/authorize", srv.base_url))
            .bearer_auth(&token)
            .json(&body)
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK, "request {body}");
        let out: serde_json::Value = res.json().await.unwrap();
        assert_eq!(out["allowed"], allowed, "request {body}");
    }
}

#[tokio::test]
async fn authorize_rejects_empty_action_set() {
    let srv = TestServer::spawn(None).await;
    let token = mint_jwt(TenantId::new(), Role::Admin);

    for mode in ["all", "any"] {
        let res = reqwest::Client::new()
            .post(format!("{}/authorize", srv.base_url))
            .bearer_auth(&token)
            .json(&json!({ "actions": [], "mode": mode }))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let out: serde_json::Value = res.json().await.unwrap();
        assert_eq!(out["error"], "invalid_guard_request");
    }
}

#[tokio::test]
async fn admin_routes_are_guarded_without_leaking_detail() {
    let srv = TestServer::spawn(None).await;
    let client = reqwest::Client::new();

    let (status, body) = get_json(
        &client,
        format!("{}/admin/rbac/roles", srv.base_url),
        &mint_jwt(TenantId::new(), Role::Technician),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body, json!({ "error": "forbidden", "message": "forbidden" }));

    let (status, body) = get_json(
        &client,
        format!("{}/admin/rbac/roles", srv.base_url),
        &mint_jwt(TenantId::new(), Role::Manager),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let roles = body["roles"].as_array().unwrap();
    assert_eq!(roles.len(), Role::ALL.len());
    let admin = roles.iter().find(|r| r["role"] == "ADMIN").unwrap();
    assert_eq!(
        admin["actions"].as_array().unwrap().len(),
        fieldops_auth::Action::ALL.len()
    );

    let (status, body) = get_json(
        &client,
        format!("{}/admin/rbac/actions", srv.base_url),
        &mint_jwt(TenantId::new(), Role::Hr),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["actions"][0]["key"], "orders.view");
    assert_eq!(body["actions"][0]["family"], "orders");
}

#[tokio::test]
async fn reload_requires_users_manage_and_a_policy_file() {
    let srv = TestServer::spawn(None).await;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/admin/rbac/reload", srv.base_url))
        .bearer_auth(mint_jwt(TenantId::new(), Role::Manager))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let res = client
        .post(format!("{}/admin/rbac/reload", srv.base_url))
        .bearer_auth(mint_jwt(TenantId::new(), Role::Admin))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn reload_publishes_new_policy_and_rejects_bad_files() {
    let policy = PolicyFile::write(&["orders.view"]);
    let srv = TestServer::spawn(Some(policy.0.clone())).await;
    let client = reqwest::Client::new();
    let admin = mint_jwt(TenantId::new(), Role::Admin);
    let technician = mint_jwt(TenantId::new(), Role::Technician);

    let (_, before) = get_json(&client, format!("{}/me/permissions", srv.base_url), &technician).await;
    assert_eq!(before["permissions"]["granted_actions"], json!(["orders.view"]));

    // Publish a new policy.
    policy.replace(&["calendar.view"]);
    let res = client
        .post(format!("{}/admin/rbac/reload", srv.base_url))
        .bearer_auth(&admin)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let (_, after) = get_json(&client, format!("{}/me/permissions", srv.base_url), &technician).await;
    assert_eq!(after["permissions"]["granted_actions"], json!(["calendar.view"]));

    // A broken file is rejected and the published policy stays.
    std::fs::write(&policy.0, r#"{ "roles": { "ADMIN": { "grants": ["*"] } } }"#).unwrap();
    let res = client
        .post(format!("{}/admin/rbac/reload", srv.base_url))
        .bearer_auth(&admin)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let out: serde_json::Value = res.json().await.unwrap();
    assert_eq!(out["error"], "invalid_policy");

    let (_, kept) = get_json(&client, format!("{}/me/permissions", srv.base_url), &technician).await;
    assert_eq!(kept["permissions"]["granted_actions"], json!(["calendar.view"]));
}

#[tokio::test]
async fn portal_treats_missing_or_bad_token_as_unauthenticated() {
    let srv = TestServer::spawn(None).await;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/portal/me", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    // A staff token is not a portal token.
    let (status, _) = get_json(
        &client,
        format!("{}/portal/me", srv.base_url),
        &mint_jwt(TenantId::new(), Role::Admin),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn portal_client_gets_client_permissions() {
    let srv = TestServer::spawn(None).await;
    let client_id = ClientId::new();
    let tenant_id = TenantId::new();

    let (status, body) = get_json(
        &reqwest::Client::new(),
        format!("{}/portal/me", srv.base_url),
        &mint_portal_token(client_id, tenant_id),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["client_id"].as_str().unwrap(), client_id.to_string());
    assert_eq!(body["permissions"]["role"], "CLIENT");
    assert_eq!(
        body["permissions"]["granted_actions"],
        json!(["orders.track", "delivery_notes.sign", "files.view"])
    );
}

#[test]
fn policy_files_are_cleaned_up() {
    let policy = PolicyFile::write(&["orders.view"]);
    let path = policy.0.clone();
    assert!(path.exists());

    drop(policy);
    assert!(!path.exists());
}
