//! In-process mock of the DocMatch backend.

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use axum::extract::{Multipart, Path, Request, State};
use axum::http::header::{ACCEPT, AUTHORIZATION};
use axum::http::{HeaderMap, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use parking_lot::Mutex;
use serde_json::{Value, json};

use docmatch_client::{ApiClient, ClientConfig, MemoryStore, RouteRecorder, SessionStore};

pub const PASSWORD: &str = "correct horse";
pub const REFRESH_TOKEN: &str = "refresh-1";

/// One request as the backend saw it.
#[derive(Debug, Clone)]
pub struct Hit {
    pub method: String,
    pub path: String,
    pub authorization: Option<String>,
    pub accept: Option<String>,
}

#[derive(Default)]
pub struct Backend {
    hits: Mutex<Vec<Hit>>,
    /// Access tokens the backend accepts on `/auth/me`.
    issued: Mutex<Vec<String>>,
    contracts: Mutex<BTreeMap<String, Value>>,
    next_id: AtomicUsize,
    pub fail_contracts_clear: AtomicBool,
    pub fail_invoices_clear: AtomicBool,
    pub fail_refresh: AtomicBool,
    pub last_invoice_body: Mutex<Option<Value>>,
    pub last_upload: Mutex<Option<(String, Option<String>, Option<String>, Vec<u8>)>>,
}

impl Backend {
    pub fn hits(&self) -> Vec<Hit> {
        self.hits.lock().clone()
    }

    pub fn hits_to(&self, path: &str) -> Vec<Hit> {
        self.hits().into_iter().filter(|h| h.path == path).collect()
    }

    /// Mint an access token the backend will accept.
    pub fn issue_token(&self) -> String {
        let token = token_expiring_in(3_600, &format!("jti-{}", self.next_id()));
        self.issued.lock().push(token.clone());
        token
    }

    fn next_id(&self) -> usize {
        self.next_id.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn accepts(&self, headers: &HeaderMap) -> bool {
        let Some(value) = headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok()) else {
            return false;
        };
        value
            .strip_prefix("Bearer ")
            .is_some_and(|token| self.issued.lock().iter().any(|t| t == token))
    }
}

pub fn now() -> i64 {
    time::OffsetDateTime::now_utc().unix_timestamp()
}

/// Unsigned JWT-shaped token expiring `secs` from now.
pub fn token_expiring_in(secs: i64, jti: &str) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(
        json!({ "sub": "user-1", "exp": now() + secs, "jti": jti }).to_string(),
    );
    format!("{header}.{payload}.sig")
}

pub fn user_json() -> Value {
    json!({
        "id": "user-1",
        "email": "ada@example.com",
        "name": "Ada",
        "provider": null,
        "is_active": true,
        "created_at": "2024-05-01T10:00:00"
    })
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "detail": "Not authenticated" })),
    )
        .into_response()
}

async fn record(State(backend): State<Arc<Backend>>, request: Request, next: Next) -> Response {
    backend.hits.lock().push(Hit {
        method: request.method().to_string(),
        path: request.uri().path().to_string(),
        authorization: request
            .headers()
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        accept: request
            .headers()
            .get(ACCEPT)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
    });
    next.run(request).await
}

// ── Auth ───────────────────────────────────────────────────────────

async fn login(State(backend): State<Arc<Backend>>, Json(body): Json<Value>) -> Response {
    if body["password"] != PASSWORD {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "detail": "Incorrect email or password" })),
        )
            .into_response();
    }
    token_response(&backend)
}

async fn register(State(backend): State<Arc<Backend>>, Json(body): Json<Value>) -> Response {
    if body["email"] == "taken@example.com" {
        return (
            StatusCode::CONFLICT,
            Json(json!({ "message": "Email already registered" })),
        )
            .into_response();
    }
    token_response(&backend)
}

fn token_response(backend: &Backend) -> Response {
    Json(json!({
        "access_token": backend.issue_token(),
        "refresh_token": REFRESH_TOKEN,
        "token_type": "bearer",
        "user": user_json(),
    }))
    .into_response()
}

async fn me(State(backend): State<Arc<Backend>>, headers: HeaderMap) -> Response {
    if !backend.accepts(&headers) {
        return unauthorized();
    }
    Json(user_json()).into_response()
}

async fn logout() -> Response {
    Json(json!({ "message": "Logged out" })).into_response()
}

async fn refresh(State(backend): State<Arc<Backend>>, Json(body): Json<Value>) -> Response {
    if backend.fail_refresh.load(Ordering::SeqCst) || body["refresh_token"] != REFRESH_TOKEN {
        return unauthorized();
    }
    Json(json!({ "access_token": backend.issue_token(), "token_type": "bearer" })).into_response()
}

async fn forgot_password() -> Response {
    Json(json!({ "message": "If the account exists, an email was sent", "success": true }))
        .into_response()
}

async fn verify_reset_token(Path(token): Path<String>) -> Response {
    if token == "good/token" {
        Json(json!({ "message": "Token is valid", "success": true })).into_response()
    } else {
        (
            StatusCode::BAD_REQUEST,
            Json(json!({ "detail": "Invalid or expired reset token" })),
        )
            .into_response()
    }
}

// ── Contracts ──────────────────────────────────────────────────────

async fn list_contracts(State(backend): State<Arc<Backend>>) -> Response {
    let contracts: Vec<Value> = backend.contracts.lock().values().cloned().collect();
    Json(contracts).into_response()
}

async fn create_contract(State(backend): State<Arc<Backend>>, Json(body): Json<Value>) -> Response {
    let id = format!("c{}", backend.next_id());
    let mut contract = body;
    contract["id"] = json!(id);
    contract["created_at"] = json!("2024-05-01T10:00:00");
    backend.contracts.lock().insert(id, contract.clone());
    (StatusCode::CREATED, Json(contract)).into_response()
}

async fn get_contract(State(backend): State<Arc<Backend>>, Path(id): Path<String>) -> Response {
    match backend.contracts.lock().get(&id) {
        Some(contract) => Json(contract.clone()).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({ "detail": "Contract not found" })),
        )
            .into_response(),
    }
}

async fn update_contract(
    State(backend): State<Arc<Backend>>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    let mut contracts = backend.contracts.lock();
    let Some(existing) = contracts.get_mut(&id) else {
        return StatusCode::NOT_FOUND.into_response();
    };
    existing["supplier_name"] = body["supplier_name"].clone();
    existing["items"] = body["items"].clone();
    existing["updated_at"] = json!("2024-05-02T10:00:00");
    Json(existing.clone()).into_response()
}

async fn delete_contract(State(backend): State<Arc<Backend>>, Path(id): Path<String>) -> Response {
    match backend.contracts.lock().remove(&id) {
        Some(_) => StatusCode::NO_CONTENT.into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn clear_contracts(State(backend): State<Arc<Backend>>) -> Response {
    if backend.fail_contracts_clear.load(Ordering::SeqCst) {
        return (StatusCode::INTERNAL_SERVER_ERROR, "contracts store offline").into_response();
    }
    backend.contracts.lock().clear();
    Json(json!({ "message": "All contracts cleared" })).into_response()
}

async fn upload_contract(State(backend): State<Arc<Backend>>, mut multipart: Multipart) -> Response {
    while let Ok(Some(field)) = multipart.next_field().await {
        let name = field.name().unwrap_or_default().to_string();
        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let bytes = field.bytes().await.unwrap_or_default().to_vec();

        if file_name.as_deref().is_some_and(|n| n.ends_with(".exe")) {
            return (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({ "message": "generic", "detail": "Unsupported file type" })),
            )
                .into_response();
        }

        *backend.last_upload.lock() = Some((name, file_name, content_type, bytes));
    }

    Json(json!({
        "id": "c-upload",
        "supplier_name": "Scanned Supplier",
        "items": [],
        "created_at": "2024-05-01T10:00:00"
    }))
    .into_response()
}

// ── Invoices ───────────────────────────────────────────────────────

async fn list_invoices() -> Response {
    Json(json!([])).into_response()
}

async fn get_invoice(Path(_id): Path<String>) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "message": "Invoice not found" })),
    )
        .into_response()
}

async fn process_invoice(State(backend): State<Arc<Backend>>, Json(body): Json<Value>) -> Response {
    *backend.last_invoice_body.lock() = Some(body);
    Json(json!({
        "id": "i1",
        "invoice_number": "INV-7",
        "supplier_name": "Acme",
        "issue_date": "2024-05-02",
        "items": [{ "description": "Bolts", "quantity": 10, "unit_price": 0.5, "total": 5 }],
        "total": 5.0,
        "created_at": "2024-05-02T09:00:00"
    }))
    .into_response()
}

async fn delete_invoice(Path(_id): Path<String>) -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, "disk full").into_response()
}

async fn clear_invoices(State(backend): State<Arc<Backend>>) -> Response {
    if backend.fail_invoices_clear.load(Ordering::SeqCst) {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "detail": "invoice store offline" })),
        )
            .into_response();
    }
    Json(json!({ "message": "All invoices cleared" })).into_response()
}

// ── Profile ────────────────────────────────────────────────────────

async fn get_settings() -> Response {
    Json(settings_json()).into_response()
}

async fn put_settings(Json(body): Json<Value>) -> Response {
    let mut settings = settings_json();
    if let (Some(current), Some(update)) = (settings.as_object_mut(), body.as_object()) {
        for (k, v) in update {
            current.insert(k.clone(), v.clone());
        }
    }
    Json(settings).into_response()
}

async fn export_data() -> Response {
    StatusCode::BAD_GATEWAY.into_response()
}

async fn update_profile(Json(body): Json<Value>) -> Response {
    let mut user = user_json();
    user["name"] = body["name"].clone();
    Json(user).into_response()
}

pub fn settings_json() -> Value {
    json!({
        "theme": "light", "language": "en", "timezone": "UTC",
        "sound_enabled": true, "auto_save": true, "compact_mode": false,
        "ai_model": "default", "ocr_accuracy": "high", "auto_processing": true,
        "batch_size": 10, "retry_attempts": 3, "timeout_seconds": 30,
        "two_factor_auth": false, "session_timeout": 60, "login_notifications": true,
        "data_encryption": true, "audit_log": false,
        "retention_days": 90, "auto_cleanup": false, "compression_enabled": true,
        "backup_frequency": "weekly",
        "email_notifications": true, "processing_alerts": true,
        "security_alerts": true, "weekly_reports": false,
        "created_at": "2024-05-01T10:00:00", "updated_at": "2024-05-01T10:00:00"
    })
}

// ── Test server setup ──────────────────────────────────────────────

pub struct TestServer {
    pub base_url: String,
    pub backend: Arc<Backend>,
}

pub async fn start_test_server() -> TestServer {
    let backend = Arc::new(Backend::default());

    let api = Router::new()
        .route("/auth/login", post(login))
        .route("/auth/register", post(register))
        .route("/auth/me", get(me))
        .route("/auth/logout", post(logout))
        .route("/auth/refresh", post(refresh))
        .route("/auth/forgot-password", post(forgot_password))
        .route("/auth/verify-reset-token/{token}", get(verify_reset_token))
        .route("/contracts/", get(list_contracts).post(create_contract))
        .route("/contracts/upload", post(upload_contract))
        .route("/contracts/clear-all", delete(clear_contracts))
        .route(
            "/contracts/{id}",
            get(get_contract).put(update_contract).delete(delete_contract),
        )
        .route("/invoices/", get(list_invoices))
        .route("/invoices/process", post(process_invoice))
        .route("/invoices/clear-all", delete(clear_invoices))
        .route("/invoices/{id}", get(get_invoice).delete(delete_invoice))
        .route("/profile/settings", get(get_settings).put(put_settings))
        .route("/profile/me", axum::routing::put(update_profile))
        .route("/profile/export-data", post(export_data));

    let app = Router::new()
        .nest("/api/v1", api)
        .layer(middleware::from_fn_with_state(backend.clone(), record))
        .with_state(backend.clone());

    // Bind to random port.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    TestServer {
        base_url: format!("http://{addr}"),
        backend,
    }
}

impl TestServer {
    /// Client over a fresh in-memory session, recording navigations.
    pub fn client(&self) -> (ApiClient, Arc<MemoryStore>, Arc<RouteRecorder>) {
        let store = Arc::new(MemoryStore::new());
        let nav = Arc::new(RouteRecorder::new());
        let config = ClientConfig::new(self.base_url.parse().unwrap());
        let client = ApiClient::new(config, SessionStore::new(store.clone()), nav.clone());
        (client, store, nav)
    }
}
