use crate::config::Settings;
use crate::db::Connection;
use crate::server::routes::{health, root};

use axum::{
    Router,
    extract::Request,
    http::{HeaderName, HeaderValue, StatusCode, Version, header::USER_AGENT},
    middleware::{self, Next},
    response::Response,
    routing::get,
};
use base64::Engine as _;
use rand::RngCore;
use std::sync::Arc;
use std::time::Instant;
use tower_http::cors::CorsLayer;
use tracing::{error, info, warn};

const MAX_REQUEST_ID_LEN: usize = 128;
const X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

fn generate_request_id() -> String {
    // 96 bits => 16 chars base64url (no padding).
    let mut bytes = [0u8; 12];
    rand::rng().fill_bytes(&mut bytes);
    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(bytes)
}

fn format_http_version(version: Version) -> &'static str {
    match version {
        Version::HTTP_09 => "HTTP/0.9",
        Version::HTTP_10 => "HTTP/1.0",
        Version::HTTP_11 => "HTTP/1.1",
        Version::HTTP_2 => "HTTP/2",
        Version::HTTP_3 => "HTTP/3",
        _ => "HTTP/?",
    }
}

#[derive(Clone)]
pub struct MiniAppState {
    pub settings: Arc<Settings>,
    pub connection: Arc<Connection>,
}

impl MiniAppState {
    pub fn new(settings: Arc<Settings>, connection: Arc<Connection>) -> Self {
        Self {
            settings,
            connection,
        }
    }

    /// State backed by the SQLite engine described by `settings`.
    pub fn from_settings(settings: Settings) -> Self {
        let connection = Arc::new(Connection::sqlite(&settings));
        Self::new(Arc::new(settings), connection)
    }

    /// Opens the database before serving when `INIT_ON_STARTUP` is set.
    ///
    /// A failure is logged and left in the connection state; the next
    /// `/healthcheck` retries the open. Returns whether the database is open.
    pub async fn open_on_startup(&self) -> bool {
        if !self.settings.init_on_startup {
            info!("Database open deferred to the first health check");
            return false;
        }

        match self.connection.ensure_initialized().await {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, "Database unavailable at startup; serving anyway");
                false
            }
        }
    }
}

async fn not_found_handler() -> StatusCode {
    StatusCode::NOT_FOUND
}

async fn access_log(req: Request, next: Next) -> Response {
    // Capture request metadata before moving `req` into the handler stack.
    let method = req.method().clone();
    let uri = req.uri().clone();
    let version = req.version();

    let request_id = req
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty() && v.len() <= MAX_REQUEST_ID_LEN)
        .map(str::to_string)
        .unwrap_or_else(generate_request_id);

    let user_agent = req
        .headers()
        .get(USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-")
        .to_string();

    let start = Instant::now();
    let mut resp = next.run(req).await;

    // Always reflect `x-request-id`, even if the client didn't send one.
    if let Ok(value) = HeaderValue::from_str(&request_id) {
        resp.headers_mut().insert(X_REQUEST_ID, value);
    }

    let status = resp.status();
    let latency_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
    let path = uri.path();
    let protocol = format_http_version(version);

    if status.is_server_error() {
        error!(
            "| {:>3} | {} | {:^7} | {:<8} | {} | {}ms | {}",
            status.as_u16(),
            request_id,
            method.as_str(),
            protocol,
            path,
            latency_ms,
            user_agent
        );
    } else if status.is_client_error() {
        warn!(
            "| {:>3} | {} | {:^7} | {:<8} | {} | {}ms | {}",
            status.as_u16(),
            request_id,
            method.as_str(),
            protocol,
            path,
            latency_ms,
            user_agent
        );
    } else {
        info!(
            "| {:>3} | {} | {:^7} | {:<8} | {} | {}ms | {}",
            status.as_u16(),
            request_id,
            method.as_str(),
            protocol,
            path,
            latency_ms,
            user_agent
        );
    }

    resp
}

pub fn mini_app_router(state: MiniAppState) -> Router {
    let routes = Router::new()
        .route("/", get(root::root))
        .route("/healthcheck", get(health::healthcheck));

    // `validate` guarantees a leading slash and no trailing one.
    let root_path = state.settings.root_path.clone();
    let routes = if root_path.is_empty() {
        routes
    } else {
        Router::new().nest(&root_path, routes)
    };

    routes
        .fallback(not_found_handler)
        .with_state(state)
        .layer(CorsLayer::very_permissive())
        .layer(middleware::from_fn(access_log))
}
