// JSON endpoint handlers module

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};

use super::response::{internal_error, json_response};
use super::types::{InfoResponse, StatusResponse};
use crate::config::AppState;
use crate::logger;
use crate::sysinfo;

use chrono::Utc;
use std::collections::BTreeMap;

/// GET /api/status - application status and storage overview
pub fn handle_status(state: &AppState) -> Response<Full<Bytes>> {
    let response = StatusResponse {
        status: "running",
        timestamp: Utc::now().to_rfc3339(),
        version: env!("CARGO_PKG_VERSION"),
        storage_dir: state.store.dir().display().to_string(),
        files: state.store.file_names(),
    };
    json_response(StatusCode::OK, &response)
}

/// GET /api/info - system information
///
/// The environment map is included only when `api.expose_environment` is on.
pub async fn handle_info(state: &AppState) -> Response<Full<Bytes>> {
    let hostname = sysinfo::hostname();
    let ip_address = sysinfo::container_ip(&hostname).await;

    let environment = if state.config.api.expose_environment {
        Some(std::env::vars().collect::<BTreeMap<String, String>>())
    } else {
        None
    };

    let response = InfoResponse {
        hostname,
        ip_address,
        server: state.config.http.server_name.clone(),
        version: env!("CARGO_PKG_VERSION"),
        storage_dir: state.store.dir().display().to_string(),
        environment,
    };
    json_response(StatusCode::OK, &response)
}

/// GET /api/messages - full guestbook message list
pub fn handle_messages(state: &AppState) -> Response<Full<Bytes>> {
    match state.store.load_messages() {
        Ok(messages) => json_response(StatusCode::OK, &messages),
        Err(e) => {
            logger::log_error(&format!("Failed to load messages: {e}"));
            internal_error()
        }
    }
}

/// GET /api/stats - full visit log
pub fn handle_stats(state: &AppState) -> Response<Full<Bytes>> {
    match state.store.load_visits() {
        Ok(log) => json_response(StatusCode::OK, &log),
        Err(e) => {
            logger::log_error(&format!("Failed to load visit log: {e}"));
            internal_error()
        }
    }
}

/// GET /health - liveness probe
pub fn handle_health() -> Response<Full<Bytes>> {
    json_response(StatusCode::OK, &serde_json::json!({"status": "healthy"}))
}
