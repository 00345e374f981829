// API module entry
// JSON endpoints for container deployment checks

mod handlers;
mod response;
mod types;

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;

use crate::config::AppState;

pub use handlers::handle_health;

/// Dispatch GET /api/* requests
pub async fn handle_api(path: &str, state: &AppState) -> Response<Full<Bytes>> {
    match path {
        "/api/status" => handlers::handle_status(state),
        "/api/info" => handlers::handle_info(state).await,
        "/api/messages" => handlers::handle_messages(state),
        "/api/stats" => handlers::handle_stats(state),
        _ => response::not_found(),
    }
}
