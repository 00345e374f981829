//! Request routing dispatch module
//!
//! Entry point for HTTP request processing: method validation, route matching,
//! and access logging.

use crate::api;
use crate::config::AppState;
use crate::handler::{guestbook, home};
use crate::http;
use crate::logger;
use crate::logger::AccessLogEntry;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Method, Request, Response};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;

/// Main entry point for HTTP request handling
pub async fn handle_request(
    req: Request<hyper::body::Incoming>,
    peer_addr: SocketAddr,
    state: Arc<AppState>,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let is_head = method == Method::HEAD;
    let referer = header_value(&req, "referer");
    let user_agent = header_value(&req, "user-agent");

    let mut response = route_request(req, &peer_addr, &state).await;

    // HEAD gets the same headers with an empty body
    if is_head {
        *response.body_mut() = Full::new(Bytes::new());
    }

    if state.config.logging.access_log {
        let mut entry = AccessLogEntry::new(peer_addr.ip().to_string(), method.to_string(), path);
        entry.status = response.status().as_u16();
        entry.body_bytes = content_length(&response);
        entry.referer = referer;
        entry.user_agent = user_agent;
        logger::log_access(&entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}

/// Route request based on method and path
async fn route_request(
    req: Request<hyper::body::Incoming>,
    peer_addr: &SocketAddr,
    state: &Arc<AppState>,
) -> Response<Full<Bytes>> {
    match (req.method(), req.uri().path()) {
        (&Method::GET | &Method::HEAD, "/") => {
            let is_head = *req.method() == Method::HEAD;
            home::handle_home(state, &peer_addr.ip().to_string(), is_head).await
        }
        (&Method::POST, "/message") => guestbook::handle_post_message(req, state).await,
        (&Method::GET | &Method::HEAD, "/health") => api::handle_health(),
        (&Method::GET | &Method::HEAD, path) if path.starts_with("/api/") => {
            api::handle_api(path, state).await
        }
        (&Method::OPTIONS, _) => http::build_options_response(),
        (&Method::GET | &Method::HEAD | &Method::POST, _) => http::build_404_response(),
        _ => http::build_405_response(),
    }
}

fn header_value(req: &Request<hyper::body::Incoming>, name: &str) -> Option<String> {
    req.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string)
}

/// Response body size as advertised by the Content-Length header
fn content_length(response: &Response<Full<Bytes>>) -> usize {
    response
        .headers()
        .get("content-length")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse().ok())
        .unwrap_or(0)
}
