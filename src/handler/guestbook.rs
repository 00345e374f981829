//! Guestbook submission module
//!
//! Accepts the message form posted from the home page and redirects back.

use http_body_util::{BodyExt, Full};
use hyper::body::Bytes;
use hyper::{Request, Response};
use serde::Deserialize;

use crate::config::AppState;
use crate::http;
use crate::logger;

/// Form fields posted from the home page
#[derive(Debug, Deserialize)]
struct MessageForm {
    #[serde(default)]
    author: String,
    #[serde(default)]
    content: String,
}

/// POST /message - append a guestbook entry and redirect to /
///
/// Empty content is dropped without an error; the redirect happens either way.
pub async fn handle_post_message(
    req: Request<hyper::body::Incoming>,
    state: &AppState,
) -> Response<Full<Bytes>> {
    if let Some(response) = check_body_size(&req, state.config.http.max_body_size) {
        return response;
    }

    let body = match req.collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(e) => {
            logger::log_warning(&format!("Failed to read message body: {e}"));
            return http::build_400_response();
        }
    };

    let form: MessageForm = match serde_urlencoded::from_bytes(&body) {
        Ok(form) => form,
        Err(e) => {
            logger::log_warning(&format!("Malformed message form: {e}"));
            return http::build_400_response();
        }
    };

    let content = form.content.trim();
    if !content.is_empty() {
        if let Err(e) = state.store.append_message(author_or_default(&form.author), content) {
            logger::log_error(&format!("Failed to save message: {e}"));
            return http::build_500_response();
        }
    }

    http::build_redirect_response("/")
}

/// Blank author falls back to "Anonymous"
fn author_or_default(author: &str) -> &str {
    let trimmed = author.trim();
    if trimmed.is_empty() {
        "Anonymous"
    } else {
        trimmed
    }
}

/// Validate Content-Length header and return 413 if exceeded
fn check_body_size(
    req: &Request<hyper::body::Incoming>,
    max_body_size: u64,
) -> Option<Response<Full<Bytes>>> {
    let content_length = req.headers().get("content-length")?;
    let size_str = content_length.to_str().ok()?;
    match size_str.parse::<u64>() {
        Ok(size) if size > max_body_size => {
            logger::log_warning(&format!(
                "Request body too large: {size} bytes (max: {max_body_size})"
            ));
            Some(http::build_413_response())
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_parses_both_fields() {
        let form: MessageForm =
            serde_urlencoded::from_bytes(b"author=Alice&content=Hello+from+a+pod").expect("parse");
        assert_eq!(form.author, "Alice");
        assert_eq!(form.content, "Hello from a pod");
    }

    #[test]
    fn test_form_missing_fields_default_to_empty() {
        let form: MessageForm = serde_urlencoded::from_bytes(b"content=hi").expect("parse");
        assert_eq!(form.author, "");
        assert_eq!(form.content, "hi");

        let form: MessageForm = serde_urlencoded::from_bytes(b"").expect("parse");
        assert_eq!(form.author, "");
        assert_eq!(form.content, "");
    }

    #[test]
    fn test_form_decodes_percent_escapes() {
        let form: MessageForm =
            serde_urlencoded::from_bytes(b"author=Bob&content=a%26b%3Dc").expect("parse");
        assert_eq!(form.content, "a&b=c");
    }

    #[test]
    fn test_author_or_default() {
        assert_eq!(author_or_default(""), "Anonymous");
        assert_eq!(author_or_default("   "), "Anonymous");
        assert_eq!(author_or_default(" Alice "), "Alice");
    }
}
