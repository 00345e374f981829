//! Home page module
//!
//! Renders the container status page: system information, visit count, the
//! guestbook form, and the latest messages.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;

use crate::config::AppState;
use crate::http;
use crate::logger;
use crate::store::Message;
use crate::sysinfo;

use chrono::Local;

/// Number of messages shown on the page
const SHOWN_MESSAGES: usize = 5;

const HOME_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>Container Test App</title>
    <style>
        body {
            font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, Arial, sans-serif;
            max-width: 800px;
            margin: 0 auto;
            padding: 20px;
            background-color: #f5f5f5;
        }
        .container {
            background-color: white;
            padding: 30px;
            border-radius: 10px;
            box-shadow: 0 2px 10px rgba(0,0,0,0.1);
        }
        h1 {
            color: #333;
            text-align: center;
        }
        .status {
            color: #28a745;
            font-weight: bold;
            text-align: center;
        }
        .info-box {
            background-color: #e7f3ff;
            padding: 15px;
            border-radius: 5px;
            margin: 20px 0;
        }
        .endpoint {
            background-color: #f0f0f0;
            padding: 10px;
            margin: 10px 0;
            border-radius: 5px;
            font-family: monospace;
        }
        .message {
            border-left: 3px solid #667eea;
            background-color: #fafafa;
            padding: 10px;
            margin: 10px 0;
        }
        .message .author {
            font-weight: bold;
        }
        .message .time {
            color: #888;
            font-size: 0.85em;
            margin-left: 10px;
        }
        .message p {
            margin: 5px 0 0 0;
        }
        form input, form textarea {
            width: 100%;
            padding: 8px;
            margin: 5px 0;
            box-sizing: border-box;
        }
        form button {
            background-color: #667eea;
            color: white;
            border: none;
            padding: 10px 20px;
            border-radius: 5px;
            cursor: pointer;
        }
    </style>
</head>
<body>
    <div class="container">
        <h1>Container Test App</h1>
        <p class="status">The application is up and running</p>

        <div class="info-box">
            <h2>System information</h2>
            <p><strong>Current time:</strong> {{current_time}}</p>
            <p><strong>Hostname:</strong> {{hostname}}</p>
            <p><strong>Container IP:</strong> {{container_ip}}</p>
            <p><strong>Visits:</strong> {{visit_count}}</p>
        </div>

        <div class="info-box">
            <h2>Guestbook</h2>
            <form method="post" action="/message">
                <input type="text" name="author" placeholder="Your name (optional)">
                <textarea name="content" rows="3" placeholder="Leave a message"></textarea>
                <button type="submit">Sign</button>
            </form>
            {{messages}}
        </div>

        <div class="info-box">
            <h2>Available endpoints</h2>
            <div class="endpoint">GET / - Home page (this page)</div>
            <div class="endpoint">POST /message - Guestbook submission</div>
            <div class="endpoint">GET /api/status - Application status (JSON)</div>
            <div class="endpoint">GET /api/info - System information (JSON)</div>
            <div class="endpoint">GET /api/messages - Guestbook messages (JSON)</div>
            <div class="endpoint">GET /api/stats - Visit statistics (JSON)</div>
            <div class="endpoint">GET /health - Health check</div>
        </div>
    </div>
</body>
</html>
"#;

/// GET / - record the visit and render the status page
pub async fn handle_home(state: &AppState, peer_ip: &str, is_head: bool) -> Response<Full<Bytes>> {
    let log = match state.store.record_visit(peer_ip) {
        Ok(log) => log,
        Err(e) => {
            logger::log_error(&format!("Failed to record visit: {e}"));
            return http::build_500_response();
        }
    };

    let messages = match state.store.load_messages() {
        Ok(messages) => messages,
        Err(e) => {
            logger::log_error(&format!("Failed to load messages: {e}"));
            return http::build_500_response();
        }
    };

    let hostname = sysinfo::hostname();
    let container_ip = sysinfo::container_ip(&hostname).await;
    let html = render_home(&hostname, &container_ip, log.count, &messages);
    http::build_html_response(html, is_head)
}

/// Substitute the page placeholders
fn render_home(hostname: &str, container_ip: &str, visit_count: u64, messages: &[Message]) -> String {
    HOME_TEMPLATE
        .replace(
            "{{current_time}}",
            &Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        )
        .replace("{{hostname}}", &html_escape(hostname))
        .replace("{{container_ip}}", &html_escape(container_ip))
        .replace("{{visit_count}}", &visit_count.to_string())
        .replace("{{messages}}", &render_messages(messages))
}

/// Render the latest messages, newest first
fn render_messages(messages: &[Message]) -> String {
    if messages.is_empty() {
        return "<p>No messages yet. Be the first to sign!</p>".to_string();
    }

    let mut html = String::new();
    for message in messages.iter().rev().take(SHOWN_MESSAGES) {
        html.push_str(&format!(
            "<div class=\"message\"><span class=\"author\">{}</span><span class=\"time\">{}</span><p>{}</p></div>\n",
            html_escape(&message.author),
            html_escape(&message.timestamp),
            html_escape(&message.content),
        ));
    }
    html
}

/// Escape user-supplied text for HTML interpolation
fn html_escape(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(author: &str, content: &str) -> Message {
        Message {
            author: author.to_string(),
            content: content.to_string(),
            timestamp: "2026-01-01 12:00:00".to_string(),
        }
    }

    #[test]
    fn test_render_home_substitutes_placeholders() {
        let html = render_home("pod-1234", "172.17.0.2", 42, &[]);
        assert!(html.contains("pod-1234"));
        assert!(html.contains("172.17.0.2"));
        assert!(html.contains("<strong>Visits:</strong> 42"));
        assert!(!html.contains("{{"));
    }

    #[test]
    fn test_render_messages_newest_first_top_five() {
        let messages: Vec<Message> = (0..8)
            .map(|i| message("author", &format!("message {i}")))
            .collect();
        let html = render_messages(&messages);

        // Only the five newest appear
        assert!(html.contains("message 7"));
        assert!(html.contains("message 3"));
        assert!(!html.contains("message 2"));
        // Newest first
        let newest = html.find("message 7").expect("newest shown");
        let oldest_shown = html.find("message 3").expect("oldest shown");
        assert!(newest < oldest_shown);
    }

    #[test]
    fn test_render_messages_escapes_user_content() {
        let html = render_messages(&[message("<b>eve</b>", "<script>alert(1)</script>")]);
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("&lt;b&gt;eve&lt;/b&gt;"));
    }

    #[test]
    fn test_render_messages_empty() {
        assert!(render_messages(&[]).contains("No messages yet"));
    }

    #[test]
    fn test_html_escape() {
        assert_eq!(html_escape("a&b"), "a&amp;b");
        assert_eq!(html_escape("\"quote'"), "&quot;quote&#39;");
        assert_eq!(html_escape("plain"), "plain");
    }
}
