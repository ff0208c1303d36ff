//! Request routing dispatch module
//!
//! Entry point for HTTP request processing: method validation, path
//! resolution against the front-end roots, and response building.

use crate::config::AppState;
use crate::http;
use crate::logger::{self, AccessLogEntry};
use crate::resolver;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Method, Request, Response};
use percent_encoding::percent_decode_str;
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

/// Main entry point for HTTP request handling
///
/// Every path is accepted and routed the same way; there are no other routes.
/// The resolver picks the active root and relative path, the static-file
/// loader reads it, and a missing file (including a missing fallback index)
/// becomes a plain 404.
pub async fn handle_request(
    req: Request<hyper::body::Incoming>,
    peer_addr: SocketAddr,
    state: Arc<AppState>,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let started = Instant::now();
    let method = req.method().clone();
    let uri = req.uri().clone();
    let is_head = method == Method::HEAD;

    // 1. Check HTTP method
    if let Some(resp) = check_http_method(&method, state.config.http.enable_cors) {
        return Ok(resp);
    }

    // 2. Resolve the path against the front-end roots and load the file
    let requested_path = decode_path(uri.path());
    let resolution = resolver::resolve(
        &requested_path,
        &state.built_root,
        &state.source_root,
        &state.config.frontend.index_file,
    );

    let (response, status, body_bytes) =
        match crate::handler::static_files::load_resolved(&resolution).await {
            Some((content, content_type)) => {
                let bytes_sent = body_bytes_sent(is_head, content.len());
                let resp = http::response::build_file_response(
                    content,
                    content_type,
                    &state.config.http.server_name,
                    is_head,
                );
                (resp, 200, bytes_sent)
            }
            None => (http::build_404_response(), 404, 0),
        };

    // 3. Access log
    if state.config.logging.access_log {
        let mut entry = AccessLogEntry::new(
            peer_addr.ip().to_string(),
            method.to_string(),
            uri.path().to_string(),
        );
        entry.query = uri.query().map(ToString::to_string);
        entry.http_version = http_version_label(req.version()).to_string();
        entry.referer = header_value(&req, "referer");
        entry.user_agent = header_value(&req, "user-agent");
        entry.status = status;
        entry.body_bytes = body_bytes;
        entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
        logger::log_access(&entry, &state.config.logging.log_format);
    }

    Ok(response)
}

/// Check HTTP method and return an early response for non-GET/HEAD methods
fn check_http_method(method: &Method, enable_cors: bool) -> Option<Response<Full<Bytes>>> {
    match method {
        &Method::GET | &Method::HEAD => None,
        &Method::OPTIONS => Some(http::build_options_response(enable_cors)),
        _ => {
            logger::log_warning(&format!("Method not allowed: {method}"));
            Some(http::build_405_response())
        }
    }
}

/// Percent-decode a raw request path.
///
/// Hyper hands the path through undecoded, so `/my%20file.txt` must become
/// `my file.txt` before the resolver checks for it on disk. Invalid UTF-8
/// sequences are replaced rather than rejected; a replacement character never
/// matches a real file, so such paths fall through to the index document.
fn decode_path(raw_path: &str) -> String {
    percent_decode_str(raw_path).decode_utf8_lossy().into_owned()
}

/// Body bytes recorded in the access log. HEAD sends headers only.
const fn body_bytes_sent(is_head: bool, content_len: usize) -> usize {
    if is_head {
        0
    } else {
        content_len
    }
}

/// Short version label for log lines ("1.1", "2", ...)
fn http_version_label(version: hyper::Version) -> &'static str {
    if version == hyper::Version::HTTP_10 {
        "1.0"
    } else if version == hyper::Version::HTTP_2 {
        "2"
    } else {
        "1.1"
    }
}

fn header_value(req: &Request<hyper::body::Incoming>, name: &str) -> Option<String> {
    req.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn decode_path_unescapes_percent_sequences() {
        assert_eq!(decode_path("/my%20file.txt"), "/my file.txt");
        assert_eq!(decode_path("/assets/app.js"), "/assets/app.js");
        assert_eq!(decode_path("/caf%C3%A9.html"), "/café.html");
    }

    #[test]
    fn decode_path_replaces_invalid_utf8() {
        // %FF is not valid UTF-8; the replacement character keeps the path
        // total without ever matching a file on disk
        let decoded = decode_path("/bad%FFname");
        assert!(decoded.contains('\u{FFFD}'));
    }

    #[test]
    fn encoded_request_reaches_file_with_space_in_name() {
        let tmp = TempDir::new().expect("tempdir");
        let source = tmp.path().join("frontend");
        let built = source.join("dist");
        fs::create_dir_all(&built).expect("create dirs");
        fs::write(built.join("my file.txt"), "hello").expect("write");

        let decoded = decode_path("/my%20file.txt");
        let res = resolver::resolve(&decoded, &built, &source, "index.html");
        assert_eq!(res.base_dir, built.as_path());
        assert_eq!(res.relative_path, "my file.txt");
    }

    #[test]
    fn head_requests_log_zero_body_bytes() {
        assert_eq!(body_bytes_sent(true, 1234), 0);
        assert_eq!(body_bytes_sent(false, 1234), 1234);
    }
}
