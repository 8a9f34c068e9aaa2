//! Minimal HTTP/1.1 request parsing and response building for the UI server.
//! Uses tokio directly (no web framework), one request per connection.

use crate::error::{Result, UiError};
use std::collections::HashMap;
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::time::timeout;

pub const READ_TIMEOUT: Duration = Duration::from_secs(5);
pub const MAX_REQUEST_BYTES: usize = 1_000_000;

#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: String,
    pub path: String,
    pub query: HashMap<String, String>,
    /// Header names are lowercased.
    pub headers: HashMap<String, String>,
    pub body: String,
}

impl HttpRequest {
    pub fn parse(raw: &[u8]) -> Result<Self> {
        let headers_end = find_headers_end(raw)
            .ok_or_else(|| UiError::BadRequest("incomplete request headers".to_string()))?;
        let head = std::str::from_utf8(&raw[..headers_end])
            .map_err(|_| UiError::BadRequest("request headers are not UTF-8".to_string()))?;

        let mut lines = head.split("\r\n");
        let request_line = lines.next().unwrap_or_default();
        let parts: Vec<&str> = request_line.split_whitespace().collect();
        if parts.len() < 2 {
            return Err(UiError::BadRequest(format!("invalid request line: {}", request_line)));
        }

        let method = parts[0].to_uppercase();
        let (path, query) = match parts[1].split_once('?') {
            Some((path, query)) => (path, decode_form(query)),
            None => (parts[1], HashMap::new()),
        };

        // Normalize path (remove trailing slash except for root)
        let mut path = path.trim_end_matches('/').to_string();
        if path.is_empty() {
            path = "/".to_string();
        }

        let headers = lines
            .filter_map(|line| line.split_once(':'))
            .map(|(key, value)| (key.trim().to_lowercase(), value.trim().to_string()))
            .collect::<HashMap<_, _>>();

        let body_start = headers_end + 4;
        let body_end = match headers.get("content-length").and_then(|v| v.parse::<usize>().ok()) {
            Some(len) => (body_start + len).min(raw.len()),
            None => raw.len(),
        };
        let body = String::from_utf8_lossy(&raw[body_start..body_end]).into_owned();

        Ok(Self {
            method,
            path,
            query,
            headers,
            body,
        })
    }

    /// Decodes an `application/x-www-form-urlencoded` body.
    pub fn form(&self) -> HashMap<String, String> {
        decode_form(&self.body)
    }
}

pub fn decode_form(encoded: &str) -> HashMap<String, String> {
    url::form_urlencoded::parse(encoded.as_bytes())
        .into_owned()
        .collect()
}

fn find_headers_end(raw: &[u8]) -> Option<usize> {
    raw.windows(4).position(|w| w == b"\r\n\r\n")
}

fn extract_content_length(head: &[u8]) -> Option<usize> {
    let head = std::str::from_utf8(head).ok()?;
    for line in head.split("\r\n") {
        if let Some((key, value)) = line.split_once(':') {
            if key.trim().eq_ignore_ascii_case("content-length") {
                return value.trim().parse().ok();
            }
        }
    }
    None
}

#[derive(Debug)]
pub enum ReadOutcome {
    Complete(Vec<u8>),
    Closed,
    TimedOut,
    TooLarge,
}

/// Reads one request: headers, then `Content-Length` bytes of body.
pub async fn read_request<S>(stream: &mut S) -> std::io::Result<ReadOutcome>
where
    S: AsyncRead + Unpin,
{
    match timeout(READ_TIMEOUT, read_until_complete(stream)).await {
        Ok(result) => result,
        Err(_) => Ok(ReadOutcome::TimedOut),
    }
}

async fn read_until_complete<S>(stream: &mut S) -> std::io::Result<ReadOutcome>
where
    S: AsyncRead + Unpin,
{
    let mut buffer = Vec::new();
    let mut temp_buf = [0u8; 8192];

    loop {
        let n = stream.read(&mut temp_buf).await?;
        if n == 0 {
            if buffer.is_empty() {
                return Ok(ReadOutcome::Closed);
            }
            return Ok(ReadOutcome::Complete(buffer));
        }
        buffer.extend_from_slice(&temp_buf[..n]);

        if buffer.len() > MAX_REQUEST_BYTES {
            return Ok(ReadOutcome::TooLarge);
        }

        if let Some(headers_end) = find_headers_end(&buffer) {
            let content_length = extract_content_length(&buffer[..headers_end]).unwrap_or(0);
            if content_length > MAX_REQUEST_BYTES {
                return Ok(ReadOutcome::TooLarge);
            }
            if buffer.len() >= headers_end + 4 + content_length {
                return Ok(ReadOutcome::Complete(buffer));
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub content_type: &'static str,
    pub body: String,
}

impl HttpResponse {
    pub fn html(status: u16, body: String) -> Self {
        Self {
            status,
            content_type: "text/html; charset=utf-8",
            body,
        }
    }

    pub fn css(body: String) -> Self {
        Self {
            status: 200,
            content_type: "text/css; charset=utf-8",
            body,
        }
    }

    pub fn json(status: u16, body: String) -> Self {
        Self {
            status,
            content_type: "application/json",
            body,
        }
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        format!(
            "HTTP/1.1 {} {}\r\n\
             Content-Type: {}\r\n\
             Content-Length: {}\r\n\
             Cache-Control: no-store\r\n\
             Connection: close\r\n\
             \r\n\
             {}",
            self.status,
            status_text(self.status),
            self.content_type,
            self.body.len(),
            self.body
        )
        .into_bytes()
    }
}

fn status_text(status: u16) -> &'static str {
    match status {
        200 => "OK",
        400 => "Bad Request",
        404 => "Not Found",
        405 => "Method Not Allowed",
        408 => "Request Timeout",
        413 => "Payload Too Large",
        500 => "Internal Server Error",
        _ => "Unknown",
    }
}
