//! Test helpers for Crier publishers.
//!
//! [`MockHttpServer`] binds a loopback port and answers each incoming
//! connection with the next scripted [`MockResponse`], capturing every
//! request so tests can assert on call order and payloads.
//!
//! ```rust,no_run
//! use crier_test_support::{MockHttpServer, MockResponse};
//!
//! # async fn demo() {
//! let server = MockHttpServer::start(vec![MockResponse::json(200, r#"{"id":"123"}"#)]).await;
//! // point a publisher at server.base_url() ...
//! assert_eq!(server.requests().len(), 0);
//! # }
//! ```

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

/// A canned HTTP response.
#[derive(Debug, Clone)]
pub struct MockResponse {
    status: u16,
    headers: Vec<(String, String)>,
    body: Vec<u8>,
    pace: Option<Pace>,
}

/// How fast the server moves body bytes during one exchange.
#[derive(Debug, Clone, Copy)]
struct Pace {
    chunk: usize,
    delay: Duration,
}

impl MockResponse {
    /// A JSON response with the given status.
    pub fn json(status: u16, body: &str) -> Self {
        Self {
            status,
            headers: vec![("Content-Type".into(), "application/json".into())],
            body: body.as_bytes().to_vec(),
            pace: None,
        }
    }

    /// A plain-text response (use an empty body for `204`-style replies).
    pub fn text(status: u16, body: &str) -> Self {
        Self {
            status,
            headers: vec![("Content-Type".into(), "text/plain".into())],
            body: body.as_bytes().to_vec(),
            pace: None,
        }
    }

    /// A binary response, e.g. an image or video being downloaded.
    pub fn bytes(status: u16, content_type: &str, body: &[u8]) -> Self {
        Self {
            status,
            headers: vec![("Content-Type".into(), content_type.into())],
            body: body.to_vec(),
            pace: None,
        }
    }

    /// Add a response header.
    #[must_use]
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Read the request body and write the response body `chunk` bytes at
    /// a time, pausing `delay` after each piece: a slow but live peer.
    #[must_use]
    pub fn paced(mut self, chunk: usize, delay: Duration) -> Self {
        self.pace = Some(Pace {
            chunk: chunk.max(1),
            delay,
        });
        self
    }
}

/// A request captured by the mock server.
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub method: String,
    /// Path including the query string.
    pub path: String,
    /// Header names are lowercased.
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl CapturedRequest {
    /// First value of a header, matched case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        let name = name.to_ascii_lowercase();
        self.headers
            .iter()
            .find(|(k, _)| *k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn body_str(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Body parsed as JSON. Panics if it is not JSON.
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).expect("request body is not JSON")
    }

    /// Body parsed as `application/x-www-form-urlencoded`.
    pub fn form(&self) -> HashMap<String, String> {
        serde_urlencoded::from_bytes(&self.body).expect("request body is not a form")
    }

    /// Path without the query string.
    pub fn path_only(&self) -> &str {
        self.path.split('?').next().unwrap_or_default()
    }
}

/// A loopback HTTP/1.1 server that replays scripted responses in order.
///
/// Each connection carries one request and is closed after the reply. Once
/// the script is exhausted, further requests get a `500` so an unexpected
/// extra call shows up as a failure rather than a hang.
pub struct MockHttpServer {
    base_url: String,
    script: Arc<Mutex<VecDeque<MockResponse>>>,
    requests: Arc<Mutex<Vec<CapturedRequest>>>,
    handle: JoinHandle<()>,
}

impl MockHttpServer {
    /// Bind an ephemeral port and start serving `responses`.
    pub async fn start(responses: Vec<MockResponse>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind mock server");
        let port = listener.local_addr().unwrap().port();
        let base_url = format!("http://127.0.0.1:{port}");
        let requests = Arc::new(Mutex::new(Vec::new()));

        let script = Arc::new(Mutex::new(VecDeque::from(responses)));

        let captured = Arc::clone(&requests);
        let pending = Arc::clone(&script);
        let handle = tokio::spawn(async move {
            loop {
                let Ok((stream, _)) = listener.accept().await else {
                    return;
                };
                let response = pending
                    .lock()
                    .unwrap()
                    .pop_front()
                    .unwrap_or_else(|| MockResponse::text(500, "unexpected request"));
                serve_one(stream, response, &captured).await;
            }
        });

        Self {
            base_url,
            script,
            requests,
            handle,
        }
    }

    /// Append a response to the script. Useful when a response body must
    /// embed this server's own URL.
    pub fn enqueue(&self, response: MockResponse) {
        self.script.lock().unwrap().push_back(response);
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for `path` on this server.
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Snapshot of all requests received so far, in arrival order.
    pub fn requests(&self) -> Vec<CapturedRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Number of requests received so far.
    pub fn hits(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

impl Drop for MockHttpServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn serve_one(
    mut stream: TcpStream,
    response: MockResponse,
    captured: &Arc<Mutex<Vec<CapturedRequest>>>,
) {
    let Some(request) = read_request(&mut stream, response.pace).await else {
        return;
    };
    captured.lock().unwrap().push(request);

    let mut head = format!("HTTP/1.1 {} Mock\r\n", response.status);
    for (name, value) in &response.headers {
        head.push_str(&format!("{name}: {value}\r\n"));
    }
    head.push_str(&format!(
        "Content-Length: {}\r\nConnection: close\r\n\r\n",
        response.body.len()
    ));
    if stream.write_all(head.as_bytes()).await.is_err() {
        return;
    }
    match response.pace {
        Some(pace) => {
            for piece in response.body.chunks(pace.chunk) {
                if stream.write_all(piece).await.is_err() || stream.flush().await.is_err() {
                    return;
                }
                tokio::time::sleep(pace.delay).await;
            }
        }
        None => {
            let _ = stream.write_all(&response.body).await;
        }
    }
    let _ = stream.shutdown().await;
}

async fn read_request(stream: &mut TcpStream, pace: Option<Pace>) -> Option<CapturedRequest> {
    let mut buf = Vec::new();
    let mut chunk = vec![0u8; pace.map_or(8192, |p| p.chunk)];

    let header_end = loop {
        if let Some(pos) = find(&buf, b"\r\n\r\n") {
            break pos;
        }
        let n = stream.read(&mut chunk).await.ok()?;
        if n == 0 {
            return None;
        }
        buf.extend_from_slice(&chunk[..n]);
    };

    let head = String::from_utf8_lossy(&buf[..header_end]).into_owned();
    let mut lines = head.split("\r\n");
    let mut request_line = lines.next()?.split_whitespace();
    let method = request_line.next()?.to_owned();
    let path = request_line.next()?.to_owned();
    let headers: Vec<(String, String)> = lines
        .filter_map(|line| line.split_once(':'))
        .map(|(k, v)| (k.trim().to_ascii_lowercase(), v.trim().to_owned()))
        .collect();

    let mut rest = buf[header_end + 4..].to_vec();
    let header = |name: &str| {
        headers
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.clone())
    };

    let body = if let Some(len) = header("content-length").and_then(|v| v.parse::<usize>().ok()) {
        while rest.len() < len {
            let n = stream.read(&mut chunk).await.ok()?;
            if n == 0 {
                break;
            }
            rest.extend_from_slice(&chunk[..n]);
            if let Some(pace) = pace {
                tokio::time::sleep(pace.delay).await;
            }
        }
        rest.truncate(len);
        rest
    } else if header("transfer-encoding").is_some_and(|v| v.eq_ignore_ascii_case("chunked")) {
        while find(&rest, b"0\r\n\r\n").is_none() {
            let n = stream.read(&mut chunk).await.ok()?;
            if n == 0 {
                break;
            }
            rest.extend_from_slice(&chunk[..n]);
        }
        decode_chunked(&rest)
    } else {
        Vec::new()
    };

    Some(CapturedRequest {
        method,
        path,
        headers,
        body,
    })
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

fn decode_chunked(mut raw: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    while let Some(line_end) = find(raw, b"\r\n") {
        let size_str = String::from_utf8_lossy(&raw[..line_end]);
        let size_hex = size_str.split(';').next().unwrap_or("0").trim();
        let Ok(size) = usize::from_str_radix(size_hex, 16) else {
            break;
        };
        if size == 0 {
            break;
        }
        let start = line_end + 2;
        let end = (start + size).min(raw.len());
        out.extend_from_slice(&raw[start..end]);
        raw = raw.get(end + 2..).unwrap_or_default();
    }
    out
}
