//! A tiny HTTP/1.1 server on localhost serving the fixed resources the end-to-end tests
//! talk to. It only understands `Content-Length` framed requests and closes every
//! connection after one response.

use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

pub(crate) const TODO_BODY: &str = "{\n  \"userId\": 1,\n  \"id\": 1,\n  \"title\": \"delectus aut autem\",\n  \"completed\": false\n}";
pub(crate) const CREATED_ID: u32 = 101;
const SLOW_DELAY: Duration = Duration::from_secs(2);

pub(crate) struct FixtureServer {
    addr: SocketAddr,
    hits: Arc<AtomicUsize>,
}

impl FixtureServer {
    pub(crate) async fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let hits = Arc::new(AtomicUsize::new(0));
        let hits_clone = Arc::clone(&hits);
        tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                let conn_hits = Arc::clone(&hits_clone);
                tokio::spawn(async move {
                    // client may hang up early (timeouts)
                    let _ = serve(stream, conn_hits).await;
                });
            }
        });
        Self { addr, hits }
    }

    pub(crate) fn url(&self, path: &str) -> String { format!("http://{}{path}", self.addr) }

    /// Number of complete requests received so far.
    pub(crate) fn hits(&self) -> usize { self.hits.load(Ordering::SeqCst) }
}

struct ReceivedRequest {
    method: String,
    path: String,
    headers: Vec<(String, String)>,
    body: Vec<u8>,
}

impl ReceivedRequest {
    fn header(&self, name: &str) -> Option<&str> {
        self.headers.iter().find(|(n, _)| n == name).map(|(_, v)| v.as_str())
    }

    fn is_json(&self) -> bool {
        self.header("content-type").is_some_and(|ct| ct.starts_with("application/json"))
    }
}

async fn serve(mut stream: TcpStream, hits: Arc<AtomicUsize>) -> std::io::Result<()> {
    let Some(request) = read_request(&mut stream).await? else {
        return Ok(());
    };
    hits.fetch_add(1, Ordering::SeqCst);
    let (status, body) = route(&request).await;
    let reason = match status {
        200 => "OK",
        201 => "Created",
        _ => "Not Found",
    };
    let head = format!(
        "HTTP/1.1 {status} {reason}\r\nContent-Type: application/json; charset=utf-8\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        body.len()
    );
    stream.write_all(head.as_bytes()).await?;
    stream.write_all(body.as_bytes()).await?;
    stream.shutdown().await
}

async fn read_request(stream: &mut TcpStream) -> std::io::Result<Option<ReceivedRequest>> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    let head_end = loop {
        let n = stream.read(&mut chunk).await?;
        if n == 0 {
            return Ok(None);
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = String::from_utf8_lossy(&buf[..head_end]).into_owned();
    let mut lines = head.lines();
    let mut request_line = lines.next().unwrap_or_default().split_whitespace();
    let method = request_line.next().unwrap_or_default().to_string();
    let path = request_line.next().unwrap_or_default().to_string();
    let headers: Vec<(String, String)> = lines
        .filter_map(|line| line.split_once(':'))
        .map(|(n, v)| (n.trim().to_ascii_lowercase(), v.trim().to_string()))
        .collect();
    let content_length = headers
        .iter()
        .find(|(n, _)| n == "content-length")
        .and_then(|(_, v)| v.parse::<usize>().ok())
        .unwrap_or(0);

    while buf.len() < head_end + content_length {
        let n = stream.read(&mut chunk).await?;
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
    }
    let body_end = buf.len().min(head_end + content_length);
    let body = buf[head_end..body_end].to_vec();
    Ok(Some(ReceivedRequest { method, path, headers, body }))
}

async fn route(request: &ReceivedRequest) -> (u16, String) {
    let payload = String::from_utf8_lossy(&request.body);
    match (request.method.as_str(), request.path.as_str()) {
        ("GET", "/todos/1") => (200, TODO_BODY.to_string()),
        ("POST", "/posts") if request.is_json() => {
            (201, format!("{{\"id\":{CREATED_ID},\"echo\":{payload}}}"))
        }
        ("POST", "/posts") => (201, format!("{{\"id\":{CREATED_ID}}}")),
        ("PUT" | "PATCH", "/posts/1") if request.is_json() => {
            (200, format!("{{\"id\":1,\"echo\":{payload}}}"))
        }
        ("DELETE", "/posts/1") => (200, "{}".to_string()),
        ("GET", "/headers") => {
            let lines: Vec<String> =
                request.headers.iter().map(|(n, v)| format!("{n}: {v}")).collect();
            (200, lines.join("\n"))
        }
        ("GET", "/slow") => {
            tokio::time::sleep(SLOW_DELAY).await;
            (200, "{}".to_string())
        }
        _ => (404, "{}".to_string()),
    }
}
