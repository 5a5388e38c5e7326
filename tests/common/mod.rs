//! Throwaway HTTP responder for exercising the remote clients.

#![allow(dead_code)]

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::oneshot;

#[derive(Debug)]
pub struct CapturedRequest {
    pub head: String,
    pub body: Vec<u8>,
}

impl CapturedRequest {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).expect("request body is JSON")
    }

    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Answer a single request with `status` and `body`.
pub async fn respond_once(status: u16, body: &str) -> (String, oneshot::Receiver<CapturedRequest>) {
    let (release_tx, release_rx) = oneshot::channel();
    release_tx.send(()).unwrap();
    respond_when_released(status, body, release_rx).await
}

/// Answer a single request, but only after `release` fires.
///
/// The captured request is delivered as soon as it has been read, so a test
/// can act while the client is still waiting.
pub async fn respond_when_released(
    status: u16,
    body: &str,
    release: oneshot::Receiver<()>,
) -> (String, oneshot::Receiver<CapturedRequest>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let body = body.to_string();
    let (captured_tx, captured_rx) = oneshot::channel();

    tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.unwrap();
        let request = read_request(&mut stream).await;
        let _ = captured_tx.send(request);

        if release.await.is_err() {
            return;
        }

        let response = format!(
            "HTTP/1.1 {status} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            if status < 400 { "OK" } else { "Error" },
            body.len()
        );
        let _ = stream.write_all(response.as_bytes()).await;
        let _ = stream.shutdown().await;
    });

    (format!("http://{addr}"), captured_rx)
}

/// Base URL nothing is listening on.
pub async fn unreachable_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

async fn read_request(stream: &mut TcpStream) -> CapturedRequest {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    loop {
        let n = stream.read(&mut chunk).await.unwrap_or(0);
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);

        let Some(end) = find(&buf, b"\r\n\r\n") else {
            continue;
        };
        let head = String::from_utf8_lossy(&buf[..end]).to_ascii_lowercase();
        let body_start = end + 4;

        if head.contains("transfer-encoding: chunked") {
            if buf.ends_with(b"0\r\n\r\n") {
                return CapturedRequest {
                    head,
                    body: buf[body_start..].to_vec(),
                };
            }
            continue;
        }

        let length = content_length(&head);
        if buf.len() >= body_start + length {
            return CapturedRequest {
                head,
                body: buf[body_start..body_start + length].to_vec(),
            };
        }
    }

    CapturedRequest {
        head: String::from_utf8_lossy(&buf).to_ascii_lowercase(),
        body: Vec::new(),
    }
}

fn content_length(head: &str) -> usize {
    head.lines()
        .find_map(|line| line.strip_prefix("content-length:"))
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or(0)
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}
