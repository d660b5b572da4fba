//! Test helpers shared across modules

use parking_lot::Mutex;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

use crate::config::VisionConfig;
use crate::vision::VisionClient;

/// Request as seen by the stub server
#[derive(Debug, Clone)]
pub struct Captured {
    pub head: String,
    pub body: Vec<u8>,
}

/// Loopback HTTP server that answers every request with a fixed reply
pub struct StubServer {
    pub endpoint: String,
    hits: Arc<AtomicUsize>,
    requests: Arc<Mutex<Vec<Captured>>>,
}

impl StubServer {
    pub async fn start(status: u16, body: String) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let hits = Arc::new(AtomicUsize::new(0));
        let requests = Arc::new(Mutex::new(Vec::new()));

        let task_hits = hits.clone();
        let task_requests = requests.clone();
        tokio::spawn(async move {
            loop {
                let Ok((stream, _)) = listener.accept().await else {
                    break;
                };
                task_hits.fetch_add(1, Ordering::SeqCst);
                serve_one(stream, status, &body, &task_requests).await;
            }
        });

        Self {
            endpoint: format!("http://{}/v1/images:annotate", addr),
            hits,
            requests,
        }
    }

    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Captured {
        self.requests
            .lock()
            .last()
            .cloned()
            .expect("stub server saw no request")
    }
}

async fn serve_one(
    mut stream: TcpStream,
    status: u16,
    body: &str,
    requests: &Mutex<Vec<Captured>>,
) {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    let header_end = loop {
        let n = stream.read(&mut chunk).await.unwrap();
        assert!(n > 0, "client closed before sending headers");
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
    let content_length = head
        .lines()
        .find_map(|line| {
            let (name, value) = line.split_once(':')?;
            name.eq_ignore_ascii_case("content-length")
                .then(|| value.trim().parse::<usize>().ok())
                .flatten()
        })
        .unwrap_or(0);

    while buf.len() < header_end + content_length {
        let n = stream.read(&mut chunk).await.unwrap();
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
    }

    // Record before replying so the client never observes a missing entry
    requests.lock().push(Captured {
        head,
        body: buf[header_end..].to_vec(),
    });

    let reply = format!(
        "HTTP/1.1 {} Stub\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        body.len(),
        body
    );
    stream.write_all(reply.as_bytes()).await.unwrap();
    stream.shutdown().await.ok();
}

/// Endpoint on a loopback port with nothing listening
pub async fn refused_endpoint() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}/v1/images:annotate", addr)
}

/// Client aimed at `endpoint`, bypassing any proxy from the environment
pub fn client_for(endpoint: &str) -> VisionClient {
    let mut config = VisionConfig::with_api_key("test-key");
    config.endpoint = endpoint.to_string();
    let http = reqwest::Client::builder().no_proxy().build().unwrap();
    VisionClient::with_http_client(config, http)
}
