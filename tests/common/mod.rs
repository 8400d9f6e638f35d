//! テスト用の簡易HTTPサーバー
//!
//! 1接続だけ受け付け、リクエスト全体を記録して固定レスポンスを返す。

use std::net::SocketAddr;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

pub struct FakeBackend {
    pub addr: SocketAddr,
    pub handle: JoinHandle<Option<String>>,
}

impl FakeBackend {
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }
}

/// 固定レスポンスを1回返すサーバーを起動
pub async fn serve_once(status: u16, body: &str) -> FakeBackend {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind failed");
    let addr = listener.local_addr().expect("no local addr");
    let response = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        reason(status),
        body.len(),
        body
    );

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.ok()?;
        let request = read_request(&mut socket).await;
        socket.write_all(response.as_bytes()).await.ok()?;
        socket.shutdown().await.ok();
        Some(request)
    });

    FakeBackend { addr, handle }
}

async fn read_request(socket: &mut tokio::net::TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 8192];
    loop {
        let n = match socket.read(&mut chunk).await {
            Ok(0) | Err(_) => break,
            Ok(n) => n,
        };
        buf.extend_from_slice(&chunk[..n]);
        if is_complete(&buf) {
            break;
        }
    }
    String::from_utf8_lossy(&buf).to_string()
}

fn is_complete(buf: &[u8]) -> bool {
    let text = String::from_utf8_lossy(buf);
    let Some(header_end) = text.find("\r\n\r\n") else {
        return false;
    };
    let headers = text[..header_end].to_ascii_lowercase();
    let body_len = buf.len() - (header_end + 4);

    if let Some(len) = headers
        .lines()
        .find_map(|l| l.strip_prefix("content-length:"))
        .and_then(|v| v.trim().parse::<usize>().ok())
    {
        return body_len >= len;
    }
    if headers.contains("transfer-encoding: chunked") {
        return text.ends_with("0\r\n\r\n");
    }
    true
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        404 => "Not Found",
        500 => "Internal Server Error",
        502 => "Bad Gateway",
        _ => "Unknown",
    }
}
