//! HTTP move client.

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use super::MoveSource;
use crate::error::{Error, Result};
use crate::models::{MoveReply, MoveRequest};

/// Default endpoint of the hosted move service
pub const DEFAULT_ENDPOINT: &str = "https://chess-backend-rt09.onrender.com/move";

/// Client for `POST <endpoint>` with a JSON `MoveRequest` body
pub struct HttpMoveClient {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpMoveClient {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("llm-chess/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl MoveSource for HttpMoveClient {
    async fn request_move(&self, request: &MoveRequest) -> Result<MoveReply> {
        debug!(endpoint = %self.endpoint, model = %request.model, turn = %request.turn, "requesting move");

        let response = self.client.post(&self.endpoint).json(request).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Status(status.as_u16()));
        }

        let reply = response.json::<MoveReply>().await?;
        debug!(?reply, "move service replied");
        Ok(reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    /// Serve exactly one HTTP response and hand back the raw request body
    async fn serve_once(status_line: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}/move", listener.local_addr().unwrap());

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = Vec::new();
            let mut chunk = [0u8; 1024];

            // Read headers, then as much body as Content-Length announces
            let header_end = loop {
                let n = socket.read(&mut chunk).await.unwrap();
                buf.extend_from_slice(&chunk[..n]);
                if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
                    break pos + 4;
                }
            };
            let headers = String::from_utf8_lossy(&buf[..header_end]).to_lowercase();
            let content_length = headers
                .lines()
                .find_map(|l| l.strip_prefix("content-length:"))
                .and_then(|v| v.trim().parse::<usize>().ok())
                .unwrap_or(0);
            while buf.len() < header_end + content_length {
                let n = socket.read(&mut chunk).await.unwrap();
                if n == 0 {
                    break;
                }
                buf.extend_from_slice(&chunk[..n]);
            }

            let response = format!(
                "{}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();

            String::from_utf8_lossy(&buf[header_end..]).to_string()
        });

        (url, handle)
    }

    fn request() -> MoveRequest {
        MoveRequest {
            fen: "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1".to_string(),
            turn: "w".to_string(),
            model: "openchat-7b".to_string(),
        }
    }

    #[tokio::test]
    async fn test_posts_json_and_parses_reply() {
        let (url, server) = serve_once("HTTP/1.1 200 OK", r#"{"move":"e4","gameOver":false}"#).await;
        let client = HttpMoveClient::new(url, Duration::from_secs(5)).unwrap();

        let reply = client.request_move(&request()).await.unwrap();
        assert_eq!(reply.mv.as_deref(), Some("e4"));
        assert!(!reply.game_over);

        let body: serde_json::Value = serde_json::from_str(&server.await.unwrap()).unwrap();
        assert_eq!(body["turn"], "w");
        assert_eq!(body["model"], "openchat-7b");
        assert_eq!(
            body["fen"],
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"
        );
    }

    #[tokio::test]
    async fn test_non_success_status_is_error() {
        let (url, _server) = serve_once("HTTP/1.1 500 Internal Server Error", "{}").await;
        let client = HttpMoveClient::new(url, Duration::from_secs(5)).unwrap();

        let err = client.request_move(&request()).await.unwrap_err();
        assert!(matches!(err, Error::Status(500)));
    }

    #[tokio::test]
    async fn test_undecodable_body_is_error() {
        let (url, _server) = serve_once("HTTP/1.1 200 OK", "not json").await;
        let client = HttpMoveClient::new(url, Duration::from_secs(5)).unwrap();

        let err = client.request_move(&request()).await.unwrap_err();
        assert!(matches!(err, Error::Http(_)));
    }

    #[tokio::test]
    async fn test_connection_refused_is_error() {
        // Bind then drop to get a port nobody listens on
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = HttpMoveClient::new(format!("http://{}/move", addr), Duration::from_secs(5)).unwrap();
        assert!(matches!(
            client.request_move(&request()).await,
            Err(Error::Http(_))
        ));
    }
}
