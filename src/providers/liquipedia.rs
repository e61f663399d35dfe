use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT_LANGUAGE};
use reqwest::Client;
use std::time::Duration;

use crate::config::BotConfig;
use crate::error::{BotError, Result};
use crate::providers::PageSource;

/// Liquipedia HTTP page source
pub struct LiquipediaClient {
    client: Client,
}

impl LiquipediaClient {
    /// Create new client with the bot's identifying headers and timeout
    pub fn new(config: &BotConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        let language = HeaderValue::from_str(&config.accept_language)
            .map_err(|e| BotError::Other(format!("Invalid Accept-Language: {}", e)))?;
        headers.insert(ACCEPT_LANGUAGE, language);

        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .default_headers(headers)
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl PageSource for LiquipediaClient {
    async fn get(&self, url: &str) -> Result<String> {
        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            return Err(BotError::HttpStatus {
                url: url.to_string(),
                status: response.status().as_u16(),
            });
        }

        Ok(response.text().await?)
    }

    fn name(&self) -> &str {
        "liquipedia"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Answer one request on a loopback port with `reply`, returning the raw request head
    async fn serve_once(reply: &'static str) -> (String, tokio::task::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}/valorant/FURIA", listener.local_addr().unwrap());

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }
            socket.write_all(reply.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
            String::from_utf8_lossy(&request).to_lowercase()
        });

        (url, handle)
    }

    #[test]
    fn test_client_from_default_config() {
        assert!(LiquipediaClient::new(&BotConfig::default()).is_ok());
    }

    #[test]
    fn test_rejects_bad_header() {
        let config = BotConfig {
            accept_language: "pt\nBR".to_string(),
            ..BotConfig::default()
        };
        assert!(LiquipediaClient::new(&config).is_err());
    }

    #[tokio::test]
    async fn test_sends_identifying_headers() {
        let (url, server) =
            serve_once("HTTP/1.1 200 OK\r\nContent-Length: 5\r\nConnection: close\r\n\r\nhello").await;

        let client = LiquipediaClient::new(&BotConfig::default()).unwrap();
        let body = client.get(&url).await.unwrap();
        assert_eq!(body, "hello");

        let request = server.await.unwrap();
        assert!(request.starts_with("get /valorant/furia "));
        assert!(request.contains("user-agent: furia esports bot/1.0\r\n"));
        assert!(request.contains("accept-language: pt-br\r\n"));
    }

    #[tokio::test]
    async fn test_error_status_is_reported() {
        let (url, server) =
            serve_once("HTTP/1.1 503 Service Unavailable\r\nContent-Length: 0\r\nConnection: close\r\n\r\n").await;

        let client = LiquipediaClient::new(&BotConfig::default()).unwrap();
        match client.get(&url).await {
            Err(BotError::HttpStatus { url: failed, status }) => {
                assert_eq!(status, 503);
                assert_eq!(failed, url);
            }
            other => panic!("expected HttpStatus, got {:?}", other),
        }
        server.await.unwrap();
    }

    #[tokio::test]
    #[ignore] // Requires network access
    async fn test_fetch_team_page() {
        let client = LiquipediaClient::new(&BotConfig::default()).unwrap();
        let html = client.get("https://liquipedia.net/valorant/FURIA").await.unwrap();
        assert!(html.contains("roster-card"));
    }
}
