//! Transports deliver an [`ApiRequest`] to the backend and hand back the raw response body.

use crate::error::TransportError;
use crate::request::ApiRequest;
use reqwest::{Client, Url};
use tracing::trace;

pub trait Transport: Send + Sync + 'static {
    /// Sends a request and returns the raw response body.
    ///
    /// The HTTP status is deliberately not checked here;
    /// the backend reports failures as JSON bodies, which still need rendering.
    ///
    /// # Errors
    ///
    /// Fails if the request can't be built or sent,
    /// or if the response body can't be read.
    fn send(
        &self,
        request: ApiRequest,
    ) -> impl Future<Output = Result<Vec<u8>, TransportError>> + Send;
}

/// A [`Transport`] that talks HTTP to a backend via `reqwest`.
///
/// No timeouts and no retries are configured;
/// a request lives until the backend (or the network) gives up.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    base_url: Url,
}

impl HttpTransport {
    /// Creates a transport for the backend at `base_url` (ex: `http://127.0.0.1:5000`).
    ///
    /// Endpoint paths are resolved relative to the base URL,
    /// so a base with a path prefix (ex: `http://host/busnet`) is respected.
    ///
    /// # Errors
    ///
    /// Fails if `base_url` is not an absolute URL that can carry a path.
    pub fn new(base_url: &str) -> Result<HttpTransport, TransportError> {
        HttpTransport::with_client(Client::new(), base_url)
    }

    /// Like [`HttpTransport::new`], but with a preconfigured client.
    ///
    /// # Errors
    ///
    /// Fails if `base_url` is not an absolute URL that can carry a path.
    pub fn with_client(client: Client, base_url: &str) -> Result<HttpTransport, TransportError> {
        let mut base_url =
            Url::parse(base_url).map_err(|e| TransportError::InvalidBaseUrl(e.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(TransportError::InvalidBaseUrl(format!(
                "{base_url} cannot be used as a base URL"
            )));
        }

        // Url::join treats the last segment as a file unless the path ends in a slash.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(HttpTransport { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolves the full URL for a request, query string included.
    ///
    /// # Errors
    ///
    /// Fails if the request path can't be joined onto the base URL.
    pub fn url_for(&self, request: &ApiRequest) -> Result<Url, TransportError> {
        let mut url = self
            .base_url
            .join(request.path.trim_start_matches('/'))
            .map_err(|e| TransportError::InvalidBaseUrl(e.to_string()))?;

        if !request.query.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(request.query.iter().map(|(k, v)| (*k, v.as_str())));
        }

        Ok(url)
    }
}

impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> Result<Vec<u8>, TransportError> {
        let url = self.url_for(&request)?;
        let mut builder = self.client.request(request.method, url.clone());
        if let Some(body) = &request.body {
            // Sets `Content-Type: application/json` too.
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|e| {
            if e.is_connect() {
                TransportError::Unavailable(format!("Cannot connect to {url}"))
            } else {
                TransportError::Http(e)
            }
        })?;

        let status = response.status();
        let body = response.bytes().await?;
        trace!(%url, %status, len = body.len(), "Received response");

        Ok(body.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use busnet_contract::MoveBusRequest;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::sync::oneshot;

    /// Serves exactly one HTTP/1.1 exchange, replying with `status` and a JSON `body`.
    /// Resolves the returned receiver with the raw request text.
    async fn serve_once(
        status: &'static str,
        body: &'static str,
    ) -> (String, oneshot::Receiver<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        let (tx, rx) = oneshot::channel();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let request = read_request(&mut socket).await;
            let response = format!(
                "HTTP/1.1 {status}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
            _ = tx.send(request);
        });

        (base_url, rx)
    }

    async fn read_request(socket: &mut tokio::net::TcpStream) -> String {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 1024];
        loop {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);

            let text = String::from_utf8_lossy(&buf).to_string();
            if let Some(header_end) = text.find("\r\n\r\n") {
                let content_length = text[..header_end]
                    .lines()
                    .filter_map(|line| line.split_once(':'))
                    .find(|(name, _)| name.eq_ignore_ascii_case("content-length"))
                    .and_then(|(_, value)| value.trim().parse::<usize>().ok())
                    .unwrap_or(0);
                if buf.len() >= header_end + 4 + content_length {
                    return text;
                }
            }
        }
        String::from_utf8_lossy(&buf).to_string()
    }

    #[test]
    fn urls_are_resolved_against_the_base() {
        let transport = HttpTransport::new("http://localhost:5000").unwrap();
        let url = transport.url_for(&ApiRequest::get("/stops")).unwrap();
        assert_eq!(url.as_str(), "http://localhost:5000/stops");

        let transport = HttpTransport::new("http://localhost:5000/busnet").unwrap();
        let url = transport.url_for(&ApiRequest::get("/stops")).unwrap();
        assert_eq!(url.as_str(), "http://localhost:5000/busnet/stops");
    }

    #[test]
    fn empty_prefix_is_still_sent() {
        let transport = HttpTransport::new("http://localhost:5000/").unwrap();
        let request = ApiRequest::get("/suggest").with_query("prefix", "");
        let url = transport.url_for(&request).unwrap();
        assert_eq!(url.query(), Some("prefix="));
    }

    #[test]
    fn prefixes_are_encoded() {
        let transport = HttpTransport::new("http://localhost:5000/").unwrap();
        let request = ApiRequest::get("/suggest").with_query("prefix", "Main & 5th");
        let url = transport.url_for(&request).unwrap();
        assert_eq!(url.query(), Some("prefix=Main+%26+5th"));
    }

    #[test]
    fn bad_base_urls_are_rejected() {
        assert!(matches!(
            HttpTransport::new("not a url"),
            Err(TransportError::InvalidBaseUrl(_))
        ));
        assert!(matches!(
            HttpTransport::new("mailto:ops@example.com"),
            Err(TransportError::InvalidBaseUrl(_))
        ));
    }

    #[tokio::test]
    async fn posts_json_bodies() {
        let (base_url, request_rx) = serve_once("200 OK", r#"{"output":"moved"}"#).await;
        let transport = HttpTransport::new(&base_url).unwrap();

        let body = transport
            .send(ApiRequest::post(
                "/move_bus",
                &MoveBusRequest {
                    bus_id: "3".to_string(),
                },
            ))
            .await
            .unwrap();
        assert_eq!(body, br#"{"output":"moved"}"#);

        let raw = request_rx.await.unwrap();
        assert!(raw.starts_with("POST /move_bus HTTP/1.1\r\n"), "{raw}");
        assert!(
            raw.to_ascii_lowercase()
                .contains("content-type: application/json"),
            "{raw}"
        );
        assert!(raw.ends_with(r#"{"busId":"3"}"#), "{raw}");
    }

    #[tokio::test]
    async fn sends_the_literal_empty_prefix() {
        let (base_url, request_rx) = serve_once("200 OK", r#"{"output":""}"#).await;
        let transport = HttpTransport::new(&base_url).unwrap();

        transport
            .send(ApiRequest::get("/suggest").with_query("prefix", ""))
            .await
            .unwrap();

        let raw = request_rx.await.unwrap();
        assert!(raw.starts_with("GET /suggest?prefix= HTTP/1.1\r\n"), "{raw}");
    }

    #[tokio::test]
    async fn error_statuses_still_return_the_body() {
        let (base_url, _request_rx) =
            serve_once("400 BAD REQUEST", r#"{"error":"busId required"}"#).await;
        let transport = HttpTransport::new(&base_url).unwrap();

        let body = transport
            .send(ApiRequest::post("/move_bus", &serde_json::json!({})))
            .await
            .unwrap();
        assert_eq!(body, br#"{"error":"busId required"}"#);
    }

    #[tokio::test]
    async fn refused_connections_are_reported() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        drop(listener);

        let transport = HttpTransport::new(&base_url).unwrap();
        let err = transport.send(ApiRequest::get("/stops")).await.unwrap_err();
        assert!(matches!(err, TransportError::Unavailable(_)), "{err:?}");
        assert!(err.to_string().starts_with("Backend unavailable: Cannot connect to"));
    }
}
