//! HTTP Connector for the Ingestion Endpoint
//!
//! ## Overview
//!
//! Each cycle produces one JSON document and this connector POSTs it to the
//! configured endpoint. The exchange is deliberately small:
//!
//! - One synchronous request per document, bounded by the request timeout
//! - `Content-Type: application/json`, no authentication header
//! - The layout version travels in the `X-Telemetry-Schema` header so the
//!   body stays exactly the stored document
//! - Any 2xx status is success; everything else is a dispatch fault
//!
//! No retry happens here. A failed document is dropped and counted; the
//! orchestrator simply moves on to the next cycle.
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use airwatch_connectors::http::{HttpConfig, HttpConnector};
//!
//! let config = HttpConfig::new("http://192.168.99.14:5000/data")
//!     .timeout_secs(10)
//!     .header("X-Site", "lab-2");
//!
//! let mut http = HttpConnector::new(config)?;
//! let status = http.post(br#"{"device_id":"esp32_air_monitor_1"}"#)?;
//! println!("sink answered {}", status);
//! # Ok::<(), airwatch_connectors::HttpError>(())
//! ```

use crate::{ConnectionStats, Connector, ConnectorError};
use airwatch_schemas::TELEMETRY_SCHEMA_VERSION;
use std::collections::BTreeMap;
use std::time::Duration;
use thiserror::Error;

/// Header announcing the telemetry layout version
pub const SCHEMA_HEADER: &str = "X-Telemetry-Schema";

/// Default request timeout
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// HTTP-specific errors
#[derive(Debug, Error)]
pub enum HttpError {
    /// Network or request error
    #[error("Request failed: {0}")]
    Request(String),

    /// Server returned a non-2xx status
    #[error("Server error {status}: {message}")]
    ServerError { status: u16, message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<HttpError> for ConnectorError {
    fn from(err: HttpError) -> Self {
        match err {
            HttpError::Request(msg) => ConnectorError::Transport(msg),
            HttpError::ServerError { status, .. } => ConnectorError::Status(status),
            HttpError::Config(msg) => ConnectorError::Config(msg),
        }
    }
}

/// HTTP configuration
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Full URL documents are POSTed to
    pub endpoint: String,
    /// Request timeout
    pub timeout: Duration,
    /// Custom headers
    pub headers: BTreeMap<String, String>,
    /// User agent string
    pub user_agent: String,
}

impl HttpConfig {
    /// Create new configuration for an endpoint URL
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            headers: BTreeMap::new(),
            user_agent: format!("AirWatch/{}", env!("CARGO_PKG_VERSION")),
        }
    }

    /// Set request timeout in seconds
    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.timeout = Duration::from_secs(secs);
        self
    }

    /// Add custom header
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }
}

/// HTTP connector using lightweight ureq client
pub struct HttpConnector {
    config: HttpConfig,
    agent: ureq::Agent,
    stats: ConnectionStats,
}

impl HttpConnector {
    /// Create new HTTP connector
    pub fn new(config: HttpConfig) -> Result<Self, HttpError> {
        if !config.endpoint.starts_with("http://") && !config.endpoint.starts_with("https://") {
            return Err(HttpError::Config(
                "Endpoint must start with http:// or https://".into(),
            ));
        }
        if config.timeout.is_zero() {
            return Err(HttpError::Config("Timeout must be non-zero".into()));
        }

        let agent = ureq::AgentBuilder::new()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build();

        Ok(Self {
            config,
            agent,
            stats: ConnectionStats::default(),
        })
    }

    pub fn config(&self) -> &HttpConfig {
        &self.config
    }

    /// POST one JSON body and return the status code
    pub fn post(&self, body: &[u8]) -> Result<u16, HttpError> {
        let mut request = self
            .agent
            .post(&self.config.endpoint)
            .set("Content-Type", "application/json")
            .set(SCHEMA_HEADER, &TELEMETRY_SCHEMA_VERSION.to_string());

        for (name, value) in &self.config.headers {
            request = request.set(name, value);
        }

        match request.send_bytes(body) {
            Ok(resp) => {
                let status = resp.status();
                if (200..300).contains(&status) {
                    Ok(status)
                } else {
                    Err(HttpError::ServerError {
                        status,
                        message: resp.status_text().to_string(),
                    })
                }
            }
            Err(ureq::Error::Status(status, resp)) => Err(HttpError::ServerError {
                status,
                message: resp.into_string().unwrap_or_default(),
            }),
            Err(ureq::Error::Transport(e)) => Err(HttpError::Request(e.to_string())),
        }
    }
}

impl Connector for HttpConnector {
    fn send(&mut self, data: &[u8]) -> Result<u16, ConnectorError> {
        match self.post(data) {
            Ok(status) => {
                self.stats.record_success(status, data.len());
                Ok(status)
            }
            Err(e) => {
                let err = ConnectorError::from(e);
                self.stats.record_failure(&err);
                Err(err)
            }
        }
    }

    fn stats(&self) -> ConnectionStats {
        self.stats.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::sync::mpsc;
    use std::thread;

    /// Serve one canned response and hand back the raw request text
    fn serve_once(status_line: &'static str) -> (String, mpsc::Receiver<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}/data", listener.local_addr().unwrap());
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut raw = Vec::new();
            let mut buf = [0u8; 1024];
            loop {
                let n = stream.read(&mut buf).unwrap();
                if n == 0 {
                    break;
                }
                raw.extend_from_slice(&buf[..n]);
                if let Some(end) = find_header_end(&raw) {
                    let head = String::from_utf8_lossy(&raw[..end]).to_lowercase();
                    let len = head
                        .lines()
                        .find_map(|l| l.strip_prefix("content-length:"))
                        .and_then(|v| v.trim().parse::<usize>().ok())
                        .unwrap_or(0);
                    if raw.len() >= end + len {
                        break;
                    }
                }
            }
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Length: 2\r\nConnection: close\r\n\r\nok",
                status_line
            );
            stream.write_all(response.as_bytes()).unwrap();
            let _ = tx.send(String::from_utf8_lossy(&raw).into_owned());
        });

        (url, rx)
    }

    fn find_header_end(raw: &[u8]) -> Option<usize> {
        raw.windows(4).position(|w| w == b"\r\n\r\n").map(|p| p + 4)
    }

    #[test]
    fn config_builder_sets_fields() {
        let config = HttpConfig::new("https://ingest.example.com/data")
            .timeout_secs(5)
            .header("X-Site", "lab-2");

        assert_eq!(config.endpoint, "https://ingest.example.com/data");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.headers.get("X-Site").map(String::as_str), Some("lab-2"));
        assert_eq!(
            HttpConfig::new("http://x").timeout,
            Duration::from_secs(DEFAULT_TIMEOUT_SECS)
        );
        assert!(config.user_agent.starts_with("AirWatch/"));
    }

    #[test]
    fn rejects_non_http_endpoints() {
        assert!(HttpConnector::new(HttpConfig::new("not-a-url")).is_err());
        assert!(HttpConnector::new(HttpConfig::new("ftp://host/data")).is_err());
        assert!(HttpConnector::new(HttpConfig::new("http://host").timeout_secs(0)).is_err());
        assert!(HttpConnector::new(HttpConfig::new("https://valid.url")).is_ok());
    }

    #[test]
    fn delivers_json_with_schema_header() {
        let (url, rx) = serve_once("201 Created");
        let mut http = HttpConnector::new(HttpConfig::new(url)).unwrap();

        let body = br#"{"device_id":"esp32_air_monitor_1"}"#;
        assert_eq!(http.send(body).unwrap(), 201);

        let request = rx.recv().unwrap();
        let lower = request.to_lowercase();
        assert!(request.starts_with("POST /data HTTP/1.1"));
        assert!(lower.contains("content-type: application/json"));
        assert!(lower.contains(&format!("x-telemetry-schema: {}", TELEMETRY_SCHEMA_VERSION)));
        assert!(!lower.contains("authorization:"));
        assert!(request.ends_with(r#"{"device_id":"esp32_air_monitor_1"}"#));

        let stats = http.stats();
        assert_eq!(stats.messages_sent, 1);
        assert_eq!(stats.bytes_sent, body.len() as u64);
    }

    #[test]
    fn server_error_is_a_dispatch_fault() {
        let (url, _rx) = serve_once("500 Internal Server Error");
        let mut http = HttpConnector::new(HttpConfig::new(url)).unwrap();

        assert_eq!(http.send(b"{}"), Err(ConnectorError::Status(500)));
        let stats = http.stats();
        assert_eq!(stats.messages_failed, 1);
        assert_eq!(stats.last_status, Some(500));
    }

    #[test]
    fn unreachable_endpoint_is_a_transport_fault() {
        let port = {
            let listener = TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let config = HttpConfig::new(format!("http://127.0.0.1:{}/data", port)).timeout_secs(2);
        let mut http = HttpConnector::new(config).unwrap();

        assert!(matches!(http.send(b"{}"), Err(ConnectorError::Transport(_))));
        assert_eq!(http.stats().messages_failed, 1);
    }
}
