//! Caddy admin API client.
//!
//! # Responsibilities
//! - Canonicalize the rendered document (local pre-flight)
//! - POST it to `<admin_url>/load` as `text/caddyfile`
//! - Read the full response and classify the outcome
//!
//! # Design Decisions
//! - Formatting runs before any network I/O; a malformed document never
//!   leaves the process
//! - The response body is kept for diagnostics but never parsed
//! - No rollback: Caddy either accepts the whole document or keeps the
//!   previous one

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use std::time::Duration;
use thiserror::Error;
use url::Url;

use crate::proxy::caddyfile::{self, FormatError};

pub const CADDYFILE_CONTENT_TYPE: &str = "text/caddyfile";

/// Errors that can occur while applying a document.
#[derive(Debug, Error)]
pub enum ApplyError {
    /// The document is not valid Caddyfile syntax. Nothing was sent.
    #[error("format failure: {0}")]
    Format(#[from] FormatError),

    /// Connection, I/O or body read failure.
    #[error("transport failure: {0}")]
    Transport(String),

    /// The admin API answered with a non-success status.
    #[error("proxy rejected config with status {status}: {body}")]
    Rejected { status: u16, body: String },

    /// The push did not complete in time.
    #[error("push timed out after {0:?}")]
    Timeout(Duration),

    #[error("invalid admin URL: {0}")]
    InvalidUrl(String),
}

/// What Caddy answered to an accepted push.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplyReport {
    pub status: u16,
    pub body: String,
    pub bytes_sent: usize,
}

/// Anything that can take a rendered document live.
#[async_trait]
pub trait ProxyControl: Send + Sync {
    async fn apply(&self, document: &str) -> Result<ApplyReport, ApplyError>;
}

/// HTTP client for the Caddy admin endpoint.
#[derive(Clone)]
pub struct AdminClient {
    http: reqwest::Client,
    load_url: Url,
    timeout: Duration,
}

impl AdminClient {
    /// Create a client for the admin API at `admin_url`.
    ///
    /// `timeout` bounds the whole request, including reading the body.
    /// Redirects are not followed, so a 3xx answer counts as a rejection.
    pub fn new(admin_url: &str, timeout: Duration) -> Result<Self, ApplyError> {
        let load_url = load_url(admin_url)?;
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::none())
            .no_proxy()
            .build()
            .map_err(|e| ApplyError::Transport(e.to_string()))?;

        Ok(Self {
            http,
            load_url,
            timeout,
        })
    }

    pub fn load_url(&self) -> &Url {
        &self.load_url
    }

    async fn push(&self, body: String) -> Result<ApplyReport, ApplyError> {
        let bytes_sent = body.len();
        let response = self
            .http
            .post(self.load_url.clone())
            .header(CONTENT_TYPE, CADDYFILE_CONTENT_TYPE)
            .body(body)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| self.transport_error(e))?;

        if !status.is_success() {
            return Err(ApplyError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        Ok(ApplyReport {
            status: status.as_u16(),
            body,
            bytes_sent,
        })
    }

    fn transport_error(&self, err: reqwest::Error) -> ApplyError {
        if err.is_timeout() {
            ApplyError::Timeout(self.timeout)
        } else {
            ApplyError::Transport(err.to_string())
        }
    }
}

#[async_trait]
impl ProxyControl for AdminClient {
    async fn apply(&self, document: &str) -> Result<ApplyReport, ApplyError> {
        let canonical = caddyfile::format(document)?;
        tracing::debug!(url = %self.load_url, bytes = canonical.len(), "Pushing config to proxy");
        tracing::trace!(document = %canonical, "Canonical Caddyfile");

        let report = self.push(canonical).await?;
        tracing::debug!(status = report.status, body = %report.body, "Proxy accepted config");
        Ok(report)
    }
}

fn load_url(admin_url: &str) -> Result<Url, ApplyError> {
    let joined = format!("{}/load", admin_url.trim_end_matches('/'));
    Url::parse(&joined).map_err(|e| ApplyError::InvalidUrl(format!("{admin_url}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_string, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_load_url() {
        assert_eq!(
            load_url("http://localhost:2019").unwrap().as_str(),
            "http://localhost:2019/load"
        );
        assert_eq!(
            load_url("http://caddy:2019/").unwrap().as_str(),
            "http://caddy:2019/load"
        );
        assert!(matches!(load_url("not a url"), Err(ApplyError::InvalidUrl(_))));
    }

    #[tokio::test]
    async fn test_apply_posts_canonical_document() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/load"))
            .and(header("content-type", CADDYFILE_CONTENT_TYPE))
            .and(body_string("example.com {\n\trespond ok\n}\n"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = AdminClient::new(&mock_server.uri(), Duration::from_secs(5)).unwrap();
        let report = client.apply("example.com {\n   respond ok\n  }").await.unwrap();

        assert_eq!(report.status, 200);
        assert_eq!(report.bytes_sent, 28);
    }

    #[tokio::test]
    async fn test_malformed_document_never_reaches_proxy() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&mock_server)
            .await;

        let client = AdminClient::new(&mock_server.uri(), Duration::from_secs(5)).unwrap();
        let err = client.apply("example.com {\n  respond ok\n").await.unwrap_err();

        assert!(matches!(err, ApplyError::Format(FormatError::UnclosedBlock { line: 1 })));
    }

    #[tokio::test]
    async fn test_non_success_is_rejected_with_body() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/load"))
            .respond_with(
                ResponseTemplate::new(400).set_body_string(r#"{"error":"adapting config"}"#),
            )
            .mount(&mock_server)
            .await;

        let client = AdminClient::new(&mock_server.uri(), Duration::from_secs(5)).unwrap();
        let err = client.apply("example.com {\n}\n").await.unwrap_err();

        match err {
            ApplyError::Rejected { status, body } => {
                assert_eq!(status, 400);
                assert!(body.contains("adapting config"));
            }
            other => panic!("expected rejection, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_redirect_is_rejected_not_followed() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/load"))
            .respond_with(ResponseTemplate::new(302).insert_header("location", "/moved"))
            .expect(1)
            .mount(&mock_server)
            .await;
        Mock::given(path("/moved"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&mock_server)
            .await;

        let client = AdminClient::new(&mock_server.uri(), Duration::from_secs(5)).unwrap();
        let err = client.apply("example.com {\n}\n").await.unwrap_err();

        assert!(matches!(err, ApplyError::Rejected { status: 302, .. }));
    }

    #[tokio::test]
    async fn test_slow_proxy_times_out() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
            .mount(&mock_server)
            .await;

        let client = AdminClient::new(&mock_server.uri(), Duration::from_millis(200)).unwrap();
        let err = client.apply("example.com {\n}\n").await.unwrap_err();

        assert!(matches!(err, ApplyError::Timeout(_)));
    }

    #[tokio::test]
    async fn test_unreachable_proxy_is_transport_failure() {
        let client = AdminClient::new("http://127.0.0.1:1", Duration::from_secs(2)).unwrap();
        let err = client.apply("example.com {\n}\n").await.unwrap_err();

        assert!(matches!(err, ApplyError::Transport(_)));
    }
}
