//! HTTP transport to the controller.
//!
//! One form-encoded POST per fetch. The URL keeps the controller's domain so the
//! certificate is checked against it; the socket address comes from the
//! configured [`Resolver`]. Certificate verification is on by default and the
//! bypass is an explicit config opt-in.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

use guestguard_core::error::{GuestGuardError, Result};

use crate::config::ControllerSection;
use crate::resolve::{ControllerDns, Resolver};

/// Status and body of a controller response.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Bytes,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Failure below HTTP: no response was received.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("connect failed: {0}")]
    Connect(String),
    #[error("request timed out")]
    Timeout,
    #[error("request failed: {0}")]
    Request(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            TransportError::Timeout
        } else if e.is_connect() {
            TransportError::Connect(e.to_string())
        } else {
            TransportError::Request(e.to_string())
        }
    }
}

#[async_trait]
pub trait Transport: Send + Sync {
    async fn post_form(
        &self,
        url: &str,
        form: &[(&str, &str)],
    ) -> std::result::Result<HttpResponse, TransportError>;
}

pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(cfg: &ControllerSection, resolver: Arc<dyn Resolver>) -> Result<Self> {
        // controllers are reached directly; a proxy would bypass `resolver`
        let mut builder = reqwest::Client::builder()
            .timeout(Duration::from_millis(cfg.request_timeout_ms))
            .no_proxy()
            .dns_resolver(Arc::new(ControllerDns::new(resolver)));

        if cfg.tls.insecure_skip_verify {
            tracing::warn!("controller TLS certificate verification DISABLED by config");
            builder = builder.danger_accept_invalid_certs(true);
        }

        let client = builder
            .build()
            .map_err(|e| GuestGuardError::Transport(format!("http client build failed: {e}")))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn post_form(
        &self,
        url: &str,
        form: &[(&str, &str)],
    ) -> std::result::Result<HttpResponse, TransportError> {
        let resp = self.client.post(url).form(form).send().await?;

        let status = resp.status().as_u16();
        let body = match resp.bytes().await {
            Ok(b) => b,
            Err(e) => {
                // unreadable body is reported the same as an empty one
                tracing::warn!(%url, status, error = %e, "controller body read failed");
                Bytes::new()
            }
        };
        Ok(HttpResponse { status, body })
    }
}
