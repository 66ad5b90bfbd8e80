//! Fakes shared by the integration suites.

#![allow(dead_code)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bytes::Bytes;
use dashmap::DashMap;

use guestguard_core::{ConnectParams, FetchFailure};
use guestguard_policy::fetch::ParamsSource;
use guestguard_policy::transport::{HttpResponse, Transport, TransportError};
use guestguard_policy::{ParamsCache, PolicyService};

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Controller stand-in: canned answer per extension, counts fetches.
#[derive(Default)]
pub struct FakeSource {
    answers: DashMap<String, Result<ConnectParams, FetchFailure>>,
    calls: DashMap<String, usize>,
    total: AtomicUsize,
}

impl FakeSource {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn set(&self, extension: &str, answer: Result<ConnectParams, FetchFailure>) {
        self.answers.insert(extension.to_string(), answer);
    }

    pub fn calls(&self, extension: &str) -> usize {
        self.calls.get(extension).map(|c| *c).unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.total.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ParamsSource for FakeSource {
    async fn fetch(&self, extension: &str) -> Result<ConnectParams, FetchFailure> {
        self.total.fetch_add(1, Ordering::SeqCst);
        *self.calls.entry(extension.to_string()).or_insert(0) += 1;
        // yield so concurrent callers interleave
        tokio::task::yield_now().await;
        self.answers
            .get(extension)
            .map(|a| a.value().clone())
            .unwrap_or(Err(FetchFailure::NoRoute))
    }
}

pub fn service_with(source: Arc<FakeSource>) -> PolicyService {
    PolicyService::new(Arc::new(ParamsCache::new()), source)
}

/// Request seen by `FakeTransport`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeenRequest {
    pub url: String,
    pub form: Vec<(String, String)>,
}

pub struct FakeTransport {
    reply: Result<HttpResponse, TransportError>,
    pub seen: Mutex<Vec<SeenRequest>>,
}

impl FakeTransport {
    pub fn replying(status: u16, body: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Ok(HttpResponse { status, body: Bytes::copy_from_slice(body.as_bytes()) }),
            seen: Mutex::new(Vec::new()),
        })
    }

    pub fn failing(err: TransportError) -> Arc<Self> {
        Arc::new(Self { reply: Err(err), seen: Mutex::new(Vec::new()) })
    }

    pub fn requests(&self) -> Vec<SeenRequest> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for FakeTransport {
    async fn post_form(
        &self,
        url: &str,
        form: &[(&str, &str)],
    ) -> Result<HttpResponse, TransportError> {
        self.seen.lock().unwrap().push(SeenRequest {
            url: url.to_string(),
            form: form.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect(),
        });
        self.reply.clone()
    }
}

pub const GUEST_NO_MSG: &str = r#"{
    "is_guest_extension": true,
    "is_guest_to_admin_messaging_enabled": false,
    "is_guest_to_guest_calling_enabled": false
}"#;
