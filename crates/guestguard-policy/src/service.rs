//! Policy service: cache-or-fetch plus the three access decisions.
//!
//! Construct once, share via `Arc` (or clone; clones share cache and metrics).
//! Decision operations never fail: when params cannot be obtained they allow.

use std::sync::Arc;

use tokio::time::Instant;

use guestguard_core::error::Result;
use guestguard_core::protocol::params::ConnectParams;

use crate::cache::{Lookup, ParamsCache};
use crate::config::PolicyConfig;
use crate::directory::StaticDirectory;
use crate::fetch::{ParamsSource, PolicyFetcher};
use crate::obs::PolicyMetrics;
use crate::policy::{self, PolicyDecision};
use crate::resolve::SystemResolver;
use crate::transport::ReqwestTransport;

#[derive(Clone)]
pub struct PolicyService {
    cache: Arc<ParamsCache>,
    source: Arc<dyn ParamsSource>,
    metrics: Arc<PolicyMetrics>,
}

impl PolicyService {
    pub fn new(cache: Arc<ParamsCache>, source: Arc<dyn ParamsSource>) -> Self {
        Self {
            cache,
            source,
            metrics: Arc::new(PolicyMetrics::default()),
        }
    }

    /// Wire the default collaborators (static directory, system DNS, reqwest).
    pub fn from_config(cfg: &PolicyConfig) -> Result<Self> {
        let directory = Arc::new(StaticDirectory::from_config(&cfg.accounts));
        let transport = Arc::new(ReqwestTransport::new(&cfg.controller, Arc::new(SystemResolver))?);
        let fetcher = PolicyFetcher::new(directory, transport);

        tracing::info!(
            accounts = cfg.accounts.len(),
            has_default = cfg.accounts.iter().any(|a| a.default),
            "policy service ready"
        );
        Ok(Self::new(Arc::new(ParamsCache::new()), Arc::new(fetcher)))
    }

    pub fn cache(&self) -> &ParamsCache {
        &self.cache
    }

    pub fn metrics(&self) -> Arc<PolicyMetrics> {
        Arc::clone(&self.metrics)
    }

    /// Fresh cached params, or fetch and store. `None` when unavailable.
    ///
    /// Concurrent callers may both miss and both fetch the same extension; the
    /// last write wins.
    pub async fn get_or_fetch(&self, extension: Option<&str>) -> Option<ConnectParams> {
        let extension = extension?;

        let lookup = self.cache.lookup(extension);
        self.metrics.cache_lookups.inc(&[("result", lookup.label())]);
        if let Lookup::Hit(params) = lookup {
            tracing::debug!(%extension, "connect params cache hit");
            return Some(params);
        }

        tracing::debug!(%extension, lookup = lookup.label(), "connect params cache miss");
        let started = Instant::now();
        let fetched = self.source.fetch(extension).await;
        self.metrics.fetch_duration.observe(&[], started.elapsed());

        match fetched {
            Ok(params) => {
                self.cache.put(extension, params);
                Some(params)
            }
            Err(failure) => {
                self.metrics.fetch_failures.inc(&[("kind", failure.kind())]);
                tracing::warn!(
                    %extension,
                    reason = failure.kind(),
                    error = %failure,
                    "connect params unavailable"
                );
                None
            }
        }
    }

    /// Whether `extension` may see its message history.
    pub async fn chat_page_enabled(&self, extension: Option<&str>) -> bool {
        let params = self.get_or_fetch(extension).await;
        self.record("chat_page", policy::chat_page(params.as_ref()))
    }

    pub async fn outgoing_chat_allowed(
        &self,
        from: Option<&str>,
        to: Option<&str>,
        is_group_chat: bool,
    ) -> bool {
        let (from_p, to_p) = tokio::join!(self.get_or_fetch(from), self.get_or_fetch(to));
        self.record(
            "outgoing_chat",
            policy::outgoing_chat(from_p.as_ref(), to_p.as_ref(), is_group_chat),
        )
    }

    pub async fn outgoing_call_allowed(&self, from: Option<&str>, to: Option<&str>) -> bool {
        let (from_p, to_p) = tokio::join!(self.get_or_fetch(from), self.get_or_fetch(to));
        self.record("outgoing_call", policy::outgoing_call(from_p.as_ref(), to_p.as_ref()))
    }

    fn record(&self, op: &'static str, decision: PolicyDecision) -> bool {
        self.metrics
            .decisions
            .inc(&[("op", op), ("outcome", decision.outcome())]);
        match decision {
            PolicyDecision::Deny { reason } => tracing::debug!(op, reason, "policy deny"),
            PolicyDecision::FailOpen => tracing::debug!(op, "policy fail-open"),
            PolicyDecision::Pass => {}
        }
        decision.is_allowed()
    }
}
