//! Connect-params fetcher.
//!
//! Pipeline: route (directory) -> POST -> decode. DNS happens in the transport's
//! connector (see `resolve`), so the URL and the TLS name stay the domain.
//! No retries here; a failed fetch is simply retried by the next cache miss.

use std::sync::Arc;

use async_trait::async_trait;

use guestguard_core::error::FetchFailure;
use guestguard_core::protocol::params::{
    self, ConnectParams, CONNECT_PARAMS_ENDPOINT, CONTROLLER_PORT,
};

use crate::directory::{Account, Directory};
use crate::transport::Transport;

/// Source of connect params (the controller, or a fake in tests).
#[async_trait]
pub trait ParamsSource: Send + Sync {
    async fn fetch(&self, extension: &str) -> Result<ConnectParams, FetchFailure>;
}

/// Why one step of route resolution found nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteMiss {
    NoLocalAccount,
    NoDefaultAccount,
}

/// Where and on whose behalf to ask.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    /// Controller domain (also sent as the `domain` form field).
    pub domain: String,
    /// Extension the params are requested for.
    pub extension: String,
    /// True when routed through the default account.
    pub via_default: bool,
}

/// Pick the account whose controller answers for `extension`.
///
/// A locally registered owner wins. Otherwise the default account's controller
/// is asked about `extension` itself, not about the default account.
pub fn route(directory: &dyn Directory, extension: &str) -> Result<Route, FetchFailure> {
    let local = directory
        .find_account_by_extension(extension)
        .ok_or(RouteMiss::NoLocalAccount);

    let picked = local
        .map(|a| (a, false))
        .or_else(|miss| {
            tracing::debug!(%extension, ?miss, "trying default account");
            directory
                .default_account()
                .map(|a| (a, true))
                .ok_or(RouteMiss::NoDefaultAccount)
        });

    match picked {
        Ok((Account { domain, .. }, via_default)) => Ok(Route {
            domain,
            extension: extension.to_string(),
            via_default,
        }),
        Err(miss) => {
            tracing::debug!(%extension, ?miss, "no route");
            Err(FetchFailure::NoRoute)
        }
    }
}

pub fn endpoint_url(domain: &str) -> String {
    format!("https://{}:{}/{}", domain, CONTROLLER_PORT, CONNECT_PARAMS_ENDPOINT)
}

pub struct PolicyFetcher {
    directory: Arc<dyn Directory>,
    transport: Arc<dyn Transport>,
}

impl PolicyFetcher {
    pub fn new(directory: Arc<dyn Directory>, transport: Arc<dyn Transport>) -> Self {
        Self { directory, transport }
    }
}

#[async_trait]
impl ParamsSource for PolicyFetcher {
    async fn fetch(&self, extension: &str) -> Result<ConnectParams, FetchFailure> {
        let route = route(self.directory.as_ref(), extension)?;
        let url = endpoint_url(&route.domain);

        tracing::debug!(
            %extension,
            %url,
            via_default = route.via_default,
            "fetching connect params"
        );

        let form = [("domain", route.domain.as_str()), ("extension", route.extension.as_str())];
        let resp = self
            .transport
            .post_form(&url, &form)
            .await
            .map_err(|e| FetchFailure::Transport(e.to_string()))?;

        if !resp.is_success() {
            return Err(FetchFailure::HttpError { status: resp.status });
        }

        params::decode(&resp.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::StaticDirectory;

    fn account(ext: &str, domain: &str) -> Account {
        Account { domain: domain.into(), extension: ext.into() }
    }

    #[test]
    fn local_account_wins() {
        let mut dir = StaticDirectory::new();
        dir.insert(account("100", "local.example"));
        dir.set_default(account("900", "default.example"));

        let r = route(&dir, "100").unwrap();
        assert_eq!(r.domain, "local.example");
        assert_eq!(r.extension, "100");
        assert!(!r.via_default);
    }

    #[test]
    fn default_account_asks_for_peer() {
        let mut dir = StaticDirectory::new();
        dir.set_default(account("900", "default.example"));

        let r = route(&dir, "555").unwrap();
        assert_eq!(r.domain, "default.example");
        assert_eq!(r.extension, "555");
        assert!(r.via_default);
    }

    #[test]
    fn nothing_is_no_route() {
        assert_eq!(route(&StaticDirectory::new(), "555"), Err(FetchFailure::NoRoute));
    }

    #[test]
    fn url_keeps_domain_as_host() {
        assert_eq!(endpoint_url("pbx.example"), "https://pbx.example:8443/getConnectParams");
    }
}
