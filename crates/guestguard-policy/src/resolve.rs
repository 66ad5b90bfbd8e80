//! Controller address resolution.
//!
//! The URL always names the controller by domain, so TLS verifies the
//! certificate against that name. Only the socket address comes from the
//! [`Resolver`], plugged into the HTTP client's connector via [`ControllerDns`].
//!
//! A resolver failure is never fatal: the raw domain is handed to the system
//! lookup, as if no custom resolver were installed.

use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use async_trait::async_trait;
use reqwest::dns::{Addrs, Name, Resolve, Resolving};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Outcome of resolving a controller domain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Resolved(IpAddr),
    /// Lookup failed; carry the raw domain.
    Fallback(String),
}

#[async_trait]
pub trait Resolver: Send + Sync {
    async fn resolve(&self, domain: &str) -> std::io::Result<IpAddr>;
}

/// Resolve via the system resolver (first address wins).
#[derive(Debug, Default)]
pub struct SystemResolver;

#[async_trait]
impl Resolver for SystemResolver {
    async fn resolve(&self, domain: &str) -> std::io::Result<IpAddr> {
        let mut addrs = tokio::net::lookup_host((domain, 0)).await?;
        addrs.next().map(|sa| sa.ip()).ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::NotFound, format!("no address for {domain}"))
        })
    }
}

/// Resolve `domain`, falling back to the domain string on error.
pub async fn resolve_or_fallback(resolver: &dyn Resolver, domain: &str) -> Resolution {
    match resolver.resolve(domain).await {
        Ok(ip) => Resolution::Resolved(ip),
        Err(e) => {
            tracing::warn!(%domain, error = %e, "dns lookup failed; using domain as address");
            Resolution::Fallback(domain.to_string())
        }
    }
}

/// Connector-side adapter: reqwest asks for `name`, we answer from `Resolver`.
///
/// The port is taken from the URL by the connector; addresses carry port 0.
pub struct ControllerDns {
    resolver: Arc<dyn Resolver>,
}

impl ControllerDns {
    pub fn new(resolver: Arc<dyn Resolver>) -> Self {
        Self { resolver }
    }

    async fn addrs(
        resolver: Arc<dyn Resolver>,
        domain: String,
    ) -> Result<Vec<SocketAddr>, BoxError> {
        match resolve_or_fallback(resolver.as_ref(), &domain).await {
            Resolution::Resolved(ip) => Ok(vec![SocketAddr::new(ip, 0)]),
            Resolution::Fallback(raw) => {
                let addrs = tokio::net::lookup_host((raw.as_str(), 0))
                    .await
                    .map_err(|e| -> BoxError { Box::new(e) })?;
                Ok(addrs.collect())
            }
        }
    }
}

impl Resolve for ControllerDns {
    fn resolve(&self, name: Name) -> Resolving {
        let resolver = Arc::clone(&self.resolver);
        let domain = name.as_str().to_string();
        Box::pin(async move {
            let addrs = Self::addrs(resolver, domain).await?;
            let addrs: Addrs = Box::new(addrs.into_iter());
            Ok::<Addrs, BoxError>(addrs)
        })
    }
}
