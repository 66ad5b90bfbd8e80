//! guestguard policy library entry.
//!
//! This crate wires the directory, DNS, transport, fetcher, cache and decision
//! engine into a `PolicyService` that hosts call from their worker contexts.

pub mod cache;
pub mod config;
pub mod directory;
pub mod fetch;
pub mod obs;
pub mod policy;
pub mod resolve;
pub mod service;
pub mod transport;

pub use cache::{CacheEntry, ParamsCache, CACHE_EXPIRY};
pub use fetch::{ParamsSource, PolicyFetcher};
pub use policy::PolicyDecision;
pub use service::PolicyService;
