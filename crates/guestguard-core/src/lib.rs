//! guestguard core: transport-agnostic connect-params record, wire payload codec,
//! and error types.
//!
//! This crate defines the boundary contract with the remote controller and the
//! error surface shared by the policy crate and host applications. It carries no
//! runtime or network dependencies.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! Malformed controller payloads surface as `FetchFailure`, never as a crash.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod protocol;

/// Shared result type.
pub use error::{FetchFailure, GuestGuardError, Result};
pub use protocol::params::ConnectParams;
