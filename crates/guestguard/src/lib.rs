//! Top-level facade crate for guestguard.
//!
//! Re-exports core types and the policy library so hosts can depend on a single crate.

pub mod core {
    pub use guestguard_core::*;
}

pub mod policy {
    pub use guestguard_policy::*;
}

pub use guestguard_policy::PolicyService;
