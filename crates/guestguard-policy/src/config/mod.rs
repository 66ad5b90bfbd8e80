//! Policy config loader (strict parsing).

pub mod schema;

use std::fs;

use guestguard_core::error::{GuestGuardError, Result};

pub use schema::{AccountConfig, ControllerSection, PolicyConfig, TlsSection};

pub fn load_from_file(path: &str) -> Result<PolicyConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| GuestGuardError::Config(format!("read config failed: {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<PolicyConfig> {
    let cfg: PolicyConfig = serde_yaml::from_str(s)
        .map_err(|e| GuestGuardError::Config(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}
