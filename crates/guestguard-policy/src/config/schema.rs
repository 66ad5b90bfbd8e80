use std::collections::HashSet;

use serde::Deserialize;
use guestguard_core::error::{GuestGuardError, Result};

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PolicyConfig {
    pub version: u32,

    #[serde(default)]
    pub controller: ControllerSection,

    #[serde(default)]
    pub accounts: Vec<AccountConfig>,
}

impl PolicyConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(GuestGuardError::UnsupportedVersion);
        }

        self.controller.validate()?;

        let mut seen = HashSet::new();
        let mut defaults = 0usize;
        for a in &self.accounts {
            if a.extension.trim().is_empty() {
                return Err(GuestGuardError::Config(
                    "accounts[].extension must not be empty".into(),
                ));
            }
            if a.domain.trim().is_empty() {
                return Err(GuestGuardError::Config(format!(
                    "account {} has an empty domain",
                    a.extension
                )));
            }
            if !seen.insert(a.extension.as_str()) {
                return Err(GuestGuardError::Config(format!(
                    "duplicate account extension: {}",
                    a.extension
                )));
            }
            if a.default {
                defaults += 1;
            }
        }
        if defaults > 1 {
            return Err(GuestGuardError::Config(
                "at most one account may be marked default".into(),
            ));
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ControllerSection {
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,

    #[serde(default)]
    pub tls: TlsSection,
}

impl Default for ControllerSection {
    fn default() -> Self {
        Self {
            request_timeout_ms: default_request_timeout_ms(),
            tls: TlsSection::default(),
        }
    }
}

impl ControllerSection {
    pub fn validate(&self) -> Result<()> {
        if !(100..=60000).contains(&self.request_timeout_ms) {
            return Err(GuestGuardError::Config(
                "controller.request_timeout_ms must be between 100 and 60000".into(),
            ));
        }
        Ok(())
    }
}

/// Certificate verification stays on unless explicitly disabled here.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TlsSection {
    /// Accept any controller certificate. Lab controllers only.
    #[serde(default)]
    pub insecure_skip_verify: bool,
}

fn default_request_timeout_ms() -> u64 {
    5000
}

/// Locally registered account.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AccountConfig {
    pub extension: String,
    pub domain: String,
    #[serde(default)]
    pub default: bool,
}
