//! Account directory.
//!
//! Maps an extension to the locally registered account that owns it, and names
//! the default account used to route queries for peers that are not registered
//! here.

use std::collections::HashMap;

use crate::config::AccountConfig;

/// Locally registered calling account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub domain: String,
    pub extension: String,
}

pub trait Directory: Send + Sync {
    fn find_account_by_extension(&self, extension: &str) -> Option<Account>;
    fn default_account(&self) -> Option<Account>;
}

/// Directory built once from config.
#[derive(Debug, Default)]
pub struct StaticDirectory {
    by_extension: HashMap<String, Account>,
    default: Option<Account>,
}

impl StaticDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(accounts: &[AccountConfig]) -> Self {
        let mut dir = Self::new();
        for a in accounts {
            let account = Account {
                domain: a.domain.clone(),
                extension: a.extension.clone(),
            };
            if a.default {
                dir.default = Some(account.clone());
            }
            dir.by_extension.insert(a.extension.clone(), account);
        }
        dir
    }

    pub fn insert(&mut self, account: Account) {
        self.by_extension.insert(account.extension.clone(), account);
    }

    pub fn set_default(&mut self, account: Account) {
        self.default = Some(account);
    }
}

impl Directory for StaticDirectory {
    fn find_account_by_extension(&self, extension: &str) -> Option<Account> {
        self.by_extension.get(extension).cloned()
    }

    fn default_account(&self) -> Option<Account> {
        self.default.clone()
    }
}
