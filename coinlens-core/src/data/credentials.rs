//! API credentials.
//!
//! Providers receive a `CredentialProvider` at construction and look keys up
//! on demand; nothing reads credentials from global state.

use std::collections::HashMap;
use std::sync::Arc;

pub const COINGECKO_API_KEY: &str = "coingecko_api_key";
pub const COINMARKETCAP_API_KEY: &str = "coinmarketcap_api_key";

pub trait CredentialProvider: Send + Sync {
    /// Value for `key`, if configured. Empty values count as missing.
    fn get(&self, key: &str) -> Option<String>;
}

/// No credentials at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCredentials;

impl CredentialProvider for NoCredentials {
    fn get(&self, _key: &str) -> Option<String> {
        None
    }
}

/// Credentials from `COINLENS_<KEY>` environment variables
/// (`coingecko_api_key` → `COINLENS_COINGECKO_API_KEY`).
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvCredentials;

impl EnvCredentials {
    pub fn var_name(key: &str) -> String {
        format!("COINLENS_{}", key.to_ascii_uppercase())
    }
}

impl CredentialProvider for EnvCredentials {
    fn get(&self, key: &str) -> Option<String> {
        std::env::var(Self::var_name(key))
            .ok()
            .filter(|v| !v.trim().is_empty())
    }
}

/// Fixed key/value credentials (config file, tests).
#[derive(Debug, Clone, Default)]
pub struct StaticCredentials {
    values: HashMap<String, String>,
}

impl StaticCredentials {
    pub fn new(values: HashMap<String, String>) -> Self {
        Self { values }
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }
}

impl CredentialProvider for StaticCredentials {
    fn get(&self, key: &str) -> Option<String> {
        self.values
            .get(key)
            .filter(|v| !v.trim().is_empty())
            .cloned()
    }
}

/// Tries each provider in order; the first hit wins.
#[derive(Clone, Default)]
pub struct ChainedCredentials {
    providers: Vec<Arc<dyn CredentialProvider>>,
}

impl ChainedCredentials {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn then(mut self, provider: Arc<dyn CredentialProvider>) -> Self {
        self.providers.push(provider);
        self
    }
}

impl CredentialProvider for ChainedCredentials {
    fn get(&self, key: &str) -> Option<String> {
        self.providers.iter().find_map(|p| p.get(key))
    }
}
