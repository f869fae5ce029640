//! Ordered provider fallback.

use super::provider::{DataError, DataSource, PriceProvider};
use crate::domain::PriceSeries;
use tracing::{debug, warn};

/// Tries each provider in order and returns the first success.
///
/// Providers that report themselves unavailable (open circuit breaker) are
/// skipped and recorded in the attempt list.
#[derive(Default)]
pub struct FallbackChain {
    providers: Vec<Box<dyn PriceProvider>>,
}

impl FallbackChain {
    pub fn new(providers: Vec<Box<dyn PriceProvider>>) -> Self {
        Self { providers }
    }

    pub fn then(mut self, provider: Box<dyn PriceProvider>) -> Self {
        self.providers.push(provider);
        self
    }

    pub fn provider_names(&self) -> Vec<&str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

impl PriceProvider for FallbackChain {
    fn name(&self) -> &str {
        "fallback"
    }

    fn fetch_prices(&self, asset_id: &str, range_days: u32) -> Result<PriceSeries, DataError> {
        let mut attempts = Vec::new();

        for provider in &self.providers {
            if !provider.is_available() {
                debug!(provider = provider.name(), asset = asset_id, "provider unavailable, skipping");
                attempts.push((provider.name().to_string(), "unavailable".to_string()));
                continue;
            }

            match provider.fetch_prices(asset_id, range_days) {
                Ok(series) => {
                    if series.source() == DataSource::Synthetic {
                        warn!(asset = asset_id, "using synthetic prices");
                    }
                    return Ok(series);
                }
                Err(e) => {
                    warn!(provider = provider.name(), asset = asset_id, error = %e, "provider failed, falling back");
                    attempts.push((provider.name().to_string(), e.to_string()));
                }
            }
        }

        Err(DataError::AllSourcesFailed {
            asset: asset_id.to_string(),
            attempts,
        })
    }

    fn is_available(&self) -> bool {
        self.providers.iter().any(|p| p.is_available())
    }
}
