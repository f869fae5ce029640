//! Bitcoin dominance from CoinMarketCap global metrics.
//!
//! Requires a CoinMarketCap key. Without one, callers derive an approximate
//! figure with `MarketDominance::from_quotes`.

use super::credentials::{CredentialProvider, COINMARKETCAP_API_KEY};
use super::http::HttpFetcher;
use super::provider::DataError;
use crate::domain::MarketDominance;
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;

pub const CMC_GLOBAL_METRICS_URL: &str =
    "https://pro-api.coinmarketcap.com/v1/global-metrics/quotes/latest";

#[derive(Debug, Deserialize)]
struct GlobalMetricsResponse {
    data: GlobalMetrics,
}

#[derive(Debug, Deserialize)]
struct GlobalMetrics {
    #[serde(alias = "btc_dominance_percentage")]
    btc_dominance: f64,
    altcoin_market_cap: Option<f64>,
    quote: HashMap<String, GlobalQuote>,
}

#[derive(Debug, Deserialize)]
struct GlobalQuote {
    total_market_cap: f64,
    altcoin_market_cap: Option<f64>,
}

pub struct DominanceSource {
    http: HttpFetcher,
    credentials: Arc<dyn CredentialProvider>,
    url: String,
}

impl DominanceSource {
    pub fn new(http: HttpFetcher, credentials: Arc<dyn CredentialProvider>) -> Self {
        Self {
            http,
            credentials,
            url: CMC_GLOBAL_METRICS_URL.to_string(),
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    pub fn fetch(&self) -> Result<MarketDominance, DataError> {
        let key = self.credentials.get(COINMARKETCAP_API_KEY).ok_or_else(|| {
            DataError::AuthenticationRequired(format!(
                "CoinMarketCap key '{COINMARKETCAP_API_KEY}' is not configured"
            ))
        })?;
        let headers = [
            ("X-CMC_PRO_API_KEY", key),
            ("Accept", "application/json".to_string()),
        ];
        let resp: GlobalMetricsResponse = self.http.get_json(&self.url, &headers, "global metrics")?;
        dominance_from(resp.data)
    }
}

/// Parse a CoinMarketCap `global-metrics/quotes/latest` body.
pub fn parse_global_metrics(body: &str) -> Result<MarketDominance, DataError> {
    let resp: GlobalMetricsResponse = serde_json::from_str(body)
        .map_err(|e| DataError::ResponseFormatChanged(format!("global metrics: {e}")))?;
    dominance_from(resp.data)
}

fn dominance_from(data: GlobalMetrics) -> Result<MarketDominance, DataError> {
    let usd = data
        .quote
        .get("USD")
        .ok_or_else(|| DataError::ResponseFormatChanged("global metrics: missing USD quote".into()))?;
    let total = usd.total_market_cap;
    let altcoins = data
        .altcoin_market_cap
        .or(usd.altcoin_market_cap)
        .unwrap_or(total * (1.0 - data.btc_dominance / 100.0));
    Ok(MarketDominance {
        btc_dominance: data.btc_dominance,
        altcoins_cap: altcoins,
        total_market_cap: total,
    })
}
