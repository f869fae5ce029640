//! CoinCap v2 provider (secondary source).
//!
//! CoinCap encodes every number as a JSON string, so responses go through
//! small raw structs and are converted field by field.

use super::http::HttpFetcher;
use super::provider::{DataError, DataSource, PriceProvider, QuoteProvider};
use crate::domain::{AssetQuote, PricePoint, PriceSeries};
use serde::Deserialize;

pub const COINCAP_BASE_URL: &str = "https://api.coincap.io/v2";

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: T,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct HistoryEntry {
    price_usd: String,
    time: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AssetEntry {
    id: String,
    rank: Option<String>,
    symbol: String,
    name: String,
    price_usd: Option<String>,
    market_cap_usd: Option<String>,
    volume_usd24_hr: Option<String>,
    change_percent24_hr: Option<String>,
}

pub struct CoinCapProvider {
    http: HttpFetcher,
    base_url: String,
}

impl CoinCapProvider {
    pub fn new(http: HttpFetcher) -> Self {
        Self {
            http,
            base_url: COINCAP_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

fn number(field: &str, raw: &str) -> Result<f64, DataError> {
    raw.trim()
        .parse::<f64>()
        .map_err(|_| DataError::ResponseFormatChanged(format!("{field}: not a number: {raw:?}")))
}

fn optional_number(raw: Option<&str>) -> f64 {
    raw.and_then(|s| s.trim().parse::<f64>().ok()).unwrap_or(0.0)
}

fn history_to_series(
    asset_id: &str,
    entries: Vec<HistoryEntry>,
    range_days: u32,
) -> Result<PriceSeries, DataError> {
    if entries.is_empty() {
        return Err(DataError::AssetNotFound {
            asset: asset_id.to_string(),
        });
    }
    let mut points = Vec::with_capacity(entries.len());
    for entry in entries {
        points.push(PricePoint::new(entry.time, number("priceUsd", &entry.price_usd)?));
    }
    let series = PriceSeries::from_unsorted(asset_id, points, DataSource::CoinCap)?;
    Ok(series.tail(range_days as usize))
}

/// Parse an `assets/{id}/history` body, keeping the last `range_days` points.
pub fn parse_history(asset_id: &str, body: &str, range_days: u32) -> Result<PriceSeries, DataError> {
    let env: Envelope<Vec<HistoryEntry>> = serde_json::from_str(body)
        .map_err(|e| DataError::ResponseFormatChanged(format!("history for {asset_id}: {e}")))?;
    history_to_series(asset_id, env.data, range_days)
}

fn quote_from_entry(e: AssetEntry) -> AssetQuote {
    AssetQuote {
        market_cap_rank: e.rank.as_deref().and_then(|r| r.trim().parse().ok()),
        current_price: optional_number(e.price_usd.as_deref()),
        market_cap: optional_number(e.market_cap_usd.as_deref()),
        price_change_percentage_24h: optional_number(e.change_percent24_hr.as_deref()),
        total_volume: optional_number(e.volume_usd24_hr.as_deref()),
        id: e.id,
        symbol: e.symbol.to_uppercase(),
        name: e.name,
    }
}

/// Parse an `assets?limit=` body.
pub fn parse_assets(body: &str) -> Result<Vec<AssetQuote>, DataError> {
    let env: Envelope<Vec<AssetEntry>> = serde_json::from_str(body)
        .map_err(|e| DataError::ResponseFormatChanged(format!("assets: {e}")))?;
    Ok(env.data.into_iter().map(quote_from_entry).collect())
}

impl PriceProvider for CoinCapProvider {
    fn name(&self) -> &str {
        "coincap"
    }

    fn fetch_prices(&self, asset_id: &str, range_days: u32) -> Result<PriceSeries, DataError> {
        let url = format!("{}/assets/{asset_id}/history?interval=d1", self.base_url);
        let env: Envelope<Vec<HistoryEntry>> = self.http.get_json(&url, &[], asset_id)?;
        history_to_series(asset_id, env.data, range_days)
    }

    fn is_available(&self) -> bool {
        self.http.breaker().is_allowed()
    }
}

impl QuoteProvider for CoinCapProvider {
    fn name(&self) -> &str {
        "coincap"
    }

    fn fetch_quotes(&self, limit: usize) -> Result<Vec<AssetQuote>, DataError> {
        let url = format!("{}/assets?limit={limit}", self.base_url);
        let env: Envelope<Vec<AssetEntry>> = self.http.get_json(&url, &[], "assets")?;
        Ok(env.data.into_iter().map(quote_from_entry).collect())
    }
}
