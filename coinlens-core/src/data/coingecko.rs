//! CoinGecko v3 provider (primary source).
//!
//! - price history: `/coins/{id}/market_chart?vs_currency=usd&days={n}`
//!   → `{"prices": [[ms, price], ...], ...}`
//! - quotes: `/coins/markets?vs_currency=usd&order=market_cap_desc&per_page={n}`
//!
//! An optional demo API key is read from the credential provider on each
//! request and appended as `x_cg_demo_api_key`.

use super::credentials::{CredentialProvider, COINGECKO_API_KEY};
use super::http::HttpFetcher;
use super::provider::{DataError, DataSource, PriceProvider, QuoteProvider};
use crate::domain::{AssetQuote, PricePoint, PriceSeries};
use serde::Deserialize;
use std::sync::Arc;

pub const COINGECKO_BASE_URL: &str = "https://api.coingecko.com/api/v3";

#[derive(Debug, Deserialize)]
struct MarketChartResponse {
    prices: Vec<(f64, f64)>,
}

#[derive(Debug, Deserialize)]
struct MarketEntry {
    id: String,
    symbol: String,
    name: String,
    current_price: Option<f64>,
    market_cap: Option<f64>,
    market_cap_rank: Option<u32>,
    price_change_percentage_24h: Option<f64>,
    total_volume: Option<f64>,
}

pub struct CoinGeckoProvider {
    http: HttpFetcher,
    credentials: Arc<dyn CredentialProvider>,
    base_url: String,
}

impl CoinGeckoProvider {
    pub fn new(http: HttpFetcher, credentials: Arc<dyn CredentialProvider>) -> Self {
        Self {
            http,
            credentials,
            base_url: COINGECKO_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn key_param(&self) -> String {
        match self.credentials.get(COINGECKO_API_KEY) {
            Some(key) => format!("&x_cg_demo_api_key={key}"),
            None => String::new(),
        }
    }

    fn market_chart_url(&self, asset_id: &str, range_days: u32) -> String {
        format!(
            "{}/coins/{asset_id}/market_chart?vs_currency=usd&days={range_days}{}",
            self.base_url,
            self.key_param()
        )
    }

    fn markets_url(&self, limit: usize) -> String {
        format!(
            "{}/coins/markets?vs_currency=usd&order=market_cap_desc&per_page={limit}\
             &page=1&sparkline=false{}",
            self.base_url,
            self.key_param()
        )
    }
}

/// Parse a `market_chart` body into a price series.
pub fn parse_market_chart(asset_id: &str, body: &str) -> Result<PriceSeries, DataError> {
    let resp: MarketChartResponse = serde_json::from_str(body)
        .map_err(|e| DataError::ResponseFormatChanged(format!("market_chart for {asset_id}: {e}")))?;
    series_from_pairs(asset_id, resp.prices)
}

fn series_from_pairs(asset_id: &str, pairs: Vec<(f64, f64)>) -> Result<PriceSeries, DataError> {
    if pairs.is_empty() {
        return Err(DataError::AssetNotFound {
            asset: asset_id.to_string(),
        });
    }
    let points = pairs
        .into_iter()
        .map(|(ts, price)| PricePoint::new(ts as i64, price))
        .collect();
    Ok(PriceSeries::from_unsorted(
        asset_id,
        points,
        DataSource::CoinGecko,
    )?)
}

/// Parse a `coins/markets` body into quotes. Missing numbers become 0.
pub fn parse_markets(body: &str) -> Result<Vec<AssetQuote>, DataError> {
    let entries: Vec<MarketEntry> = serde_json::from_str(body)
        .map_err(|e| DataError::ResponseFormatChanged(format!("coins/markets: {e}")))?;
    Ok(entries.into_iter().map(quote_from_entry).collect())
}

fn quote_from_entry(e: MarketEntry) -> AssetQuote {
    AssetQuote {
        id: e.id,
        symbol: e.symbol.to_uppercase(),
        name: e.name,
        current_price: e.current_price.unwrap_or(0.0),
        market_cap: e.market_cap.unwrap_or(0.0),
        market_cap_rank: e.market_cap_rank,
        price_change_percentage_24h: e.price_change_percentage_24h.unwrap_or(0.0),
        total_volume: e.total_volume.unwrap_or(0.0),
    }
}

impl PriceProvider for CoinGeckoProvider {
    fn name(&self) -> &str {
        "coingecko"
    }

    fn fetch_prices(&self, asset_id: &str, range_days: u32) -> Result<PriceSeries, DataError> {
        let url = self.market_chart_url(asset_id, range_days);
        let resp: MarketChartResponse = self.http.get_json(&url, &[], asset_id)?;
        series_from_pairs(asset_id, resp.prices)
    }

    fn is_available(&self) -> bool {
        self.http.breaker().is_allowed()
    }
}

impl QuoteProvider for CoinGeckoProvider {
    fn name(&self) -> &str {
        "coingecko"
    }

    fn fetch_quotes(&self, limit: usize) -> Result<Vec<AssetQuote>, DataError> {
        let url = self.markets_url(limit);
        let entries: Vec<MarketEntry> = self.http.get_json(&url, &[], "coins/markets")?;
        Ok(entries.into_iter().map(quote_from_entry).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::circuit_breaker::CircuitBreaker;
    use crate::data::credentials::{NoCredentials, StaticCredentials};
    use crate::data::http::RetryPolicy;

    fn provider(creds: Arc<dyn CredentialProvider>) -> CoinGeckoProvider {
        let http = HttpFetcher::new(
            Arc::new(CircuitBreaker::for_provider("coingecko")),
            RetryPolicy::default(),
        )
        .unwrap();
        CoinGeckoProvider::new(http, creds)
    }

    #[test]
    fn parses_market_chart() {
        let body = r#"{
            "prices": [[1700000000000, 35000.5], [1700086400000, 35500.25]],
            "market_caps": [[1700000000000, 1.0]],
            "total_volumes": [[1700000000000, 2.0]]
        }"#;
        let series = parse_market_chart("bitcoin", body).unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series.source(), DataSource::CoinGecko);
        assert_eq!(series.points()[0].timestamp, 1_700_000_000_000);
        assert_eq!(series.prices(), vec![35000.5, 35500.25]);
    }

    #[test]
    fn empty_chart_is_not_found() {
        let err = parse_market_chart("nope", r#"{"prices": []}"#).unwrap_err();
        assert!(matches!(err, DataError::AssetNotFound { .. }));
    }

    #[test]
    fn malformed_chart_is_format_change() {
        let err = parse_market_chart("bitcoin", r#"{"error": "x"}"#).unwrap_err();
        assert!(matches!(err, DataError::ResponseFormatChanged(_)));
    }

    #[test]
    fn parses_markets_with_nulls() {
        let body = r#"[
            {"id": "bitcoin", "symbol": "btc", "name": "Bitcoin", "current_price": 35000.0,
             "market_cap": 680000000000.0, "market_cap_rank": 1,
             "price_change_percentage_24h": -1.5, "total_volume": 2.0e10},
            {"id": "newcoin", "symbol": "new", "name": "New", "current_price": null,
             "market_cap": null, "market_cap_rank": null,
             "price_change_percentage_24h": null, "total_volume": null}
        ]"#;
        let quotes = parse_markets(body).unwrap();
        assert_eq!(quotes.len(), 2);
        assert_eq!(quotes[0].symbol, "BTC");
        assert_eq!(quotes[0].market_cap_rank, Some(1));
        assert_eq!(quotes[1].current_price, 0.0);
        assert_eq!(quotes[1].market_cap_rank, None);
    }

    #[test]
    fn url_includes_key_when_configured() {
        let p = provider(Arc::new(
            StaticCredentials::default().with(COINGECKO_API_KEY, "demo-key"),
        ));
        let url = p.market_chart_url("bitcoin", 200);
        assert!(url.ends_with("/coins/bitcoin/market_chart?vs_currency=usd&days=200&x_cg_demo_api_key=demo-key"));
    }

    #[test]
    fn url_omits_key_when_missing() {
        let p = provider(Arc::new(NoCredentials)).with_base_url("http://localhost:1");
        assert_eq!(
            p.markets_url(10),
            "http://localhost:1/coins/markets?vs_currency=usd&order=market_cap_desc&per_page=10&page=1&sparkline=false"
        );
    }
}
