//! Market overview: top quotes, fear & greed and bitcoin dominance.
//!
//! Each part is independent. A failed part is left as `None` with a warning,
//! and dominance falls back to an estimate from the quote list.

use crate::sources::Sources;
use coinlens_core::data::{DataError, QuoteProvider};
use coinlens_core::domain::{AssetQuote, FearGreedReading, MarketDominance};
use serde::{Deserialize, Serialize};
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DominanceOrigin {
    /// Reported by CoinMarketCap.
    Reported,
    /// Estimated from the quote list.
    Estimated,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketOverview {
    pub quotes: Vec<AssetQuote>,
    pub fear_greed: Option<FearGreedReading>,
    pub dominance: Option<MarketDominance>,
    pub dominance_origin: Option<DominanceOrigin>,
    pub warnings: Vec<String>,
}

impl MarketOverview {
    pub fn from_parts(
        quotes: Result<Vec<AssetQuote>, DataError>,
        fear_greed: Result<FearGreedReading, DataError>,
        dominance: Result<MarketDominance, DataError>,
    ) -> Self {
        let mut warnings = Vec::new();

        let quotes = quotes.unwrap_or_else(|e| {
            warnings.push(format!("quotes unavailable: {e}"));
            Vec::new()
        });

        let fear_greed = match fear_greed {
            Ok(r) => Some(r),
            Err(e) => {
                warnings.push(format!("fear & greed unavailable: {e}"));
                None
            }
        };

        let (dominance, dominance_origin) = match dominance {
            Ok(d) => (Some(d), Some(DominanceOrigin::Reported)),
            Err(e) => {
                warnings.push(format!("dominance unavailable: {e}"));
                match MarketDominance::from_quotes(&quotes) {
                    Some(d) => (Some(d), Some(DominanceOrigin::Estimated)),
                    None => (None, None),
                }
            }
        };

        for w in &warnings {
            warn!("{w}");
        }

        Self {
            quotes,
            fear_greed,
            dominance,
            dominance_origin,
            warnings,
        }
    }

    pub fn fetch(sources: &Sources, limit: usize) -> Self {
        Self::from_parts(
            fetch_quotes(&sources.quotes, limit),
            sources.fear_greed.fetch(),
            sources.dominance.fetch(),
        )
    }
}

/// First quote provider to succeed wins.
pub fn fetch_quotes(
    providers: &[Box<dyn QuoteProvider>],
    limit: usize,
) -> Result<Vec<AssetQuote>, DataError> {
    let mut attempts = Vec::new();
    for provider in providers {
        match provider.fetch_quotes(limit) {
            Ok(quotes) => return Ok(quotes),
            Err(e) => {
                warn!(provider = provider.name(), error = %e, "quote provider failed");
                attempts.push((provider.name().to_string(), e.to_string()));
            }
        }
    }
    Err(DataError::AllSourcesFailed {
        asset: "market quotes".into(),
        attempts,
    })
}
