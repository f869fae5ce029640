//! Market-wide data: asset quotes, fear & greed readings, dominance.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Latest market quote for one asset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetQuote {
    pub id: String,
    pub symbol: String,
    pub name: String,
    pub current_price: f64,
    pub market_cap: f64,
    pub market_cap_rank: Option<u32>,
    pub price_change_percentage_24h: f64,
    pub total_volume: f64,
}

/// Qualitative band of the fear & greed index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SentimentBand {
    ExtremeFear,
    Fear,
    Neutral,
    Greed,
    ExtremeGreed,
}

impl SentimentBand {
    pub fn from_value(value: u8) -> Self {
        match value {
            75.. => SentimentBand::ExtremeGreed,
            55..=74 => SentimentBand::Greed,
            45..=54 => SentimentBand::Neutral,
            25..=44 => SentimentBand::Fear,
            _ => SentimentBand::ExtremeFear,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SentimentBand::ExtremeFear => "Extreme Fear",
            SentimentBand::Fear => "Fear",
            SentimentBand::Neutral => "Neutral",
            SentimentBand::Greed => "Greed",
            SentimentBand::ExtremeGreed => "Extreme Greed",
        }
    }
}

/// One fear & greed index reading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FearGreedReading {
    pub value: u8,
    /// Classification string as reported by the source.
    pub classification: String,
    pub timestamp: DateTime<Utc>,
}

impl FearGreedReading {
    pub fn band(&self) -> SentimentBand {
        SentimentBand::from_value(self.value)
    }
}

/// Bitcoin dominance and market capitalisation split.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarketDominance {
    /// Percent of total market cap held by bitcoin.
    pub btc_dominance: f64,
    pub altcoins_cap: f64,
    pub total_market_cap: f64,
}

impl MarketDominance {
    /// Approximate dominance from a quote list.
    ///
    /// Only covers the quoted assets, so the total is a lower bound of the
    /// real market cap. Returns `None` without a bitcoin quote or with a zero total.
    pub fn from_quotes(quotes: &[AssetQuote]) -> Option<Self> {
        let total: f64 = quotes.iter().map(|q| q.market_cap).sum();
        let btc = quotes
            .iter()
            .find(|q| q.id == "bitcoin" || q.symbol.eq_ignore_ascii_case("btc"))?
            .market_cap;
        if total <= 0.0 {
            return None;
        }
        Some(Self {
            btc_dominance: btc / total * 100.0,
            altcoins_cap: total - btc,
            total_market_cap: total,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quote(id: &str, symbol: &str, cap: f64) -> AssetQuote {
        AssetQuote {
            id: id.into(),
            symbol: symbol.into(),
            name: id.into(),
            current_price: 1.0,
            market_cap: cap,
            market_cap_rank: None,
            price_change_percentage_24h: 0.0,
            total_volume: 0.0,
        }
    }

    #[test]
    fn sentiment_bands() {
        assert_eq!(SentimentBand::from_value(0), SentimentBand::ExtremeFear);
        assert_eq!(SentimentBand::from_value(24), SentimentBand::ExtremeFear);
        assert_eq!(SentimentBand::from_value(25), SentimentBand::Fear);
        assert_eq!(SentimentBand::from_value(45), SentimentBand::Neutral);
        assert_eq!(SentimentBand::from_value(55), SentimentBand::Greed);
        assert_eq!(SentimentBand::from_value(75), SentimentBand::ExtremeGreed);
        assert_eq!(SentimentBand::from_value(100), SentimentBand::ExtremeGreed);
    }

    #[test]
    fn dominance_from_quotes() {
        let quotes = vec![quote("bitcoin", "btc", 600.0), quote("ethereum", "eth", 400.0)];
        let d = MarketDominance::from_quotes(&quotes).unwrap();
        assert!((d.btc_dominance - 60.0).abs() < 1e-9);
        assert!((d.altcoins_cap - 400.0).abs() < 1e-9);
        assert!((d.total_market_cap - 1000.0).abs() < 1e-9);
    }

    #[test]
    fn dominance_requires_bitcoin() {
        let quotes = vec![quote("ethereum", "eth", 400.0)];
        assert!(MarketDominance::from_quotes(&quotes).is_none());
    }
}
