//! Domain types for CoinLens

pub mod alert;
pub mod market;
pub mod price;

pub use alert::{AlertId, AlertKind, AlertRecord, AlertRule};
pub use market::{AssetQuote, FearGreedReading, MarketDominance, SentimentBand};
pub use price::{PricePoint, PriceSeries, SeriesError};

/// Asset identifier as used by the upstream APIs (e.g. "bitcoin").
pub type AssetId = String;
