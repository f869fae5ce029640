//! Price points and price series.
//!
//! A `PriceSeries` is the contract between the ingestion adapter and the
//! indicator engine: an ordered, immutable sequence of `(timestamp, price)`
//! pairs. The engine itself only sees the price column.

use crate::data::provider::DataSource;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single observation: epoch-millisecond timestamp and a positive price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub timestamp: i64,
    pub price: f64,
}

impl PricePoint {
    pub fn new(timestamp: i64, price: f64) -> Self {
        Self { timestamp, price }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SeriesError {
    #[error("timestamps out of order at index {index}: {previous} > {current}")]
    OutOfOrder {
        index: usize,
        previous: i64,
        current: i64,
    },

    #[error("invalid price at index {index}: {price}")]
    InvalidPrice { index: usize, price: f64 },
}

/// Ordered sequence of price points for one asset.
///
/// Timestamps are non-decreasing. Duplicate timestamps are kept as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    asset: String,
    points: Vec<PricePoint>,
    source: DataSource,
}

impl PriceSeries {
    /// Build a series, validating ordering and price positivity.
    pub fn new(
        asset: impl Into<String>,
        points: Vec<PricePoint>,
        source: DataSource,
    ) -> Result<Self, SeriesError> {
        validate(&points)?;
        Ok(Self {
            asset: asset.into(),
            points,
            source,
        })
    }

    /// Build a series from points in arbitrary order (stable sort by timestamp).
    pub fn from_unsorted(
        asset: impl Into<String>,
        mut points: Vec<PricePoint>,
        source: DataSource,
    ) -> Result<Self, SeriesError> {
        points.sort_by_key(|p| p.timestamp);
        Self::new(asset, points, source)
    }

    pub fn asset(&self) -> &str {
        &self.asset
    }

    pub fn source(&self) -> DataSource {
        self.source
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    /// Price column, in timestamp order.
    pub fn prices(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.price).collect()
    }

    pub fn latest(&self) -> Option<&PricePoint> {
        self.points.last()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Keep only the most recent `n` points.
    pub fn tail(&self, n: usize) -> Self {
        let start = self.points.len().saturating_sub(n);
        Self {
            asset: self.asset.clone(),
            points: self.points[start..].to_vec(),
            source: self.source,
        }
    }
}

fn validate(points: &[PricePoint]) -> Result<(), SeriesError> {
    for (index, point) in points.iter().enumerate() {
        if !point.price.is_finite() || point.price <= 0.0 {
            return Err(SeriesError::InvalidPrice {
                index,
                price: point.price,
            });
        }
        if index > 0 {
            let previous = points[index - 1].timestamp;
            if point.timestamp < previous {
                return Err(SeriesError::OutOfOrder {
                    index,
                    previous,
                    current: point.timestamp,
                });
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pts(pairs: &[(i64, f64)]) -> Vec<PricePoint> {
        pairs.iter().map(|&(t, p)| PricePoint::new(t, p)).collect()
    }

    #[test]
    fn accepts_ordered_series() {
        let s = PriceSeries::new("bitcoin", pts(&[(1, 10.0), (2, 11.0)]), DataSource::Fixture)
            .unwrap();
        assert_eq!(s.len(), 2);
        assert_eq!(s.prices(), vec![10.0, 11.0]);
        assert_eq!(s.latest().unwrap().price, 11.0);
    }

    #[test]
    fn duplicate_timestamps_are_kept() {
        let s = PriceSeries::new(
            "bitcoin",
            pts(&[(1, 10.0), (1, 10.5), (2, 11.0)]),
            DataSource::Fixture,
        )
        .unwrap();
        assert_eq!(s.len(), 3);
    }

    #[test]
    fn rejects_out_of_order() {
        let err = PriceSeries::new("bitcoin", pts(&[(2, 10.0), (1, 11.0)]), DataSource::Fixture)
            .unwrap_err();
        assert!(matches!(err, SeriesError::OutOfOrder { index: 1, .. }));
    }

    #[test]
    fn rejects_non_positive_and_nan() {
        assert!(PriceSeries::new("x", pts(&[(1, 0.0)]), DataSource::Fixture).is_err());
        assert!(PriceSeries::new("x", pts(&[(1, -3.0)]), DataSource::Fixture).is_err());
        assert!(PriceSeries::new("x", pts(&[(1, f64::NAN)]), DataSource::Fixture).is_err());
    }

    #[test]
    fn from_unsorted_sorts() {
        let s = PriceSeries::from_unsorted(
            "x",
            pts(&[(3, 3.0), (1, 1.0), (2, 2.0)]),
            DataSource::Fixture,
        )
        .unwrap();
        assert_eq!(s.prices(), vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn empty_series_is_valid() {
        let s = PriceSeries::new("x", Vec::new(), DataSource::Fixture).unwrap();
        assert!(s.is_empty());
        assert!(s.latest().is_none());
    }

    #[test]
    fn tail_keeps_most_recent() {
        let s = PriceSeries::new(
            "x",
            pts(&[(1, 1.0), (2, 2.0), (3, 3.0)]),
            DataSource::Fixture,
        )
        .unwrap();
        assert_eq!(s.tail(2).prices(), vec![2.0, 3.0]);
        assert_eq!(s.tail(10).len(), 3);
    }
}
