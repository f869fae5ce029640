//! Holdings valuation and P&L summary.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A position: `quantity` units bought at an average of `avg_price`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Holding {
    pub symbol: String,
    pub quantity: f64,
    pub avg_price: f64,
}

impl Holding {
    pub fn invested(&self) -> f64 {
        self.quantity * self.avg_price
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoldingValuation {
    pub symbol: String,
    pub quantity: f64,
    pub avg_price: f64,
    pub current_price: f64,
    pub total_value: f64,
    pub invested: f64,
    pub pnl: f64,
    pub pnl_pct: f64,
    /// False when no current price was known and `avg_price` was used.
    pub priced: bool,
}

/// Value holdings against current prices keyed by upper-case symbol.
///
/// A holding without a price is valued at its average price (zero P&L).
pub fn value_holdings(holdings: &[Holding], prices: &HashMap<String, f64>) -> Vec<HoldingValuation> {
    holdings
        .iter()
        .map(|h| {
            let symbol = h.symbol.to_uppercase();
            let quoted = prices.get(&symbol).copied().filter(|p| p.is_finite() && *p > 0.0);
            let current_price = quoted.unwrap_or(h.avg_price);
            let total_value = h.quantity * current_price;
            let invested = h.invested();
            let pnl = total_value - invested;
            let pnl_pct = if invested > 0.0 { pnl / invested * 100.0 } else { 0.0 };
            HoldingValuation {
                symbol,
                quantity: h.quantity,
                avg_price: h.avg_price,
                current_price,
                total_value,
                invested,
                pnl,
                pnl_pct,
                priced: quoted.is_some(),
            }
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioStats {
    pub total_value: f64,
    pub total_invested: f64,
    pub total_pnl: f64,
    pub total_pnl_pct: f64,
    pub best_performer: Option<HoldingValuation>,
    pub worst_performer: Option<HoldingValuation>,
}

impl PortfolioStats {
    /// Ties keep the earliest holding for both best and worst.
    pub fn from_valuations(valuations: &[HoldingValuation]) -> Self {
        let total_value: f64 = valuations.iter().map(|v| v.total_value).sum();
        let total_invested: f64 = valuations.iter().map(|v| v.invested).sum();
        let total_pnl = total_value - total_invested;
        let total_pnl_pct = if total_invested > 0.0 {
            total_pnl / total_invested * 100.0
        } else {
            0.0
        };

        let mut best: Option<&HoldingValuation> = None;
        let mut worst: Option<&HoldingValuation> = None;
        for v in valuations {
            if best.map_or(true, |b| v.pnl_pct > b.pnl_pct) {
                best = Some(v);
            }
            if worst.map_or(true, |w| v.pnl_pct < w.pnl_pct) {
                worst = Some(v);
            }
        }

        Self {
            total_value,
            total_invested,
            total_pnl,
            total_pnl_pct,
            best_performer: best.cloned(),
            worst_performer: worst.cloned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::assert_approx;

    fn holding(symbol: &str, quantity: f64, avg_price: f64) -> Holding {
        Holding {
            symbol: symbol.into(),
            quantity,
            avg_price,
        }
    }

    fn prices(pairs: &[(&str, f64)]) -> HashMap<String, f64> {
        pairs.iter().map(|&(s, p)| (s.to_string(), p)).collect()
    }

    #[test]
    fn values_against_current_prices() {
        let v = value_holdings(&[holding("btc", 2.0, 100.0)], &prices(&[("BTC", 150.0)]));
        assert_eq!(v[0].symbol, "BTC");
        assert_approx(v[0].total_value, 300.0, 1e-9);
        assert_approx(v[0].invested, 200.0, 1e-9);
        assert_approx(v[0].pnl, 100.0, 1e-9);
        assert_approx(v[0].pnl_pct, 50.0, 1e-9);
        assert!(v[0].priced);
    }

    #[test]
    fn missing_price_uses_avg_price() {
        let v = value_holdings(&[holding("XYZ", 3.0, 10.0)], &HashMap::new());
        assert_approx(v[0].current_price, 10.0, 1e-9);
        assert_eq!(v[0].pnl, 0.0);
        assert!(!v[0].priced);
    }

    #[test]
    fn stats_totals_and_performers() {
        let v = value_holdings(
            &[
                holding("BTC", 1.0, 100.0),
                holding("ETH", 10.0, 10.0),
                holding("SOL", 5.0, 20.0),
            ],
            &prices(&[("BTC", 120.0), ("ETH", 8.0), ("SOL", 20.0)]),
        );
        let stats = PortfolioStats::from_valuations(&v);
        assert_approx(stats.total_invested, 300.0, 1e-9);
        assert_approx(stats.total_value, 300.0, 1e-9);
        assert_approx(stats.total_pnl, 0.0, 1e-9);
        assert_eq!(stats.best_performer.unwrap().symbol, "BTC");
        assert_eq!(stats.worst_performer.unwrap().symbol, "ETH");
    }

    #[test]
    fn empty_portfolio() {
        let stats = PortfolioStats::from_valuations(&[]);
        assert_eq!(stats.total_pnl_pct, 0.0);
        assert!(stats.best_performer.is_none());
        assert!(stats.worst_performer.is_none());
    }
}
