//! Property tests for scan batching.
//!
//! Uses proptest to verify:
//! 1. Coverage: every asset lands in exactly one round, in input order
//! 2. Shape: rounds are full except possibly the last

use coinlens_runner::scan::rounds;
use proptest::prelude::*;

// ── Strategies (proptest) ────────────────────────────────────────────

fn arb_assets() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[a-z]{1,8}", 0..40)
}

// ── 1. Coverage ──────────────────────────────────────────────────────

proptest! {
    #[test]
    fn rounds_preserve_order_and_cover_every_asset(
        assets in arb_assets(),
        batch_size in 0usize..12,
    ) {
        let batches = rounds(&assets, batch_size);
        let flattened: Vec<String> = batches.iter().flat_map(|b| b.iter().cloned()).collect();
        prop_assert_eq!(flattened, assets.clone());
    }
}

// ── 2. Shape ─────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn rounds_are_full_except_the_last(
        assets in arb_assets(),
        batch_size in 0usize..12,
    ) {
        let size = batch_size.max(1);
        let batches = rounds(&assets, batch_size);
        prop_assert_eq!(batches.len(), assets.len().div_ceil(size));
        if let Some((last, full)) = batches.split_last() {
            prop_assert!(full.iter().all(|b| b.len() == size));
            prop_assert!(!last.is_empty() && last.len() <= size);
        }
    }
}
