use anyhow::ensure;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

pub const OVERLAP_INDEX_RANGE: RangeInclusive<i32> = 1..=10;
pub const MIN_TRADING_AMOUNT_RANGE: RangeInclusive<i32> = 10..=1000;
pub const MIN_TRADING_AMOUNT_STEP: i32 = 10;

/// Per-request display settings. Read by the page but never consumed by the
/// listing itself.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AnalysisSettings {
    /// Recommendation overlap index, 1..=10.
    pub overlap_index: i32,

    /// Minimum trading amount in million HKD, 10..=1000 in steps of 10.
    pub min_trading_amount: i32,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            overlap_index: 5,
            min_trading_amount: 100,
        }
    }
}

impl AnalysisSettings {
    /// Out-of-range values are rejected, not clamped.
    pub fn validate(&self) -> anyhow::Result<()> {
        ensure!(
            OVERLAP_INDEX_RANGE.contains(&self.overlap_index),
            "recommendation overlap index must be {}..={} (got {})",
            OVERLAP_INDEX_RANGE.start(),
            OVERLAP_INDEX_RANGE.end(),
            self.overlap_index
        );

        ensure!(
            MIN_TRADING_AMOUNT_RANGE.contains(&self.min_trading_amount),
            "minimum trading amount must be {}..={} million HKD (got {})",
            MIN_TRADING_AMOUNT_RANGE.start(),
            MIN_TRADING_AMOUNT_RANGE.end(),
            self.min_trading_amount
        );

        ensure!(
            self.min_trading_amount % MIN_TRADING_AMOUNT_STEP == 0,
            "minimum trading amount must be a multiple of {} (got {})",
            MIN_TRADING_AMOUNT_STEP,
            self.min_trading_amount
        );

        Ok(())
    }
}
