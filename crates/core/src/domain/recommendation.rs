use anyhow::{bail, ensure};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationListing {
    pub generated_at: DateTime<Utc>,
    pub items: Vec<StockRecommendation>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockRecommendation {
    pub rank: i32,
    pub name: String,
    pub code: String,
    /// Pre-formatted display price, e.g. "HK$320.50".
    pub price: String,
    pub score: f64,
    pub indicators: Vec<IndicatorLine>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndicatorLine {
    pub text: String,
    pub category: IndicatorCategory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndicatorCategory {
    Informational,
    Positive,
    Negative,
    BuySignal,
}

impl IndicatorCategory {
    /// Marker prefixed to the indicator text when displayed.
    pub fn marker(self) -> &'static str {
        match self {
            IndicatorCategory::BuySignal => "✓",
            IndicatorCategory::Positive => "↑",
            IndicatorCategory::Negative => "↓",
            IndicatorCategory::Informational => "•",
        }
    }
}

impl RecommendationListing {
    /// Display invariants: items ordered by rank, ranks contiguous from 1,
    /// scores non-increasing. An empty listing is valid.
    pub fn validate(&self) -> anyhow::Result<()> {
        let mut seen_ranks = BTreeSet::<i32>::new();
        for item in &self.items {
            item.validate()?;
            ensure!(
                seen_ranks.insert(item.rank),
                "duplicate rank: {}",
                item.rank
            );
        }

        for rank in 1..=self.items.len() as i32 {
            if !seen_ranks.contains(&rank) {
                bail!("missing rank {rank} in listing of {} items", self.items.len());
            }
        }

        for pair in self.items.windows(2) {
            ensure!(
                pair[0].rank < pair[1].rank,
                "items out of rank order: {} before {}",
                pair[0].rank,
                pair[1].rank
            );
            ensure!(
                pair[0].score >= pair[1].score,
                "score must not increase with rank: rank {} has {}, rank {} has {}",
                pair[0].rank,
                pair[0].score,
                pair[1].rank,
                pair[1].score
            );
        }

        Ok(())
    }
}

impl StockRecommendation {
    fn validate(&self) -> anyhow::Result<()> {
        ensure!(self.rank >= 1, "rank must be positive (got {})", self.rank);
        ensure!(!self.name.trim().is_empty(), "name must be non-empty");
        ensure!(!self.code.trim().is_empty(), "code must be non-empty");
        ensure!(!self.price.trim().is_empty(), "price must be non-empty");

        for line in &self.indicators {
            ensure!(
                !line.text.trim().is_empty(),
                "indicator text must be non-empty (rank {})",
                self.rank
            );
        }

        Ok(())
    }
}
