use chrono::Utc;

use crate::domain::recommendation::{
    IndicatorCategory, IndicatorLine, RecommendationListing, StockRecommendation,
};

/// Curated TOP 5 Hong Kong picks. Editorial constants, not computed; the
/// server builds this once at startup and serves it unchanged.
pub fn curated_top5() -> RecommendationListing {
    RecommendationListing {
        generated_at: Utc::now(),
        items: vec![
            stock(
                1,
                "TENCENT",
                "0700.HK",
                "HK$320.50",
                9.2,
                vec![
                    positive("Recent 5-day return: +12.3%"),
                    info("Technical rebound potential: High"),
                    buy("Buy signal"),
                    info("Uptrend reversal (Short-term crossing long-term)"),
                    positive("Strong upward momentum (+12.5%)"),
                    info("Reasonable price level (Overheating: 58.7)"),
                ],
            ),
            stock(
                2,
                "HSBC HOLDINGS",
                "0005.HK",
                "HK$68.90",
                8.5,
                vec![
                    info("Average trading volume: HK$1,235M"),
                    positive("Recent 5-day return: +8.2%"),
                    info("Technical rebound potential: Medium"),
                    buy("Buy signal"),
                    info("Uptrend reversal (Short-term crossing long-term)"),
                    positive("Strong upward momentum (+8.2%)"),
                    negative("Resistance zone, possible adjustment (Overheating: 76.4)"),
                ],
            ),
            stock(
                3,
                "ALIBABA GROUP",
                "9988.HK",
                "HK$85.60",
                8.0,
                vec![
                    info("Average trading volume: HK$892M"),
                    positive("Recent 5-day return: +7.1%"),
                    info("Technical rebound potential: High"),
                    buy("Buy signal"),
                    info("Uptrend reversal (Short-term crossing long-term)"),
                    positive("Strong upward momentum (+7.1%)"),
                    info("Reasonable price level (Overheating: 55.3)"),
                ],
            ),
            stock(
                4,
                "AIA GROUP",
                "1299.HK",
                "HK$72.40",
                7.8,
                vec![
                    info("Average trading volume: HK$756M"),
                    positive("Recent 5-day return: +5.8%"),
                    info("Technical rebound potential: Medium"),
                    buy("Buy signal"),
                    info("Uptrend reversal (Short-term crossing long-term)"),
                    positive("Stable upward trend (+5.8%)"),
                    info("Reasonable price level (Overheating: 52.9)"),
                ],
            ),
            stock(
                5,
                "MEITUAN",
                "3690.HK",
                "HK$125.80",
                7.5,
                vec![
                    info("Average trading volume: HK$1,042M"),
                    positive("Recent 5-day return: +4.9%"),
                    info("Technical rebound potential: Low"),
                    buy("Buy signal"),
                    info("Uptrend reversal (Short-term crossing long-term)"),
                    positive("Stable upward trend (+4.9%)"),
                    negative("Approaching resistance zone (Overheating: 68.2)"),
                ],
            ),
        ],
    }
}

fn stock(
    rank: i32,
    name: &str,
    code: &str,
    price: &str,
    score: f64,
    indicators: Vec<IndicatorLine>,
) -> StockRecommendation {
    StockRecommendation {
        rank,
        name: name.to_string(),
        code: code.to_string(),
        price: price.to_string(),
        score,
        indicators,
    }
}

fn line(text: &str, category: IndicatorCategory) -> IndicatorLine {
    IndicatorLine {
        text: text.to_string(),
        category,
    }
}

fn info(text: &str) -> IndicatorLine {
    line(text, IndicatorCategory::Informational)
}

fn positive(text: &str) -> IndicatorLine {
    line(text, IndicatorCategory::Positive)
}

fn negative(text: &str) -> IndicatorLine {
    line(text, IndicatorCategory::Negative)
}

fn buy(text: &str) -> IndicatorLine {
    line(text, IndicatorCategory::BuySignal)
}
