use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::FirmRoiError;
use crate::profitability::calculator::ProjectionResult;
use crate::types::Money;
use crate::FirmRoiResult;

/// Qualitative tag attached to a projection. Tags are independent; any
/// combination may apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Recommendation {
    HighImpactOpportunity,
    StrongBusinessCase,
    GoodStartingPoint,
    FastPayback,
}

impl Recommendation {
    pub fn label(&self) -> &'static str {
        match self {
            Recommendation::HighImpactOpportunity => "high-impact opportunity",
            Recommendation::StrongBusinessCase => "strong business case",
            Recommendation::GoodStartingPoint => "good starting point",
            Recommendation::FastPayback => "fast payback",
        }
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Savings tiers (exclusive lower bounds, inclusive upper bounds) and the
/// payback ceiling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecommendationThresholds {
    pub high_impact: Money,
    pub strong_case: Money,
    pub good_start: Money,
    pub fast_payback_months: Decimal,
}

impl Default for RecommendationThresholds {
    fn default() -> Self {
        RecommendationThresholds {
            high_impact: dec!(200000),
            strong_case: dec!(100000),
            good_start: dec!(50000),
            fast_payback_months: dec!(3),
        }
    }
}

impl RecommendationThresholds {
    pub fn validate(&self) -> FirmRoiResult<()> {
        if !(self.good_start <= self.strong_case && self.strong_case <= self.high_impact) {
            return Err(FirmRoiError::InvalidInput {
                field: "thresholds".into(),
                reason: "Tiers must satisfy good_start <= strong_case <= high_impact.".into(),
            });
        }
        if self.fast_payback_months < Decimal::ZERO {
            return Err(FirmRoiError::InvalidInput {
                field: "thresholds.fast_payback_months".into(),
                reason: "Payback ceiling cannot be negative.".into(),
            });
        }
        Ok(())
    }
}

/// Tag a projection using the default thresholds.
pub fn classify(result: &ProjectionResult) -> Vec<Recommendation> {
    classify_with(result, &RecommendationThresholds::default())
}

/// Tag a projection. Output order is fixed: savings tier first, then payback.
pub fn classify_with(
    result: &ProjectionResult,
    thresholds: &RecommendationThresholds,
) -> Vec<Recommendation> {
    let savings = result.total_annual_savings;
    let mut tags = Vec::new();

    if savings > thresholds.high_impact {
        tags.push(Recommendation::HighImpactOpportunity);
    }
    if savings > thresholds.strong_case && savings <= thresholds.high_impact {
        tags.push(Recommendation::StrongBusinessCase);
    }
    if savings > thresholds.good_start && savings <= thresholds.strong_case {
        tags.push(Recommendation::GoodStartingPoint);
    }
    // Break-even is zero, not meaningful, when there are no savings.
    if savings > Decimal::ZERO && result.break_even_months <= thresholds.fast_payback_months {
        tags.push(Recommendation::FastPayback);
    }

    tags
}
