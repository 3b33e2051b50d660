use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Rates expressed as decimals (0.25 = 25%). Never as percentages.
pub type Rate = Decimal;

/// Values already scaled to percentages (626.4 = 626.4%).
pub type Percent = Decimal;

/// Hours, either per week or per year depending on the field.
pub type Hours = Decimal;

// ---------------------------------------------------------------------------
// Saturating arithmetic
// ---------------------------------------------------------------------------

/// Sum that sticks at `Decimal::MAX` / `Decimal::MIN` instead of overflowing.
pub fn saturating_sum<I: IntoIterator<Item = Decimal>>(values: I) -> Decimal {
    values
        .into_iter()
        .fold(Decimal::ZERO, |acc, v| acc.saturating_add(v))
}

/// Product of all factors, saturating on overflow.
pub fn saturating_product<I: IntoIterator<Item = Decimal>>(factors: I) -> Decimal {
    factors
        .into_iter()
        .fold(Decimal::ONE, |acc, v| acc.saturating_mul(v))
}

/// Division that is zero for a zero denominator and saturates on overflow.
pub fn saturating_div(numerator: Decimal, denominator: Decimal) -> Decimal {
    if denominator.is_zero() {
        return Decimal::ZERO;
    }
    numerator.checked_div(denominator).unwrap_or(
        if numerator.is_sign_negative() != denominator.is_sign_negative() {
            Decimal::MIN
        } else {
            Decimal::MAX
        },
    )
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}
