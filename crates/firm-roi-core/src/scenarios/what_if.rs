use rayon::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{debug, debug_span};

use crate::error::FirmRoiError;
use crate::profitability::assumptions::ProjectionAssumptions;
use crate::profitability::calculator::{compute_with, ProjectionResult};
use crate::profitability::profile::{FirmProfile, ProfileField};
use crate::profitability::recommendations::{classify_with, Recommendation};
use crate::types::*;
use crate::FirmRoiResult;

/// Replace one profile field with a fixed value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldOverride {
    pub field: ProfileField,
    pub value: Decimal,
}

/// Named variation of the base profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WhatIfScenario {
    pub name: String,
    pub overrides: Vec<FieldOverride>,
}

/// Input for what-if comparison
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WhatIfInput {
    pub base: FirmProfile,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assumptions: Option<ProjectionAssumptions>,
    pub scenarios: Vec<WhatIfScenario>,
}

/// Result for a single scenario
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WhatIfResult {
    pub name: String,
    pub profile: FirmProfile,
    pub projection: ProjectionResult,
    pub recommendations: Vec<Recommendation>,
    /// Scenario total savings minus base total savings
    pub savings_delta: Money,
    /// Scenario ROI minus base ROI, in percentage points
    pub roi_delta: Percent,
}

/// Output of what-if comparison
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WhatIfOutput {
    pub base: ProjectionResult,
    pub base_recommendations: Vec<Recommendation>,
    /// One entry per scenario, in input order
    pub results: Vec<WhatIfResult>,
    /// Name of the scenario with the highest total savings
    pub best_scenario: String,
}

/// Project the base profile and every scenario side by side.
///
/// Scenarios are evaluated in parallel; results keep the input order and
/// ties for best scenario go to the earliest one.
pub fn run_what_if(input: &WhatIfInput) -> FirmRoiResult<ComputationOutput<WhatIfOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    if input.scenarios.is_empty() {
        return Err(FirmRoiError::InsufficientData(
            "At least one scenario required".into(),
        ));
    }

    let default_assumptions = ProjectionAssumptions::default();
    let assumptions = input.assumptions.as_ref().unwrap_or(&default_assumptions);
    assumptions.validate()?;

    for scenario in &input.scenarios {
        if scenario.overrides.is_empty() {
            warnings.push(format!(
                "Scenario '{}' has no overrides; it matches the base case.",
                scenario.name
            ));
        }
    }

    let span = debug_span!("what_if", scenarios = input.scenarios.len());
    let _enter = span.enter();

    let base = compute_with(&input.base, assumptions);
    let base_recommendations = classify_with(&base, &assumptions.thresholds);

    let results: Vec<WhatIfResult> = input
        .scenarios
        .par_iter()
        .map(|scenario| {
            let profile = apply_overrides(&input.base, &scenario.overrides);
            let projection = compute_with(&profile, assumptions);
            let recommendations = classify_with(&projection, &assumptions.thresholds);
            WhatIfResult {
                name: scenario.name.clone(),
                savings_delta: projection
                    .total_annual_savings
                    .saturating_sub(base.total_annual_savings),
                roi_delta: projection.roi.saturating_sub(base.roi),
                profile,
                projection,
                recommendations,
            }
        })
        .collect();

    let best_scenario = results
        .iter()
        .fold(None::<&WhatIfResult>, |best, r| match best {
            Some(b) if b.projection.total_annual_savings >= r.projection.total_annual_savings => {
                Some(b)
            }
            _ => Some(r),
        })
        .map(|r| r.name.clone())
        .unwrap_or_default();

    debug!(best = %best_scenario, "what-if comparison complete");

    let output = WhatIfOutput {
        base,
        base_recommendations,
        results,
        best_scenario,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "What-If Scenario Comparison",
        assumptions,
        warnings,
        elapsed,
        output,
    ))
}

/// Apply overrides in order; a later override of the same field wins.
pub fn apply_overrides(base: &FirmProfile, overrides: &[FieldOverride]) -> FirmProfile {
    overrides
        .iter()
        .fold(base.clone(), |profile, o| profile.with_field(o.field, o.value))
}
