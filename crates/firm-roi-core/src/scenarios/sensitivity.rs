use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::debug_span;

use crate::error::FirmRoiError;
use crate::profitability::assumptions::ProjectionAssumptions;
use crate::profitability::calculator::{compute_with, ProjectionResult};
use crate::profitability::profile::{FirmProfile, ProfileField};
use crate::types::*;
use crate::FirmRoiResult;

/// A profile field swept from `min` to `max` in `step` increments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SensitivityVariable {
    pub field: ProfileField,
    pub min: Decimal,
    pub max: Decimal,
    pub step: Decimal,
}

/// Projection figure read from each grid cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputMetric {
    #[default]
    TotalAnnualSavings,
    Roi,
    BreakEvenMonths,
    RevenueRecovery,
    LaborSavings,
    CurrentOpportunityCost,
}

impl OutputMetric {
    pub fn read(&self, result: &ProjectionResult) -> Decimal {
        match self {
            OutputMetric::TotalAnnualSavings => result.total_annual_savings,
            OutputMetric::Roi => result.roi,
            OutputMetric::BreakEvenMonths => result.break_even_months,
            OutputMetric::RevenueRecovery => result.revenue_recovery,
            OutputMetric::LaborSavings => result.labor_savings,
            OutputMetric::CurrentOpportunityCost => result.current_opportunity_cost,
        }
    }
}

/// Input for 1- or 2-way sensitivity analysis over a firm profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SensitivityInput {
    /// Base case profile; fields not being swept keep these values
    pub base: FirmProfile,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assumptions: Option<ProjectionAssumptions>,
    pub variable_1: SensitivityVariable,
    /// Omit for a single-variable sweep
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variable_2: Option<SensitivityVariable>,
    #[serde(default)]
    pub output_metric: OutputMetric,
}

/// Output of sensitivity analysis
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SensitivityOutput {
    pub variable_1_field: ProfileField,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variable_2_field: Option<ProfileField>,
    pub variable_1_values: Vec<Decimal>,
    /// Empty for a single-variable sweep
    pub variable_2_values: Vec<Decimal>,
    pub output_metric: OutputMetric,
    /// Matrix[i][j] = metric when variable_1 = values_1[i] and variable_2 = values_2[j].
    /// Single-variable sweeps have one column.
    pub matrix: Vec<Vec<Decimal>>,
    /// Metric for the unmodified base profile
    pub base_case_value: Decimal,
    /// Cell closest to the base profile's own values (row, col)
    pub base_case_position: (usize, usize),
}

/// Generate the sweep values for a sensitivity variable from min to max with step.
pub fn generate_sweep_values(var: &SensitivityVariable) -> FirmRoiResult<Vec<Decimal>> {
    if var.step <= Decimal::ZERO {
        return Err(FirmRoiError::InvalidInput {
            field: format!("variable:{}", var.field),
            reason: "Step must be positive".into(),
        });
    }
    if var.min > var.max {
        return Err(FirmRoiError::InvalidInput {
            field: format!("variable:{}", var.field),
            reason: "Min must be <= max".into(),
        });
    }

    let mut values = Vec::new();
    let mut current = var.min;
    while current <= var.max {
        values.push(current);
        match current.checked_add(var.step) {
            Some(next) => current = next,
            None => break,
        }
    }
    // Ensure max is included if step doesn't land exactly on it
    if let Some(&last) = values.last() {
        if last < var.max {
            values.push(var.max);
        }
    }

    Ok(values)
}

/// Find the closest index to a target value in a sorted list.
fn closest_index(values: &[Decimal], target: Decimal) -> usize {
    values
        .iter()
        .enumerate()
        .min_by_key(|(_, v)| v.saturating_sub(target).abs())
        .map(|(i, _)| i)
        .unwrap_or(0)
}

/// Sweep one or two profile fields and record the chosen metric per cell.
pub fn run_sensitivity(
    input: &SensitivityInput,
) -> FirmRoiResult<ComputationOutput<SensitivityOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let default_assumptions = ProjectionAssumptions::default();
    let assumptions = input.assumptions.as_ref().unwrap_or(&default_assumptions);
    assumptions.validate()?;

    if let Some(v2) = &input.variable_2 {
        if v2.field == input.variable_1.field {
            return Err(FirmRoiError::InvalidInput {
                field: "variable_2".into(),
                reason: "Second variable must differ from the first".into(),
            });
        }
    }

    let v1_values = generate_sweep_values(&input.variable_1)?;
    let v2_values = match &input.variable_2 {
        Some(v2) => generate_sweep_values(v2)?,
        None => Vec::new(),
    };

    let span = debug_span!(
        "sensitivity",
        variable_1 = %input.variable_1.field,
        rows = v1_values.len(),
        cols = v2_values.len().max(1)
    );
    let _enter = span.enter();

    let metric = input.output_metric;
    let evaluate = |profile: &FirmProfile| metric.read(&compute_with(profile, assumptions));

    let mut matrix = Vec::with_capacity(v1_values.len());
    for v1 in &v1_values {
        let row_profile = input.base.with_field(input.variable_1.field, *v1);
        let row = match &input.variable_2 {
            Some(v2) => v2_values
                .iter()
                .map(|val| evaluate(&row_profile.with_field(v2.field, *val)))
                .collect(),
            None => vec![evaluate(&row_profile)],
        };
        matrix.push(row);
    }

    for var in std::iter::once(&input.variable_1).chain(input.variable_2.as_ref()) {
        if var.min < Decimal::ZERO {
            warnings.push(format!(
                "Sweep of '{}' includes negative values.",
                var.field
            ));
        }
        let base_value = input.base.get(var.field);
        if base_value < var.min || base_value > var.max {
            warnings.push(format!(
                "Base value of '{}' ({}) lies outside the swept range.",
                var.field, base_value
            ));
        }
    }

    let base_row = closest_index(&v1_values, input.base.get(input.variable_1.field));
    let base_col = match &input.variable_2 {
        Some(v2) => closest_index(&v2_values, input.base.get(v2.field)),
        None => 0,
    };

    let output = SensitivityOutput {
        variable_1_field: input.variable_1.field,
        variable_2_field: input.variable_2.as_ref().map(|v| v.field),
        variable_1_values: v1_values,
        variable_2_values: v2_values,
        output_metric: metric,
        matrix,
        base_case_value: evaluate(&input.base),
        base_case_position: (base_row, base_col),
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        if input.variable_2.is_some() {
            "2-Way Sensitivity Analysis"
        } else {
            "1-Way Sensitivity Analysis"
        },
        &serde_json::json!({
            "variable_1": input.variable_1.field,
            "variable_2": input.variable_2.as_ref().map(|v| v.field),
            "output_metric": metric,
            "assumptions": assumptions,
        }),
        warnings,
        elapsed,
        output,
    ))
}
