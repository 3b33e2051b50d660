use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{debug, warn};

use crate::profitability::assumptions::ProjectionAssumptions;
use crate::profitability::overhead::{admin_overhead, OverheadBreakdown};
use crate::profitability::profile::{FirmProfile, Role};
use crate::profitability::recommendations::{classify_with, Recommendation};
use crate::types::{
    saturating_div, saturating_product, saturating_sum, with_metadata, ComputationOutput, Hours,
    Money, Percent,
};
use crate::FirmRoiResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Financial projection for one firm profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectionResult {
    /// Annual billable revenue lost to admin work
    pub current_opportunity_cost: Money,
    /// Annual administrative overhead today
    pub current_admin_cost: Money,
    pub va_team_cost: Money,
    /// current_admin_cost - va_team_cost; negative when overhead is small
    pub labor_savings: Money,
    /// Annual value of admin hours turned back into billable work
    pub revenue_recovery: Money,
    pub total_annual_savings: Money,
    /// Percentage; zero unless savings are positive
    pub roi: Percent,
    /// Zero unless savings are positive
    pub break_even_months: Decimal,
    pub monthly_improvement: Money,
    /// Billable hours gained per month
    pub monthly_billable_increase: Hours,
    /// Billable hours gained per year
    pub billable_hours_recovered: Hours,
}

/// Request envelope for [`run_projection`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectionInput {
    #[serde(default)]
    pub profile: FirmProfile,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assumptions: Option<ProjectionAssumptions>,
}

/// Opportunity cost and recovery attributed to one role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleBreakdown {
    pub role: Role,
    pub head_count: u32,
    pub rate: Money,
    /// Weekly admin hours
    pub admin_hours: Hours,
    pub opportunity_cost: Money,
    /// Annual billable hours recovered for this role
    pub hours_recovered: Hours,
}

/// Full output of [`run_projection`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectionOutput {
    pub projection: ProjectionResult,
    pub recommendations: Vec<Recommendation>,
    pub overhead: OverheadBreakdown,
    pub roles: Vec<RoleBreakdown>,
    /// Admin-hours-weighted billing rate; zero when no admin hours are entered
    pub blended_rate: Money,
    pub weekly_hours_recovered: Hours,
}

// ---------------------------------------------------------------------------
// Core computation
// ---------------------------------------------------------------------------

/// Project savings for a profile under the default assumptions.
pub fn compute(profile: &FirmProfile) -> ProjectionResult {
    compute_with(profile, &ProjectionAssumptions::default())
}

/// Project savings for a profile.
///
/// Total over every input, negative and all-zero profiles included. Each
/// division is guarded and resolves to zero when its denominator is zero;
/// figures beyond the `Decimal` range saturate at `Decimal::MAX` / `MIN`.
pub fn compute_with(profile: &FirmProfile, assumptions: &ProjectionAssumptions) -> ProjectionResult {
    let weeks = assumptions.weeks_per_year;
    let months = assumptions.months_per_year;

    let current_opportunity_cost: Money = saturating_sum(
        profile
            .role_inputs()
            .iter()
            .map(|r| saturating_product([r.admin_hours, r.rate, weeks])),
    );

    let current_admin_cost = admin_overhead(profile, assumptions).total;
    let va_team_cost = assumptions.va_team.annual_cost();
    let labor_savings = current_admin_cost.saturating_sub(va_team_cost);

    let weekly_recovered = profile
        .total_admin_hours()
        .saturating_mul(assumptions.recovery_rate);
    let revenue_recovery = match blended_rate(profile) {
        Some(rate) => saturating_product([weekly_recovered, weeks, rate]),
        None => Decimal::ZERO,
    };

    let total_annual_savings = labor_savings.saturating_add(revenue_recovery);

    let (roi, break_even_months) = if total_annual_savings > Decimal::ZERO {
        let monthly = saturating_div(total_annual_savings, months);
        (
            saturating_div(total_annual_savings, va_team_cost).saturating_mul(dec!(100)),
            saturating_div(va_team_cost, monthly),
        )
    } else {
        (Decimal::ZERO, Decimal::ZERO)
    };

    let billable_hours_recovered = weekly_recovered.saturating_mul(weeks);

    ProjectionResult {
        current_opportunity_cost,
        current_admin_cost,
        va_team_cost,
        labor_savings,
        revenue_recovery,
        total_annual_savings,
        roi,
        break_even_months,
        monthly_improvement: saturating_div(total_annual_savings, months),
        monthly_billable_increase: saturating_div(billable_hours_recovered, months),
        billable_hours_recovered,
    }
}

/// Admin-hours-weighted average billing rate, or `None` when total admin
/// hours are zero.
pub fn blended_rate(profile: &FirmProfile) -> Option<Money> {
    let hours = profile.total_admin_hours();
    if hours.is_zero() {
        return None;
    }
    let weighted: Money = saturating_sum(
        profile
            .role_inputs()
            .iter()
            .map(|r| r.admin_hours.saturating_mul(r.rate)),
    );
    Some(saturating_div(weighted, hours))
}

// ---------------------------------------------------------------------------
// Public API: detailed projection
// ---------------------------------------------------------------------------

/// Run a projection with validated assumptions, returning the result,
/// recommendation tags and the breakdowns behind them.
pub fn run_projection(
    input: &ProjectionInput,
) -> FirmRoiResult<ComputationOutput<ProjectionOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let default_assumptions = ProjectionAssumptions::default();
    let assumptions = input.assumptions.as_ref().unwrap_or(&default_assumptions);
    assumptions.validate()?;

    let profile = &input.profile;

    // -- Profile checks (warn, never reject) ---------------------------------
    for field in profile.negative_fields() {
        warnings.push(format!(
            "Field '{field}' is negative; results may not be meaningful."
        ));
    }

    let blended = blended_rate(profile);
    if blended.is_none() {
        warn!("total admin hours are zero; revenue recovery set to 0");
        warnings.push("Total admin hours are zero; revenue recovery set to 0.".into());
    }

    // -- Projection ----------------------------------------------------------
    let projection = compute_with(profile, assumptions);

    if projection.total_annual_savings <= Decimal::ZERO {
        warn!(
            total_annual_savings = %projection.total_annual_savings,
            "projected savings are not positive; ROI and break-even clamped to 0"
        );
        warnings.push(format!(
            "Total annual savings ({}) are not positive; ROI and break-even reported as 0.",
            projection.total_annual_savings.round_dp(2)
        ));
    }

    let recommendations = classify_with(&projection, &assumptions.thresholds);
    let overhead = admin_overhead(profile, assumptions);

    // -- Role breakdown ------------------------------------------------------
    let weeks = assumptions.weeks_per_year;
    let roles: Vec<RoleBreakdown> = profile
        .role_inputs()
        .iter()
        .map(|r| RoleBreakdown {
            role: r.role,
            head_count: r.head_count,
            rate: r.rate,
            admin_hours: r.admin_hours,
            opportunity_cost: saturating_product([r.admin_hours, r.rate, weeks]),
            hours_recovered: saturating_product([r.admin_hours, assumptions.recovery_rate, weeks]),
        })
        .collect();

    debug!(
        opportunity_cost = %projection.current_opportunity_cost,
        admin_cost = %projection.current_admin_cost,
        total_annual_savings = %projection.total_annual_savings,
        roi = %projection.roi,
        break_even_months = %projection.break_even_months,
        tags = recommendations.len(),
        "projection computed"
    );

    let output = ProjectionOutput {
        weekly_hours_recovered: profile
            .total_admin_hours()
            .saturating_mul(assumptions.recovery_rate),
        blended_rate: blended.unwrap_or(Decimal::ZERO),
        projection,
        recommendations,
        overhead,
        roles,
    };

    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        "VA Outsourcing Savings Projection (opportunity cost + loaded admin overhead)",
        assumptions,
        warnings,
        elapsed,
        output,
    ))
}
