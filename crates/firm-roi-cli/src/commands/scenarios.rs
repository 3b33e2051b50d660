use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use firm_roi_core::profitability::assumptions::ProjectionAssumptions;
use firm_roi_core::profitability::profile::{FirmProfile, ProfileField};
use firm_roi_core::scenarios::sensitivity::{
    self, OutputMetric, SensitivityInput, SensitivityVariable,
};
use firm_roi_core::scenarios::what_if::{self, WhatIfInput};

use crate::input;

/// Arguments for what-if comparison
#[derive(Args)]
pub struct WhatIfArgs {
    /// Path to JSON file with the base profile and scenarios
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for sensitivity analysis
#[derive(Args)]
pub struct SensitivityArgs {
    /// First sensitivity variable in format field:min:max:step
    /// (e.g. "partner_admin_hours:0:20:2")
    #[arg(long)]
    pub var1: String,

    /// Second sensitivity variable (optional, creates a 2D table)
    #[arg(long)]
    pub var2: Option<String>,

    /// Path to JSON file with the base profile, or a ProjectionInput
    /// ({"profile": ..., "assumptions": ...})
    #[arg(long)]
    pub base_inputs: String,

    /// Output metric: total_annual_savings, roi, break_even_months,
    /// revenue_recovery, labor_savings, current_opportunity_cost
    #[arg(long, default_value = "total_annual_savings")]
    pub metric: String,
}

pub fn run_what_if(args: WhatIfArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let what_if_input: WhatIfInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        return Err("--input <file.json> or stdin required for what-if comparison".into());
    };

    let result = what_if::run_what_if(&what_if_input)?;
    Ok(serde_json::to_value(result)?)
}

fn parse_sens_var(arg: &str) -> Result<SensitivityVariable, Box<dyn std::error::Error>> {
    let parts: Vec<&str> = arg.split(':').collect();
    if parts.len() != 4 {
        return Err(format!(
            "Sensitivity variable must be field:min:max:step, got '{}'",
            arg
        )
        .into());
    }
    Ok(SensitivityVariable {
        field: parts[0].parse::<ProfileField>()?,
        min: parts[1].parse::<Decimal>()?,
        max: parts[2].parse::<Decimal>()?,
        step: parts[3].parse::<Decimal>()?,
    })
}

fn parse_metric(name: &str) -> Result<OutputMetric, Box<dyn std::error::Error>> {
    serde_json::from_value(Value::String(name.to_lowercase().replace('-', "_"))).map_err(|_| {
        format!(
            "Unknown metric '{}'. Available: total_annual_savings, roi, break_even_months, \
             revenue_recovery, labor_savings, current_opportunity_cost",
            name
        )
        .into()
    })
}

pub fn run_sensitivity(args: SensitivityArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let variable_1 = parse_sens_var(&args.var1)?;
    let variable_2 = args.var2.as_deref().map(parse_sens_var).transpose()?;
    let output_metric = parse_metric(&args.metric)?;

    let base_json: Value = input::file::read_json_value(&args.base_inputs)?;

    // Accept either a bare profile or a full projection input.
    let (base, assumptions): (FirmProfile, Option<ProjectionAssumptions>) =
        match base_json.get("profile") {
            Some(profile) => (
                serde_json::from_value(profile.clone())?,
                base_json
                    .get("assumptions")
                    .map(|a| serde_json::from_value(a.clone()))
                    .transpose()?,
            ),
            None => (serde_json::from_value(base_json)?, None),
        };

    let sensitivity_input = SensitivityInput {
        base,
        assumptions,
        variable_1,
        variable_2,
        output_metric,
    };

    let result = sensitivity::run_sensitivity(&sensitivity_input)?;
    Ok(serde_json::to_value(result)?)
}
