use firm_roi_core::profitability::calculator;
use firm_roi_core::profitability::profile::{FirmProfile, ProfileField};
use firm_roi_core::scenarios::sensitivity::{self, OutputMetric, SensitivityInput};
use firm_roi_core::scenarios::what_if::{self, WhatIfInput};
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn mid_size_firm() -> FirmProfile {
    FirmProfile {
        partners: 2,
        associates: 3,
        paralegals: 2,
        partner_rate: dec!(400),
        associate_rate: dec!(300),
        paralegal_rate: dec!(75),
        admin_salaries: dec!(120000),
        partner_admin_hours: dec!(8),
        associate_admin_hours: dec!(10),
        paralegal_admin_hours: dec!(5),
    }
}

#[test]
fn test_what_if_from_json_matches_direct_compute() {
    let json = serde_json::json!({
        "base": mid_size_firm(),
        "scenarios": [
            { "name": "no admin at all", "overrides": [
                { "field": "partner_admin_hours", "value": "0" },
                { "field": "associate_admin_hours", "value": "0" },
                { "field": "paralegal_admin_hours", "value": "0" }
            ]},
            { "name": "hire two associates", "overrides": [
                { "field": "associates", "value": "5" }
            ]}
        ]
    });
    let input: WhatIfInput = serde_json::from_value(json).unwrap();
    let out = what_if::run_what_if(&input).unwrap().result;

    assert_eq!(out.base, calculator::compute(&mid_size_firm()));

    let no_admin = &out.results[0];
    assert_eq!(no_admin.projection.revenue_recovery, Decimal::ZERO);
    assert_eq!(no_admin.projection.total_annual_savings, dec!(124000));

    let hire = &out.results[1];
    // two more heads add 4000 of office space
    assert_eq!(
        hire.projection.current_admin_cost,
        out.base.current_admin_cost + dec!(4000)
    );
    assert_eq!(out.best_scenario, "hire two associates");
}

#[test]
fn test_sensitivity_grid_cells_match_direct_compute() {
    let json = serde_json::json!({
        "base": mid_size_firm(),
        "variable_1": { "field": "admin_salaries", "min": "60000", "max": "180000", "step": "60000" },
        "variable_2": { "field": "paralegal_admin_hours", "min": "0", "max": "10", "step": "5" },
        "output_metric": "roi"
    });
    let input: SensitivityInput = serde_json::from_value(json).unwrap();
    let out = sensitivity::run_sensitivity(&input).unwrap().result;

    assert_eq!(out.output_metric, OutputMetric::Roi);
    assert_eq!(out.variable_1_values, vec![dec!(60000), dec!(120000), dec!(180000)]);
    assert_eq!(out.variable_2_values, vec![dec!(0), dec!(5), dec!(10)]);

    for (i, salaries) in out.variable_1_values.iter().enumerate() {
        for (j, hours) in out.variable_2_values.iter().enumerate() {
            let profile = mid_size_firm()
                .with_field(ProfileField::AdminSalaries, *salaries)
                .with_field(ProfileField::ParalegalAdminHours, *hours);
            assert_eq!(out.matrix[i][j], calculator::compute(&profile).roi);
        }
    }
    assert_eq!(out.base_case_position, (1, 1));
}
