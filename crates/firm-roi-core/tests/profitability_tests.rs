use firm_roi_core::profitability::assumptions::{OverheadPolicy, ProjectionAssumptions};
use firm_roi_core::profitability::calculator::{self, ProjectionInput};
use firm_roi_core::profitability::profile::{FirmProfile, ProfileField};
use firm_roi_core::profitability::recommendations::{classify, Recommendation};
use firm_roi_core::profitability::session::CalculatorSession;
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

// ===========================================================================
// Reference cases
// ===========================================================================

#[test]
fn test_mid_size_firm_reference_case() {
    let r = calculator::compute(&mid_size_firm());

    // (8*400 + 10*300 + 5*75) * 52 = 6575 * 52
    assert_eq!(r.current_opportunity_cost, dec!(341900));
    // 120000 + 30000 + 18000 + 7 * 2000
    assert_eq!(r.current_admin_cost, dec!(182000));
    assert_eq!(r.va_team_cost, dec!(58000));
    assert_eq!(r.labor_savings, dec!(124000));
    assert_eq!(r.billable_hours_recovered, dec!(837.2));

    assert!(
        (r.revenue_recovery - dec!(239330)).abs() < dec!(0.01),
        "revenue recovery should be ~239,330, got {}",
        r.revenue_recovery
    );
    assert!(
        (r.roi - dec!(626.4)).abs() < dec!(0.1),
        "ROI should be ~626.4%, got {}",
        r.roi
    );
    assert!(
        (r.break_even_months - dec!(1.92)).abs() < dec!(0.01),
        "break-even should be ~1.92 months, got {}",
        r.break_even_months
    );

    assert_eq!(
        classify(&r),
        vec![
            Recommendation::HighImpactOpportunity,
            Recommendation::FastPayback
        ]
    );
}

#[test]
fn test_all_zero_profile_reference_case() {
    let r = calculator::compute(&FirmProfile::default());

    assert_eq!(r.current_opportunity_cost, Decimal::ZERO);
    assert_eq!(r.current_admin_cost, Decimal::ZERO);
    assert_eq!(r.revenue_recovery, Decimal::ZERO);
    assert_eq!(r.labor_savings, dec!(-58000));
    assert_eq!(r.total_annual_savings, dec!(-58000));
    assert_eq!(r.roi, Decimal::ZERO);
    assert_eq!(r.break_even_months, Decimal::ZERO);
    assert!(classify(&r).is_empty());
}

#[test]
fn test_solo_practice_good_starting_point() {
    // 1 partner, 10 h/week of admin at 250/h, modest admin payroll.
    let p = FirmProfile {
        partners: 1,
        partner_rate: dec!(250),
        admin_salaries: dec!(45000),
        partner_admin_hours: dec!(10),
        ..Default::default()
    };
    let r = calculator::compute(&p);

    // Overhead 45000 * 1.4 + 2000 = 65000 -> labor savings 7000
    assert_eq!(r.labor_savings, dec!(7000));
    // 10 * 0.7 * 52 * 250 = 91000
    assert_eq!(r.revenue_recovery, dec!(91000));
    assert_eq!(r.total_annual_savings, dec!(98000));
    assert_eq!(classify(&r), vec![Recommendation::GoodStartingPoint]);
}

#[test]
fn test_strong_business_case_without_fast_payback() {
    // Fast payback needs at least 58000 * 12 / 3 = 232k of savings, so a
    // strong case (at most 200k) never qualifies.
    let p = FirmProfile {
        associates: 2,
        associate_rate: dec!(200),
        admin_salaries: dec!(60000),
        associate_admin_hours: dec!(12),
        ..Default::default()
    };
    let r = calculator::compute(&p);
    // overhead 84000 + 4000 = 88000, labor 30000; recovery 12*0.7*52*200 = 87360
    assert_eq!(r.total_annual_savings, dec!(117360));
    assert!(r.break_even_months > dec!(3));
    assert_eq!(classify(&r), vec![Recommendation::StrongBusinessCase]);
}

// ===========================================================================
// Properties
// ===========================================================================

#[test]
fn test_identical_inputs_give_identical_results() {
    let p = mid_size_firm();
    let first = calculator::compute(&p);
    for _ in 0..10 {
        assert_eq!(calculator::compute(&p), first);
    }
}

#[test]
fn test_admin_hours_monotonicity() {
    let hour_fields = [
        ProfileField::PartnerAdminHours,
        ProfileField::AssociateAdminHours,
        ProfileField::ParalegalAdminHours,
    ];
    let base = mid_size_firm();

    for field in hour_fields {
        let mut prev = calculator::compute(&base);
        let mut hours = base.get(field);
        for _ in 0..20 {
            hours += dec!(2.5);
            let next = calculator::compute(&base.with_field(field, hours));
            assert!(
                next.current_opportunity_cost >= prev.current_opportunity_cost,
                "{field}: opportunity cost decreased at {hours} h"
            );
            assert!(
                next.revenue_recovery >= prev.revenue_recovery - dec!(0.000001),
                "{field}: revenue recovery decreased at {hours} h"
            );
            prev = next;
        }
    }
}

#[test]
fn test_roi_and_break_even_clamped_when_savings_not_positive() {
    let cases = [
        FirmProfile::default(),
        FirmProfile {
            admin_salaries: dec!(10000),
            ..Default::default()
        },
        FirmProfile {
            partners: 29,
            ..Default::default()
        },
        FirmProfile {
            paralegals: 1,
            paralegal_rate: dec!(20),
            paralegal_admin_hours: dec!(1),
            ..Default::default()
        },
    ];
    for p in cases {
        let r = calculator::compute(&p);
        assert!(r.total_annual_savings <= Decimal::ZERO);
        assert_eq!(r.roi, Decimal::ZERO);
        assert_eq!(r.break_even_months, Decimal::ZERO);
    }
}

#[test]
fn test_negative_inputs_are_tolerated() {
    let p = FirmProfile {
        partner_rate: dec!(-400),
        admin_salaries: dec!(-1000),
        associate_admin_hours: dec!(-10),
        ..mid_size_firm()
    };
    let r = calculator::compute(&p);
    assert_eq!(r.va_team_cost, dec!(58000));
    if r.total_annual_savings <= Decimal::ZERO {
        assert_eq!(r.roi, Decimal::ZERO);
    }
}

// ===========================================================================
// Configurable policy and envelope
// ===========================================================================

#[test]
fn test_itemized_overhead_matches_earlier_form() {
    let input = ProjectionInput {
        profile: mid_size_firm(),
        assumptions: Some(ProjectionAssumptions {
            overhead_policy: OverheadPolicy::Itemized {
                admin_benefits: dec!(30000),
                office_space: dec!(15000),
                admin_software: dec!(8000),
            },
            ..Default::default()
        }),
    };
    let out = calculator::run_projection(&input).unwrap();
    assert_eq!(out.result.projection.current_admin_cost, dec!(173000));
    assert_eq!(out.result.overhead.software, dec!(8000));
    assert_eq!(out.result.overhead.hidden_costs, Decimal::ZERO);
}

#[test]
fn test_projection_input_from_json() {
    let json = r#"{
        "profile": {
            "partners": 2, "associates": 3, "paralegals": 2,
            "partnerRate": "400", "associateRate": "300", "paralegalRate": "75",
            "adminSalaries": "120000",
            "partnerAdminHours": "8", "associateAdminHours": "10", "paralegalAdminHours": "5"
        }
    }"#;
    let input: ProjectionInput = serde_json::from_str(json).unwrap();
    assert_eq!(input.profile, mid_size_firm());

    let out = calculator::run_projection(&input).unwrap();
    let value = serde_json::to_value(&out).unwrap();
    assert!(value["result"]["projection"]["total_annual_savings"].is_string());
    assert_eq!(
        value["result"]["recommendations"],
        serde_json::json!(["high_impact_opportunity", "fast_payback"])
    );
    assert_eq!(value["metadata"]["precision"], "rust_decimal_128bit");
}

#[test]
fn test_custom_va_team_cost() {
    let mut assumptions = ProjectionAssumptions::default();
    assumptions.va_team.roles.truncate(1);
    let r = calculator::compute_with(&mid_size_firm(), &assumptions);
    assert_eq!(r.va_team_cost, dec!(25000));
    assert_eq!(r.labor_savings, dec!(157000));
}

// ===========================================================================
// Session flow
// ===========================================================================

#[test]
fn test_session_round_trip_from_form_text() {
    let mut session = CalculatorSession::new();
    session.edit(ProfileField::Partners, "2");
    session.edit(ProfileField::Associates, "3");
    session.edit(ProfileField::Paralegals, "2");
    session.edit(ProfileField::PartnerRate, "400");
    session.edit(ProfileField::AssociateRate, "300");
    session.edit(ProfileField::ParalegalRate, "75");
    session.edit(ProfileField::AdminSalaries, "120000");
    session.edit(ProfileField::PartnerAdminHours, "8");
    session.edit(ProfileField::AssociateAdminHours, "10");
    session.edit(ProfileField::ParalegalAdminHours, "5 hrs");

    assert_eq!(session.profile(), &mid_size_firm());

    let result = session.calculate();
    assert_eq!(result, calculator::compute(&mid_size_firm()));
    assert!(session.booking_url().is_some());

    session.back_to_edit();
    assert!(session.result().is_none());
    assert_eq!(session.profile(), &mid_size_firm());
}
