use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::profitability::assumptions::{OverheadPolicy, ProjectionAssumptions};
use crate::profitability::profile::FirmProfile;
use crate::types::{saturating_sum, Money};

/// Components of current annual administrative overhead.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverheadBreakdown {
    pub salaries: Money,
    /// Benefits and payroll taxes
    pub benefits: Money,
    /// Management, training and recruitment overhead
    pub hidden_costs: Money,
    pub office_space: Money,
    pub software: Money,
    pub total: Money,
}

/// Current administrative overhead under the configured policy.
pub fn admin_overhead(
    profile: &FirmProfile,
    assumptions: &ProjectionAssumptions,
) -> OverheadBreakdown {
    let salaries = profile.admin_salaries;

    let (benefits, hidden_costs, office_space, software) = match &assumptions.overhead_policy {
        OverheadPolicy::Derived => (
            salaries.saturating_mul(assumptions.benefits_load),
            salaries.saturating_mul(assumptions.hidden_cost_load),
            Decimal::from(profile.head_count()).saturating_mul(assumptions.office_space_per_head),
            Decimal::ZERO,
        ),
        OverheadPolicy::Itemized {
            admin_benefits,
            office_space,
            admin_software,
        } => (*admin_benefits, Decimal::ZERO, *office_space, *admin_software),
    };

    OverheadBreakdown {
        salaries,
        benefits,
        hidden_costs,
        office_space,
        software,
        total: saturating_sum([salaries, benefits, hidden_costs, office_space, software]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn staffed_profile() -> FirmProfile {
        FirmProfile {
            partners: 2,
            associates: 3,
            paralegals: 2,
            admin_salaries: dec!(120000),
            ..Default::default()
        }
    }

    #[test]
    fn test_derived_overhead() {
        let o = admin_overhead(&staffed_profile(), &ProjectionAssumptions::default());
        assert_eq!(o.benefits, dec!(30000));
        assert_eq!(o.hidden_costs, dec!(18000));
        assert_eq!(o.office_space, dec!(14000));
        assert_eq!(o.software, Decimal::ZERO);
        assert_eq!(o.total, dec!(182000));
    }

    #[test]
    fn test_derived_office_space_ignores_salaries() {
        let p = FirmProfile {
            partners: 1,
            ..Default::default()
        };
        let o = admin_overhead(&p, &ProjectionAssumptions::default());
        assert_eq!(o.total, dec!(2000));
    }

    #[test]
    fn test_itemized_overhead_uses_entered_amounts() {
        let assumptions = ProjectionAssumptions {
            overhead_policy: OverheadPolicy::Itemized {
                admin_benefits: dec!(30000),
                office_space: dec!(15000),
                admin_software: dec!(5000),
            },
            ..Default::default()
        };
        let o = admin_overhead(&staffed_profile(), &assumptions);
        assert_eq!(o.hidden_costs, Decimal::ZERO);
        assert_eq!(o.office_space, dec!(15000));
        assert_eq!(o.total, dec!(170000));
    }

    #[test]
    fn test_zero_profile_has_zero_overhead() {
        let o = admin_overhead(&FirmProfile::default(), &ProjectionAssumptions::default());
        assert_eq!(o, OverheadBreakdown::default());
    }
}
