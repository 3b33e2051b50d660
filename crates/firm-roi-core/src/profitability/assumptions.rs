use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::FirmRoiError;
use crate::profitability::recommendations::RecommendationThresholds;
use crate::types::{saturating_sum, Money, Rate};
use crate::FirmRoiResult;

// ---------------------------------------------------------------------------
// VA team
// ---------------------------------------------------------------------------

/// A single seat on the outsourced team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VaRole {
    pub title: String,
    /// Fully loaded annual cost of the seat
    pub annual_cost: Money,
}

/// The proposed virtual-assistant team. Its cost is fixed, not derived
/// from the firm profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VaTeam {
    pub roles: Vec<VaRole>,
}

impl Default for VaTeam {
    fn default() -> Self {
        VaTeam {
            roles: vec![
                VaRole {
                    title: "Senior Legal VA".into(),
                    annual_cost: dec!(25000),
                },
                VaRole {
                    title: "Admin VA".into(),
                    annual_cost: dec!(18000),
                },
                VaRole {
                    title: "Customer Service VA".into(),
                    annual_cost: dec!(15000),
                },
            ],
        }
    }
}

impl VaTeam {
    pub fn annual_cost(&self) -> Money {
        saturating_sum(self.roles.iter().map(|r| r.annual_cost))
    }
}

// ---------------------------------------------------------------------------
// Overhead policy
// ---------------------------------------------------------------------------

/// How current administrative overhead is arrived at.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum OverheadPolicy {
    /// Loaded-cost model built from `admin_salaries` and head count alone.
    #[default]
    Derived,
    /// Overhead components entered directly by the user and summed with
    /// `admin_salaries`.
    Itemized {
        #[serde(default)]
        admin_benefits: Money,
        #[serde(default)]
        office_space: Money,
        #[serde(default)]
        admin_software: Money,
    },
}

// ---------------------------------------------------------------------------
// Assumptions
// ---------------------------------------------------------------------------

/// Policy constants behind every projection. Any subset may be supplied in
/// JSON; the rest fall back to the defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionAssumptions {
    pub weeks_per_year: Decimal,
    pub months_per_year: Decimal,
    /// Share of freed admin time that turns into billable work
    pub recovery_rate: Rate,
    /// Benefits and payroll tax load on admin salaries
    pub benefits_load: Rate,
    /// Management, training and recruitment overhead on admin salaries
    pub hidden_cost_load: Rate,
    /// Annual office space cost per fee earner
    pub office_space_per_head: Money,
    pub va_team: VaTeam,
    pub overhead_policy: OverheadPolicy,
    pub thresholds: RecommendationThresholds,
}

impl Default for ProjectionAssumptions {
    fn default() -> Self {
        ProjectionAssumptions {
            weeks_per_year: dec!(52),
            months_per_year: dec!(12),
            recovery_rate: dec!(0.7),
            benefits_load: dec!(0.25),
            hidden_cost_load: dec!(0.15),
            office_space_per_head: dec!(2000),
            va_team: VaTeam::default(),
            overhead_policy: OverheadPolicy::Derived,
            thresholds: RecommendationThresholds::default(),
        }
    }
}

impl ProjectionAssumptions {
    /// Reject assumption sets that would make the projection meaningless.
    pub fn validate(&self) -> FirmRoiResult<()> {
        if self.va_team.roles.is_empty() {
            return Err(FirmRoiError::InsufficientData(
                "VA team must contain at least one role.".into(),
            ));
        }
        for role in &self.va_team.roles {
            if role.annual_cost < Decimal::ZERO {
                return Err(FirmRoiError::InvalidInput {
                    field: format!("va_team:{}", role.title),
                    reason: "Annual cost cannot be negative.".into(),
                });
            }
        }
        if self.va_team.annual_cost() <= Decimal::ZERO {
            return Err(FirmRoiError::InvalidInput {
                field: "va_team".into(),
                reason: "Total VA team cost must be positive.".into(),
            });
        }
        if self.weeks_per_year <= Decimal::ZERO {
            return Err(FirmRoiError::InvalidInput {
                field: "weeks_per_year".into(),
                reason: "Weeks per year must be positive.".into(),
            });
        }
        if self.months_per_year <= Decimal::ZERO {
            return Err(FirmRoiError::InvalidInput {
                field: "months_per_year".into(),
                reason: "Months per year must be positive.".into(),
            });
        }
        if self.recovery_rate < Decimal::ZERO || self.recovery_rate > Decimal::ONE {
            return Err(FirmRoiError::InvalidInput {
                field: "recovery_rate".into(),
                reason: "Recovery rate must be between 0 and 1.".into(),
            });
        }
        for (field, load) in [
            ("benefits_load", self.benefits_load),
            ("hidden_cost_load", self.hidden_cost_load),
            ("office_space_per_head", self.office_space_per_head),
        ] {
            if load < Decimal::ZERO {
                return Err(FirmRoiError::InvalidInput {
                    field: field.into(),
                    reason: "Cannot be negative.".into(),
                });
            }
        }
        if let OverheadPolicy::Itemized {
            admin_benefits,
            office_space,
            admin_software,
        } = &self.overhead_policy
        {
            for (field, amount) in [
                ("admin_benefits", admin_benefits),
                ("office_space", office_space),
                ("admin_software", admin_software),
            ] {
                if *amount < Decimal::ZERO {
                    return Err(FirmRoiError::InvalidInput {
                        field: field.into(),
                        reason: "Itemized overhead cannot be negative.".into(),
                    });
                }
            }
        }
        self.thresholds.validate()
    }
}
