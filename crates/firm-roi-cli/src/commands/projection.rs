use clap::{Args, ValueEnum};
use rust_decimal::Decimal;
use serde_json::Value;

use firm_roi_core::profitability::assumptions::{OverheadPolicy, ProjectionAssumptions};
use firm_roi_core::profitability::calculator::{self, ProjectionInput};
use firm_roi_core::profitability::profile::FirmProfile;

use crate::input;

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OverheadPolicyArg {
    /// Benefits, hidden costs and office space derived from salaries and head count
    #[default]
    Derived,
    /// Benefits, office space and software entered directly
    Itemized,
}

/// Arguments for a savings projection
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct ProjectArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Number of partners
    #[arg(long, default_value_t = 0)]
    pub partners: u32,

    /// Number of associates
    #[arg(long, default_value_t = 0)]
    pub associates: u32,

    /// Number of paralegals
    #[arg(long, default_value_t = 0)]
    pub paralegals: u32,

    /// Partner hourly billing rate
    #[arg(long)]
    pub partner_rate: Option<Decimal>,

    /// Associate hourly billing rate
    #[arg(long)]
    pub associate_rate: Option<Decimal>,

    /// Paralegal hourly billing rate
    #[arg(long)]
    pub paralegal_rate: Option<Decimal>,

    /// Annual administrative staff salaries
    #[arg(long)]
    pub admin_salaries: Option<Decimal>,

    /// Weekly admin hours per partner
    #[arg(long)]
    pub partner_admin_hours: Option<Decimal>,

    /// Weekly admin hours per associate
    #[arg(long)]
    pub associate_admin_hours: Option<Decimal>,

    /// Weekly admin hours per paralegal
    #[arg(long)]
    pub paralegal_admin_hours: Option<Decimal>,

    /// How current admin overhead is calculated
    #[arg(long, value_enum, default_value = "derived")]
    pub overhead_policy: OverheadPolicyArg,

    /// Annual benefits and payroll taxes (itemized policy)
    #[arg(long)]
    pub admin_benefits: Option<Decimal>,

    /// Annual office space for admin staff (itemized policy)
    #[arg(long)]
    pub office_space: Option<Decimal>,

    /// Annual admin software and tools (itemized policy)
    #[arg(long)]
    pub admin_software: Option<Decimal>,
}

pub fn run_project(args: ProjectArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let projection_input: ProjectionInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        // Unset flags count as zero, like an untouched form field.
        let profile = FirmProfile {
            partners: args.partners,
            associates: args.associates,
            paralegals: args.paralegals,
            partner_rate: args.partner_rate.unwrap_or_default(),
            associate_rate: args.associate_rate.unwrap_or_default(),
            paralegal_rate: args.paralegal_rate.unwrap_or_default(),
            admin_salaries: args.admin_salaries.unwrap_or_default(),
            partner_admin_hours: args.partner_admin_hours.unwrap_or_default(),
            associate_admin_hours: args.associate_admin_hours.unwrap_or_default(),
            paralegal_admin_hours: args.paralegal_admin_hours.unwrap_or_default(),
        };

        let assumptions = match args.overhead_policy {
            OverheadPolicyArg::Derived => {
                if args.admin_benefits.is_some()
                    || args.office_space.is_some()
                    || args.admin_software.is_some()
                {
                    return Err(
                        "--admin-benefits/--office-space/--admin-software need --overhead-policy itemized"
                            .into(),
                    );
                }
                None
            }
            OverheadPolicyArg::Itemized => Some(ProjectionAssumptions {
                overhead_policy: OverheadPolicy::Itemized {
                    admin_benefits: args.admin_benefits.unwrap_or(Decimal::ZERO),
                    office_space: args.office_space.unwrap_or(Decimal::ZERO),
                    admin_software: args.admin_software.unwrap_or(Decimal::ZERO),
                },
                ..Default::default()
            }),
        };

        ProjectionInput {
            profile,
            assumptions,
        }
    };

    let result = calculator::run_projection(&projection_input)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_assumptions() -> Result<Value, Box<dyn std::error::Error>> {
    Ok(serde_json::to_value(ProjectionAssumptions::default())?)
}
