use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::FirmRoiError;
use crate::types::{saturating_sum, Hours, Money};

// ---------------------------------------------------------------------------
// Firm profile
// ---------------------------------------------------------------------------

/// Snapshot of a firm's staffing, billing and administrative load.
///
/// Every field defaults to zero. Snapshots are never edited in place: use
/// [`FirmProfile::with_field`] to derive the next one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct FirmProfile {
    pub partners: u32,
    pub associates: u32,
    pub paralegals: u32,
    /// Hourly billing rate per partner
    #[serde(alias = "partnerRate")]
    pub partner_rate: Money,
    #[serde(alias = "associateRate")]
    pub associate_rate: Money,
    #[serde(alias = "paralegalRate")]
    pub paralegal_rate: Money,
    /// Annual base salaries of the administrative staff
    #[serde(alias = "adminSalaries")]
    pub admin_salaries: Money,
    /// Weekly hours a partner spends on non-billable admin work
    #[serde(alias = "partnerAdminHours")]
    pub partner_admin_hours: Hours,
    #[serde(alias = "associateAdminHours")]
    pub associate_admin_hours: Hours,
    #[serde(alias = "paralegalAdminHours")]
    pub paralegal_admin_hours: Hours,
}

/// Fee-earning roles tracked by the profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Partner,
    Associate,
    Paralegal,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Partner, Role::Associate, Role::Paralegal];

    pub fn label(&self) -> &'static str {
        match self {
            Role::Partner => "Partner",
            Role::Associate => "Associate",
            Role::Paralegal => "Paralegal",
        }
    }
}

/// The slice of a profile that belongs to one role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleInputs {
    pub role: Role,
    pub head_count: u32,
    pub rate: Money,
    pub admin_hours: Hours,
}

impl FirmProfile {
    /// Per-role view, always in partner / associate / paralegal order.
    pub fn role_inputs(&self) -> [RoleInputs; 3] {
        [
            RoleInputs {
                role: Role::Partner,
                head_count: self.partners,
                rate: self.partner_rate,
                admin_hours: self.partner_admin_hours,
            },
            RoleInputs {
                role: Role::Associate,
                head_count: self.associates,
                rate: self.associate_rate,
                admin_hours: self.associate_admin_hours,
            },
            RoleInputs {
                role: Role::Paralegal,
                head_count: self.paralegals,
                rate: self.paralegal_rate,
                admin_hours: self.paralegal_admin_hours,
            },
        ]
    }

    /// Weekly admin hours summed across roles.
    pub fn total_admin_hours(&self) -> Hours {
        saturating_sum([
            self.partner_admin_hours,
            self.associate_admin_hours,
            self.paralegal_admin_hours,
        ])
    }

    /// Total fee-earner head count. Widened so three `u32::MAX` counts still fit.
    pub fn head_count(&self) -> u64 {
        u64::from(self.partners) + u64::from(self.associates) + u64::from(self.paralegals)
    }

    /// Read a single field as a decimal.
    pub fn get(&self, field: ProfileField) -> Decimal {
        match field {
            ProfileField::Partners => Decimal::from(self.partners),
            ProfileField::Associates => Decimal::from(self.associates),
            ProfileField::Paralegals => Decimal::from(self.paralegals),
            ProfileField::PartnerRate => self.partner_rate,
            ProfileField::AssociateRate => self.associate_rate,
            ProfileField::ParalegalRate => self.paralegal_rate,
            ProfileField::AdminSalaries => self.admin_salaries,
            ProfileField::PartnerAdminHours => self.partner_admin_hours,
            ProfileField::AssociateAdminHours => self.associate_admin_hours,
            ProfileField::ParalegalAdminHours => self.paralegal_admin_hours,
        }
    }

    /// Return a new snapshot with exactly one field replaced.
    ///
    /// Monetary and hour fields take the value as given, negatives included.
    /// Head counts are floored and clamped into `0..=u32::MAX`.
    pub fn with_field(&self, field: ProfileField, value: Decimal) -> FirmProfile {
        let mut next = self.clone();
        match field {
            ProfileField::Partners => next.partners = head_count_from(value),
            ProfileField::Associates => next.associates = head_count_from(value),
            ProfileField::Paralegals => next.paralegals = head_count_from(value),
            ProfileField::PartnerRate => next.partner_rate = value,
            ProfileField::AssociateRate => next.associate_rate = value,
            ProfileField::ParalegalRate => next.paralegal_rate = value,
            ProfileField::AdminSalaries => next.admin_salaries = value,
            ProfileField::PartnerAdminHours => next.partner_admin_hours = value,
            ProfileField::AssociateAdminHours => next.associate_admin_hours = value,
            ProfileField::ParalegalAdminHours => next.paralegal_admin_hours = value,
        }
        next
    }

    /// Replace one field from raw form text: lenient parse, then clamp at zero.
    pub fn with_raw_field(&self, field: ProfileField, raw: &str) -> FirmProfile {
        self.with_field(field, sanitize_amount(parse_amount(raw)))
    }

    /// Names of fields holding a negative value.
    pub fn negative_fields(&self) -> Vec<ProfileField> {
        ProfileField::ALL
            .iter()
            .copied()
            .filter(|f| self.get(*f) < Decimal::ZERO)
            .collect()
    }
}

fn head_count_from(value: Decimal) -> u32 {
    if value <= Decimal::ZERO {
        return 0;
    }
    value.floor().to_u32().unwrap_or(u32::MAX)
}

// ---------------------------------------------------------------------------
// Field names
// ---------------------------------------------------------------------------

/// One editable input of a [`FirmProfile`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileField {
    Partners,
    Associates,
    Paralegals,
    PartnerRate,
    AssociateRate,
    ParalegalRate,
    AdminSalaries,
    PartnerAdminHours,
    AssociateAdminHours,
    ParalegalAdminHours,
}

impl ProfileField {
    pub const ALL: [ProfileField; 10] = [
        ProfileField::Partners,
        ProfileField::Associates,
        ProfileField::Paralegals,
        ProfileField::PartnerRate,
        ProfileField::AssociateRate,
        ProfileField::ParalegalRate,
        ProfileField::AdminSalaries,
        ProfileField::PartnerAdminHours,
        ProfileField::AssociateAdminHours,
        ProfileField::ParalegalAdminHours,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProfileField::Partners => "partners",
            ProfileField::Associates => "associates",
            ProfileField::Paralegals => "paralegals",
            ProfileField::PartnerRate => "partner_rate",
            ProfileField::AssociateRate => "associate_rate",
            ProfileField::ParalegalRate => "paralegal_rate",
            ProfileField::AdminSalaries => "admin_salaries",
            ProfileField::PartnerAdminHours => "partner_admin_hours",
            ProfileField::AssociateAdminHours => "associate_admin_hours",
            ProfileField::ParalegalAdminHours => "paralegal_admin_hours",
        }
    }

    /// Whether the field holds weekly admin hours.
    pub fn is_admin_hours(&self) -> bool {
        matches!(
            self,
            ProfileField::PartnerAdminHours
                | ProfileField::AssociateAdminHours
                | ProfileField::ParalegalAdminHours
        )
    }
}

impl fmt::Display for ProfileField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProfileField {
    type Err = FirmRoiError;

    /// Accepts snake_case, kebab-case and the camelCase form names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalised: String = s
            .trim()
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .collect::<String>()
            .to_ascii_lowercase();
        ProfileField::ALL
            .iter()
            .copied()
            .find(|f| f.as_str().replace('_', "") == normalised)
            .ok_or_else(|| FirmRoiError::UnknownField(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Lenient numeric input
// ---------------------------------------------------------------------------

/// Parse form text the way a browser number field is read: the longest
/// leading numeric prefix wins, anything unparsable is zero. Numbers too
/// large for `Decimal` saturate at `Decimal::MAX` / `MIN`; ones too small to
/// represent read as zero.
///
/// `"120000"` -> 120000, `" 8.5 hrs"` -> 8.5, `"120,000"` -> 120, `"abc"` -> 0.
pub fn parse_amount(raw: &str) -> Decimal {
    let prefix = numeric_prefix(raw.trim_start());
    if prefix.is_empty() {
        return Decimal::ZERO;
    }

    let (negative, body) = match prefix.as_bytes()[0] {
        b'-' => (true, &prefix[1..]),
        b'+' => (false, &prefix[1..]),
        _ => (false, prefix),
    };
    let mut body = body.trim_end_matches('.').to_ascii_lowercase();
    if body.starts_with('.') {
        body.insert(0, '0');
    }
    body = body.replacen(".e", "e", 1);

    let parsed = if body.contains('e') {
        Decimal::from_scientific(&body)
    } else {
        Decimal::from_str(&body)
    };

    let value = match parsed {
        Ok(v) => v,
        // The prefix is well-formed, so a failure here is a magnitude error.
        Err(_) => out_of_range(&body),
    };
    if negative {
        -value
    } else {
        value
    }
}

fn out_of_range(body: &str) -> Decimal {
    match body.parse::<f64>() {
        Ok(v) if v.abs() >= 1.0 => Decimal::MAX,
        _ => Decimal::ZERO,
    }
}

/// Clamp a parsed amount so it is never negative.
pub fn sanitize_amount(value: Decimal) -> Decimal {
    value.max(Decimal::ZERO)
}

fn numeric_prefix(s: &str) -> &str {
    let bytes = s.as_bytes();
    let mut i = 0;

    if i < bytes.len() && (bytes[i] == b'+' || bytes[i] == b'-') {
        i += 1;
    }

    let int_start = i;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    let mut digits = i - int_start;

    if i < bytes.len() && bytes[i] == b'.' {
        let frac_start = i + 1;
        let mut j = frac_start;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        digits += j - frac_start;
        if digits > 0 {
            i = j;
        }
    }

    if digits == 0 {
        return "";
    }

    // Exponent only counts when at least one digit follows it.
    if i < bytes.len() && (bytes[i] == b'e' || bytes[i] == b'E') {
        let mut j = i + 1;
        if j < bytes.len() && (bytes[j] == b'+' || bytes[j] == b'-') {
            j += 1;
        }
        let exp_start = j;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        if j > exp_start {
            i = j;
        }
    }

    &s[..i]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_default_profile_is_all_zero() {
        let p = FirmProfile::default();
        for field in ProfileField::ALL {
            assert_eq!(p.get(field), Decimal::ZERO, "{field} should default to 0");
        }
        assert_eq!(p.head_count(), 0);
        assert_eq!(p.total_admin_hours(), Decimal::ZERO);
    }

    #[test]
    fn test_with_field_replaces_only_one_field() {
        let base = FirmProfile::default().with_field(ProfileField::PartnerRate, dec!(400));
        let next = base.with_field(ProfileField::PartnerAdminHours, dec!(8));

        assert_eq!(base.partner_admin_hours, Decimal::ZERO);
        assert_eq!(next.partner_rate, dec!(400));
        assert_eq!(next.partner_admin_hours, dec!(8));
    }

    #[test]
    fn test_head_count_is_floored_and_clamped() {
        let p = FirmProfile::default()
            .with_field(ProfileField::Partners, dec!(2.9))
            .with_field(ProfileField::Associates, dec!(-3))
            .with_field(ProfileField::Paralegals, dec!(1_000_000_000_000));
        assert_eq!(p.partners, 2);
        assert_eq!(p.associates, 0);
        assert_eq!(p.paralegals, u32::MAX);
    }

    #[test]
    fn test_head_count_does_not_overflow() {
        let p = FirmProfile {
            partners: u32::MAX,
            associates: u32::MAX,
            paralegals: u32::MAX,
            ..Default::default()
        };
        assert_eq!(p.head_count(), 3 * u64::from(u32::MAX));
    }

    #[test]
    fn test_parse_amount_plain_numbers() {
        assert_eq!(parse_amount("120000"), dec!(120000));
        assert_eq!(parse_amount("  8.5"), dec!(8.5));
        assert_eq!(parse_amount(".5"), dec!(0.5));
        assert_eq!(parse_amount("5."), dec!(5));
        assert_eq!(parse_amount("+7"), dec!(7));
        assert_eq!(parse_amount("-12.25"), dec!(-12.25));
    }

    #[test]
    fn test_parse_amount_takes_leading_prefix() {
        assert_eq!(parse_amount("8 hours"), dec!(8));
        assert_eq!(parse_amount("120,000"), dec!(120));
        assert_eq!(parse_amount("1.5e3"), dec!(1500));
        assert_eq!(parse_amount("2e"), dec!(2));
        assert_eq!(parse_amount("3.2.1"), dec!(3.2));
    }

    #[test]
    fn test_parse_amount_unparsable_is_zero() {
        assert_eq!(parse_amount(""), Decimal::ZERO);
        assert_eq!(parse_amount("   "), Decimal::ZERO);
        assert_eq!(parse_amount("abc"), Decimal::ZERO);
        assert_eq!(parse_amount("-"), Decimal::ZERO);
        assert_eq!(parse_amount("."), Decimal::ZERO);
        assert_eq!(parse_amount("$400"), Decimal::ZERO);
    }

    #[test]
    fn test_parse_amount_out_of_range_saturates() {
        assert_eq!(parse_amount("1e30"), Decimal::MAX);
        assert_eq!(
            parse_amount("100000000000000000000000000000000"),
            Decimal::MAX
        );
        assert_eq!(parse_amount("-1e30 dollars"), Decimal::MIN);
        assert_eq!(parse_amount("7e28"), dec!(70000000000000000000000000000));
        assert_eq!(parse_amount("1e-40"), Decimal::ZERO);
    }

    #[test]
    fn test_raw_field_beyond_range_is_not_zeroed() {
        let p = FirmProfile::default().with_raw_field(ProfileField::AdminSalaries, "1e30");
        assert_eq!(p.admin_salaries, Decimal::MAX);
        let p = p.with_raw_field(ProfileField::Partners, "1e30");
        assert_eq!(p.partners, u32::MAX);
    }

    #[test]
    fn test_with_raw_field_clamps_negative() {
        let p = FirmProfile::default().with_raw_field(ProfileField::AdminSalaries, "-5000");
        assert_eq!(p.admin_salaries, Decimal::ZERO);
        let p = p.with_raw_field(ProfileField::AdminSalaries, "120000");
        assert_eq!(p.admin_salaries, dec!(120000));
    }

    #[test]
    fn test_field_names_parse_in_every_spelling() {
        for field in ProfileField::ALL {
            assert_eq!(field.as_str().parse::<ProfileField>().unwrap(), field);
        }
        assert_eq!(
            "partnerAdminHours".parse::<ProfileField>().unwrap(),
            ProfileField::PartnerAdminHours
        );
        assert_eq!(
            "admin-salaries".parse::<ProfileField>().unwrap(),
            ProfileField::AdminSalaries
        );
        assert!(matches!(
            "adminBenefits".parse::<ProfileField>(),
            Err(FirmRoiError::UnknownField(_))
        ));
    }

    #[test]
    fn test_deserialize_accepts_camel_case_and_missing_fields() {
        let json = r#"{"partners": 2, "partnerRate": "400", "partner_admin_hours": "8"}"#;
        let p: FirmProfile = serde_json::from_str(json).unwrap();
        assert_eq!(p.partners, 2);
        assert_eq!(p.partner_rate, dec!(400));
        assert_eq!(p.partner_admin_hours, dec!(8));
        assert_eq!(p.admin_salaries, Decimal::ZERO);
    }

    #[test]
    fn test_negative_fields_reported() {
        let p = FirmProfile::default()
            .with_field(ProfileField::PartnerRate, dec!(-1))
            .with_field(ProfileField::ParalegalAdminHours, dec!(-2));
        assert_eq!(
            p.negative_fields(),
            vec![ProfileField::PartnerRate, ProfileField::ParalegalAdminHours]
        );
    }
}
