use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::error::SimulatorError;
use crate::models::Currency;

/// Working days in one sprint week
pub const WORK_DAYS_PER_WEEK: u32 = 5;

/// Weeks counted as one month for running costs
pub const WEEKS_PER_MONTH: f64 = 4.0;

/// Staffed role on the project
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoleKind {
    Developer,
    Tester,
    ProjectManager,
}

impl RoleKind {
    pub const ALL: [RoleKind; 3] = [RoleKind::Developer, RoleKind::Tester, RoleKind::ProjectManager];

    pub fn label(self) -> &'static str {
        match self {
            Self::Developer => "Developer",
            Self::Tester => "Tester",
            Self::ProjectManager => "Project Manager",
        }
    }
}

impl fmt::Display for RoleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Head counts and daily rates for one role
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RoleStaffing {
    pub onsite_count: u32,
    pub offshore_count: u32,
    pub onsite_daily_rate: f64,
    pub offshore_daily_rate: f64,
}

impl RoleStaffing {
    /// Cost of one working day for everyone in this role
    pub fn daily_cost(&self) -> f64 {
        self.onsite_count as f64 * self.onsite_daily_rate
            + self.offshore_count as f64 * self.offshore_daily_rate
    }
}

/// Licensing inputs
///
/// When `percent_of_one_off_costs > 0` licensing is charged as that share
/// of the one-off total and the per-user fields are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Licensing {
    pub per_user_monthly_cost: f64,
    pub user_count: u32,
    pub percent_of_one_off_costs: f64,
}

impl Licensing {
    pub fn is_percentage_mode(&self) -> bool {
        self.percent_of_one_off_costs > 0.0
    }
}

/// Commitment length a discount tier is tied to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum CommitmentTerm {
    OneYear,
    TwoYears,
    ThreeYears,
    FiveYears,
}

impl CommitmentTerm {
    pub const ALL: [CommitmentTerm; 4] = [
        CommitmentTerm::OneYear,
        CommitmentTerm::TwoYears,
        CommitmentTerm::ThreeYears,
        CommitmentTerm::FiveYears,
    ];

    pub fn years(self) -> u32 {
        match self {
            Self::OneYear => 1,
            Self::TwoYears => 2,
            Self::ThreeYears => 3,
            Self::FiveYears => 5,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::OneYear => "1 Year",
            Self::TwoYears => "2 Years",
            Self::ThreeYears => "3 Years",
            Self::FiveYears => "5 Years",
        }
    }
}

impl TryFrom<u32> for CommitmentTerm {
    type Error = SimulatorError;

    fn try_from(years: u32) -> Result<Self, Self::Error> {
        match years {
            1 => Ok(Self::OneYear),
            2 => Ok(Self::TwoYears),
            3 => Ok(Self::ThreeYears),
            5 => Ok(Self::FiveYears),
            other => Err(SimulatorError::InvalidCommitment(other)),
        }
    }
}

impl From<CommitmentTerm> for u32 {
    fn from(term: CommitmentTerm) -> Self {
        term.years()
    }
}

impl fmt::Display for CommitmentTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Effective commitment for one calculation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Commitment {
    pub term: CommitmentTerm,
    pub discount_percent: f64,
}

/// Complete, immutable input to one cost calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectParameters {
    pub sprint_count: u32,
    pub sprint_duration_weeks: u32,
    /// Roles missing from the map are treated as unstaffed
    pub roles: BTreeMap<RoleKind, RoleStaffing>,
    pub licensing: Licensing,
    pub managed_service_monthly_cost: f64,
    pub markup_percent: f64,
    pub additional_discount_percent: f64,
    pub commitment: Commitment,
    pub currency: Currency,
}

impl ProjectParameters {
    pub fn total_weeks(&self) -> u32 {
        self.sprint_count * self.sprint_duration_weeks
    }

    pub fn total_work_days(&self) -> u32 {
        self.total_weeks() * WORK_DAYS_PER_WEEK
    }

    /// Project length in months; fractional values are kept as-is
    pub fn total_months(&self) -> f64 {
        self.total_weeks() as f64 / WEEKS_PER_MONTH
    }

    pub fn role(&self, kind: RoleKind) -> RoleStaffing {
        self.roles.get(&kind).copied().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(sprints: u32, weeks: u32) -> ProjectParameters {
        ProjectParameters {
            sprint_count: sprints,
            sprint_duration_weeks: weeks,
            roles: BTreeMap::new(),
            licensing: Licensing::default(),
            managed_service_monthly_cost: 0.0,
            markup_percent: 0.0,
            additional_discount_percent: 0.0,
            commitment: Commitment {
                term: CommitmentTerm::OneYear,
                discount_percent: 0.0,
            },
            currency: Currency::Usd,
        }
    }

    #[test]
    fn test_derived_duration() {
        let p = params(24, 2);
        assert_eq!(p.total_work_days(), 240);
        assert_eq!(p.total_months(), 12.0);
    }

    #[test]
    fn test_fractional_months_not_rounded() {
        let p = params(3, 1);
        assert_eq!(p.total_work_days(), 15);
        assert_eq!(p.total_months(), 0.75);
    }

    #[test]
    fn test_missing_role_is_unstaffed() {
        let p = params(1, 1);
        assert_eq!(p.role(RoleKind::Tester).daily_cost(), 0.0);
    }

    #[test]
    fn test_commitment_term_conversion() {
        assert_eq!(CommitmentTerm::try_from(5).unwrap(), CommitmentTerm::FiveYears);
        assert!(CommitmentTerm::try_from(4).is_err());
        assert_eq!(u32::from(CommitmentTerm::ThreeYears), 3);
    }

    #[test]
    fn test_daily_cost() {
        let staffing = RoleStaffing {
            onsite_count: 1,
            offshore_count: 2,
            onsite_daily_rate: 700.0,
            offshore_daily_rate: 500.0,
        };
        assert_eq!(staffing.daily_cost(), 1700.0);
    }
}
