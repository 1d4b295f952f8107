use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::ops::RangeInclusive;
use std::path::Path;
use tracing::{debug, info};

use crate::error::{Result, SimulatorError};
use crate::models::{
    CommitmentTerm, Currency, Licensing, ProjectParameters, RoleKind, RoleStaffing,
};
use crate::pricing::commitment::{
    default_discount, CommitmentSelector, DISCOUNT_STEP_PERCENT, MAX_DISCOUNT_PERCENT,
    MIN_DISCOUNT_PERCENT,
};

/// Environment variable prefix for scenario overrides, e.g. `COST_SIM__PROJECT__SPRINTS=30`
pub const ENV_PREFIX: &str = "COST_SIM";

pub const SPRINT_RANGE: RangeInclusive<u32> = 1..=50;
pub const SPRINT_WEEKS_RANGE: RangeInclusive<u32> = 1..=4;
pub const USERS_RANGE: RangeInclusive<u32> = 0..=1000;
pub const LICENSE_PERCENT_RANGE: RangeInclusive<f64> = 0.0..=100.0;
pub const MANAGED_SERVICE_RANGE: RangeInclusive<f64> = 0.0..=1000.0;
pub const TIER_DISCOUNT_RANGE: RangeInclusive<f64> = MIN_DISCOUNT_PERCENT..=MAX_DISCOUNT_PERCENT;

/// Allowed head count per role
pub fn head_count_range(role: RoleKind) -> RangeInclusive<u32> {
    match role {
        RoleKind::Developer | RoleKind::Tester => 0..=10,
        RoleKind::ProjectManager => 0..=5,
    }
}

/// Scenario as entered on the form, before it becomes `ProjectParameters`
///
/// Every section is optional in the file; missing values fall back to the
/// defaults below.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ScenarioConfig {
    pub project: ProjectConfig,
    pub staffing: StaffingConfig,
    pub rates: RatesConfig,
    pub licensing: LicensingConfig,
    pub managed_service: ManagedServiceConfig,
    pub adjustments: AdjustmentsConfig,
    pub commitment: CommitmentConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ProjectConfig {
    pub sprints: u32,
    pub sprint_duration_weeks: u32,
    pub currency: Currency,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            sprints: 24,
            sprint_duration_weeks: 2,
            currency: Currency::Usd,
        }
    }
}

/// Per-role `onsite`/`offshore` pair as read from a file or the environment
///
/// Either half may be missing; it is filled from that role's form default
/// rather than zero.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct PartialPair<T> {
    onsite: Option<T>,
    offshore: Option<T>,
}

impl<T> Default for PartialPair<T> {
    fn default() -> Self {
        Self { onsite: None, offshore: None }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct RoleSections<T> {
    developer: Option<PartialPair<T>>,
    tester: Option<PartialPair<T>>,
    project_manager: Option<PartialPair<T>>,
}

impl<T> Default for RoleSections<T> {
    fn default() -> Self {
        Self { developer: None, tester: None, project_manager: None }
    }
}

impl<T: Copy> RoleSections<T> {
    fn merge(self, defaults: [(T, T); 3]) -> [(T, T); 3] {
        let sections = [self.developer, self.tester, self.project_manager];
        let mut merged = defaults;
        for (slot, section) in merged.iter_mut().zip(sections) {
            if let Some(pair) = section {
                slot.0 = pair.onsite.unwrap_or(slot.0);
                slot.1 = pair.offshore.unwrap_or(slot.1);
            }
        }
        merged
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize, Serialize)]
pub struct HeadCount {
    pub onsite: u32,
    pub offshore: u32,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(from = "RoleSections<u32>")]
pub struct StaffingConfig {
    pub developer: HeadCount,
    pub tester: HeadCount,
    pub project_manager: HeadCount,
}

impl Default for StaffingConfig {
    fn default() -> Self {
        Self {
            developer: HeadCount { onsite: 0, offshore: 2 },
            tester: HeadCount { onsite: 0, offshore: 2 },
            project_manager: HeadCount { onsite: 1, offshore: 0 },
        }
    }
}

impl From<RoleSections<u32>> for StaffingConfig {
    fn from(sections: RoleSections<u32>) -> Self {
        let d = Self::default();
        let [dev, tester, pm] = sections.merge([
            (d.developer.onsite, d.developer.offshore),
            (d.tester.onsite, d.tester.offshore),
            (d.project_manager.onsite, d.project_manager.offshore),
        ]);
        let heads = |(onsite, offshore): (u32, u32)| HeadCount { onsite, offshore };
        Self {
            developer: heads(dev),
            tester: heads(tester),
            project_manager: heads(pm),
        }
    }
}

impl StaffingConfig {
    pub fn get(&self, role: RoleKind) -> &HeadCount {
        match role {
            RoleKind::Developer => &self.developer,
            RoleKind::Tester => &self.tester,
            RoleKind::ProjectManager => &self.project_manager,
        }
    }

    pub fn get_mut(&mut self, role: RoleKind) -> &mut HeadCount {
        match role {
            RoleKind::Developer => &mut self.developer,
            RoleKind::Tester => &mut self.tester,
            RoleKind::ProjectManager => &mut self.project_manager,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize, Serialize)]
pub struct DailyRates {
    pub onsite: f64,
    pub offshore: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(from = "RoleSections<f64>")]
pub struct RatesConfig {
    pub developer: DailyRates,
    pub tester: DailyRates,
    pub project_manager: DailyRates,
}

impl Default for RatesConfig {
    fn default() -> Self {
        Self {
            developer: DailyRates { onsite: 700.0, offshore: 500.0 },
            tester: DailyRates { onsite: 500.0, offshore: 300.0 },
            project_manager: DailyRates { onsite: 700.0, offshore: 500.0 },
        }
    }
}

impl From<RoleSections<f64>> for RatesConfig {
    fn from(sections: RoleSections<f64>) -> Self {
        let d = Self::default();
        let [dev, tester, pm] = sections.merge([
            (d.developer.onsite, d.developer.offshore),
            (d.tester.onsite, d.tester.offshore),
            (d.project_manager.onsite, d.project_manager.offshore),
        ]);
        let rates = |(onsite, offshore): (f64, f64)| DailyRates { onsite, offshore };
        Self {
            developer: rates(dev),
            tester: rates(tester),
            project_manager: rates(pm),
        }
    }
}

impl RatesConfig {
    pub fn get(&self, role: RoleKind) -> &DailyRates {
        match role {
            RoleKind::Developer => &self.developer,
            RoleKind::Tester => &self.tester,
            RoleKind::ProjectManager => &self.project_manager,
        }
    }

    pub fn get_mut(&mut self, role: RoleKind) -> &mut DailyRates {
        match role {
            RoleKind::Developer => &mut self.developer,
            RoleKind::Tester => &mut self.tester,
            RoleKind::ProjectManager => &mut self.project_manager,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct LicensingConfig {
    pub per_user_monthly: f64,
    pub users: u32,
    /// Non-zero switches licensing to a share of one-off costs
    pub percent_of_one_off: f64,
}

impl Default for LicensingConfig {
    fn default() -> Self {
        Self {
            per_user_monthly: 100.0,
            users: 5,
            percent_of_one_off: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ManagedServiceConfig {
    pub monthly: f64,
}

impl Default for ManagedServiceConfig {
    fn default() -> Self {
        Self { monthly: 300.0 }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct AdjustmentsConfig {
    pub markup_percent: f64,
    pub additional_discount_percent: f64,
}

impl Default for AdjustmentsConfig {
    fn default() -> Self {
        Self {
            markup_percent: 30.0,
            additional_discount_percent: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct CommitmentConfig {
    /// Selected tier: 1, 2, 3 or 5
    pub years: u32,
    pub discounts: TierDiscounts,
}

impl Default for CommitmentConfig {
    fn default() -> Self {
        Self {
            years: 5,
            discounts: TierDiscounts::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct TierDiscounts {
    pub one_year: f64,
    pub two_year: f64,
    pub three_year: f64,
    pub five_year: f64,
}

impl Default for TierDiscounts {
    fn default() -> Self {
        Self {
            one_year: default_discount(CommitmentTerm::OneYear),
            two_year: default_discount(CommitmentTerm::TwoYears),
            three_year: default_discount(CommitmentTerm::ThreeYears),
            five_year: default_discount(CommitmentTerm::FiveYears),
        }
    }
}

impl TierDiscounts {
    pub fn get(&self, term: CommitmentTerm) -> f64 {
        match term {
            CommitmentTerm::OneYear => self.one_year,
            CommitmentTerm::TwoYears => self.two_year,
            CommitmentTerm::ThreeYears => self.three_year,
            CommitmentTerm::FiveYears => self.five_year,
        }
    }

    pub fn set(&mut self, term: CommitmentTerm, percent: f64) {
        match term {
            CommitmentTerm::OneYear => self.one_year = percent,
            CommitmentTerm::TwoYears => self.two_year = percent,
            CommitmentTerm::ThreeYears => self.three_year = percent,
            CommitmentTerm::FiveYears => self.five_year = percent,
        }
    }
}

impl ScenarioConfig {
    /// Selected commitment tier
    pub fn commitment_term(&self) -> Result<CommitmentTerm> {
        CommitmentTerm::try_from(self.commitment.years)
    }

    /// Selector seeded with this scenario's tier discounts and selection
    pub fn commitment_selector(&self) -> Result<CommitmentSelector> {
        let mut selector = CommitmentSelector::new(self.commitment_term()?);
        for term in CommitmentTerm::ALL {
            selector.set_discount(term, self.commitment.discounts.get(term));
        }
        Ok(selector)
    }

    /// Write a selector's state back into the commitment section
    pub fn sync_commitment(&mut self, selector: &CommitmentSelector) {
        self.commitment.years = selector.selected().years();
        for (term, discount) in selector.tiers() {
            self.commitment.discounts.set(term, discount);
        }
    }

    /// Build the immutable calculation input for the current form values
    ///
    /// Percentage licensing zeroes the user count, as the form does when
    /// the percentage slider is moved off zero.
    pub fn to_parameters(&self) -> Result<ProjectParameters> {
        let roles: BTreeMap<RoleKind, RoleStaffing> = RoleKind::ALL
            .iter()
            .map(|&role| {
                let heads = self.staffing.get(role);
                let rates = self.rates.get(role);
                (
                    role,
                    RoleStaffing {
                        onsite_count: heads.onsite,
                        offshore_count: heads.offshore,
                        onsite_daily_rate: rates.onsite,
                        offshore_daily_rate: rates.offshore,
                    },
                )
            })
            .collect();

        let percent_mode = self.licensing.percent_of_one_off > 0.0;
        let licensing = Licensing {
            per_user_monthly_cost: self.licensing.per_user_monthly,
            user_count: if percent_mode { 0 } else { self.licensing.users },
            percent_of_one_off_costs: self.licensing.percent_of_one_off,
        };

        Ok(ProjectParameters {
            sprint_count: self.project.sprints,
            sprint_duration_weeks: self.project.sprint_duration_weeks,
            roles,
            licensing,
            managed_service_monthly_cost: self.managed_service.monthly,
            markup_percent: self.adjustments.markup_percent,
            additional_discount_percent: self.adjustments.additional_discount_percent,
            commitment: self.commitment_selector()?.commitment(),
            currency: self.project.currency,
        })
    }

    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

/// Load a scenario from a TOML file plus `COST_SIM__*` environment overrides
///
/// A missing file is not an error: the form defaults are used instead.
pub fn load_scenario(path: &Path) -> Result<ScenarioConfig> {
    if path.exists() {
        info!("Loading scenario from {}", path.display());
    } else {
        debug!("Scenario file {} not found, using defaults", path.display());
    }

    let settings = config::Config::builder()
        .add_source(
            config::File::from(path.to_path_buf())
                .format(config::FileFormat::Toml)
                .required(false),
        )
        .add_source(config::Environment::with_prefix(ENV_PREFIX).separator("__"))
        .build()?;

    let scenario: ScenarioConfig = settings.try_deserialize()?;
    validate_scenario(&scenario)?;

    Ok(scenario)
}

/// Check every form value against its allowed range
pub fn validate_scenario(cfg: &ScenarioConfig) -> Result<()> {
    check_count("project.sprints", cfg.project.sprints, SPRINT_RANGE)?;
    check_count(
        "project.sprint_duration_weeks",
        cfg.project.sprint_duration_weeks,
        SPRINT_WEEKS_RANGE,
    )?;

    for role in RoleKind::ALL {
        let key = role_key(role);
        let heads = cfg.staffing.get(role);
        check_count(&format!("staffing.{}.onsite", key), heads.onsite, head_count_range(role))?;
        check_count(&format!("staffing.{}.offshore", key), heads.offshore, head_count_range(role))?;

        let rates = cfg.rates.get(role);
        check_amount(&format!("rates.{}.onsite", key), rates.onsite)?;
        check_amount(&format!("rates.{}.offshore", key), rates.offshore)?;
    }

    check_amount("licensing.per_user_monthly", cfg.licensing.per_user_monthly)?;
    check_count("licensing.users", cfg.licensing.users, USERS_RANGE)?;
    check_bounded(
        "licensing.percent_of_one_off",
        cfg.licensing.percent_of_one_off,
        LICENSE_PERCENT_RANGE,
    )?;
    check_bounded("managed_service.monthly", cfg.managed_service.monthly, MANAGED_SERVICE_RANGE)?;

    check_amount("adjustments.markup_percent", cfg.adjustments.markup_percent)?;
    check_amount(
        "adjustments.additional_discount_percent",
        cfg.adjustments.additional_discount_percent,
    )?;

    cfg.commitment_term()?;
    for term in CommitmentTerm::ALL {
        let field = format!("commitment.discounts.{}", tier_key(term));
        let value = cfg.commitment.discounts.get(term);
        check_bounded(&field, value, TIER_DISCOUNT_RANGE)?;
        if (value / DISCOUNT_STEP_PERCENT).fract() != 0.0 {
            return Err(SimulatorError::invalid(
                field,
                format!("must be a multiple of {}", DISCOUNT_STEP_PERCENT),
            ));
        }
    }

    Ok(())
}

pub fn role_key(role: RoleKind) -> &'static str {
    match role {
        RoleKind::Developer => "developer",
        RoleKind::Tester => "tester",
        RoleKind::ProjectManager => "project_manager",
    }
}

fn tier_key(term: CommitmentTerm) -> &'static str {
    match term {
        CommitmentTerm::OneYear => "one_year",
        CommitmentTerm::TwoYears => "two_year",
        CommitmentTerm::ThreeYears => "three_year",
        CommitmentTerm::FiveYears => "five_year",
    }
}

fn check_count(field: &str, value: u32, range: RangeInclusive<u32>) -> Result<()> {
    if !range.contains(&value) {
        return Err(SimulatorError::invalid(
            field,
            format!("{} is outside {}..={}", value, range.start(), range.end()),
        ));
    }
    Ok(())
}

fn check_amount(field: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(SimulatorError::invalid(
            field,
            format!("{} must be a non-negative number", value),
        ));
    }
    Ok(())
}

fn check_bounded(field: &str, value: f64, range: RangeInclusive<f64>) -> Result<()> {
    check_amount(field, value)?;
    if !range.contains(&value) {
        return Err(SimulatorError::invalid(
            field,
            format!("{} is outside {}..={}", value, range.start(), range.end()),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let cfg = ScenarioConfig::default();
        assert!(validate_scenario(&cfg).is_ok());
    }

    #[test]
    fn test_default_parameters_match_form() {
        let params = ScenarioConfig::default().to_parameters().unwrap();
        assert_eq!(params.sprint_count, 24);
        assert_eq!(params.sprint_duration_weeks, 2);
        assert_eq!(params.role(RoleKind::Developer).offshore_count, 2);
        assert_eq!(params.role(RoleKind::ProjectManager).onsite_count, 1);
        assert_eq!(params.role(RoleKind::ProjectManager).onsite_daily_rate, 700.0);
        assert_eq!(params.licensing.user_count, 5);
        assert_eq!(params.commitment.term, CommitmentTerm::FiveYears);
        assert_eq!(params.commitment.discount_percent, 8.0);
    }

    #[test]
    fn test_validate_rejects_sprints_out_of_range() {
        let mut cfg = ScenarioConfig::default();
        cfg.project.sprints = 0;

        let result = validate_scenario(&cfg);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("project.sprints"));

        cfg.project.sprints = 51;
        assert!(validate_scenario(&cfg).is_err());
    }

    #[test]
    fn test_validate_rejects_too_many_project_managers() {
        let mut cfg = ScenarioConfig::default();
        cfg.staffing.project_manager.onsite = 6;

        let err = validate_scenario(&cfg).unwrap_err();
        assert!(err.to_string().contains("staffing.project_manager.onsite"));
    }

    #[test]
    fn test_validate_rejects_negative_rate() {
        let mut cfg = ScenarioConfig::default();
        cfg.rates.tester.offshore = -1.0;
        assert!(validate_scenario(&cfg).is_err());

        cfg.rates.tester.offshore = f64::NAN;
        assert!(validate_scenario(&cfg).is_err());
    }

    #[test]
    fn test_validate_rejects_bad_commitment() {
        let mut cfg = ScenarioConfig::default();
        cfg.commitment.years = 4;
        assert!(matches!(
            validate_scenario(&cfg),
            Err(SimulatorError::InvalidCommitment(4))
        ));
    }

    #[test]
    fn test_validate_rejects_off_step_tier_discount() {
        let mut cfg = ScenarioConfig::default();
        cfg.commitment.discounts.two_year = 2.25;
        assert!(validate_scenario(&cfg).is_err());

        cfg.commitment.discounts.two_year = 20.5;
        assert!(validate_scenario(&cfg).is_err());
    }

    #[test]
    fn test_percentage_licensing_zeroes_users() {
        let mut cfg = ScenarioConfig::default();
        cfg.licensing.percent_of_one_off = 15.0;

        let params = cfg.to_parameters().unwrap();
        assert_eq!(params.licensing.user_count, 0);
        assert_eq!(params.licensing.percent_of_one_off_costs, 15.0);
    }

    #[test]
    fn test_selected_tier_uses_configured_discount() {
        let mut cfg = ScenarioConfig::default();
        cfg.commitment.discounts.five_year = 10.0;

        let params = cfg.to_parameters().unwrap();
        assert_eq!(params.commitment.discount_percent, 10.0);
    }

    #[test]
    fn test_sync_commitment_round_trips_selector() {
        let mut cfg = ScenarioConfig::default();
        let mut selector = cfg.commitment_selector().unwrap();
        selector.set_discount(CommitmentTerm::TwoYears, 4.5);
        selector.select(CommitmentTerm::TwoYears);

        cfg.sync_commitment(&selector);
        assert_eq!(cfg.commitment.years, 2);
        assert_eq!(cfg.commitment.discounts.two_year, 4.5);
        assert_eq!(cfg.commitment_selector().unwrap(), selector);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let cfg: ScenarioConfig = toml::from_str(
            r#"
            [project]
            sprints = 10

            [staffing.developer]
            onsite = 3
            "#,
        )
        .unwrap();

        assert_eq!(cfg.project.sprints, 10);
        assert_eq!(cfg.project.sprint_duration_weeks, 2);
        assert_eq!(cfg.staffing.developer.onsite, 3);
        assert_eq!(cfg.staffing.developer.offshore, 2);
        assert_eq!(cfg.staffing.tester.offshore, 2);
        assert_eq!(cfg.managed_service.monthly, 300.0);
    }

    #[test]
    fn test_partial_rate_section_keeps_role_defaults() {
        let cfg: ScenarioConfig = toml::from_str(
            r#"
            [rates.developer]
            onsite = 800.0

            [rates.project_manager]
            offshore = 450.0
            "#,
        )
        .unwrap();

        assert_eq!(cfg.rates.developer, DailyRates { onsite: 800.0, offshore: 500.0 });
        assert_eq!(cfg.rates.tester, RatesConfig::default().tester);
        assert_eq!(cfg.rates.project_manager, DailyRates { onsite: 700.0, offshore: 450.0 });
        assert_eq!(cfg.staffing, StaffingConfig::default());
    }
}
