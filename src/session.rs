//! Live estimator session
//!
//! Holds the current form values and recomputes the full breakdown after
//! every single change. Nothing is cached between calculations: each change
//! produces a fresh `ProjectParameters` snapshot that goes through the
//! pricing engine from the top.

use tracing::{debug, warn};

use crate::config::{validate_scenario, ScenarioConfig};
use crate::error::Result;
use crate::models::{CommitmentTerm, CostResult, Currency, ProjectParameters, RoleKind};
use crate::pricing::{compute_cost, CommitmentSelector};

/// A single edit to the form
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputChange {
    Sprints(u32),
    SprintDurationWeeks(u32),
    Currency(Currency),
    OnsiteCount(RoleKind, u32),
    OffshoreCount(RoleKind, u32),
    OnsiteRate(RoleKind, f64),
    OffshoreRate(RoleKind, f64),
    LicensePerUser(f64),
    LicenseUsers(u32),
    LicensePercent(f64),
    ManagedServiceMonthly(f64),
    Markup(f64),
    AdditionalDiscount(f64),
    SelectCommitment(CommitmentTerm),
    CommitmentDiscount(CommitmentTerm, f64),
}

pub struct EstimatorSession {
    scenario: ScenarioConfig,
    selector: CommitmentSelector,
    params: ProjectParameters,
    result: CostResult,
}

impl EstimatorSession {
    /// Start a session from a validated scenario
    pub fn new(scenario: ScenarioConfig) -> Result<Self> {
        validate_scenario(&scenario)?;
        let selector = scenario.commitment_selector()?;
        let params = scenario.to_parameters()?;
        let result = compute_cost(&params);
        Ok(Self {
            scenario,
            selector,
            params,
            result,
        })
    }

    pub fn scenario(&self) -> &ScenarioConfig {
        &self.scenario
    }

    pub fn selector(&self) -> &CommitmentSelector {
        &self.selector
    }

    /// Breakdown for the current form values
    pub fn result(&self) -> &CostResult {
        &self.result
    }

    /// Snapshot the current result was computed from
    pub fn parameters(&self) -> &ProjectParameters {
        &self.params
    }

    /// Apply one change and recompute
    ///
    /// Invalid changes are rejected and leave the session untouched.
    pub fn apply(&mut self, change: InputChange) -> Result<&CostResult> {
        let mut scenario = self.scenario.clone();
        let mut selector = self.selector.clone();

        match change {
            InputChange::Sprints(n) => scenario.project.sprints = n,
            InputChange::SprintDurationWeeks(n) => scenario.project.sprint_duration_weeks = n,
            InputChange::Currency(c) => scenario.project.currency = c,
            InputChange::OnsiteCount(role, n) => scenario.staffing.get_mut(role).onsite = n,
            InputChange::OffshoreCount(role, n) => scenario.staffing.get_mut(role).offshore = n,
            InputChange::OnsiteRate(role, rate) => scenario.rates.get_mut(role).onsite = rate,
            InputChange::OffshoreRate(role, rate) => scenario.rates.get_mut(role).offshore = rate,
            InputChange::LicensePerUser(cost) => scenario.licensing.per_user_monthly = cost,
            InputChange::LicenseUsers(n) => scenario.licensing.users = n,
            InputChange::LicensePercent(pct) => scenario.licensing.percent_of_one_off = pct,
            InputChange::ManagedServiceMonthly(cost) => scenario.managed_service.monthly = cost,
            InputChange::Markup(pct) => scenario.adjustments.markup_percent = pct,
            InputChange::AdditionalDiscount(pct) => {
                scenario.adjustments.additional_discount_percent = pct
            }
            InputChange::SelectCommitment(term) => selector.select(term),
            InputChange::CommitmentDiscount(term, pct) => {
                selector.set_discount(term, pct);
            }
        }
        scenario.sync_commitment(&selector);

        if let Err(e) = validate_scenario(&scenario) {
            warn!(?change, error = %e, "Rejected form change");
            return Err(e);
        }

        let params = scenario.to_parameters()?;
        let result = compute_cost(&params);
        debug!(
            ?change,
            final_total = result.final_total,
            one_off_total = result.one_off_total,
            "Recomputed cost"
        );

        self.scenario = scenario;
        self.selector = selector;
        self.params = params;
        self.result = result;
        Ok(&self.result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> EstimatorSession {
        EstimatorSession::new(ScenarioConfig::default()).unwrap()
    }

    #[test]
    fn test_initial_result_matches_defaults() {
        let session = session();
        // Defaults: 552000 one-off, 6000 licensing, 3600 managed, 30% markup, 8% commitment
        assert!((session.result().final_total - 671_673.6).abs() < 1e-6);
    }

    #[test]
    fn test_every_change_recomputes() {
        let mut session = session();
        let before = session.result().final_total;

        let after = session.apply(InputChange::Sprints(12)).unwrap().final_total;
        assert!(after < before);
        assert_eq!(session.result().total_work_days, 120);
    }

    #[test]
    fn test_invalid_change_leaves_state_untouched() {
        let mut session = session();
        let before = session.result().clone();

        assert!(session.apply(InputChange::OnsiteCount(RoleKind::ProjectManager, 9)).is_err());
        assert_eq!(session.result(), &before);
        assert_eq!(session.scenario().staffing.project_manager.onsite, 1);
    }

    #[test]
    fn test_active_tier_discount_applies_live() {
        let mut session = session();
        session
            .apply(InputChange::CommitmentDiscount(CommitmentTerm::FiveYears, 10.0))
            .unwrap();

        let params = session.parameters();
        assert_eq!(params.commitment.discount_percent, 10.0);
        assert!((session.result().final_total - 730_080.0 * 0.9).abs() < 1e-6);
    }

    #[test]
    fn test_reselect_after_adjusting_other_tier() {
        let mut session = session();
        session.apply(InputChange::SelectCommitment(CommitmentTerm::OneYear)).unwrap();
        assert!((session.result().final_total - 730_080.0).abs() < 1e-6);

        session
            .apply(InputChange::CommitmentDiscount(CommitmentTerm::FiveYears, 10.0))
            .unwrap();
        assert!((session.result().final_total - 730_080.0).abs() < 1e-6);

        session.apply(InputChange::SelectCommitment(CommitmentTerm::FiveYears)).unwrap();
        assert_eq!(session.parameters().commitment.discount_percent, 10.0);
        assert_eq!(session.scenario().commitment.years, 5);
    }

    #[test]
    fn test_currency_change_keeps_amounts() {
        let mut session = session();
        let before = session.result().final_total;
        let after = session.apply(InputChange::Currency(Currency::Egp)).unwrap().final_total;
        assert_eq!(before, after);
    }

    #[test]
    fn test_license_percent_switches_mode() {
        let mut session = session();
        let result = session.apply(InputChange::LicensePercent(20.0)).unwrap();
        assert!((result.license_cost - 0.2 * result.one_off_total).abs() < 1e-6);
    }
}
