use std::ops::RangeInclusive;

use crate::config::{
    head_count_range, ScenarioConfig, LICENSE_PERCENT_RANGE, MANAGED_SERVICE_RANGE, SPRINT_RANGE,
    SPRINT_WEEKS_RANGE, USERS_RANGE,
};
use crate::format::{format_money, format_percent};
use crate::models::{CommitmentTerm, RoleKind};
use crate::pricing::commitment::DISCOUNT_STEP_PERCENT;
use crate::session::InputChange;

const RATE_STEP: f64 = 50.0;
const LICENSE_COST_STEP: f64 = 10.0;
const MANAGED_SERVICE_STEP: f64 = 10.0;
const PERCENT_STEP: f64 = 1.0;

/// One editable row of the interactive form
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FormField {
    Sprints,
    SprintWeeks,
    Currency,
    Onsite(RoleKind),
    Offshore(RoleKind),
    OnsiteRate(RoleKind),
    OffshoreRate(RoleKind),
    LicensePerUser,
    LicenseUsers,
    LicensePercent,
    ManagedService,
    Markup,
    AdditionalDiscount,
    TierDiscount(CommitmentTerm),
}

impl FormField {
    /// Rows in display order
    pub fn all() -> Vec<FormField> {
        let mut fields = vec![Self::Sprints, Self::SprintWeeks, Self::Currency];
        for role in RoleKind::ALL {
            fields.push(Self::Onsite(role));
            fields.push(Self::Offshore(role));
        }
        for role in RoleKind::ALL {
            fields.push(Self::OnsiteRate(role));
            fields.push(Self::OffshoreRate(role));
        }
        fields.extend([
            Self::LicensePerUser,
            Self::LicenseUsers,
            Self::LicensePercent,
            Self::ManagedService,
            Self::Markup,
            Self::AdditionalDiscount,
        ]);
        fields.extend(CommitmentTerm::ALL.map(Self::TierDiscount));
        fields
    }

    pub fn label(&self) -> String {
        match self {
            Self::Sprints => "Number of Sprints".to_string(),
            Self::SprintWeeks => "Sprint Duration (weeks)".to_string(),
            Self::Currency => "Currency".to_string(),
            Self::Onsite(role) => format!("{} onsite", role),
            Self::Offshore(role) => format!("{} offshore", role),
            Self::OnsiteRate(role) => format!("{} onsite rate", role),
            Self::OffshoreRate(role) => format!("{} offshore rate", role),
            Self::LicensePerUser => "Licence per user/month".to_string(),
            Self::LicenseUsers => "Licence users".to_string(),
            Self::LicensePercent => "Or % of one-off costs".to_string(),
            Self::ManagedService => "Managed service/month".to_string(),
            Self::Markup => "Markup".to_string(),
            Self::AdditionalDiscount => "Additional discount".to_string(),
            Self::TierDiscount(term) => format!("{} discount", term),
        }
    }

    pub fn value(&self, scenario: &ScenarioConfig) -> String {
        let symbol = scenario.project.currency.symbol();
        match *self {
            Self::Sprints => scenario.project.sprints.to_string(),
            Self::SprintWeeks => scenario.project.sprint_duration_weeks.to_string(),
            Self::Currency => format!("{} {}", symbol, scenario.project.currency),
            Self::Onsite(role) => scenario.staffing.get(role).onsite.to_string(),
            Self::Offshore(role) => scenario.staffing.get(role).offshore.to_string(),
            Self::OnsiteRate(role) => format_money(symbol, scenario.rates.get(role).onsite),
            Self::OffshoreRate(role) => format_money(symbol, scenario.rates.get(role).offshore),
            Self::LicensePerUser => format_money(symbol, scenario.licensing.per_user_monthly),
            Self::LicenseUsers => {
                if scenario.licensing.percent_of_one_off > 0.0 {
                    "0 (percentage mode)".to_string()
                } else {
                    scenario.licensing.users.to_string()
                }
            }
            Self::LicensePercent => format_percent(scenario.licensing.percent_of_one_off),
            Self::ManagedService => format_money(symbol, scenario.managed_service.monthly),
            Self::Markup => format_percent(scenario.adjustments.markup_percent),
            Self::AdditionalDiscount => {
                format_percent(scenario.adjustments.additional_discount_percent)
            }
            Self::TierDiscount(term) => format_percent(scenario.commitment.discounts.get(term)),
        }
    }

    /// Change produced by nudging this field one step up (`direction > 0`) or down
    pub fn adjust(&self, scenario: &ScenarioConfig, direction: i32) -> InputChange {
        let sign = direction.signum();
        let up = sign as f64;
        match *self {
            Self::Sprints => InputChange::Sprints(step_count(
                scenario.project.sprints,
                sign,
                SPRINT_RANGE,
            )),
            Self::SprintWeeks => InputChange::SprintDurationWeeks(step_count(
                scenario.project.sprint_duration_weeks,
                sign,
                SPRINT_WEEKS_RANGE,
            )),
            Self::Currency => {
                let current = scenario.project.currency;
                InputChange::Currency(if sign < 0 { current.prev() } else { current.next() })
            }
            Self::Onsite(role) => InputChange::OnsiteCount(
                role,
                step_count(scenario.staffing.get(role).onsite, sign, head_count_range(role)),
            ),
            Self::Offshore(role) => InputChange::OffshoreCount(
                role,
                step_count(scenario.staffing.get(role).offshore, sign, head_count_range(role)),
            ),
            Self::OnsiteRate(role) => InputChange::OnsiteRate(
                role,
                step_amount(scenario.rates.get(role).onsite, up * RATE_STEP, None),
            ),
            Self::OffshoreRate(role) => InputChange::OffshoreRate(
                role,
                step_amount(scenario.rates.get(role).offshore, up * RATE_STEP, None),
            ),
            Self::LicensePerUser => InputChange::LicensePerUser(step_amount(
                scenario.licensing.per_user_monthly,
                up * LICENSE_COST_STEP,
                None,
            )),
            Self::LicenseUsers => InputChange::LicenseUsers(step_count(
                scenario.licensing.users,
                sign,
                USERS_RANGE,
            )),
            Self::LicensePercent => InputChange::LicensePercent(step_amount(
                scenario.licensing.percent_of_one_off,
                up * PERCENT_STEP,
                Some(LICENSE_PERCENT_RANGE),
            )),
            Self::ManagedService => InputChange::ManagedServiceMonthly(step_amount(
                scenario.managed_service.monthly,
                up * MANAGED_SERVICE_STEP,
                Some(MANAGED_SERVICE_RANGE),
            )),
            Self::Markup => InputChange::Markup(step_amount(
                scenario.adjustments.markup_percent,
                up * PERCENT_STEP,
                None,
            )),
            Self::AdditionalDiscount => InputChange::AdditionalDiscount(step_amount(
                scenario.adjustments.additional_discount_percent,
                up * DISCOUNT_STEP_PERCENT,
                None,
            )),
            Self::TierDiscount(term) => InputChange::CommitmentDiscount(
                term,
                scenario.commitment.discounts.get(term) + up * DISCOUNT_STEP_PERCENT,
            ),
        }
    }
}

fn step_count(value: u32, sign: i32, range: RangeInclusive<u32>) -> u32 {
    let next = if sign < 0 {
        value.saturating_sub(1)
    } else {
        value.saturating_add(1)
    };
    next.clamp(*range.start(), *range.end())
}

/// Amounts never go below zero; bounded fields also stop at their maximum
fn step_amount(value: f64, delta: f64, range: Option<RangeInclusive<f64>>) -> f64 {
    let next = (value + delta).max(0.0);
    match range {
        Some(range) => next.clamp(*range.start(), *range.end()),
        None => next,
    }
}
