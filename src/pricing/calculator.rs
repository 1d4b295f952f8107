use crate::models::{CostResult, ProjectParameters, RoleCost, RoleKind};

/// Compute the full cost breakdown for a set of project parameters
///
/// Pure arithmetic over an already validated snapshot. Markup and the two
/// discounts are applied multiplicatively in a fixed order: markup, then
/// the additional discount, then the commitment discount. Totals are not
/// clamped, so a discount stack above 100% yields a negative total.
pub fn compute_cost(params: &ProjectParameters) -> CostResult {
    let total_work_days = params.total_work_days();
    let total_months = params.total_months();
    let days = total_work_days as f64;

    let role_costs: Vec<RoleCost> = RoleKind::ALL
        .iter()
        .map(|&role| RoleCost {
            role,
            cost: days * params.role(role).daily_cost(),
        })
        .collect();

    let one_off_total: f64 = role_costs.iter().map(|rc| rc.cost).sum();

    let licensing = &params.licensing;
    let license_cost = if licensing.is_percentage_mode() {
        (licensing.percent_of_one_off_costs / 100.0) * one_off_total
    } else {
        licensing.per_user_monthly_cost * licensing.user_count as f64 * total_months
    };

    let managed_service_cost = params.managed_service_monthly_cost * total_months;

    let subtotal = one_off_total + license_cost + managed_service_cost;
    let after_markup = subtotal * (1.0 + params.markup_percent / 100.0);
    let after_additional_discount =
        after_markup * (1.0 - params.additional_discount_percent / 100.0);
    let final_total =
        after_additional_discount * (1.0 - params.commitment.discount_percent / 100.0);

    CostResult {
        total_work_days,
        total_months,
        role_costs,
        one_off_total,
        license_cost,
        managed_service_cost,
        subtotal,
        after_markup,
        after_additional_discount,
        final_total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        Commitment, CommitmentTerm, Currency, Licensing, RoleStaffing,
    };
    use std::collections::BTreeMap;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-6,
            "expected {}, got {}",
            expected,
            actual
        );
    }

    fn offshore(count: u32, rate: f64) -> RoleStaffing {
        RoleStaffing {
            offshore_count: count,
            offshore_daily_rate: rate,
            ..Default::default()
        }
    }

    fn onsite(count: u32, rate: f64) -> RoleStaffing {
        RoleStaffing {
            onsite_count: count,
            onsite_daily_rate: rate,
            ..Default::default()
        }
    }

    fn reference_params() -> ProjectParameters {
        let mut roles = BTreeMap::new();
        roles.insert(RoleKind::Developer, offshore(2, 500.0));
        roles.insert(RoleKind::Tester, offshore(2, 300.0));
        roles.insert(RoleKind::ProjectManager, onsite(1, 700.0));

        ProjectParameters {
            sprint_count: 24,
            sprint_duration_weeks: 2,
            roles,
            licensing: Licensing {
                per_user_monthly_cost: 100.0,
                user_count: 5,
                percent_of_one_off_costs: 0.0,
            },
            managed_service_monthly_cost: 300.0,
            markup_percent: 30.0,
            additional_discount_percent: 0.0,
            commitment: Commitment {
                term: CommitmentTerm::FiveYears,
                discount_percent: 8.0,
            },
            currency: Currency::Usd,
        }
    }

    #[test]
    fn test_reference_scenario() {
        let result = compute_cost(&reference_params());

        assert_eq!(result.total_work_days, 240);
        assert_close(result.total_months, 12.0);
        assert_close(result.role_cost(RoleKind::Developer), 240_000.0);
        assert_close(result.role_cost(RoleKind::Tester), 144_000.0);
        assert_close(result.role_cost(RoleKind::ProjectManager), 168_000.0);
        assert_close(result.one_off_total, 552_000.0);
        assert_close(result.license_cost, 6_000.0);
        assert_close(result.managed_service_cost, 3_600.0);
        assert_close(result.subtotal, 561_600.0);
        assert_close(result.after_markup, 730_080.0);
        assert_close(result.after_additional_discount, 730_080.0);
        assert_close(result.final_total, 671_673.6);
    }

    #[test]
    fn test_percentage_licensing_ignores_per_user_inputs() {
        let mut params = reference_params();
        params.licensing.percent_of_one_off_costs = 20.0;
        params.licensing.per_user_monthly_cost = 9_999.0;
        params.licensing.user_count = 1_000;

        let result = compute_cost(&params);
        assert_close(result.license_cost, 0.2 * result.one_off_total);
    }

    #[test]
    fn test_discounts_stack_in_order() {
        // One developer for one 1-week sprint at 200/day gives a 1000 subtotal
        let mut roles = BTreeMap::new();
        roles.insert(RoleKind::Developer, onsite(1, 200.0));
        let params = ProjectParameters {
            sprint_count: 1,
            sprint_duration_weeks: 1,
            roles,
            licensing: Licensing::default(),
            managed_service_monthly_cost: 0.0,
            markup_percent: 30.0,
            additional_discount_percent: 10.0,
            commitment: Commitment {
                term: CommitmentTerm::FiveYears,
                discount_percent: 8.0,
            },
            currency: Currency::Usd,
        };

        let result = compute_cost(&params);
        assert_close(result.subtotal, 1_000.0);
        assert_close(result.after_markup, 1_300.0);
        assert_close(result.after_additional_discount, 1_170.0);
        assert_close(result.final_total, 1_076.4);
    }

    #[test]
    fn test_zero_staffing() {
        let mut params = reference_params();
        params.roles.clear();
        params.licensing.percent_of_one_off_costs = 50.0;

        let result = compute_cost(&params);
        assert_eq!(result.one_off_total, 0.0);
        assert_eq!(result.license_cost, 0.0);
        assert_eq!(result.role_costs.len(), 3);
    }

    #[test]
    fn test_discount_over_hundred_goes_negative() {
        let mut params = reference_params();
        params.additional_discount_percent = 150.0;

        let result = compute_cost(&params);
        assert!(result.final_total < 0.0);
    }

    #[test]
    fn test_deterministic() {
        let params = reference_params();
        assert_eq!(compute_cost(&params), compute_cost(&params));
    }
}
