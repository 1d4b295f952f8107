//! Breakdown report shared by the `estimate` command and the interactive form

use serde::Serialize;

use crate::format::{format_money, format_percent};
use crate::models::{CostResult, ProjectParameters};

#[derive(Debug, Clone, Serialize)]
pub struct RoleLine {
    pub role: String,
    pub amount: f64,
    pub formatted: String,
}

/// Everything the breakdown panel shows, already formatted for display
#[derive(Debug, Clone, Serialize)]
pub struct BreakdownReport {
    pub currency: String,
    pub symbol: String,
    pub total_work_days: u32,
    pub total_months: f64,
    pub roles: Vec<RoleLine>,
    pub one_off_total: f64,
    pub license_cost: f64,
    pub license_mode: String,
    pub managed_service_cost: f64,
    pub subtotal: f64,
    pub markup_percent: f64,
    pub additional_discount_percent: f64,
    pub commitment_years: u32,
    pub commitment_discount_percent: f64,
    /// Additional plus commitment discount, summed for display only
    pub combined_discount_percent: f64,
    pub final_total: f64,
    pub grand_total: String,
}

impl BreakdownReport {
    pub fn new(params: &ProjectParameters, result: &CostResult) -> Self {
        let symbol = params.currency.symbol();

        let roles = result
            .role_costs
            .iter()
            .map(|rc| RoleLine {
                role: rc.role.label().to_string(),
                amount: rc.cost,
                formatted: format_money(symbol, rc.cost),
            })
            .collect();

        let license_mode = if params.licensing.is_percentage_mode() {
            format!(
                "{} of one-off costs",
                format_percent(params.licensing.percent_of_one_off_costs)
            )
        } else {
            format!(
                "{} users at {}/month",
                params.licensing.user_count,
                format_money(symbol, params.licensing.per_user_monthly_cost)
            )
        };

        Self {
            currency: params.currency.code().to_string(),
            symbol: symbol.to_string(),
            total_work_days: result.total_work_days,
            total_months: result.total_months,
            roles,
            one_off_total: result.one_off_total,
            license_cost: result.license_cost,
            license_mode,
            managed_service_cost: result.managed_service_cost,
            subtotal: result.subtotal,
            markup_percent: params.markup_percent,
            additional_discount_percent: params.additional_discount_percent,
            commitment_years: params.commitment.term.years(),
            commitment_discount_percent: params.commitment.discount_percent,
            combined_discount_percent: params.additional_discount_percent
                + params.commitment.discount_percent,
            final_total: result.final_total,
            grand_total: format_money(symbol, result.final_total),
        }
    }

    pub fn money(&self, amount: f64) -> String {
        format_money(&self.symbol, amount)
    }

    pub fn to_json(&self) -> crate::error::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
