use serde::{Deserialize, Serialize};

use crate::models::RoleKind;

/// One-off cost attributed to a single role
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoleCost {
    pub role: RoleKind,
    pub cost: f64,
}

/// Output of one cost calculation
///
/// Every intermediate value of the pipeline is kept so the breakdown can
/// be shown without re-deriving anything.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostResult {
    pub total_work_days: u32,
    pub total_months: f64,
    /// In `RoleKind::ALL` order
    pub role_costs: Vec<RoleCost>,
    pub one_off_total: f64,
    pub license_cost: f64,
    pub managed_service_cost: f64,
    pub subtotal: f64,
    pub after_markup: f64,
    pub after_additional_discount: f64,
    pub final_total: f64,
}

impl CostResult {
    pub fn role_cost(&self, role: RoleKind) -> f64 {
        self.role_costs
            .iter()
            .find(|rc| rc.role == role)
            .map(|rc| rc.cost)
            .unwrap_or(0.0)
    }
}
