//! Commitment tier selection
//!
//! Each tier keeps its own discount. Selecting a tier makes its current
//! discount the effective one; adjusting the active tier's discount takes
//! effect immediately without re-selecting.

use std::collections::BTreeMap;
use tracing::debug;

use crate::models::{Commitment, CommitmentTerm};

pub const MIN_DISCOUNT_PERCENT: f64 = 0.0;
pub const MAX_DISCOUNT_PERCENT: f64 = 20.0;
pub const DISCOUNT_STEP_PERCENT: f64 = 0.5;

/// Default discount for each tier
pub fn default_discount(term: CommitmentTerm) -> f64 {
    match term {
        CommitmentTerm::OneYear => 0.0,
        CommitmentTerm::TwoYears => 2.0,
        CommitmentTerm::ThreeYears => 5.0,
        CommitmentTerm::FiveYears => 8.0,
    }
}

/// Clamp to the allowed range and snap to the nearest step
pub fn normalize_discount(percent: f64) -> f64 {
    if !percent.is_finite() {
        return MIN_DISCOUNT_PERCENT;
    }
    let snapped = (percent / DISCOUNT_STEP_PERCENT).round() * DISCOUNT_STEP_PERCENT;
    snapped.clamp(MIN_DISCOUNT_PERCENT, MAX_DISCOUNT_PERCENT)
}

#[derive(Debug, Clone, PartialEq)]
pub struct CommitmentSelector {
    selected: CommitmentTerm,
    discounts: BTreeMap<CommitmentTerm, f64>,
}

impl CommitmentSelector {
    pub fn new(selected: CommitmentTerm) -> Self {
        let discounts = CommitmentTerm::ALL
            .iter()
            .map(|&term| (term, default_discount(term)))
            .collect();
        Self { selected, discounts }
    }

    pub fn selected(&self) -> CommitmentTerm {
        self.selected
    }

    pub fn select(&mut self, term: CommitmentTerm) {
        debug!(years = term.years(), discount = self.discount(term), "Commitment tier selected");
        self.selected = term;
    }

    pub fn discount(&self, term: CommitmentTerm) -> f64 {
        self.discounts
            .get(&term)
            .copied()
            .unwrap_or_else(|| default_discount(term))
    }

    /// Set a tier's discount, returning the value actually stored
    pub fn set_discount(&mut self, term: CommitmentTerm, percent: f64) -> f64 {
        let value = normalize_discount(percent);
        self.discounts.insert(term, value);
        debug!(years = term.years(), discount = value, "Commitment discount adjusted");
        value
    }

    /// Effective commitment: the selected tier with its current discount
    pub fn commitment(&self) -> Commitment {
        Commitment {
            term: self.selected,
            discount_percent: self.discount(self.selected),
        }
    }

    /// All tiers with their discounts, shortest term first
    pub fn tiers(&self) -> impl Iterator<Item = (CommitmentTerm, f64)> + '_ {
        CommitmentTerm::ALL
            .into_iter()
            .map(move |term| (term, self.discount(term)))
    }
}

impl Default for CommitmentSelector {
    fn default() -> Self {
        Self::new(CommitmentTerm::FiveYears)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let selector = CommitmentSelector::default();
        let commitment = selector.commitment();
        assert_eq!(commitment.term, CommitmentTerm::FiveYears);
        assert_eq!(commitment.discount_percent, 8.0);

        let tiers: Vec<_> = selector.tiers().collect();
        assert_eq!(
            tiers,
            vec![
                (CommitmentTerm::OneYear, 0.0),
                (CommitmentTerm::TwoYears, 2.0),
                (CommitmentTerm::ThreeYears, 5.0),
                (CommitmentTerm::FiveYears, 8.0),
            ]
        );
    }

    #[test]
    fn test_reselect_uses_adjusted_discount() {
        let mut selector = CommitmentSelector::new(CommitmentTerm::OneYear);
        selector.set_discount(CommitmentTerm::FiveYears, 10.0);
        selector.select(CommitmentTerm::FiveYears);
        assert_eq!(selector.commitment().discount_percent, 10.0);
    }

    #[test]
    fn test_active_tier_adjustment_is_live() {
        let mut selector = CommitmentSelector::default();
        selector.set_discount(CommitmentTerm::FiveYears, 12.5);
        assert_eq!(selector.commitment().discount_percent, 12.5);
    }

    #[test]
    fn test_inactive_tier_adjustment_does_not_leak() {
        let mut selector = CommitmentSelector::default();
        selector.set_discount(CommitmentTerm::TwoYears, 15.0);
        assert_eq!(selector.commitment().discount_percent, 8.0);
        assert_eq!(selector.discount(CommitmentTerm::TwoYears), 15.0);
    }

    #[test]
    fn test_discount_clamped_and_snapped() {
        let mut selector = CommitmentSelector::default();
        assert_eq!(selector.set_discount(CommitmentTerm::OneYear, 25.0), 20.0);
        assert_eq!(selector.set_discount(CommitmentTerm::OneYear, -3.0), 0.0);
        assert_eq!(selector.set_discount(CommitmentTerm::OneYear, 3.3), 3.5);
        assert_eq!(selector.set_discount(CommitmentTerm::OneYear, f64::NAN), 0.0);
    }
}
