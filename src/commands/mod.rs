//! Command implementations for the CLI
//!
//! - estimate: Compute and print the cost breakdown
//! - interactive: Live terminal form
//! - tiers: Commitment tiers and their discounts
//! - currencies: Currency codes, symbols and reference rates
//! - config: Scenario display and validation

pub mod config;
pub mod currencies;
pub mod estimate;
pub mod interactive;
pub mod tiers;
