//! Domain types for a single cost calculation
//!
//! `ProjectParameters` is the immutable input snapshot, `CostResult` the
//! computed breakdown. Both are rebuilt on every recalculation.

pub mod currency;
pub mod parameters;
pub mod result;

pub use currency::Currency;
pub use parameters::{
    Commitment, CommitmentTerm, Licensing, ProjectParameters, RoleKind, RoleStaffing,
};
pub use result::{CostResult, RoleCost};
