//! Interactive terminal form
//!
//! Editable fields and the ratatui rendering of the live estimator.

pub mod fields;
pub mod ui;

pub use fields::FormField;
pub use ui::EstimatorApp;
