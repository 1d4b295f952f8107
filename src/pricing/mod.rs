pub mod calculator;
pub mod commitment;

pub use calculator::compute_cost;
pub use commitment::CommitmentSelector;
