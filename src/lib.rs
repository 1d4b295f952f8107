pub mod config;
pub mod error;
pub mod form;
pub mod format;
pub mod models;
pub mod pricing;
pub mod report;
pub mod session;

pub use error::{Result, SimulatorError};
pub use models::{CostResult, ProjectParameters};
pub use pricing::compute_cost;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize tracing/logging
///
/// Logs go to stderr so report output on stdout can be piped. `json`
/// switches to the structured formatter; anything else is plain text.
/// Can only be called once per process.
pub fn init_tracing(log_format: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(filter);

    if log_format == "json" {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .init();
    }
}
