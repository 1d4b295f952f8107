use anyhow::Result;
use colored::Colorize;
use cost_simulator::{
    config::{self, ScenarioConfig},
    format::format_percent,
    models::RoleKind,
};
use std::io::{self, Write};
use std::path::Path;
use tracing::info;

/// Execute the config show command
///
/// Prints the effective scenario: defaults, file and environment merged.
/// Only the TOML goes to stdout so the output can be saved as a scenario file.
pub fn show(config_path: &Path) -> Result<()> {
    eprintln!("{}", "Loading scenario...".yellow());
    info!("Loading scenario for display");

    let scenario = config::load_scenario(config_path)?;

    eprintln!("{}", "Current Scenario:".green().bold());
    write_scenario(&mut io::stdout().lock(), &scenario)
}

fn write_scenario(out: &mut impl Write, scenario: &ScenarioConfig) -> Result<()> {
    out.write_all(scenario.to_toml()?.as_bytes())?;
    out.flush()?;
    Ok(())
}

/// Execute the config validate command
pub fn validate(config_path: &Path) -> Result<()> {
    println!("{}", "Validating scenario...".yellow());
    info!("Validating scenario file");

    let scenario = config::load_scenario(config_path)?;
    let params = scenario.to_parameters()?;

    println!("{}", "✓ Scenario is valid".green());
    println!();
    println!("{}", "Summary:".bold());
    println!(
        "  {}: {} × {} weeks ({} work days, {} months)",
        "Sprints".cyan(),
        params.sprint_count,
        params.sprint_duration_weeks,
        params.total_work_days(),
        params.total_months()
    );
    println!("  {}: {}", "Head count".cyan(), head_count(&params));
    println!(
        "  {}: {}",
        "Licensing".cyan(),
        if params.licensing.is_percentage_mode() {
            format!(
                "{} of one-off costs",
                format_percent(params.licensing.percent_of_one_off_costs)
            )
        } else {
            format!("{} users", params.licensing.user_count)
        }
    );
    println!(
        "  {}: {} ({} discount)",
        "Commitment".cyan(),
        params.commitment.term,
        format_percent(params.commitment.discount_percent)
    );
    println!("  {}: {}", "Currency".cyan(), params.currency);

    info!("Scenario validation successful");
    Ok(())
}

/// Total onsite plus offshore staff across all roles
fn head_count(params: &cost_simulator::ProjectParameters) -> u32 {
    RoleKind::ALL
        .iter()
        .map(|&role| {
            let staffing = params.role(role);
            staffing.onsite_count + staffing.offshore_count
        })
        .sum()
}
