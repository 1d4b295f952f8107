use anyhow::Result;
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};
use cost_simulator::{
    compute_cost,
    config::{self, validate_scenario, ScenarioConfig},
    format::format_percent,
    report::BreakdownReport,
};
use std::path::Path;
use tracing::info;

use crate::cli::{EstimateArgs, OutputFormat};

/// Execute the estimate command
///
/// Loads the scenario, applies command-line overrides and prints the breakdown
pub fn execute(config_path: &Path, args: &EstimateArgs) -> Result<()> {
    let mut scenario = config::load_scenario(config_path)?;
    apply_overrides(&mut scenario, args)?;

    let params = scenario.to_parameters()?;
    let result = compute_cost(&params);
    info!(
        final_total = result.final_total,
        one_off_total = result.one_off_total,
        currency = %params.currency,
        "Estimate computed"
    );

    let report = BreakdownReport::new(&params, &result);
    match args.format {
        OutputFormat::Json => println!("{}", report.to_json()?),
        OutputFormat::Table => print_report(&report),
    }

    Ok(())
}

/// Apply command-line overrides and re-validate the merged scenario
fn apply_overrides(scenario: &mut ScenarioConfig, args: &EstimateArgs) -> Result<()> {
    if let Some(sprints) = args.sprints {
        scenario.project.sprints = sprints;
    }
    if let Some(weeks) = args.sprint_weeks {
        scenario.project.sprint_duration_weeks = weeks;
    }
    if let Some(currency) = args.currency {
        scenario.project.currency = currency;
    }
    if let Some(years) = args.commitment {
        scenario.commitment.years = years;
    }
    if let Some(markup) = args.markup {
        scenario.adjustments.markup_percent = markup;
    }
    if let Some(discount) = args.discount {
        scenario.adjustments.additional_discount_percent = discount;
    }
    if let Some(percent) = args.license_percent {
        scenario.licensing.percent_of_one_off = percent;
    }

    validate_scenario(scenario)?;
    Ok(())
}

fn print_report(report: &BreakdownReport) {
    println!(
        "{} {} work days, {} months ({})",
        "Duration:".bold(),
        report.total_work_days,
        report.total_months,
        report.currency
    );
    println!();

    let mut one_off = Table::new();
    one_off
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    one_off.set_header(vec![
        Cell::new("ONE-OFF COSTS").fg(Color::Cyan),
        Cell::new("AMOUNT").fg(Color::Cyan),
    ]);
    for role in &report.roles {
        one_off.add_row(vec![Cell::new(&role.role), Cell::new(&role.formatted)]);
    }
    one_off.add_row(vec![
        Cell::new("Total One-off").fg(Color::Yellow),
        Cell::new(report.money(report.one_off_total)).fg(Color::Yellow),
    ]);
    println!("{}", one_off);

    let mut running = Table::new();
    running
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    running.set_header(vec![
        Cell::new("RUNNING COSTS").fg(Color::Cyan),
        Cell::new("AMOUNT").fg(Color::Cyan),
    ]);
    running.add_row(vec![
        Cell::new(format!("Licensing ({})", report.license_mode)),
        Cell::new(report.money(report.license_cost)),
    ]);
    running.add_row(vec![
        Cell::new("Managed Service"),
        Cell::new(report.money(report.managed_service_cost)),
    ]);
    running.add_row(vec![
        Cell::new("Subtotal").fg(Color::Yellow),
        Cell::new(report.money(report.subtotal)).fg(Color::Yellow),
    ]);
    running.add_row(vec![
        Cell::new("Markup"),
        Cell::new(format_percent(report.markup_percent)),
    ]);
    running.add_row(vec![
        Cell::new(format!(
            "Discounts (additional {} + {}-year commitment {})",
            format_percent(report.additional_discount_percent),
            report.commitment_years,
            format_percent(report.commitment_discount_percent)
        )),
        Cell::new(format!("{:.1}%", report.combined_discount_percent)),
    ]);
    println!("{}", running);

    println!();
    println!(
        "{} {}",
        "Grand Total:".bold(),
        report.grand_total.green().bold()
    );
}
