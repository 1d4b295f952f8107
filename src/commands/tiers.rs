use anyhow::Result;
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};
use cost_simulator::{config, format::format_percent};
use std::path::Path;
use tracing::info;

/// Execute the tiers command
///
/// Lists every commitment tier with its configured discount
pub fn execute(config_path: &Path) -> Result<()> {
    let scenario = config::load_scenario(config_path)?;
    let selector = scenario.commitment_selector()?;
    info!(selected = selector.selected().years(), "Listing commitment tiers");

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("TERM").fg(Color::Cyan),
        Cell::new("DISCOUNT").fg(Color::Cyan),
        Cell::new("SELECTED").fg(Color::Cyan),
    ]);

    for (term, discount) in selector.tiers() {
        let selected = term == selector.selected();
        table.add_row(vec![
            Cell::new(term.label()),
            Cell::new(format_percent(discount)),
            if selected {
                Cell::new("✓").fg(Color::Green)
            } else {
                Cell::new("")
            },
        ]);
    }

    println!("{}", table);
    println!(
        "{}",
        "Discounts can be adjusted per tier in [commitment.discounts] (0-20%, step 0.5)".dimmed()
    );
    Ok(())
}
