use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};
use cost_simulator::models::Currency;

/// Execute the currencies command
pub fn execute() {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("CODE").fg(Color::Cyan),
        Cell::new("SYMBOL").fg(Color::Cyan),
        Cell::new("REFERENCE RATE (USD)").fg(Color::Cyan),
    ]);

    for currency in Currency::ALL {
        table.add_row(vec![
            Cell::new(currency.code()),
            Cell::new(currency.symbol()),
            Cell::new(currency.reference_rate()),
        ]);
    }

    println!("{}", table);
    println!(
        "{}",
        "Amounts are never converted: the currency only changes the symbol shown.".dimmed()
    );
}
