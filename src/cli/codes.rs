use anyhow::Result;
use comfy_table::Cell;

use super::ui;
use crate::converter::CurrencyConverter;
use crate::provider::RateSource;

/// Lists the currencies the live provider can quote, with catalog names.
pub fn run<S: RateSource>(converter: &CurrencyConverter<S>) -> Result<()> {
    let currencies = converter.available_currencies();

    if currencies.is_empty() {
        println!(
            "{}",
            ui::style_text(
                "The provider exposes no quotable currencies.",
                ui::StyleType::Subtle
            )
        );
        return Ok(());
    }

    let mut table = ui::new_styled_table();
    table.set_header(vec![ui::header_cell("Code"), ui::header_cell("Currency")]);
    for (code, name) in &currencies {
        table.add_row(vec![Cell::new(code), Cell::new(name)]);
    }

    println!(
        "\n{}",
        ui::style_text("Available currencies", ui::StyleType::Title)
    );
    println!("{table}");
    Ok(())
}
