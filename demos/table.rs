//! Adaptive table demo.
//!
//! Run with: cargo run --example table
//! Try a narrow terminal, or `COLUMNS=50 cargo run --example table`.
//! Pass `csv`, `tsv` or `plain` as the first argument to export instead.

use adaptive_table::prelude::*;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let format = match std::env::args().nth(1) {
        Some(name) => name.parse::<TableFormat>()?,
        None => TableFormat::Table,
    };

    let mut table = AdaptiveTable::builder()
        .box_style("rounded")
        .format(format)
        .build(Console::stdout());

    table.set_headers([vec!["Service", "Status", "Notes"]])?;
    table.add_row(vec![
        "api-gateway",
        "<info>running</info>",
        "Serving traffic on all three regions with no errors in the last hour.",
    ])?;
    table.add_row(vec![
        "billing-worker",
        "<error>stopped</error>",
        "<comment>Crashed after the nightly migration; restart is blocked until \
         the schema lock is released.</comment>",
    ])?;
    table.add_row(Row::Separator)?;
    table.add_row(vec![
        Cell::from(TableCell::new("scheduler").no_wrap()),
        Cell::from("<question>unknown</question>"),
        Cell::from("Health checks time out; <options=bold>investigate the network policy</> first."),
    ])?;
    table.add_row(Row::new(vec![Cell::from(
        TableCell::new("<fg=cyan>3 services, 1 healthy</>").colspan(3),
    )]))?;

    table.render()?;
    Ok(())
}
