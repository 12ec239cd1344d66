use crate::cli::SetArgs;
use crate::commands::open_worksheet;
use crate::config::Config;
use crate::core::data::Field;
use crate::utils::error::{handle_flow, AppResult, FlowResult};
use crate::utils::format::format_integer;
use crate::utils::output::OutputStyle;

pub fn handle_set_command(config: &Config, args: &SetArgs) -> AppResult<()> {
    let field: Field = args.field.parse()?;
    let mut sheet = open_worksheet(config)?;

    let Some(id) = sheet.resolve(&args.row) else {
        handle_flow(FlowResult::NotFound {
            item_type: "Row".to_string(),
            search_term: args.row.clone(),
        });
        return Ok(());
    };

    sheet.edit(&id, field, &args.value)?;

    let totals = sheet.totals();
    let position = sheet
        .ledger()
        .rows()
        .iter()
        .position(|r| r.id == id)
        .unwrap_or_default();

    OutputStyle::print_field_colored(
        &format!("Row {} total", position + 1),
        &format_integer(totals.row_totals[position]),
        OutputStyle::number,
    );
    OutputStyle::print_field_colored(
        "Grand total",
        &config.currency().format(totals.grand_total),
        OutputStyle::total,
    );
    Ok(())
}
