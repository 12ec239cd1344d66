use crate::cli::AddArgs;
use crate::commands::open_worksheet;
use crate::config::Config;
use crate::core::data::{Field, POINTS};
use crate::utils::error::{AppError, AppResult};
use crate::utils::output::{print_success, OutputStyle};
use crate::utils::format::format_integer;

pub fn handle_add_command(config: &Config, args: &AddArgs) -> AppResult<()> {
    let edits = build_edits(args)?;

    let mut sheet = open_worksheet(config)?;
    let id = sheet.add_row()?;
    if !edits.is_empty() {
        sheet.edit_many(&id, &edits)?;
    }

    let row_number = sheet.ledger().len();
    print_success(&format!("Row {} added", row_number));
    OutputStyle::print_field_colored("ID", id.as_str(), OutputStyle::muted);

    let totals = sheet.totals();
    if let Some(total) = totals.row_totals.last() {
        OutputStyle::print_field_colored("Row total", &format_integer(*total), OutputStyle::total);
    }
    OutputStyle::print_field_colored(
        "Grand total",
        &config.currency().format(totals.grand_total),
        OutputStyle::total,
    );
    Ok(())
}

/// Turn the optional `add` flags into field edits for the new row
pub fn build_edits(args: &AddArgs) -> AppResult<Vec<(Field, String)>> {
    let mut edits = Vec::new();

    if let Some(name) = &args.name {
        edits.push((Field::Name, name.clone()));
    }
    if let Some(price) = &args.price {
        edits.push((Field::UnitPrice, price.clone()));
    }
    if let Some(qty) = &args.qty {
        let values: Vec<&str> = qty.split(',').collect();
        if values.len() > POINTS {
            return Err(AppError::Input(format!(
                "At most {} quantities can be given, got {}",
                POINTS,
                values.len()
            )));
        }
        for (i, value) in values.into_iter().enumerate() {
            edits.push((Field::Quantity(i), value.to_string()));
        }
    }

    Ok(edits)
}
