use crate::cli::RemoveArgs;
use crate::commands::open_worksheet;
use crate::config::Config;
use crate::utils::error::{handle_flow, AppResult, FlowResult};

pub fn handle_remove_command(config: &Config, args: &RemoveArgs) -> AppResult<()> {
    let mut sheet = open_worksheet(config)?;

    let Some(id) = sheet.resolve(&args.row) else {
        handle_flow(FlowResult::NotFound {
            item_type: "Row".to_string(),
            search_term: args.row.clone(),
        });
        return Ok(());
    };

    sheet.remove_row(&id)?;
    handle_flow(FlowResult::Success(format!("Row {} removed", id)));

    let totals = sheet.totals();
    println!(
        "{} row(s) left, grand total {}",
        sheet.ledger().len(),
        config.currency().format(totals.grand_total)
    );
    Ok(())
}
