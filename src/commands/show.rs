use crate::cli::{ShowArgs, ShowFormat};
use crate::commands::open_worksheet;
use crate::config::Config;
use crate::storage;
use crate::utils::error::AppResult;
use crate::utils::output::WorksheetView;

pub fn handle_show_command(config: &Config, args: &ShowArgs) -> AppResult<()> {
    let sheet = open_worksheet(config)?;

    match args.format {
        ShowFormat::Json => {
            println!("{}", storage::to_json_pretty(sheet.ledger())?);
        }
        ShowFormat::Table | ShowFormat::Totals => {
            let totals = sheet.totals();
            let view = WorksheetView::new(sheet.ledger(), &totals, &config.currency());
            if args.format == ShowFormat::Table {
                view.print();
            } else {
                view.print_totals();
            }
        }
    }
    Ok(())
}
