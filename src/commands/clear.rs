use crate::cli::ClearArgs;
use crate::commands::open_worksheet;
use crate::config::Config;
use crate::core::traits::{Confirmation, FixedAnswer};
use crate::utils::error::{handle_flow, AppResult, FlowResult};
use crate::utils::interactive::TerminalConfirm;

pub fn handle_clear_command(config: &Config, args: &ClearArgs) -> AppResult<()> {
    let mut sheet = open_worksheet(config)?;

    let mut confirm: Box<dyn Confirmation> = if args.force {
        Box::new(FixedAnswer(true))
    } else {
        Box::new(TerminalConfirm)
    };

    if sheet.clear_all(confirm.as_mut())? {
        handle_flow(FlowResult::Success("Worksheet cleared".to_string()));
    } else {
        handle_flow(FlowResult::Cancelled("Worksheet left unchanged".to_string()));
    }
    Ok(())
}
