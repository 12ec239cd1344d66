//! Interactive worksheet session.
//!
//! Structural changes (add, remove, clear) redraw the whole grid. Field edits
//! only print the affected row total and the grand total.

use crate::commands::{open_worksheet, resolve_row};
use crate::config::Config;
use crate::core::data::{Field, RowId};
use crate::core::traits::{Confirmation, KeyValueStore};
use crate::utils::error::{report_error, AppError, AppResult};
use crate::utils::format::format_integer;
use crate::utils::interactive::{clear_screen, prompt_input, TerminalConfirm};
use crate::utils::output::{OutputStyle, WorksheetView};
use crate::worksheet::Worksheet;

const HELP: &str = "\
Commands:
  add                        append an empty row
  rm <row>                   remove a row (id or number)
  set <row> <field> <value>  edit name, price, q0..q7 or p1..p8
  clear                      remove every row (asks first)
  show                       redraw the worksheet
  help                       show this help
  quit                       leave the session";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    Add,
    Remove(String),
    Set { row: String, field: Field, value: String },
    Clear,
    Show,
    Help,
    Quit,
}

impl SessionCommand {
    pub fn parse(line: &str) -> AppResult<Self> {
        let line = line.trim();
        let (verb, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim_start();

        match verb.to_lowercase().as_str() {
            "" | "show" | "ls" => Ok(SessionCommand::Show),
            "add" | "a" => Ok(SessionCommand::Add),
            "rm" | "remove" | "del" => {
                if rest.is_empty() {
                    return Err(AppError::Input("Usage: rm <row>".to_string()));
                }
                Ok(SessionCommand::Remove(rest.to_string()))
            }
            "set" | "s" => {
                let (row, after_row) = next_token(rest);
                let (field, value) = next_token(after_row);
                if row.is_empty() || field.is_empty() {
                    return Err(AppError::Input("Usage: set <row> <field> <value>".to_string()));
                }
                Ok(SessionCommand::Set {
                    row: row.to_string(),
                    field: field.parse()?,
                    value: value.to_string(),
                })
            }
            "clear" => Ok(SessionCommand::Clear),
            "help" | "h" | "?" => Ok(SessionCommand::Help),
            "quit" | "exit" | "q" => Ok(SessionCommand::Quit),
            other => Err(AppError::Input(format!(
                "Unknown command '{}', type 'help' for a list",
                other
            ))),
        }
    }
}

/// Split off the first whitespace-delimited token, skipping any run of
/// whitespace after it
fn next_token(text: &str) -> (&str, &str) {
    let text = text.trim_start();
    match text.split_once(char::is_whitespace) {
        Some((token, rest)) => (token, rest.trim_start()),
        None => (text, ""),
    }
}

/// What the screen needs after a session command ran
#[derive(Debug, Clone, PartialEq, Eq)]
enum Refresh {
    /// Rows were added, removed or reset
    Grid,
    /// One row's fields changed
    Row(RowId),
    Help,
    /// A clear was declined
    Unchanged,
    Nothing,
}

pub fn handle_edit_command(config: &Config) -> AppResult<()> {
    let mut sheet = open_worksheet(config)?;
    redraw(&sheet, config)?;
    println!("{}", OutputStyle::muted("Type 'help' for commands."));

    loop {
        let Some(line) = prompt_input(&format!("{} ", OutputStyle::label(">")))? else {
            break;
        };

        let command = match SessionCommand::parse(&line) {
            Ok(command) => command,
            Err(e) => {
                report_error(&e);
                continue;
            }
        };

        if command == SessionCommand::Quit {
            break;
        }

        match apply(&mut sheet, command, &mut TerminalConfirm) {
            Ok(refresh) => render(&sheet, &refresh, config)?,
            // storage failures end the session; input mistakes do not
            Err(e @ AppError::Input(_)) => report_error(&e),
            Err(e) => return Err(e),
        }
    }
    Ok(())
}

fn apply<S: KeyValueStore>(
    sheet: &mut Worksheet<S>,
    command: SessionCommand,
    confirm: &mut dyn Confirmation,
) -> AppResult<Refresh> {
    match command {
        SessionCommand::Add => {
            sheet.add_row()?;
            Ok(Refresh::Grid)
        }
        SessionCommand::Remove(row) => {
            let id = resolve_row(sheet, &row)?;
            sheet.remove_row(&id)?;
            Ok(Refresh::Grid)
        }
        SessionCommand::Set { row, field, value } => {
            let id = resolve_row(sheet, &row)?;
            sheet.edit(&id, field, &value)?;
            Ok(Refresh::Row(id))
        }
        SessionCommand::Clear => {
            if sheet.clear_all(confirm)? {
                Ok(Refresh::Grid)
            } else {
                Ok(Refresh::Unchanged)
            }
        }
        SessionCommand::Show => Ok(Refresh::Grid),
        SessionCommand::Quit => Ok(Refresh::Nothing),
        SessionCommand::Help => Ok(Refresh::Help),
    }
}

fn render<S: KeyValueStore>(sheet: &Worksheet<S>, refresh: &Refresh, config: &Config) -> AppResult<()> {
    match refresh {
        Refresh::Grid => redraw(sheet, config)?,
        Refresh::Row(id) => print_edit_summary(sheet, id, config),
        Refresh::Help => println!("{}", HELP),
        Refresh::Unchanged => println!("{}", OutputStyle::muted("Worksheet left unchanged.")),
        Refresh::Nothing => {}
    }
    Ok(())
}

fn redraw<S: KeyValueStore>(sheet: &Worksheet<S>, config: &Config) -> AppResult<()> {
    clear_screen()?;
    let totals = sheet.totals();
    WorksheetView::new(sheet.ledger(), &totals, &config.currency()).print();
    Ok(())
}

fn print_edit_summary<S: KeyValueStore>(sheet: &Worksheet<S>, id: &RowId, config: &Config) {
    let totals = sheet.totals();
    let Some(position) = sheet.ledger().rows().iter().position(|r| &r.id == id) else {
        return;
    };
    println!(
        "  Row {} total: {}   Grand total: {}",
        position + 1,
        OutputStyle::number(&format_integer(totals.row_totals[position])),
        OutputStyle::total(&config.currency().format(totals.grand_total)),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::data::{Row, SequentialIds};
    use crate::core::traits::FixedAnswer;
    use crate::storage::{self, MemoryStore};

    fn session() -> Worksheet<MemoryStore> {
        Worksheet::open(MemoryStore::new(), Box::new(SequentialIds::new())).unwrap()
    }

    fn saved(sheet: &Worksheet<MemoryStore>) -> Vec<Row> {
        let mut ids = SequentialIds::new();
        storage::load(sheet.store(), &mut ids)
            .unwrap()
            .map(|ledger| ledger.rows().to_vec())
            .unwrap_or_default()
    }

    fn run(sheet: &mut Worksheet<MemoryStore>, line: &str) -> AppResult<Refresh> {
        apply(sheet, SessionCommand::parse(line)?, &mut FixedAnswer(true))
    }

    #[test]
    fn test_parse_simple_commands() {
        assert_eq!(SessionCommand::parse("add").unwrap(), SessionCommand::Add);
        assert_eq!(SessionCommand::parse("  ").unwrap(), SessionCommand::Show);
        assert_eq!(SessionCommand::parse("CLEAR").unwrap(), SessionCommand::Clear);
        assert_eq!(SessionCommand::parse("q").unwrap(), SessionCommand::Quit);
        assert_eq!(SessionCommand::parse("?").unwrap(), SessionCommand::Help);
    }

    #[test]
    fn test_parse_remove() {
        assert_eq!(
            SessionCommand::parse("rm 3").unwrap(),
            SessionCommand::Remove("3".to_string())
        );
        assert!(SessionCommand::parse("rm").is_err());
    }

    #[test]
    fn test_parse_set_keeps_spaces_in_value() {
        assert_eq!(
            SessionCommand::parse("set 1 name Red clay bricks").unwrap(),
            SessionCommand::Set {
                row: "1".to_string(),
                field: Field::Name,
                value: "Red clay bricks".to_string(),
            }
        );
        assert_eq!(
            SessionCommand::parse("set 2 p3").unwrap(),
            SessionCommand::Set {
                row: "2".to_string(),
                field: Field::Quantity(2),
                value: String::new(),
            }
        );
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(SessionCommand::parse("set 1").is_err());
        assert!(SessionCommand::parse("set 1 colour red").is_err());
        assert!(SessionCommand::parse("frobnicate").is_err());
    }

    #[test]
    fn test_parse_set_tolerates_repeated_spaces() {
        assert_eq!(
            SessionCommand::parse("set 1  name x").unwrap(),
            SessionCommand::Set {
                row: "1".to_string(),
                field: Field::Name,
                value: "x".to_string(),
            }
        );
        assert_eq!(
            SessionCommand::parse("set\t2 \t price   12.5").unwrap(),
            SessionCommand::Set {
                row: "2".to_string(),
                field: Field::UnitPrice,
                value: "12.5".to_string(),
            }
        );
    }

    #[test]
    fn test_session_add_redraws_and_persists() {
        let mut sheet = session();
        assert_eq!(run(&mut sheet, "add").unwrap(), Refresh::Grid);

        assert_eq!(sheet.ledger().len(), 2);
        assert_eq!(saved(&sheet), sheet.ledger().rows());
    }

    #[test]
    fn test_session_remove_last_row_leaves_default_row() {
        let mut sheet = session();
        run(&mut sheet, "set 1 price 40").unwrap();
        let original = sheet.ledger().rows()[0].id.clone();

        assert_eq!(run(&mut sheet, "rm 1").unwrap(), Refresh::Grid);

        let rows = sheet.ledger().rows();
        assert_eq!(rows.len(), 1);
        assert_ne!(rows[0].id, original);
        assert_eq!(rows[0], Row::new(rows[0].id.clone()));
        assert_eq!(saved(&sheet), rows);
    }

    #[test]
    fn test_session_set_updates_row_and_store() {
        let mut sheet = session();
        run(&mut sheet, "set 1 price 100").unwrap();
        let refresh = run(&mut sheet, "set 1 p1 2").unwrap();

        let id = sheet.ledger().rows()[0].id.clone();
        assert_eq!(refresh, Refresh::Row(id));
        assert_eq!(sheet.totals().base_total, 200.0);
        assert_eq!(saved(&sheet)[0].quantities[0], 2.0);
    }

    #[test]
    fn test_session_set_unknown_row_is_input_error() {
        let mut sheet = session();
        let err = run(&mut sheet, "set 5 price 9").unwrap_err();

        assert!(matches!(err, AppError::Input(_)));
        assert!(saved(&sheet).is_empty());
    }

    #[test]
    fn test_session_clear_follows_confirmation() {
        let mut sheet = session();
        run(&mut sheet, "add").unwrap();

        let declined = apply(&mut sheet, SessionCommand::Clear, &mut FixedAnswer(false)).unwrap();
        assert_eq!(declined, Refresh::Unchanged);
        assert_eq!(sheet.ledger().len(), 2);

        assert_eq!(run(&mut sheet, "clear").unwrap(), Refresh::Grid);
        assert_eq!(sheet.ledger().len(), 1);
        assert_eq!(saved(&sheet), sheet.ledger().rows());
    }

    #[test]
    fn test_session_show_and_help_change_nothing() {
        let mut sheet = session();
        assert_eq!(run(&mut sheet, "show").unwrap(), Refresh::Grid);
        assert_eq!(run(&mut sheet, "help").unwrap(), Refresh::Help);
        assert!(saved(&sheet).is_empty());
    }
}
