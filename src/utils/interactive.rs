use crate::core::traits::Confirmation;
use crate::utils::error::AppResult;
use crossterm::{cursor, execute, terminal::{self, ClearType}};
use std::io::{self, BufRead, Write};

/// Print `prompt` and read one trimmed line from stdin. Returns `None` at end of input.
pub fn prompt_input(prompt: &str) -> AppResult<Option<String>> {
    print!("{}", prompt);
    io::stdout().flush()?;

    let mut input = String::new();
    let read = io::stdin().lock().read_line(&mut input)?;
    if read == 0 {
        return Ok(None);
    }

    Ok(Some(input.trim().to_string()))
}

/// Interpret a yes/no answer; `None` means the answer was not understood
pub fn parse_yes_no(answer: &str) -> Option<bool> {
    match answer.trim().to_lowercase().as_str() {
        "y" | "yes" => Some(true),
        "n" | "no" | "" => Some(false),
        _ => None,
    }
}

pub fn prompt_yes_no(prompt: &str) -> AppResult<bool> {
    loop {
        let Some(input) = prompt_input(&format!("{} [y/N]: ", prompt))? else {
            return Ok(false);
        };
        match parse_yes_no(&input) {
            Some(answer) => return Ok(answer),
            None => println!("Please enter 'y' or 'n'"),
        }
    }
}

/// Asks on the terminal before destructive actions
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalConfirm;

impl Confirmation for TerminalConfirm {
    fn confirm(&mut self, message: &str) -> AppResult<bool> {
        prompt_yes_no(message)
    }
}

/// Clear the terminal and move the cursor to the top-left corner
pub fn clear_screen() -> AppResult<()> {
    let mut stdout = io::stdout();
    execute!(stdout, terminal::Clear(ClearType::All), cursor::MoveTo(0, 0))?;
    Ok(())
}
