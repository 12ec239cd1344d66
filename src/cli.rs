use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use anyhow::Result;
use crate::config::Config;
use crate::commands::{add, clear, configure, edit, remove, set, show};

#[derive(Parser)]
#[command(name = "pricesheet")]
#[command(about = "A pricing worksheet with per-point sums, markup and VAT")]
#[command(version)]
pub struct Cli {
    #[arg(short, long, value_name = "FILE", help = "Use a custom configuration file")]
    pub config: Option<PathBuf>,

    #[arg(long, value_name = "DIR", help = "Directory holding the saved worksheet (overrides config)")]
    pub data_dir: Option<PathBuf>,

    #[arg(short, long, help = "Enable debug logging")]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Commands {
    pub fn execute(self, config: Config) -> Result<()> {
        match self {
            Commands::Add(args) => add::handle_add_command(&config, &args)?,
            Commands::Remove(args) => remove::handle_remove_command(&config, &args)?,
            Commands::Set(args) => set::handle_set_command(&config, &args)?,
            Commands::Clear(args) => clear::handle_clear_command(&config, &args)?,
            Commands::Show(args) => show::handle_show_command(&config, &args)?,
            Commands::Edit => edit::handle_edit_command(&config)?,
            Commands::Config(args) => configure::handle_config_command(config, args.command)?,
        }
        Ok(())
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Append a new row
    Add(AddArgs),

    /// Remove a row
    #[command(alias = "rm")]
    Remove(RemoveArgs),

    /// Set one field of a row
    Set(SetArgs),

    /// Replace the worksheet with a single empty row
    Clear(ClearArgs),

    /// Show the worksheet and its totals
    Show(ShowArgs),

    /// Edit the worksheet interactively
    Edit,

    /// Configuration management
    Config(ConfigArgs),
}

#[derive(Args)]
pub struct AddArgs {
    #[arg(short, long)]
    pub name: Option<String>,

    #[arg(short, long, help = "Unit price")]
    pub price: Option<String>,

    #[arg(short, long, value_name = "Q0,Q1,..", help = "Comma-separated quantities for points 1-8")]
    pub qty: Option<String>,
}

#[derive(Args)]
pub struct RemoveArgs {
    #[arg(help = "Row ID or row number")]
    pub row: String,
}

#[derive(Args)]
pub struct SetArgs {
    #[arg(help = "Row ID or row number")]
    pub row: String,

    #[arg(help = "name, price, q0..q7 or p1..p8")]
    pub field: String,

    #[arg(help = "New value; numeric fields fall back to 0", allow_hyphen_values = true, default_value = "")]
    pub value: String,
}

#[derive(Args)]
pub struct ClearArgs {
    #[arg(short, long, help = "Skip the confirmation prompt")]
    pub force: bool,
}

#[derive(Args)]
pub struct ShowArgs {
    #[arg(short, long, value_enum, default_value_t = ShowFormat::Table)]
    pub format: ShowFormat,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShowFormat {
    Table,
    Json,
    Totals,
}

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: Option<ConfigCommands>,
}

#[derive(Subcommand, Clone)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Print the configuration file path
    Path,

    /// Reset configuration to defaults
    Reset,
}
