use crate::cli::ConfigCommands;
use crate::config::Config;
use crate::storage::{FileStore, STORAGE_KEY};
use crate::utils;
use crate::utils::error::AppResult;

pub fn handle_config_command(config: Config, command: Option<ConfigCommands>) -> AppResult<()> {
    match command {
        Some(ConfigCommands::Show) => handle_show_command(&config),
        Some(ConfigCommands::Path) => {
            println!("{}", Config::config_file_path().display());
            Ok(())
        }
        Some(ConfigCommands::Reset) => handle_reset_command(),
        None => handle_config_help(),
    }
}

fn handle_show_command(config: &Config) -> AppResult<()> {
    let store = FileStore::new(&config.general.data_dir);

    println!("⚙️  Pricesheet Configuration");
    println!("===========================");
    println!("General:");
    println!("  Data dir: {}", config.general.data_dir.display());
    println!("  Worksheet file: {}", store.path_for(STORAGE_KEY).display());
    println!("  Color: {}", config.general.color);
    println!("  Currency symbol: {}", config.general.currency_symbol);
    Ok(())
}

fn handle_reset_command() -> AppResult<()> {
    if utils::prompt_yes_no("Are you sure you want to reset configuration to defaults? This will overwrite your current settings.")? {
        Config::default().save()?;
        utils::print_success("Configuration reset to defaults");
    } else {
        println!("Configuration reset cancelled.");
    }
    Ok(())
}

fn handle_config_help() -> AppResult<()> {
    println!("Configuration commands:");
    println!("  pricesheet config show   Show current configuration");
    println!("  pricesheet config path   Print the configuration file path");
    println!("  pricesheet config reset  Reset configuration to defaults");
    Ok(())
}
