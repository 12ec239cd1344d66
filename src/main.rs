use anyhow::Result;
use clap::Parser;

use pricesheet::cli::Cli;
use pricesheet::config::Config;
use pricesheet::logging;
use pricesheet::utils::error::{report_error, AppError};

fn main() {
    if let Err(err) = run() {
        match err.downcast_ref::<AppError>() {
            Some(app_err) => report_error(app_err),
            None => eprintln!("❌ {:#}", err),
        }
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init_subscriber(logging::level_for(cli.debug));

    let mut config = match &cli.config {
        Some(config_path) => Config::load_custom(config_path)?,
        None => Config::load()?,
    };

    if let Some(data_dir) = cli.data_dir {
        config.general.data_dir = data_dir;
    }

    if !config.general.color {
        colored::control::set_override(false);
    }

    tracing::debug!(data_dir = %config.general.data_dir.display(), "starting");
    cli.command.execute(config)
}
