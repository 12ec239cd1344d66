use crate::utils::error::{AppError, AppResult};
use crate::utils::format::{CurrencyFormat, DEFAULT_CURRENCY_SYMBOL};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const APP_DIR: &str = "pricesheet";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub general: GeneralConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Directory holding the saved worksheet
    pub data_dir: PathBuf,
    #[serde(default = "default_color")]
    pub color: bool,
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
}

fn default_color() -> bool {
    true
}

fn default_currency_symbol() -> String {
    DEFAULT_CURRENCY_SYMBOL.to_string()
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR);

        Self {
            general: GeneralConfig {
                data_dir,
                color: default_color(),
                currency_symbol: default_currency_symbol(),
            },
        }
    }
}

impl Config {
    pub fn load() -> AppResult<Self> {
        Self::load_custom(&Self::config_file_path())
    }

    /// Load configuration from `config_path`, writing defaults there if it does not exist
    pub fn load_custom(config_path: &Path) -> AppResult<Self> {
        if !config_path.exists() {
            let default_config = Config::default();
            default_config.save_to(config_path)?;
            tracing::info!(path = %config_path.display(), "created default configuration");
            return Ok(default_config);
        }

        let content =
            std::fs::read_to_string(config_path).map_err(|e| AppError::Io(e.to_string()))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| AppError::Config(format!("Failed to parse config file: {}", e)))?;

        config.validate()?;
        tracing::debug!(path = %config_path.display(), "configuration loaded");
        Ok(config)
    }

    pub fn validate(&self) -> AppResult<()> {
        if self.general.data_dir.as_os_str().is_empty() {
            return Err(AppError::Config("Data directory cannot be empty".to_string()));
        }

        if self.general.currency_symbol.trim().is_empty() {
            return Err(AppError::Config(
                "Currency symbol cannot be empty".to_string(),
            ));
        }

        Ok(())
    }

    pub fn save(&self) -> AppResult<()> {
        self.save_to(&Self::config_file_path())
    }

    pub fn save_to(&self, config_path: &Path) -> AppResult<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| AppError::Io(e.to_string()))?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| AppError::Config(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(config_path, content).map_err(|e| AppError::Io(e.to_string()))?;

        Ok(())
    }

    pub fn currency(&self) -> CurrencyFormat {
        CurrencyFormat::with_symbol(self.general.currency_symbol.clone())
    }

    pub fn config_file_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR)
            .join("config.toml")
    }
}
