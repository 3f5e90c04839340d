// Application settings
// Defaults, then an optional config.toml, then APP_* environment variables

use crate::{financing::FinancingSettings, valuation::ValuationSettings};
use anyhow::Result;
use config::{Config, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub server_address: String,
    // JSON catalog replacing the embedded one
    pub catalog_path: Option<String>,
    pub static_dir: String,
    pub query_cache_size: usize,
    #[serde(default)]
    pub financing: FinancingSettings,
    #[serde(default)]
    pub valuation: ValuationSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            server_address: "127.0.0.1:3000".to_string(),
            catalog_path: None,
            static_dir: "static".to_string(),
            query_cache_size: 256,
            financing: FinancingSettings::default(),
            valuation: ValuationSettings::default(),
        }
    }
}

impl Settings {
    pub fn new() -> Result<Self> {
        dotenv::dotenv().ok(); // Load .env file if present

        let builder = Config::builder()
            .set_default("server_address", "127.0.0.1:3000")?
            .set_default("static_dir", "static")?
            .set_default("query_cache_size", 256)?
            // Load from a configuration file (e.g., config.toml)
            .add_source(File::with_name("config").required(false))
            // Load from environment variables (e.g., APP_SERVER_ADDRESS, APP_FINANCING__DEFAULT_TERM_MONTHS)
            .add_source(Environment::with_prefix("APP").prefix_separator("_").separator("__"));

        let settings = builder.build()?.try_deserialize()?;
        Ok(settings)
    }
}
