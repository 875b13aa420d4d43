//! Configuration for the journal

use serde::{Deserialize, Serialize};

/// Journal configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Human-readable name for this ledger
    pub ledger_name: String,

    /// Amount validation configuration
    pub amount: AmountConfig,

    /// Chart-of-accounts configuration
    pub chart: ChartConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ledger_name: "general-journal".to_string(),
            amount: AmountConfig::default(),
            chart: ChartConfig::default(),
        }
    }
}

/// Amount validation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmountConfig {
    /// Maximum fraction digits accepted on entry amounts
    pub scale: u32,
}

impl Default for AmountConfig {
    fn default() -> Self {
        Self {
            scale: 2, // currency cents
        }
    }
}

/// Chart-of-accounts configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartConfig {
    /// Seed the standard chart when the ledger is constructed
    pub seed_on_open: bool,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            seed_on_open: false,
        }
    }
}

impl Config {
    /// Load from file
    pub fn from_file(path: impl AsRef<std::path::Path>) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| crate::Error::Config(format!("Failed to parse config: {}", e)))?;
        Ok(config)
    }

    /// Load from environment variables
    pub fn from_env() -> crate::Result<Self> {
        let mut config = Config::default();

        if let Ok(name) = std::env::var("JOURNAL_LEDGER_NAME") {
            config.ledger_name = name;
        }

        if let Ok(scale) = std::env::var("JOURNAL_AMOUNT_SCALE") {
            config.amount.scale = scale
                .parse()
                .map_err(|e| crate::Error::Config(format!("Invalid JOURNAL_AMOUNT_SCALE: {}", e)))?;
        }

        if let Ok(seed) = std::env::var("JOURNAL_SEED_CHART") {
            config.chart.seed_on_open = matches!(seed.as_str(), "1" | "true" | "yes");
        }

        Ok(config)
    }
}
