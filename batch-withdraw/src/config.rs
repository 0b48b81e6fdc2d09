use crate::error::ConfigError;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::Path;

pub const DEFAULT_BASE_URL: &str = "https://api.binance.com";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub token: String,
    pub network: String,
    pub amount: Amount,
    #[serde(default, alias = "randomizeAmount")]
    pub randomize_amount: bool,
    /// Percent the randomized amount may fall below `amount`.
    #[serde(default)]
    pub spread: f64,
    pub delay: Delay,
    pub apikey: String,
    pub secret: String,
    #[serde(default)]
    pub wallet_policy: WalletPolicy,
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

/// Seconds to wait between a submission and the next request.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Delay {
    pub min: u64,
    pub max: u64,
}

/// Either a plain number or a string such as `"0,5"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Amount {
    Number(f64),
    Text(String),
}

impl Amount {
    pub fn nominal(&self) -> Result<f64, ConfigError> {
        let value = match self {
            Amount::Number(n) => *n,
            Amount::Text(s) => s
                .trim()
                .replace(',', ".")
                .parse::<f64>()
                .map_err(|_| ConfigError::InvalidAmount(s.clone()))?,
        };

        if value.is_finite() && value > 0.0 {
            Ok(value)
        } else {
            Err(ConfigError::InvalidAmount(self.to_string()))
        }
    }
}

impl std::fmt::Display for Amount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Amount::Number(n) => write!(f, "{}", n),
            Amount::Text(s) => write!(f, "{}", s),
        }
    }
}

/// What to do with wallets that fail the network address check.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WalletPolicy {
    /// Log the invalid wallets and keep going.
    #[default]
    Warn,
    /// Abort the run before the first submission.
    Strict,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path).context("Failed to open config file")?;
        let config: Config =
            serde_yaml::from_reader(file).context("Failed to parse config file")?;
        config.validate().context("Invalid configuration")?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.token.trim().is_empty() {
            return Err(ConfigError::Empty("token"));
        }
        if self.network.trim().is_empty() {
            return Err(ConfigError::Empty("network"));
        }
        if !(0.0..100.0).contains(&self.spread) {
            return Err(ConfigError::Spread(self.spread));
        }
        if self.delay.min > self.delay.max {
            return Err(ConfigError::Delay {
                min: self.delay.min,
                max: self.delay.max,
            });
        }
        self.amount.nominal()?;
        Ok(())
    }

    pub fn coin(&self) -> String {
        self.token.trim().to_uppercase()
    }

    pub fn network_name(&self) -> String {
        self.network.trim().to_uppercase()
    }
}

pub const SAMPLE_CONFIG: &str = r#"# Coin to withdraw and the network to withdraw it on.
# An unknown network aborts the run and lists the available ones.
token: "ETH"
network: "ARBITRUM"

# Amount per wallet. Strings with a decimal comma ("0,0009") are accepted.
amount: 0.0009

# When true each amount is lowered by a random percent up to `spread`.
randomize_amount: true
spread: 0.5

# Seconds to wait after each withdrawal.
delay:
  min: 5
  max: 20

# "warn" logs wallets that do not match the network format, "strict" aborts.
wallet_policy: warn

apikey: "YOUR_API_KEY"
secret: "YOUR_API_SECRET"
"#;
