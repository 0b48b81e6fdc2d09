use thiserror::Error;

/// Failures of a single exchange request. Returned to the caller, never swallowed.
#[derive(Debug, Error)]
pub enum ExchangeError {
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Exchange rejected request ({status}, code {code}): {msg}")]
    Api { status: u16, code: i64, msg: String },

    #[error("Unexpected response ({status}): {body}")]
    Http { status: u16, body: String },

    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid amount {0:?}")]
    InvalidAmount(String),

    #[error("Field `{0}` must not be empty")]
    Empty(&'static str),

    #[error("Spread must be within [0, 100), got {0}")]
    Spread(f64),

    #[error("Delay min ({min}s) is greater than max ({max}s)")]
    Delay { min: u64, max: u64 },
}

/// Conditions that abort a withdrawal run before or between submissions.
#[derive(Debug, Error)]
pub enum WithdrawError {
    #[error("Coin {0} not found in account information")]
    UnknownCoin(String),

    #[error("Invalid network {network}, available networks: {}", .available.join(", "))]
    UnsupportedNetwork { network: String, available: Vec<String> },

    #[error("Invalid address regex for {network}: {source}")]
    AddressPattern {
        network: String,
        #[source]
        source: regex::Error,
    },

    #[error("{0} wallet(s) do not match the network address format")]
    InvalidWallets(usize),

    #[error("Insufficient funds: balance {balance}, required {required}")]
    InsufficientFunds { balance: f64, required: f64 },

    #[error("No wallets to withdraw to")]
    NoWallets,

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to fetch coin information: {0}")]
    Metadata(#[source] ExchangeError),
}
