use serde::{Deserialize, Deserializer};
use std::fmt;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoinInfo {
    pub coin: String,
    #[serde(deserialize_with = "decimal")]
    pub free: f64,
    #[serde(default)]
    pub network_list: Vec<NetworkInfo>,
}

impl CoinInfo {
    pub fn network_names(&self) -> Vec<String> {
        self.network_list.iter().map(|n| n.network.clone()).collect()
    }

    pub fn network(&self, name: &str) -> Option<&NetworkInfo> {
        self.network_list.iter().find(|n| n.network == name)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkInfo {
    pub network: String,
    pub coin: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub address_regex: String,
    #[serde(deserialize_with = "decimal")]
    pub withdraw_min: f64,
    #[serde(default, deserialize_with = "decimal")]
    pub withdraw_fee: f64,
    /// Step of the withdrawal amount, e.g. "0.00000001".
    #[serde(default)]
    pub withdraw_integer_multiple: String,
    #[serde(default = "enabled")]
    pub withdraw_enable: bool,
}

impl NetworkInfo {
    /// Number of decimals a withdrawal amount may carry on this network.
    pub fn decimals(&self) -> usize {
        let step = &self.withdraw_integer_multiple;
        if step.len() > 1 {
            step.split_once('.').map_or(0, |(_, frac)| frac.len())
        } else {
            0
        }
    }
}

fn enabled() -> bool {
    true
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxStatus {
    EmailSent,
    Cancelled,
    AwaitingApproval,
    Rejected,
    Processing,
    Failure,
    Completed,
    Unknown(i64),
}

impl From<i64> for TxStatus {
    fn from(code: i64) -> Self {
        match code {
            0 => TxStatus::EmailSent,
            1 => TxStatus::Cancelled,
            2 => TxStatus::AwaitingApproval,
            3 => TxStatus::Rejected,
            4 => TxStatus::Processing,
            5 => TxStatus::Failure,
            6 => TxStatus::Completed,
            other => TxStatus::Unknown(other),
        }
    }
}

impl<'de> Deserialize<'de> for TxStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        i64::deserialize(deserializer).map(TxStatus::from)
    }
}

impl fmt::Display for TxStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TxStatus::EmailSent => write!(f, "Email Sent"),
            TxStatus::Cancelled => write!(f, "Cancelled"),
            TxStatus::AwaitingApproval => write!(f, "Awaiting Approval"),
            TxStatus::Rejected => write!(f, "Rejected"),
            TxStatus::Processing => write!(f, "Processing"),
            TxStatus::Failure => write!(f, "Failure"),
            TxStatus::Completed => write!(f, "Completed"),
            TxStatus::Unknown(code) => write!(f, "Unknown({})", code),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRecord {
    pub id: String,
    #[serde(deserialize_with = "decimal")]
    pub amount: f64,
    #[serde(default, deserialize_with = "decimal")]
    pub transaction_fee: f64,
    pub coin: String,
    pub status: TxStatus,
    pub address: String,
    #[serde(default)]
    pub network: Option<String>,
    #[serde(default)]
    pub tx_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WithdrawalRequest {
    pub coin: String,
    pub address: String,
    /// Already formatted to the network precision.
    pub amount: String,
    pub network: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WithdrawalReceipt {
    pub id: String,
}

#[derive(Debug, Clone)]
pub enum WithdrawalOutcome {
    Submitted {
        id: String,
        record: Option<TransactionRecord>,
    },
    Planned,
    Skipped { minimum: f64 },
    Failed(String),
}

#[derive(Debug, Clone)]
pub struct WalletResult {
    pub address: String,
    pub amount: String,
    pub outcome: WithdrawalOutcome,
}

#[derive(Debug, Clone, Default)]
pub struct RunReport {
    pub coin: String,
    pub network: String,
    pub balance: f64,
    pub invalid_wallets: Vec<String>,
    pub results: Vec<WalletResult>,
}

impl RunReport {
    pub fn submitted(&self) -> usize {
        self.results
            .iter()
            .filter(|r| matches!(r.outcome, WithdrawalOutcome::Submitted { .. }))
            .count()
    }
}

/// Binance encodes most decimals as JSON strings; accept either form.
fn decimal<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(n) => Ok(n),
        Raw::Text(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}
