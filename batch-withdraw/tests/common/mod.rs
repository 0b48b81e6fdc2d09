use async_trait::async_trait;
use batch_withdraw::config::{Amount, Config, Delay, WalletPolicy};
use batch_withdraw::error::ExchangeError;
use batch_withdraw::exchange::Exchange;
use batch_withdraw::types::{
    CoinInfo, NetworkInfo, TransactionRecord, TxStatus, WithdrawalReceipt, WithdrawalRequest,
};
use std::sync::Mutex;

pub const WALLET_A: &str = "0x94df8b352de7f46f64b01d3666bf6e936e44ce60";
pub const WALLET_B: &str = "0x0000000000000000000000000000000000000001";

/// What the withdrawal history endpoint answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum History {
    /// Every submission, in order.
    Echo,
    Empty,
    Unavailable,
}

/// In-memory exchange that records submissions and echoes them back as history.
pub struct MockExchange {
    pub coins: Vec<CoinInfo>,
    pub submitted: Mutex<Vec<WithdrawalRequest>>,
    pub reject_address: Option<String>,
    pub metadata_error: bool,
    pub history: History,
}

impl MockExchange {
    pub fn with_balance(free: f64) -> Self {
        Self {
            coins: vec![eth(free)],
            submitted: Mutex::new(Vec::new()),
            reject_address: None,
            metadata_error: false,
            history: History::Echo,
        }
    }

    pub fn submissions(&self) -> Vec<WithdrawalRequest> {
        self.submitted.lock().unwrap().clone()
    }
}

#[async_trait]
impl Exchange for MockExchange {
    async fn coin_information(&self, coin: &str) -> Result<Option<CoinInfo>, ExchangeError> {
        if self.metadata_error {
            return Err(ExchangeError::Api {
                status: 401,
                code: -2015,
                msg: "Invalid API-key, IP, or permissions for action.".into(),
            });
        }
        Ok(self.coins.iter().find(|c| c.coin == coin).cloned())
    }

    async fn withdraw_history(&self, coin: &str) -> Result<Vec<TransactionRecord>, ExchangeError> {
        match self.history {
            History::Echo => {}
            History::Empty => return Ok(Vec::new()),
            History::Unavailable => {
                return Err(ExchangeError::Http {
                    status: 503,
                    body: "Service Unavailable".into(),
                });
            }
        }

        Ok(self
            .submitted
            .lock()
            .unwrap()
            .iter()
            .enumerate()
            .filter(|(_, req)| req.coin == coin)
            .map(|(i, req)| TransactionRecord {
                id: format!("tx-{}", i),
                amount: req.amount.parse().unwrap(),
                transaction_fee: 0.0001,
                coin: req.coin.clone(),
                status: TxStatus::Processing,
                address: req.address.clone(),
                network: Some(req.network.clone()),
                tx_id: None,
            })
            .collect())
    }

    async fn withdraw(
        &self,
        request: &WithdrawalRequest,
    ) -> Result<WithdrawalReceipt, ExchangeError> {
        if self.reject_address.as_deref() == Some(request.address.as_str()) {
            return Err(ExchangeError::Api {
                status: 400,
                code: -4003,
                msg: "Address verification failed".into(),
            });
        }

        let mut submitted = self.submitted.lock().unwrap();
        submitted.push(request.clone());
        Ok(WithdrawalReceipt {
            id: format!("tx-{}", submitted.len() - 1),
        })
    }
}

pub fn eth(free: f64) -> CoinInfo {
    CoinInfo {
        coin: "ETH".into(),
        free,
        network_list: vec![
            NetworkInfo {
                network: "ARBITRUM".into(),
                coin: "ETH".into(),
                name: "Arbitrum One".into(),
                address_regex: "^(0x)[0-9A-Fa-f]{40}$".into(),
                withdraw_min: 0.0008,
                withdraw_fee: 0.0001,
                withdraw_integer_multiple: "0.00000001".into(),
                withdraw_enable: true,
            },
            NetworkInfo {
                network: "ETH".into(),
                coin: "ETH".into(),
                name: "Ethereum (ERC20)".into(),
                address_regex: "^(0x)[0-9A-Fa-f]{40}$".into(),
                withdraw_min: 0.01,
                withdraw_fee: 0.0012,
                withdraw_integer_multiple: "0.00000001".into(),
                withdraw_enable: true,
            },
        ],
    }
}

pub fn config(amount: Amount) -> Config {
    Config {
        token: "eth".into(),
        network: "arbitrum".into(),
        amount,
        randomize_amount: false,
        spread: 0.5,
        delay: Delay { min: 0, max: 0 },
        apikey: "key".into(),
        secret: "secret".into(),
        wallet_policy: WalletPolicy::Warn,
        base_url: "http://localhost".into(),
    }
}

pub fn wallets(list: &[&str]) -> Vec<String> {
    list.iter().map(|w| w.to_string()).collect()
}
