use crate::amount::AmountPlanner;
use crate::config::{Config, WalletPolicy};
use crate::error::WithdrawError;
use crate::exchange::Exchange;
use crate::pacing::Pacer;
use crate::types::{
    CoinInfo, NetworkInfo, RunReport, WalletResult, WithdrawalOutcome, WithdrawalRequest,
};
use crate::wallets::{Validation, validate_wallets};
use rand::SeedableRng;
use rand::rngs::StdRng;
use regex::Regex;
use tracing::{error, info, warn};

/// Runs one batch: metadata, checks, then one withdrawal per wallet in order.
pub struct Withdrawer<'a, E: Exchange> {
    exchange: &'a E,
    config: &'a Config,
    pacer: Pacer,
    rng: StdRng,
    dry_run: bool,
}

impl<'a, E: Exchange + Sync> Withdrawer<'a, E> {
    pub fn new(exchange: &'a E, config: &'a Config) -> Self {
        Self {
            exchange,
            config,
            pacer: Pacer::new(config.delay),
            rng: StdRng::from_entropy(),
            dry_run: false,
        }
    }

    /// Plan every withdrawal without submitting any.
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Looks up the configured coin and network, aborting when either is unknown.
    pub async fn resolve_network(&self) -> Result<(CoinInfo, NetworkInfo), WithdrawError> {
        let coin = self.config.coin();
        let network = self.config.network_name();

        let coin_info = self
            .exchange
            .coin_information(&coin)
            .await
            .map_err(WithdrawError::Metadata)?
            .ok_or_else(|| WithdrawError::UnknownCoin(coin.clone()))?;

        info!("Balance: {} {}", coin_info.free, coin_info.coin);

        let network_info = coin_info.network(&network).cloned().ok_or_else(|| {
            WithdrawError::UnsupportedNetwork {
                network: network.clone(),
                available: coin_info.network_names(),
            }
        })?;

        if !network_info.withdraw_enable {
            warn!("Withdrawals of {} on {} are currently disabled", coin, network);
        }

        Ok((coin_info, network_info))
    }

    pub async fn run(&mut self, wallets: &[String]) -> Result<RunReport, WithdrawError> {
        let (coin_info, network_info) = self.resolve_network().await?;

        if wallets.is_empty() {
            return Err(WithdrawError::NoWallets);
        }

        let strict = self.config.wallet_policy == WalletPolicy::Strict;
        let validation = match Regex::new(&network_info.address_regex) {
            Ok(pattern) => validate_wallets(wallets, &pattern),
            Err(source) if strict => {
                return Err(WithdrawError::AddressPattern {
                    network: network_info.network.clone(),
                    source,
                });
            }
            Err(e) => {
                warn!(
                    "Skipping wallet validation, address regex for {} is not supported: {}",
                    network_info.network, e
                );
                Validation::default()
            }
        };
        if !validation.is_valid() && strict {
            return Err(WithdrawError::InvalidWallets(validation.invalid.len()));
        }

        let nominal = self.config.amount.nominal()?;
        let required = nominal * wallets.len() as f64;
        if coin_info.free < required {
            return Err(WithdrawError::InsufficientFunds {
                balance: coin_info.free,
                required,
            });
        }

        let planner = AmountPlanner::new(
            nominal,
            self.config.randomize_amount,
            self.config.spread,
            network_info.decimals(),
        );

        let mut report = RunReport {
            coin: coin_info.coin.clone(),
            network: network_info.network.clone(),
            balance: coin_info.free,
            invalid_wallets: validation.invalid,
            results: Vec::with_capacity(wallets.len()),
        };

        for (i, wallet) in wallets.iter().enumerate() {
            let amount = planner.next(&mut self.rng);

            if amount.value < network_info.withdraw_min {
                warn!(
                    "Minimal amount is: {} {}, current amount is: {} {}",
                    network_info.withdraw_min, network_info.coin, amount.text, network_info.coin
                );
                report.results.push(WalletResult {
                    address: wallet.clone(),
                    amount: amount.text,
                    outcome: WithdrawalOutcome::Skipped {
                        minimum: network_info.withdraw_min,
                    },
                });
                continue;
            }

            let request = WithdrawalRequest {
                coin: coin_info.coin.clone(),
                address: wallet.clone(),
                amount: amount.text.clone(),
                network: network_info.network.clone(),
            };

            let outcome = if self.dry_run {
                info!(
                    "[dry run] Would withdraw {} {} to {}",
                    request.amount, request.coin, request.address
                );
                WithdrawalOutcome::Planned
            } else {
                self.submit(&request).await
            };

            report.results.push(WalletResult {
                address: wallet.clone(),
                amount: amount.text,
                outcome,
            });
            info!("Progress: {}/{} wallets processed", i + 1, wallets.len());
        }

        Ok(report)
    }

    /// Submits one withdrawal, waits out the pacing delay and reads back its status.
    async fn submit(&mut self, request: &WithdrawalRequest) -> WithdrawalOutcome {
        let receipt = match self.exchange.withdraw(request).await {
            Ok(receipt) => receipt,
            Err(e) => {
                error!("Withdrawal to {} failed: {}", request.address, e);
                return WithdrawalOutcome::Failed(e.to_string());
            }
        };

        self.pacer.pause(&mut self.rng).await;

        let record = match self
            .exchange
            .transaction_info(&request.coin, &receipt.id)
            .await
        {
            Ok((_, Some(tx))) => {
                info!(
                    "Sent {} {}, fee: {} {}, status: {} for address {}",
                    tx.amount, tx.coin, tx.transaction_fee, tx.coin, tx.status, tx.address
                );
                Some(tx)
            }
            Ok((_, None)) => {
                warn!("Withdrawal {} not found in history yet", receipt.id);
                None
            }
            Err(e) => {
                error!("Failed to fetch status of withdrawal {}: {}", receipt.id, e);
                None
            }
        };

        WithdrawalOutcome::Submitted {
            id: receipt.id,
            record,
        }
    }
}
