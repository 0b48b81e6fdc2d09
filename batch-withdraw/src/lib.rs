//! Sequential batch withdrawals through the Binance capital API.

pub mod amount;
pub mod cli;
pub mod config;
pub mod error;
pub mod exchange;
pub mod pacing;
pub mod report;
pub mod signer;
pub mod types;
pub mod wallets;
pub mod withdraw;

pub use config::Config;
pub use exchange::{BinanceClient, Exchange};
pub use withdraw::Withdrawer;
