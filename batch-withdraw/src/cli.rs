use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(version = "0.1.0")]
#[command(about = "Batch withdrawals from a Binance account to many wallets")]
#[command(
    long_about = "Withdraws a configured coin to every wallet in a list, one at a time, \
    with optional amount randomization and a random delay between withdrawals."
)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Withdraw to every wallet in the wallets file
    Withdraw {
        /// Path to the YAML configuration file
        #[arg(short, long, default_value = "config.yaml")]
        config: PathBuf,

        /// Path to the wallets file (JSON, or YAML by extension)
        #[arg(short, long, default_value = "wallets.json")]
        wallets: PathBuf,

        /// Run every check and plan amounts without submitting
        #[arg(long)]
        dry_run: bool,
    },

    /// Show balance and withdrawal networks of the configured token
    Networks {
        /// Path to the YAML configuration file
        #[arg(short, long, default_value = "config.yaml")]
        config: PathBuf,
    },

    /// Generate a sample config file
    GenerateConfig {
        /// Path to output config file
        #[arg(short, long, default_value = "config.yaml")]
        output: PathBuf,
    },
}

pub fn parse_args() -> Cli {
    Cli::parse()
}
