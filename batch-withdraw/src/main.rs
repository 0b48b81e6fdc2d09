use anyhow::{Context, Result};
use batch_withdraw::cli::{Commands, parse_args};
use batch_withdraw::config::SAMPLE_CONFIG;
use batch_withdraw::wallets::load_wallets;
use batch_withdraw::{BinanceClient, Config, Exchange, Withdrawer, report};
use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::time::Instant;
use tracing::{Level, info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = parse_args();

    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::INFO })
        .init();

    match cli.command {
        Commands::Withdraw {
            config: config_path,
            wallets,
            dry_run,
        } => {
            let config = Config::load(&config_path)
                .context(format!("Failed to load config from {:?}", config_path))?;
            info!("Configuration loaded successfully");

            let wallets = load_wallets(&wallets)?;
            info!("Loaded {} wallets", wallets.len());

            let client = connect(&config).await?;
            let start_time = Instant::now();

            let report = Withdrawer::new(&client, &config)
                .dry_run(dry_run)
                .run(&wallets)
                .await?;

            report::print_summary(&report);
            info!(
                "Run completed in {}s, {} withdrawals submitted",
                start_time.elapsed().as_secs(),
                report.submitted()
            );
        }

        Commands::Networks {
            config: config_path,
        } => {
            let config = Config::load(&config_path)
                .context(format!("Failed to load config from {:?}", config_path))?;
            let client = connect(&config).await?;

            let coin = config.coin();
            let info = client
                .coin_information(&coin)
                .await
                .context("Failed to fetch coin information")?
                .with_context(|| format!("Coin {} not found in account information", coin))?;

            report::print_networks(&info);
        }

        Commands::GenerateConfig { output } => {
            write_sample_config(&output)?;

            info!("Sample configuration file generated at {:?}", output);
            info!(
                "Please edit the file with your API credentials before running a withdrawal."
            );
        }
    }

    Ok(())
}

async fn connect(config: &Config) -> Result<BinanceClient> {
    let mut client = BinanceClient::new(&config.base_url, &config.apikey, &config.secret)
        .context("Failed to create HTTP client")?;

    // Fall back to the local clock; the exchange reports skew on signed calls anyway
    if let Err(e) = client.sync_clock().await {
        warn!("Failed to sync with exchange clock: {}", e);
    }

    Ok(client)
}

fn write_sample_config(output: &Path) -> Result<()> {
    let mut file = File::create(output)
        .context(format!("Failed to create config file at {:?}", output))?;
    file.write_all(SAMPLE_CONFIG.as_bytes())?;
    Ok(())
}
