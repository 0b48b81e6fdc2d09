use crate::types::{CoinInfo, RunReport, WithdrawalOutcome};
use colored::Colorize;

pub fn print_summary(report: &RunReport) {
    for line in summary_lines(report) {
        println!("{}", line);
    }
}

fn summary_lines(report: &RunReport) -> Vec<String> {
    let mut lines = vec![
        format!("\n{:-^100}", " RESULTS SUMMARY "),
        format!(
            "{:<5} {:<10} {:<16} {:<20} {:<48}",
            "No.", "Result", "Amount", "Status", "Address"
        ),
        format!("{:-^100}", ""),
    ];

    let mut submitted = 0;
    let mut planned = 0;
    let mut skipped = 0;
    let mut failed = 0;

    for (i, result) in report.results.iter().enumerate() {
        let mut details = None;
        let (label, status) = match &result.outcome {
            WithdrawalOutcome::Submitted { record, .. } => {
                submitted += 1;
                let status = record
                    .as_ref()
                    .map_or_else(|| "unknown".to_string(), |tx| tx.status.to_string());
                ("SENT".green(), status)
            }
            WithdrawalOutcome::Planned => {
                planned += 1;
                ("PLANNED".cyan(), "-".to_string())
            }
            WithdrawalOutcome::Skipped { minimum } => {
                skipped += 1;
                ("SKIPPED".yellow(), format!("min {}", minimum))
            }
            WithdrawalOutcome::Failed(err) => {
                failed += 1;
                details = Some(err);
                ("FAILED".red(), "-".to_string())
            }
        };

        lines.push(format!(
            "{:<5} {:<10} {:<16} {:<20} {:<48}",
            i + 1,
            label,
            result.amount,
            status,
            result.address
        ));
        if let Some(err) = details {
            lines.push(format!("    Error details: {}", err.red()));
        }
    }

    lines.push(format!("\n{:-^100}", " STATISTICS "));
    lines.push(format!("Coin: {} on {}", report.coin, report.network));
    lines.push(format!("Balance before run: {}", report.balance));
    if !report.invalid_wallets.is_empty() {
        lines.push(
            format!("Invalid wallets: {}", report.invalid_wallets.len())
                .red()
                .to_string(),
        );
    }
    lines.push(format!("Submitted: {}", submitted));
    if planned > 0 {
        lines.push(format!("Planned (dry run): {}", planned));
    }
    lines.push(format!("Skipped: {}", skipped));
    lines.push(format!("Failed: {}", failed));
    lines
}

pub fn print_networks(coin: &CoinInfo) {
    println!("{}", format!("Balance: {} {}", coin.free, coin.coin).magenta());
    println!(
        "{:<16} {:<28} {:<14} {:<14} {:<9}",
        "Network", "Name", "Min", "Fee", "Enabled"
    );
    for network in &coin.network_list {
        println!(
            "{:<16} {:<28} {:<14} {:<14} {:<9}",
            network.network,
            network.name,
            network.withdraw_min,
            network.withdraw_fee,
            if network.withdraw_enable { "yes" } else { "no" }
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::WalletResult;

    fn result(address: &str, outcome: WithdrawalOutcome) -> WalletResult {
        WalletResult {
            address: address.to_string(),
            amount: "0.0009".to_string(),
            outcome,
        }
    }

    #[test]
    fn error_details_follow_their_row() {
        let report = RunReport {
            coin: "ETH".into(),
            network: "ARBITRUM".into(),
            balance: 1.0,
            invalid_wallets: Vec::new(),
            results: vec![
                result("0xaaa", WithdrawalOutcome::Planned),
                result("0xbbb", WithdrawalOutcome::Failed("Address verification failed".into())),
                result("0xccc", WithdrawalOutcome::Skipped { minimum: 0.001 }),
            ],
        };

        let lines = summary_lines(&report);
        let row = lines.iter().position(|l| l.contains("0xbbb")).unwrap();
        assert!(lines[row].contains("FAILED"));
        assert!(lines[row + 1].contains("Error details"));
        assert!(lines[row + 1].contains("Address verification failed"));
        assert!(lines[row + 2].contains("0xccc"));
        assert!(lines.iter().any(|l| l == "Failed: 1"));
        assert!(lines.iter().any(|l| l == "Planned (dry run): 1"));
    }
}
