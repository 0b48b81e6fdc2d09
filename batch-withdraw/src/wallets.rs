use anyhow::{Context, Result};
use regex::Regex;
use serde::Deserialize;
use std::path::Path;
use tracing::warn;

#[derive(Debug, Deserialize)]
struct WalletFile {
    wallets: Vec<String>,
}

/// Reads the destination list from a `{ "wallets": [...] }` record.
/// `.yaml`/`.yml` files are parsed as YAML, anything else as JSON.
pub fn load_wallets<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read wallets file: {:?}", path))?;

    let is_yaml = matches!(
        path.extension().and_then(|ext| ext.to_str()),
        Some("yaml") | Some("yml")
    );

    let file: WalletFile = if is_yaml {
        serde_yaml::from_str(&contents).context("Failed to parse wallets file")?
    } else {
        serde_json::from_str(&contents).context("Failed to parse wallets file")?
    };

    Ok(file
        .wallets
        .into_iter()
        .map(|wallet| wallet.trim().to_string())
        .filter(|wallet| !wallet.is_empty())
        .collect())
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Validation {
    pub invalid: Vec<String>,
}

impl Validation {
    pub fn is_valid(&self) -> bool {
        self.invalid.is_empty()
    }
}

/// Checks every wallet against the network address pattern and logs the misses.
pub fn validate_wallets(wallets: &[String], pattern: &Regex) -> Validation {
    let invalid: Vec<String> = wallets
        .iter()
        .filter(|wallet| !pattern.is_match(wallet))
        .cloned()
        .collect();

    if !invalid.is_empty() {
        warn!("Invalid wallets:\n{}", invalid.join("\n"));
    }

    Validation { invalid }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const EVM: &str = "^(0x)[0-9A-Fa-f]{40}$";

    fn wallets(list: &[&str]) -> Vec<String> {
        list.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn all_matching_wallets_are_valid() {
        let pattern = Regex::new(EVM).unwrap();
        let list = wallets(&[
            "0x94df8b352de7f46f64b01d3666bf6e936e44ce60",
            "0x0000000000000000000000000000000000000001",
        ]);
        assert!(validate_wallets(&list, &pattern).is_valid());
    }

    #[test]
    fn reports_every_mismatch_in_order() {
        let pattern = Regex::new(EVM).unwrap();
        let list = wallets(&[
            "0x94df8b352de7f46f64b01d3666bf6e936e44ce60",
            "bc1qar0srrr7xfkvy5l643lydnw9re59gtzzwf5mdq",
            "0x123",
        ]);
        let result = validate_wallets(&list, &pattern);
        assert!(!result.is_valid());
        assert_eq!(
            result.invalid,
            wallets(&["bc1qar0srrr7xfkvy5l643lydnw9re59gtzzwf5mdq", "0x123"])
        );
    }

    #[test]
    fn loads_json_wallet_file() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, r#"{{"wallets": ["0xabc", " 0xdef ", ""]}}"#).unwrap();

        let loaded = load_wallets(file.path()).unwrap();
        assert_eq!(loaded, wallets(&["0xabc", "0xdef"]));
    }

    #[test]
    fn loads_yaml_wallet_file() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(file, "wallets:\n  - \"0xabc\"\n  - \"0xdef\"").unwrap();

        assert_eq!(load_wallets(file.path()).unwrap(), wallets(&["0xabc", "0xdef"]));
    }

    #[test]
    fn missing_wallets_field_is_an_error() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, r#"{{"addresses": []}}"#).unwrap();

        assert!(load_wallets(file.path()).is_err());
    }
}
