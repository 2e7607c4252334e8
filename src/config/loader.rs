//! Configuration loading from disk and environment.

use std::fs;
use std::path::Path;

use alloy::primitives::Address;

use crate::config::schema::WalletConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Fallback address shown when no local key exists.
pub const ENV_DEFAULT_ADDRESS: &str = "DEFAULT_ADDRESS";
/// Covalent API key.
pub const ENV_COVALENT_KEY: &str = "COVALENT_KEY";
/// Primary chain RPC endpoint.
pub const ENV_ETH_RPC: &str = "ETH_RPC";
/// Secondary chain RPC endpoint.
pub const ENV_BASE_RPC: &str = "BASE_RPC";

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    InvalidEnv { var: &'static str, value: String },
    Validation(Vec<ValidationError>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::InvalidEnv { var, value } => {
                write!(f, "Invalid value for {}: '{}'", var, value)
            }
            ConfigError::Validation(errors) => {
                write!(f, "Validation failed: ")?;
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 { write!(f, ", ")?; }
                    write!(f, "{}", err)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Load configuration: TOML file (or defaults), then environment overrides,
/// then validation.
pub fn load_config(path: Option<&Path>) -> Result<WalletConfig, ConfigError> {
    let mut config = match path {
        Some(path) => parse_file(path)?,
        None => WalletConfig::default(),
    };

    apply_env_overrides(&mut config, |var| std::env::var(var).ok())?;
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

fn parse_file(path: &Path) -> Result<WalletConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(ConfigError::Io)?;
    toml::from_str(&content).map_err(ConfigError::Parse)
}

/// Overlay the recognized environment variables onto `config`.
///
/// `lookup` abstracts the process environment so tests stay hermetic.
pub fn apply_env_overrides<F>(config: &mut WalletConfig, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(value) = lookup(ENV_DEFAULT_ADDRESS) {
        config.wallet.default_address =
            value.trim().parse::<Address>().map_err(|_| ConfigError::InvalidEnv {
                var: ENV_DEFAULT_ADDRESS,
                value: value.clone(),
            })?;
    }
    if let Some(value) = lookup(ENV_COVALENT_KEY) {
        config.balances.api_key = Some(value);
    }
    if let Some(value) = lookup(ENV_ETH_RPC) {
        config.chains.primary_rpc_url = value;
    }
    if let Some(value) = lookup(ENV_BASE_RPC) {
        config.chains.secondary_rpc_url = value;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |var| map.get(var).cloned()
    }

    #[test]
    fn test_env_overrides() {
        let mut config = WalletConfig::default();
        apply_env_overrides(
            &mut config,
            env(&[
                (ENV_DEFAULT_ADDRESS, "0x1985EA6E9c68E1C272d8209f3B478AC2Fdb25c87"),
                (ENV_COVALENT_KEY, "ckey_abc"),
                (ENV_ETH_RPC, "https://eth.example.org"),
                (ENV_BASE_RPC, "https://base.example.org"),
            ]),
        )
        .unwrap();

        assert_eq!(
            config.wallet.default_address.to_checksum(None),
            "0x1985EA6E9c68E1C272d8209f3B478AC2Fdb25c87"
        );
        assert_eq!(config.balances.effective_api_key(), Some("ckey_abc"));
        assert_eq!(config.chains.primary_rpc_url, "https://eth.example.org");
        assert_eq!(config.chains.secondary_rpc_url, "https://base.example.org");
    }

    #[test]
    fn test_invalid_default_address_env() {
        let mut config = WalletConfig::default();
        let err = apply_env_overrides(&mut config, env(&[(ENV_DEFAULT_ADDRESS, "0x123")]))
            .unwrap_err();
        assert!(err.to_string().contains(ENV_DEFAULT_ADDRESS));
    }

    #[test]
    fn test_parse_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
            [server]
            bind_address = "127.0.0.1:7000"

            [transfers]
            serialize_per_address = false
            "#
        )
        .unwrap();

        let config = parse_file(file.path()).unwrap();
        assert_eq!(config.server.bind_address, "127.0.0.1:7000");
        assert!(!config.transfers.serialize_per_address);
    }

    #[test]
    fn test_parse_error_reported() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[server\nbind_address = ").unwrap();
        assert!(matches!(parse_file(file.path()), Err(ConfigError::Parse(_))));
    }
}
