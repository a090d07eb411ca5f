//! Configuration management for the engine.
//!
//! Token identities are deployment parameters: supplied once, immutable
//! afterwards. They come from environment variables (with a `.env` file
//! honored, as the rest of the stack expects) or from a small JSON file.

use std::env;
use std::fs;
use std::path::Path;

use eyre::{Error, Result, WrapErr};
use serde::Deserialize;

use crate::pool::token::TokenId;

/// Default base-asset address (canonical WETH).
const DEFAULT_TOKEN0: &str = "0x4200000000000000000000000000000000000006";
/// Default reward-asset address.
const DEFAULT_TOKEN1: &str = "0xAC4137350000000000000000000000000000A1C4";

/// Deployment parameters for one pool.
#[derive(Debug, Clone)]
pub struct Config {
    /// Identity of the base asset.
    pub token0: TokenId,
    /// Display symbol of the base asset.
    pub symbol0: String,
    /// Identity of the reward-bearing asset.
    pub token1: TokenId,
    /// Display symbol of the reward-bearing asset.
    pub symbol1: String,
}

/// On-disk shape of a JSON config file.
#[derive(Debug, Deserialize)]
struct RawConfig {
    /// Hex address of the base asset.
    token0: String,
    /// Display symbol of the base asset.
    symbol0: Option<String>,
    /// Hex address of the reward-bearing asset.
    token1: String,
    /// Display symbol of the reward-bearing asset.
    symbol1: Option<String>,
}

impl Config {
    /// Builds a config from the environment.
    ///
    /// Honors `MUTUALS_CONFIG` (path to a JSON file), then
    /// `MUTUALS_TOKEN0` / `MUTUALS_TOKEN1` / `MUTUALS_SYMBOL0` /
    /// `MUTUALS_SYMBOL1`, falling back to the built-in demo pair.
    ///
    /// # Errors
    ///
    /// * If a configured address does not parse
    /// * If the JSON config file cannot be read or parsed
    pub fn from_env() -> Result<Self, Error> {
        dotenv::dotenv().ok();

        if let Ok(path) = env::var("MUTUALS_CONFIG") {
            return Self::from_json(Path::new(&path));
        }

        let token0 = env::var("MUTUALS_TOKEN0").unwrap_or_else(|_| DEFAULT_TOKEN0.to_string());
        let token1 = env::var("MUTUALS_TOKEN1").unwrap_or_else(|_| DEFAULT_TOKEN1.to_string());
        Ok(Self {
            token0: TokenId::try_from(token0.as_str())?,
            symbol0: env::var("MUTUALS_SYMBOL0").unwrap_or_else(|_| "WETH".to_string()),
            token1: TokenId::try_from(token1.as_str())?,
            symbol1: env::var("MUTUALS_SYMBOL1").unwrap_or_else(|_| "ACH".to_string()),
        })
    }

    /// Loads a config from a JSON file.
    ///
    /// # Errors
    ///
    /// * If the file cannot be read, parsed, or holds malformed addresses
    pub fn from_json(path: &Path) -> Result<Self, Error> {
        let contents = fs::read_to_string(path)
            .wrap_err_with(|| format!("failed to read config file {}", path.display()))?;
        let raw: RawConfig = serde_json::from_str(&contents)
            .wrap_err_with(|| format!("failed to parse config file {}", path.display()))?;
        Ok(Self {
            token0: TokenId::try_from(raw.token0.as_str())?,
            symbol0: raw.symbol0.unwrap_or_else(|| "WETH".to_string()),
            token1: TokenId::try_from(raw.token1.as_str())?,
            symbol1: raw.symbol1.unwrap_or_else(|| "ACH".to_string()),
        })
    }
}
