use std::str::FromStr;
use std::time::Duration;

use anchor_lang::prelude::*;

use crate::constants::*;
use crate::errors::MarketError;

/// Settings threaded into the pricing functions and the facade. Nothing in
/// the pricing math reads the environment; only `from_env` does.
#[derive(Debug, Clone, PartialEq)]
pub struct MarketConfig {
    /// Launchpad token decimals
    pub token_decimals: u8,

    /// Base currency decimals (lamports per SOL = 10^9)
    pub base_decimals: u8,

    /// Base currency -> reporting currency rate (SOL -> USD)
    pub quote_rate: f64,

    /// Ledger RPC timeout (milliseconds)
    pub ledger_timeout_ms: u64,

    /// Trade store timeout (milliseconds)
    pub store_timeout_ms: u64,

    /// Program that must own launchpad state accounts
    pub program_id: Pubkey,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct MarketConfigParams {
    pub token_decimals: Option<u8>,
    pub base_decimals: Option<u8>,
    pub quote_rate: Option<f64>,
    pub ledger_timeout_ms: Option<u64>,
    pub store_timeout_ms: Option<u64>,
    pub program_id: Option<Pubkey>,
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            token_decimals: DEFAULT_TOKEN_DECIMALS,
            base_decimals: DEFAULT_BASE_DECIMALS,
            quote_rate: DEFAULT_QUOTE_RATE,
            ledger_timeout_ms: DEFAULT_LEDGER_TIMEOUT_MS,
            store_timeout_ms: DEFAULT_STORE_TIMEOUT_MS,
            program_id: crate::ID,
        }
    }
}

impl MarketConfig {
    /// Defaults overridden by `params`, then validated
    pub fn with_params(params: MarketConfigParams) -> Result<Self> {
        let mut config = Self::default();
        config.update(params);
        config.validate()?;
        Ok(config)
    }

    /// Read overrides from `SOL_PRICE_USD`, `TOKEN_DECIMALS`, `BASE_DECIMALS`,
    /// `PROGRAM_ID`, `LEDGER_TIMEOUT_MS` and `STORE_TIMEOUT_MS`.
    pub fn from_env() -> Result<Self> {
        let params = MarketConfigParams::from_lookup(|key| std::env::var(key).ok())?;
        Self::with_params(params)
    }

    pub fn update(&mut self, params: MarketConfigParams) {
        if let Some(token_decimals) = params.token_decimals {
            self.token_decimals = token_decimals;
        }

        if let Some(base_decimals) = params.base_decimals {
            self.base_decimals = base_decimals;
        }

        if let Some(quote_rate) = params.quote_rate {
            self.quote_rate = quote_rate;
        }

        if let Some(ledger_timeout_ms) = params.ledger_timeout_ms {
            self.ledger_timeout_ms = ledger_timeout_ms;
        }

        if let Some(store_timeout_ms) = params.store_timeout_ms {
            self.store_timeout_ms = store_timeout_ms;
        }

        if let Some(program_id) = params.program_id {
            self.program_id = program_id;
        }
    }

    pub fn validate(&self) -> Result<()> {
        require!(
            self.token_decimals <= MAX_DECIMALS && self.base_decimals <= MAX_DECIMALS,
            MarketError::InvalidConfig
        );

        require!(
            self.quote_rate.is_finite() && self.quote_rate >= 0.0,
            MarketError::InvalidConfig
        );

        require!(
            self.ledger_timeout_ms > 0 && self.store_timeout_ms > 0,
            MarketError::InvalidConfig
        );

        Ok(())
    }

    /// 10^token_decimals
    pub fn token_scale(&self) -> u128 {
        10u128.pow(self.token_decimals as u32)
    }

    /// 10^base_decimals
    pub fn base_scale(&self) -> u128 {
        10u128.pow(self.base_decimals as u32)
    }

    pub fn ledger_timeout(&self) -> Duration {
        Duration::from_millis(self.ledger_timeout_ms)
    }

    pub fn store_timeout(&self) -> Duration {
        Duration::from_millis(self.store_timeout_ms)
    }
}

impl MarketConfigParams {
    /// Collect overrides from a key lookup. Unset keys stay `None`; keys that
    /// are set but do not parse are `InvalidConfig`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            token_decimals: parse_var(&lookup, "TOKEN_DECIMALS")?,
            base_decimals: parse_var(&lookup, "BASE_DECIMALS")?,
            quote_rate: parse_var(&lookup, "SOL_PRICE_USD")?,
            ledger_timeout_ms: parse_var(&lookup, "LEDGER_TIMEOUT_MS")?,
            store_timeout_ms: parse_var(&lookup, "STORE_TIMEOUT_MS")?,
            program_id: parse_var(&lookup, "PROGRAM_ID")?,
        })
    }
}

fn parse_var<T, F>(lookup: &F, key: &str) -> Result<Option<T>>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => {
            let value = raw.trim().parse::<T>().map_err(|_| {
                tracing::warn!(key, value = %raw, "unparseable configuration value");
                MarketError::InvalidConfig
            })?;
            Ok(Some(value))
        }
        None => Ok(None),
    }
}
