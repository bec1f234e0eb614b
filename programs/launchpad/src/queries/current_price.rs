use anchor_lang::prelude::*;
use serde::Serialize;
use tracing::info;

use crate::facade::{LedgerReader, MarketFacade, TradeStore};
use crate::state::{LaunchpadState, MarketConfig};
use crate::utils::pricing::{current_price, Liquidity, PriceQuote};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceResponse {
    pub current_price_sol: f64,
    pub current_price_lamports: String,
    pub current_price_quote: f64,
    pub liquidity: Liquidity,
    pub debug: PriceDebug,
}

/// Raw integers behind the price, before any scaling
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceDebug {
    pub amm: AmmDebug,
    pub constants: ScaleConstants,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AmmDebug {
    pub virtual_sol_reserves: String,
    pub virtual_token_reserves: String,
    pub k: String,
    pub price_atomic_lamports: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScaleConstants {
    pub token_decimals: u8,
    pub token_multiplier: String,
    pub lamports_per_sol: String,
}

impl ScaleConstants {
    pub fn from_config(config: &MarketConfig) -> Self {
        Self {
            token_decimals: config.token_decimals,
            token_multiplier: config.token_scale().to_string(),
            lamports_per_sol: config.base_scale().to_string(),
        }
    }
}

impl PriceResponse {
    pub fn from_quote(state: &LaunchpadState, quote: &PriceQuote, config: &MarketConfig) -> Self {
        Self {
            current_price_sol: quote.price,
            current_price_lamports: quote.lamports_per_token.to_string(),
            current_price_quote: quote.price * config.quote_rate,
            liquidity: quote.liquidity,
            debug: PriceDebug {
                amm: AmmDebug {
                    virtual_sol_reserves: state.virtual_sol_reserves.to_string(),
                    virtual_token_reserves: state.virtual_token_reserves.to_string(),
                    k: state.k.to_string(),
                    price_atomic_lamports: quote.lamports_per_token.to_string(),
                },
                constants: ScaleConstants::from_config(config),
            },
        }
    }
}

pub fn price_response(state: &LaunchpadState, config: &MarketConfig) -> Result<PriceResponse> {
    let quote = current_price(state, config)?;
    Ok(PriceResponse::from_quote(state, &quote, config))
}

impl<L: LedgerReader, S: TradeStore> MarketFacade<L, S> {
    /// Live curve price of a launchpad
    pub async fn current_price(&self, address: &Pubkey) -> Result<PriceResponse> {
        let state = self.fetch_state(address).await?;
        let response = price_response(&state, self.config())?;

        info!(
            %address,
            price_sol = response.current_price_sol,
            price_lamports = %response.current_price_lamports,
            liquidity = ?response.liquidity,
            "current price"
        );

        Ok(response)
    }
}
