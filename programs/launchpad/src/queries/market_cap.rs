use anchor_lang::prelude::*;
use serde::Serialize;
use tracing::info;

use crate::facade::{LedgerReader, MarketFacade, TradeStore};
use crate::state::{LaunchpadState, MarketConfig};
use crate::utils::pricing::market_cap;
use crate::utils::pricing::to_whole_units;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketCapResponse {
    pub market_cap_sol: f64,
    pub market_cap_quote: f64,
    pub current_price_sol: f64,
    pub total_supply: f64,
    pub tokens_for_sale: f64,
    pub sol_raised: f64,
    pub tokens_sold: f64,
    pub quote_rate: f64,
    pub debug: MarketCapDebug,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketCapDebug {
    pub total_supply_raw: String,
    pub tokens_for_sale_raw: String,
    pub virtual_sol_reserves: String,
    pub virtual_token_reserves: String,
    pub sol_raised_raw: String,
    pub tokens_sold_raw: String,
    pub price_atomic_lamports: String,
    pub market_cap_lamports: String,
}

pub fn market_cap_response(
    state: &LaunchpadState,
    config: &MarketConfig,
) -> Result<MarketCapResponse> {
    let cap = market_cap(state, config)?;
    let token_scale = config.token_scale();

    Ok(MarketCapResponse {
        market_cap_sol: cap.base,
        market_cap_quote: cap.quote,
        current_price_sol: cap.price.price,
        total_supply: cap.whole_total_supply,
        tokens_for_sale: to_whole_units(state.tokens_for_sale as u128, token_scale),
        sol_raised: to_whole_units(state.sol_raised as u128, config.base_scale()),
        tokens_sold: to_whole_units(state.tokens_sold as u128, token_scale),
        quote_rate: config.quote_rate,
        debug: MarketCapDebug {
            total_supply_raw: state.total_supply.to_string(),
            tokens_for_sale_raw: state.tokens_for_sale.to_string(),
            virtual_sol_reserves: state.virtual_sol_reserves.to_string(),
            virtual_token_reserves: state.virtual_token_reserves.to_string(),
            sol_raised_raw: state.sol_raised.to_string(),
            tokens_sold_raw: state.tokens_sold.to_string(),
            price_atomic_lamports: cap.price.lamports_per_token.to_string(),
            market_cap_lamports: cap.lamports.to_string(),
        },
    })
}

impl<L: LedgerReader, S: TradeStore> MarketFacade<L, S> {
    /// Market capitalization in SOL and in the reporting currency
    pub async fn market_cap(&self, address: &Pubkey) -> Result<MarketCapResponse> {
        let state = self.fetch_state(address).await?;
        let response = market_cap_response(&state, self.config())?;

        info!(
            %address,
            market_cap_sol = response.market_cap_sol,
            market_cap_quote = response.market_cap_quote,
            quote_rate = response.quote_rate,
            "market cap"
        );

        Ok(response)
    }
}
