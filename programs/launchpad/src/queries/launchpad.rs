use anchor_lang::prelude::*;
use serde::Serialize;
use tracing::debug;

use crate::facade::{LedgerReader, MarketFacade, TradeStore};
use crate::state::{CampaignStatus, LaunchpadState, MarketConfig};
use crate::utils::pricing::to_whole_units;

/// Decoded launchpad account, SOL amounts converted with the lamport values
/// kept alongside.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LaunchpadResponse {
    pub authority: String,
    pub platform_authority: String,
    pub raise_token_name: String,
    pub raise_token_symbol: String,
    pub uri: String,
    pub total_supply: String,
    pub tokens_for_sale: String,
    pub sol_raise_target: f64,
    pub sol_raise_target_lamports: String,
    pub virtual_sol_reserves: String,
    pub virtual_token_reserves: String,
    pub k: String,
    pub sol_raised: f64,
    pub sol_raised_lamports: String,
    pub tokens_sold: String,
    pub status: CampaignStatus,
    pub mint: String,
    pub token_vault: String,
}

impl LaunchpadResponse {
    pub fn new(state: &LaunchpadState, config: &MarketConfig) -> Self {
        let base_scale = config.base_scale();

        Self {
            authority: state.authority.to_string(),
            platform_authority: state.platform_authority.to_string(),
            raise_token_name: state.raise_token_name.clone(),
            raise_token_symbol: state.raise_token_symbol.clone(),
            uri: state.uri.clone(),
            total_supply: state.total_supply.to_string(),
            tokens_for_sale: state.tokens_for_sale.to_string(),
            sol_raise_target: to_whole_units(state.sol_raise_target as u128, base_scale),
            sol_raise_target_lamports: state.sol_raise_target.to_string(),
            virtual_sol_reserves: state.virtual_sol_reserves.to_string(),
            virtual_token_reserves: state.virtual_token_reserves.to_string(),
            k: state.k.to_string(),
            sol_raised: to_whole_units(state.sol_raised as u128, base_scale),
            sol_raised_lamports: state.sol_raised.to_string(),
            tokens_sold: state.tokens_sold.to_string(),
            status: state.status,
            mint: state.mint.to_string(),
            token_vault: state.token_vault.to_string(),
        }
    }
}

impl<L: LedgerReader, S: TradeStore> MarketFacade<L, S> {
    /// Full decoded launchpad account
    pub async fn launchpad(&self, address: &Pubkey) -> Result<LaunchpadResponse> {
        let state = self.fetch_state(address).await?;
        debug!(%address, name = %state.raise_token_name, symbol = %state.raise_token_symbol, "decoded launchpad");

        Ok(LaunchpadResponse::new(&state, self.config()))
    }
}
