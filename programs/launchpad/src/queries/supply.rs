use anchor_lang::prelude::*;
use serde::Serialize;
use tracing::info;

use crate::facade::{LedgerReader, MarketFacade, TradeStore};
use crate::state::{LaunchpadState, MarketConfig};
use crate::utils::supply::{supply_breakdown, SupplyBreakdown};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplyResponse {
    pub total_supply: f64,
    pub tokens_for_sale: f64,
    pub tokens_sold: f64,
    pub tokens_remaining: f64,
    pub tokens_remaining_percentage: f64,
    pub circulating_supply: f64,
    pub circulating_percentage: f64,
    pub debug: SupplyDebug,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplyDebug {
    pub total_supply_raw: String,
    pub tokens_for_sale_raw: String,
    pub tokens_sold_raw: String,
    pub tokens_remaining_raw: String,
}

impl From<SupplyBreakdown> for SupplyResponse {
    fn from(supply: SupplyBreakdown) -> Self {
        Self {
            total_supply: supply.total_supply,
            tokens_for_sale: supply.tokens_for_sale,
            tokens_sold: supply.tokens_sold,
            tokens_remaining: supply.tokens_remaining,
            tokens_remaining_percentage: supply.tokens_remaining_percentage,
            circulating_supply: supply.circulating_supply,
            circulating_percentage: supply.circulating_percentage,
            debug: SupplyDebug {
                total_supply_raw: supply.total_supply_raw.to_string(),
                tokens_for_sale_raw: supply.tokens_for_sale_raw.to_string(),
                tokens_sold_raw: supply.tokens_sold_raw.to_string(),
                tokens_remaining_raw: supply.tokens_remaining_raw.to_string(),
            },
        }
    }
}

pub fn supply_response(state: &LaunchpadState, config: &MarketConfig) -> SupplyResponse {
    supply_breakdown(state, config).into()
}

impl<L: LedgerReader, S: TradeStore> MarketFacade<L, S> {
    /// Supply breakdown of a launchpad token
    pub async fn supply(&self, address: &Pubkey) -> Result<SupplyResponse> {
        let state = self.fetch_state(address).await?;
        let response = supply_response(&state, self.config());

        info!(
            %address,
            tokens_remaining = response.tokens_remaining,
            tokens_remaining_percentage = response.tokens_remaining_percentage,
            circulating_percentage = response.circulating_percentage,
            "supply"
        );

        Ok(response)
    }
}
