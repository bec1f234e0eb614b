use anchor_lang::prelude::*;
use serde::Serialize;
use tracing::info;

use crate::facade::{LedgerReader, MarketFacade, TradeStore};
use crate::state::CampaignStatus;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    pub launchpad_pubkey: String,
    pub status: CampaignStatus,
}

impl<L: LedgerReader, S: TradeStore> MarketFacade<L, S> {
    /// Current lifecycle status of a launchpad
    pub async fn status(&self, address: &Pubkey) -> Result<StatusResponse> {
        let state = self.fetch_state(address).await?;
        info!(%address, status = %state.status, "decoded status");

        Ok(StatusResponse {
            launchpad_pubkey: address.to_string(),
            status: state.status,
        })
    }
}
