use anchor_lang::prelude::*;
use serde::Serialize;
use tracing::{info, warn};

use crate::facade::{LedgerReader, MarketFacade, TradeStore};
use crate::state::CampaignStatus;
use crate::utils::validation::graduate;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraduationResponse {
    pub launchpad_pubkey: String,
    pub previous_status: CampaignStatus,
    pub status: CampaignStatus,
}

impl<L: LedgerReader, S: TradeStore> MarketFacade<L, S> {
    /// Decide the graduate transition for a launchpad. Nothing is written;
    /// the caller submits the transition once this returns `Ok`.
    pub async fn graduation(&self, address: &Pubkey, document_signed: bool) -> Result<GraduationResponse> {
        let state = self.fetch_state(address).await?;

        let status = graduate(state.status, document_signed).map_err(|err| {
            warn!(%address, status = %state.status, document_signed, error = %err, "graduation rejected");
            err
        })?;
        info!(%address, from = %state.status, to = %status, "graduation allowed");

        Ok(GraduationResponse {
            launchpad_pubkey: address.to_string(),
            previous_status: state.status,
            status,
        })
    }
}
