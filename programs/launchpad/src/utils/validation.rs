use anchor_lang::prelude::*;

use crate::errors::MarketError;
use crate::state::{CampaignStatus, LaunchpadState};

/// Validate the graduate transition (Transition -> Safe)
pub fn graduate(status: CampaignStatus, document_signed: bool) -> Result<CampaignStatus> {
    require!(
        status != CampaignStatus::Safe,
        MarketError::AlreadyGraduated
    );

    require!(
        status == CampaignStatus::Transition,
        MarketError::GraduateWrongStatus
    );

    require!(document_signed, MarketError::GraduateDocumentUnsigned);

    Ok(CampaignStatus::Safe)
}

/// Whether graduating is legal right now
pub fn can_graduate(status: CampaignStatus, document_signed: bool) -> bool {
    graduate(status, document_signed).is_ok()
}

/// Raise target met while the account still reports Funding; the ledger
/// program is expected to move it to Transition.
pub fn transition_due(state: &LaunchpadState) -> bool {
    state.is_funding() && state.raise_target_met()
}
