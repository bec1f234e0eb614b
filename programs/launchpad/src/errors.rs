use anchor_lang::error::Error;
use anchor_lang::prelude::*;
use serde::Serialize;

#[error_code]
pub enum MarketError {
    // ===== Decode Errors =====
    #[msg("Account data is shorter than a launchpad state record")]
    TooShort,

    #[msg("Not a launchpad state account: discriminator mismatch")]
    InvalidDiscriminator,

    #[msg("This launchpad was created with an old program version (unknown enum variant). Please create a new launchpad.")]
    UnknownVariant,

    #[msg("Account string field is not valid UTF-8")]
    InvalidStringField,

    // ===== Fetch Errors =====
    #[msg("Account is not owned by the launchpad program")]
    InvalidAccountOwner,

    #[msg("Launchpad account not found on-chain")]
    AccountNotFound,

    #[msg("Ledger RPC request failed")]
    LedgerUnavailable,

    #[msg("Ledger RPC request timed out")]
    LedgerTimeout,

    #[msg("Trade store query failed")]
    TradeStoreUnavailable,

    #[msg("Trade store query timed out")]
    TradeStoreTimeout,

    // ===== Transition Errors =====
    #[msg("Campaign must be in Transition status to graduate")]
    GraduateWrongStatus,

    #[msg("The SAFE document must be signed before graduating")]
    GraduateDocumentUnsigned,

    #[msg("Campaign has already graduated to SAFE")]
    AlreadyGraduated,

    // ===== Parameter Errors =====
    #[msg("Candle interval must be greater than zero")]
    InvalidInterval,

    #[msg("Time window start is after its end")]
    InvalidTimeWindow,

    #[msg("Invalid market configuration")]
    InvalidConfig,

    // ===== Math Errors =====
    #[msg("Math overflow")]
    MathOverflow,
}

/// Client-facing failure body, with the HTTP-equivalent status the caller
/// should surface.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub status: u16,
}

impl ErrorResponse {
    pub fn from_error(err: &Error) -> Self {
        let status = if is_one_of(err, &[MarketError::AccountNotFound]) {
            404
        } else if is_one_of(err, &[MarketError::LedgerTimeout, MarketError::TradeStoreTimeout]) {
            504
        } else if is_one_of(
            err,
            &[MarketError::LedgerUnavailable, MarketError::TradeStoreUnavailable],
        ) {
            502
        } else if is_one_of(err, &[MarketError::MathOverflow]) {
            500
        } else if matches!(err, Error::AnchorError(_)) {
            400
        } else {
            500
        };

        Self {
            error: error_message(err),
            status,
        }
    }
}

/// Human-readable reason carried by an error, without Anchor's code prefix.
pub fn error_message(err: &Error) -> String {
    match err {
        Error::AnchorError(anchor_error) => anchor_error.error_msg.clone(),
        Error::ProgramError(program_error) => program_error.program_error.to_string(),
    }
}

fn is_one_of(err: &Error, codes: &[MarketError]) -> bool {
    codes.iter().any(|code| *err == Error::from(*code))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_errors_are_client_errors() {
        let response = ErrorResponse::from_error(&MarketError::InvalidDiscriminator.into());
        assert_eq!(response.status, 400);
        assert_eq!(
            response.error,
            "Not a launchpad state account: discriminator mismatch"
        );
    }

    #[test]
    fn stale_layout_message_asks_for_recreation() {
        let response = ErrorResponse::from_error(&MarketError::UnknownVariant.into());
        assert_eq!(response.status, 400);
        assert!(response.error.contains("create a new launchpad"));
    }

    #[test]
    fn fetch_errors_map_to_gateway_statuses() {
        assert_eq!(
            ErrorResponse::from_error(&MarketError::AccountNotFound.into()).status,
            404
        );
        assert_eq!(
            ErrorResponse::from_error(&MarketError::LedgerTimeout.into()).status,
            504
        );
        assert_eq!(
            ErrorResponse::from_error(&MarketError::TradeStoreUnavailable.into()).status,
            502
        );
    }

    #[test]
    fn transition_rejections_are_distinct() {
        let wrong_status: Error = MarketError::GraduateWrongStatus.into();
        let unsigned: Error = MarketError::GraduateDocumentUnsigned.into();
        assert_ne!(wrong_status, unsigned);
        assert_ne!(error_message(&wrong_status), error_message(&unsigned));
    }
}
