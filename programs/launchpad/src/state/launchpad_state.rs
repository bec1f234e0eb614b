use anchor_lang::prelude::*;
use anchor_lang::{AccountSerialize, Discriminator};

use crate::constants::{DISCRIMINATOR_LEN, STRING_PREFIX_LEN};
use crate::errors::MarketError;
use crate::state::CampaignStatus;

#[account]
#[derive(Debug, Default, PartialEq)]
pub struct LaunchpadState {
    /// Campaign creator
    pub authority: Pubkey,

    /// Platform operator
    pub platform_authority: Pubkey,

    // ===== Token Metadata =====
    pub raise_token_name: String,
    pub raise_token_symbol: String,
    pub uri: String,

    // ===== Token Allocation (atomic units) =====
    /// Total supply
    pub total_supply: u64,

    /// Tokens offered through the curve
    pub tokens_for_sale: u64,

    // ===== Fundraising Information (lamports) =====
    /// Raise target
    pub sol_raise_target: u64,

    // ===== Curve =====
    /// Virtual SOL side of the constant product
    pub virtual_sol_reserves: u64,

    /// Virtual token side of the constant product
    pub virtual_token_reserves: u64,

    /// virtual_sol_reserves * virtual_token_reserves at initialization
    pub k: u128,

    /// SOL raised so far
    pub sol_raised: u64,

    /// Tokens sold so far
    pub tokens_sold: u64,

    /// Lifecycle status
    pub status: CampaignStatus,

    pub mint: Pubkey,
    pub token_vault: Pubkey,
}

/// Raw account as returned by the ledger.
#[derive(Debug, Clone, PartialEq)]
pub struct AccountSnapshot {
    pub owner: Pubkey,
    pub data: Vec<u8>,
}

impl LaunchpadState {
    /// Record size with all strings empty
    pub const MIN_SIZE: usize = DISCRIMINATOR_LEN + // discriminator
        32 + // authority
        32 + // platform_authority
        STRING_PREFIX_LEN + // raise_token_name
        STRING_PREFIX_LEN + // raise_token_symbol
        STRING_PREFIX_LEN + // uri
        8 + // total_supply
        8 + // tokens_for_sale
        8 + // sol_raise_target
        8 + // virtual_sol_reserves
        8 + // virtual_token_reserves
        16 + // k
        8 + // sol_raised
        8 + // tokens_sold
        1 + // status (enum)
        32 + // mint
        32; // token_vault

    /// Decode a launchpad state record. The discriminator is checked before
    /// any field is read, and decoding is all-or-nothing.
    pub fn decode(data: &[u8]) -> Result<Self> {
        require!(data.len() >= Self::MIN_SIZE, MarketError::TooShort);
        require!(
            &data[..DISCRIMINATOR_LEN] == Self::DISCRIMINATOR,
            MarketError::InvalidDiscriminator
        );

        let mut reader = FieldReader::new(&data[DISCRIMINATOR_LEN..]);

        Ok(Self {
            authority: reader.pubkey()?,
            platform_authority: reader.pubkey()?,
            raise_token_name: reader.string()?,
            raise_token_symbol: reader.string()?,
            uri: reader.string()?,
            total_supply: reader.u64()?,
            tokens_for_sale: reader.u64()?,
            sol_raise_target: reader.u64()?,
            virtual_sol_reserves: reader.u64()?,
            virtual_token_reserves: reader.u64()?,
            k: reader.u128()?,
            sol_raised: reader.u64()?,
            tokens_sold: reader.u64()?,
            status: CampaignStatus::from_ordinal(reader.u8()? as u64)?,
            mint: reader.pubkey()?,
            token_vault: reader.pubkey()?,
        })
    }

    /// Decode a fetched account after checking it belongs to `program_id`
    pub fn from_snapshot(snapshot: &AccountSnapshot, program_id: &Pubkey) -> Result<Self> {
        verify_owner(snapshot, program_id)?;
        Self::decode(&snapshot.data)
    }

    /// Discriminator followed by the borsh body, as the program writes it
    pub fn encode(&self) -> Result<Vec<u8>> {
        let mut data = Vec::with_capacity(
            Self::MIN_SIZE
                + self.raise_token_name.len()
                + self.raise_token_symbol.len()
                + self.uri.len(),
        );
        self.try_serialize(&mut data)?;
        Ok(data)
    }

    pub fn is_funding(&self) -> bool {
        self.status == CampaignStatus::Funding
    }

    pub fn is_graduated(&self) -> bool {
        self.status.is_graduated()
    }

    /// Raise target reached (a zero target never counts as reached)
    pub fn raise_target_met(&self) -> bool {
        self.sol_raise_target > 0 && self.sol_raised >= self.sol_raise_target
    }
}

pub fn verify_owner(snapshot: &AccountSnapshot, program_id: &Pubkey) -> Result<()> {
    require_keys_eq!(
        snapshot.owner,
        *program_id,
        MarketError::InvalidAccountOwner
    );
    Ok(())
}

/// Little-endian cursor over the account body.
struct FieldReader<'a> {
    data: &'a [u8],
    offset: usize,
}

impl<'a> FieldReader<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, offset: 0 }
    }

    fn take(&mut self, len: usize) -> Result<&'a [u8]> {
        let end = self
            .offset
            .checked_add(len)
            .ok_or(MarketError::TooShort)?;
        let bytes = self
            .data
            .get(self.offset..end)
            .ok_or(MarketError::TooShort)?;
        self.offset = end;
        Ok(bytes)
    }

    fn array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let bytes = self.take(N)?;
        let array: [u8; N] = bytes.try_into().map_err(|_| MarketError::TooShort)?;
        Ok(array)
    }

    fn pubkey(&mut self) -> Result<Pubkey> {
        Ok(Pubkey::new_from_array(self.array::<32>()?))
    }

    fn u8(&mut self) -> Result<u8> {
        Ok(self.array::<1>()?[0])
    }

    fn u64(&mut self) -> Result<u64> {
        Ok(u64::from_le_bytes(self.array::<8>()?))
    }

    fn u128(&mut self) -> Result<u128> {
        Ok(u128::from_le_bytes(self.array::<16>()?))
    }

    fn string(&mut self) -> Result<String> {
        let len = u32::from_le_bytes(self.array::<4>()?) as usize;
        let bytes = self.take(len)?;
        let value = std::str::from_utf8(bytes).map_err(|_| MarketError::InvalidStringField)?;
        Ok(value.to_owned())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn sample_state() -> LaunchpadState {
        LaunchpadState {
            authority: Pubkey::new_from_array([1; 32]),
            platform_authority: Pubkey::new_from_array([2; 32]),
            raise_token_name: "Acme Robotics".to_string(),
            raise_token_symbol: "ACME".to_string(),
            uri: "https://example.com/acme.json".to_string(),
            total_supply: 1_000_000_000_000_000,
            tokens_for_sale: 200_000_000_000,
            sol_raise_target: 85_000_000_000,
            virtual_sol_reserves: 30_000_000_000,
            virtual_token_reserves: 1_000_000_000_000,
            k: 30_000_000_000u128 * 1_000_000_000_000u128,
            sol_raised: 12_500_000_000,
            tokens_sold: 50_000_000_000,
            status: CampaignStatus::Funding,
            mint: Pubkey::new_from_array([3; 32]),
            token_vault: Pubkey::new_from_array([4; 32]),
        }
    }

    /// Offset of the status tag for `sample_state`
    fn status_offset(state: &LaunchpadState) -> usize {
        LaunchpadState::MIN_SIZE - 1 - 64
            + state.raise_token_name.len()
            + state.raise_token_symbol.len()
            + state.uri.len()
    }

    #[test]
    fn encoded_record_decodes_to_the_same_state() {
        let state = sample_state();
        let data = state.encode().unwrap();

        assert_eq!(&data[..8], LaunchpadState::DISCRIMINATOR);
        assert_eq!(LaunchpadState::decode(&data).unwrap(), state);
    }

    #[test]
    fn discriminator_is_the_anchor_account_hash() {
        assert_eq!(
            LaunchpadState::DISCRIMINATOR,
            &[171, 121, 17, 28, 15, 227, 141, 206]
        );
    }

    #[test]
    fn empty_strings_hit_the_minimum_size() {
        let state = LaunchpadState::default();
        let data = state.encode().unwrap();

        assert_eq!(data.len(), LaunchpadState::MIN_SIZE);
        assert_eq!(LaunchpadState::decode(&data).unwrap(), state);
    }

    #[test]
    fn short_buffers_are_rejected() {
        let data = LaunchpadState::default().encode().unwrap();
        let err = LaunchpadState::decode(&data[..data.len() - 1]).unwrap_err();
        assert_eq!(err, MarketError::TooShort.into());

        assert_eq!(
            LaunchpadState::decode(&[]).unwrap_err(),
            MarketError::TooShort.into()
        );
    }

    #[test]
    fn truncated_string_body_is_too_short() {
        let data = sample_state().encode().unwrap();
        // Enough bytes for the fixed fields, but the strings no longer fit.
        let truncated = &data[..LaunchpadState::MIN_SIZE + 4];
        assert_eq!(
            LaunchpadState::decode(truncated).unwrap_err(),
            MarketError::TooShort.into()
        );
    }

    #[test]
    fn wrong_discriminator_is_rejected_before_fields() {
        let mut data = sample_state().encode().unwrap();
        data[0] ^= 0xff;
        // Corrupt the status as well: the discriminator check must win.
        let offset = status_offset(&sample_state());
        data[offset] = 9;

        assert_eq!(
            LaunchpadState::decode(&data).unwrap_err(),
            MarketError::InvalidDiscriminator.into()
        );
    }

    #[test]
    fn out_of_range_status_is_unknown_variant() {
        let state = sample_state();
        let mut data = state.encode().unwrap();
        let offset = status_offset(&state);
        assert_eq!(data[offset], CampaignStatus::Funding.ordinal());

        data[offset] = 3;
        assert_eq!(
            LaunchpadState::decode(&data).unwrap_err(),
            MarketError::UnknownVariant.into()
        );
    }

    #[test]
    fn invalid_utf8_name_is_rejected() {
        let mut data = sample_state().encode().unwrap();
        // First byte of raise_token_name
        data[8 + 64 + 4] = 0xff;
        assert_eq!(
            LaunchpadState::decode(&data).unwrap_err(),
            MarketError::InvalidStringField.into()
        );
    }

    #[test]
    fn foreign_owner_is_rejected() {
        let snapshot = AccountSnapshot {
            owner: Pubkey::new_from_array([9; 32]),
            data: sample_state().encode().unwrap(),
        };
        assert_eq!(
            LaunchpadState::from_snapshot(&snapshot, &crate::ID).unwrap_err(),
            MarketError::InvalidAccountOwner.into()
        );

        let owned = AccountSnapshot {
            owner: crate::ID,
            ..snapshot
        };
        assert_eq!(
            LaunchpadState::from_snapshot(&owned, &crate::ID).unwrap(),
            sample_state()
        );
    }

    #[test]
    fn raise_target_met_ignores_zero_target() {
        let mut state = sample_state();
        assert!(!state.raise_target_met());

        state.sol_raised = state.sol_raise_target;
        assert!(state.raise_target_met());

        state.sol_raise_target = 0;
        assert!(!state.raise_target_met());
    }
}
