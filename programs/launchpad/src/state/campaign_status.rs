use std::fmt;

use anchor_lang::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::MarketError;

#[derive(
    Debug, Clone, Copy, AnchorSerialize, AnchorDeserialize, PartialEq, Eq, Hash, Serialize,
)]
pub enum CampaignStatus {
    Funding,    // Token sale in progress
    Transition, // Raise target met, waiting for the SAFE document
    Safe,       // Graduated, token holders hold equity claims
}

impl Default for CampaignStatus {
    fn default() -> Self {
        CampaignStatus::Funding
    }
}

/// Shapes the status field has been delivered in by past client decoders.
#[derive(Deserialize)]
#[serde(untagged)]
enum StatusEncoding {
    /// `2`
    Ordinal(u64),
    /// `"safe"`
    Label(String),
    /// `{"safe": {}}` or `{"__kind": "Safe"}`
    Tagged(Map<String, Value>),
}

impl CampaignStatus {
    pub const ALL: [CampaignStatus; 3] = [
        CampaignStatus::Funding,
        CampaignStatus::Transition,
        CampaignStatus::Safe,
    ];

    /// Map an on-chain enum tag to a status
    pub fn from_ordinal(tag: u64) -> Result<Self> {
        match tag {
            0 => Ok(CampaignStatus::Funding),
            1 => Ok(CampaignStatus::Transition),
            2 => Ok(CampaignStatus::Safe),
            _ => err!(MarketError::UnknownVariant),
        }
    }

    pub fn ordinal(self) -> u8 {
        self as u8
    }

    /// Case-insensitive variant name lookup
    pub fn from_label(label: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(label.trim()))
            .ok_or_else(|| error!(MarketError::UnknownVariant))
    }

    /// Normalize a JSON-decoded status. Accepts an integer ordinal, a bare
    /// string, or a tagged union; anything else is `UnknownVariant`.
    pub fn from_json(value: &Value) -> Result<Self> {
        let encoding: StatusEncoding = serde_json::from_value(value.clone())
            .map_err(|_| error!(MarketError::UnknownVariant))?;

        match encoding {
            StatusEncoding::Ordinal(tag) => Self::from_ordinal(tag),
            StatusEncoding::Label(label) => Self::from_label(&label),
            StatusEncoding::Tagged(fields) => {
                if let Some(kind) = fields.get("__kind") {
                    let label = kind
                        .as_str()
                        .ok_or_else(|| error!(MarketError::UnknownVariant))?;
                    return Self::from_label(label);
                }

                let mut keys = fields.keys();
                match (keys.next(), keys.next()) {
                    (Some(key), None) => Self::from_label(key),
                    _ => err!(MarketError::UnknownVariant),
                }
            }
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CampaignStatus::Funding => "Funding",
            CampaignStatus::Transition => "Transition",
            CampaignStatus::Safe => "Safe",
        }
    }

    /// Forward-only lifecycle edges
    pub fn can_transition_to(self, next: CampaignStatus) -> bool {
        matches!(
            (self, next),
            (CampaignStatus::Funding, CampaignStatus::Transition)
                | (CampaignStatus::Transition, CampaignStatus::Safe)
        )
    }

    pub fn is_graduated(self) -> bool {
        self == CampaignStatus::Safe
    }
}

impl fmt::Display for CampaignStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
