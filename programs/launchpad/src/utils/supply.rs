use crate::state::{LaunchpadState, MarketConfig};
use crate::utils::pricing::to_whole_units;

/// Supply figures, in whole tokens unless suffixed `_raw`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SupplyBreakdown {
    pub total_supply_raw: u64,
    pub tokens_for_sale_raw: u64,
    pub tokens_sold_raw: u64,
    pub tokens_remaining_raw: u64,

    pub total_supply: f64,
    pub tokens_for_sale: f64,
    pub tokens_sold: f64,
    pub tokens_remaining: f64,
    pub tokens_remaining_percentage: f64,
    pub circulating_supply: f64,
    pub circulating_percentage: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FundingProgress {
    pub sol_raised_lamports: u64,
    pub sol_raise_target_lamports: u64,
    pub sol_raised: f64,
    pub sol_raise_target: f64,
    pub percentage: f64,
    pub target_met: bool,
}

/// Calculate the supply breakdown of a campaign
pub fn supply_breakdown(state: &LaunchpadState, config: &MarketConfig) -> SupplyBreakdown {
    let scale = config.token_scale();

    // Sold can only exceed for-sale on a corrupted record; clamp at zero
    let tokens_remaining_raw = state.tokens_for_sale.saturating_sub(state.tokens_sold);
    let circulating_raw = state.tokens_sold;

    SupplyBreakdown {
        total_supply_raw: state.total_supply,
        tokens_for_sale_raw: state.tokens_for_sale,
        tokens_sold_raw: state.tokens_sold,
        tokens_remaining_raw,
        total_supply: to_whole_units(state.total_supply as u128, scale),
        tokens_for_sale: to_whole_units(state.tokens_for_sale as u128, scale),
        tokens_sold: to_whole_units(state.tokens_sold as u128, scale),
        tokens_remaining: to_whole_units(tokens_remaining_raw as u128, scale),
        tokens_remaining_percentage: percentage(tokens_remaining_raw, state.tokens_for_sale),
        circulating_supply: to_whole_units(circulating_raw as u128, scale),
        circulating_percentage: percentage(circulating_raw, state.total_supply),
    }
}

/// Calculate how far the raise is toward its target
pub fn funding_progress(state: &LaunchpadState, config: &MarketConfig) -> FundingProgress {
    let scale = config.base_scale();

    FundingProgress {
        sol_raised_lamports: state.sol_raised,
        sol_raise_target_lamports: state.sol_raise_target,
        sol_raised: to_whole_units(state.sol_raised as u128, scale),
        sol_raise_target: to_whole_units(state.sol_raise_target as u128, scale),
        percentage: percentage(state.sol_raised, state.sol_raise_target),
        target_met: state.raise_target_met(),
    }
}

/// part / whole * 100, or 0 when `whole` is 0. Both sides are raw atomic
/// amounts, so no scale is involved.
pub fn percentage(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    part as f64 * 100.0 / whole as f64
}
