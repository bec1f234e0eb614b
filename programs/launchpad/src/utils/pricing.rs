use anchor_lang::prelude::*;
use ruint::aliases::U256;
use serde::Serialize;

use crate::errors::MarketError;
use crate::state::{LaunchpadState, MarketConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Liquidity {
    Available,
    /// Token reserves are empty; price is reported as zero
    NoLiquidity,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceQuote {
    /// Lamports per whole token (integer stage, truncated)
    pub lamports_per_token: u128,

    /// SOL per whole token
    pub price: f64,

    pub liquidity: Liquidity,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarketCap {
    /// Market cap in SOL
    pub base: f64,

    /// Market cap in the reporting currency
    pub quote: f64,

    /// Market cap in lamports (integer stage)
    pub lamports: u128,

    /// Total supply in whole tokens
    pub whole_total_supply: f64,

    pub price: PriceQuote,
}

// price = virtual_sol_reserves * 10^token_decimals / virtual_token_reserves
/// Spot price on the constant-product curve. The reserve product is formed in
/// 256-bit integers; floating point is only used for the final lamport -> SOL
/// conversion, after the integer division. `lamports_per_token` is truncated,
/// `price` keeps the sub-lamport remainder.
pub fn current_price(state: &LaunchpadState, config: &MarketConfig) -> Result<PriceQuote> {
    if state.virtual_token_reserves == 0 {
        return Ok(PriceQuote {
            lamports_per_token: 0,
            price: 0.0,
            liquidity: Liquidity::NoLiquidity,
        });
    }

    let sol_reserves = U256::from(state.virtual_sol_reserves);
    let token_reserves = U256::from(state.virtual_token_reserves);
    let token_scale = U256::from(config.token_scale());

    let scaled_reserves = sol_reserves
        .checked_mul(token_scale)
        .ok_or(MarketError::MathOverflow)?;
    let lamports_per_token = scaled_reserves
        .checked_div(token_reserves)
        .ok_or(MarketError::MathOverflow)?;
    // Sub-lamport part; remainder < token reserves, so it fits u64
    let remainder = scaled_reserves
        .checked_rem(token_reserves)
        .ok_or(MarketError::MathOverflow)?;

    let lamports_per_token = u128::try_from(lamports_per_token)
        .map_err(|_| MarketError::MathOverflow)?;
    let remainder = u64::try_from(remainder).map_err(|_| MarketError::MathOverflow)?;

    let base_scale = config.base_scale();
    let fraction = remainder as f64 / state.virtual_token_reserves as f64;

    Ok(PriceQuote {
        lamports_per_token,
        price: to_whole_units(lamports_per_token, base_scale) + fraction / base_scale as f64,
        liquidity: Liquidity::Available,
    })
}

/// Market cap = price * whole-unit total supply, optionally converted with
/// `config.quote_rate`.
pub fn market_cap(state: &LaunchpadState, config: &MarketConfig) -> Result<MarketCap> {
    let price = current_price(state, config)?;
    let whole_total_supply = whole_total_supply(state, config);

    let lamports = U256::from(price.lamports_per_token)
        .checked_mul(U256::from(state.total_supply))
        .ok_or(MarketError::MathOverflow)?
        .checked_div(U256::from(config.token_scale()))
        .ok_or(MarketError::MathOverflow)?;
    let lamports = u128::try_from(lamports).map_err(|_| MarketError::MathOverflow)?;

    let base = price.price * whole_total_supply;

    Ok(MarketCap {
        base,
        quote: base * config.quote_rate,
        lamports,
        whole_total_supply,
        price,
    })
}

pub fn whole_total_supply(state: &LaunchpadState, config: &MarketConfig) -> f64 {
    to_whole_units(state.total_supply as u128, config.token_scale())
}

/// Atomic amount -> whole units. The integer part is split off first so
/// large amounts keep their fractional digits.
pub fn to_whole_units(amount: u128, scale: u128) -> f64 {
    if scale == 0 {
        return 0.0;
    }
    let whole = amount / scale;
    let fraction = amount % scale;
    whole as f64 + fraction as f64 / scale as f64
}
