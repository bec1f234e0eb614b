#![allow(unexpected_cfgs)]
//! Market data and pricing for bonding-curve launchpads: decodes launchpad
//! accounts, prices them off the virtual reserves, buckets the trade log
//! into candles and gates the graduate transition.
use anchor_lang::prelude::*;

pub mod constants;
pub mod errors;
pub mod facade;
pub mod queries;
pub mod state;
pub mod utils;

pub use errors::{ErrorResponse, MarketError};
pub use facade::{LedgerReader, MarketFacade, TradeStore};
pub use state::{
    AccountSnapshot, CampaignStatus, Candle, LaunchpadState, MarketConfig, MarketConfigParams,
    TimeWindow, Trade, TradeSide,
};
pub use utils::candles::{aggregate, CandleInterval, CandleSeriesExt};
pub use utils::pricing::{current_price, market_cap, Liquidity, MarketCap, PriceQuote};

declare_id!("DNRBFcPUmzVbxcStwSrvettxNYxCfrBUEj4hksd9aKRq");
