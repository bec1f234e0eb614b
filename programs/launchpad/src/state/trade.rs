use std::str::FromStr;

use anchor_lang::prelude::*;
use serde::{Deserialize, Serialize};

use crate::errors::MarketError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeSide {
    #[serde(alias = "BUY", alias = "Buy")]
    Buy,
    #[serde(alias = "SELL", alias = "Sell")]
    Sell,
}

impl FromStr for TradeSide {
    type Err = anchor_lang::error::Error;

    /// Accepts the store's `BUY` / `SELL` as well as lowercase labels
    fn from_str(value: &str) -> Result<Self> {
        if value.eq_ignore_ascii_case("buy") {
            Ok(TradeSide::Buy)
        } else if value.eq_ignore_ascii_case("sell") {
            Ok(TradeSide::Sell)
        } else {
            err!(MarketError::UnknownVariant)
        }
    }
}

/// One executed trade, as recorded by the trade store. Immutable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    pub id: String,

    /// Unix seconds
    pub timestamp: i64,

    /// SOL per whole token
    pub price: f64,

    /// Whole tokens
    pub volume: f64,

    pub side: TradeSide,
}

impl Trade {
    pub fn is_buy(&self) -> bool {
        self.side == TradeSide::Buy
    }

    /// Notional value in SOL
    pub fn notional(&self) -> f64 {
        self.price * self.volume
    }
}

/// Time-bucketed trade summary. Always derived from trades, never stored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candle {
    /// Interval-aligned bucket start (unix seconds)
    pub bucket_start: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
    pub buy_count: u32,
    pub sell_count: u32,
}

impl Candle {
    pub fn trade_count(&self) -> u32 {
        self.buy_count + self.sell_count
    }
}

/// Inclusive `[from, to]` range of unix seconds; an open end is unbounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimeWindow {
    pub from: Option<i64>,
    pub to: Option<i64>,
}

impl TimeWindow {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn since(from: i64) -> Self {
        Self {
            from: Some(from),
            to: None,
        }
    }

    pub fn between(from: i64, to: i64) -> Result<Self> {
        let window = Self {
            from: Some(from),
            to: Some(to),
        };
        window.validate()?;
        Ok(window)
    }

    pub fn validate(&self) -> Result<()> {
        if let (Some(from), Some(to)) = (self.from, self.to) {
            require!(from <= to, MarketError::InvalidTimeWindow);
        }
        Ok(())
    }

    pub fn contains(&self, timestamp: i64) -> bool {
        self.from.map_or(true, |from| timestamp >= from)
            && self.to.map_or(true, |to| timestamp <= to)
    }
}
