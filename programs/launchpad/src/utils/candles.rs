use std::iter::FusedIterator;

use anchor_lang::prelude::*;

use crate::constants::{DEFAULT_CANDLE_INTERVAL_SECS, SECONDS_PER_MINUTE};
use crate::errors::MarketError;
use crate::state::{Candle, TimeWindow, Trade, TradeSide};

/// Fixed candle width in seconds (always > 0).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CandleInterval {
    seconds: i64,
}

impl CandleInterval {
    pub const ONE_MINUTE: Self = Self::minutes(1);
    pub const FIVE_MINUTES: Self = Self::minutes(5);
    pub const FIFTEEN_MINUTES: Self = Self::minutes(15);
    pub const ONE_HOUR: Self = Self::minutes(60);
    pub const FOUR_HOURS: Self = Self::minutes(240);
    pub const ONE_DAY: Self = Self::minutes(1440);

    const fn minutes(minutes: i64) -> Self {
        Self {
            seconds: minutes * SECONDS_PER_MINUTE,
        }
    }

    pub fn from_seconds(seconds: i64) -> Result<Self> {
        require!(seconds > 0, MarketError::InvalidInterval);
        Ok(Self { seconds })
    }

    /// Chart interval label (`1m`, `5m`, `15m`, `1h`, `4h`, `1d`). Anything
    /// else falls back to one hour.
    pub fn from_label(label: &str) -> Self {
        match label.trim() {
            "1m" => Self::ONE_MINUTE,
            "5m" => Self::FIVE_MINUTES,
            "15m" => Self::FIFTEEN_MINUTES,
            "1h" => Self::ONE_HOUR,
            "4h" => Self::FOUR_HOURS,
            "1d" => Self::ONE_DAY,
            _ => Self {
                seconds: DEFAULT_CANDLE_INTERVAL_SECS,
            },
        }
    }

    pub fn seconds(self) -> i64 {
        self.seconds
    }

    /// floor(timestamp / interval) * interval, flooring toward -inf. Near
    /// `i64::MIN`, where that bucket is not representable, the first aligned
    /// value above it is used.
    pub fn bucket_start(self, timestamp: i64) -> i64 {
        let offset = timestamp.rem_euclid(self.seconds);
        timestamp
            .checked_sub(offset)
            .unwrap_or_else(|| timestamp + (self.seconds - offset))
    }
}

impl Default for CandleInterval {
    fn default() -> Self {
        Self::ONE_HOUR
    }
}

/// Bucket `trades` into candles of width `interval`, keeping only trades
/// inside `window`.
///
/// Input order is not trusted: trades are stable-sorted by timestamp first,
/// so trades sharing a timestamp keep their insertion order. Only buckets
/// holding at least one trade are produced; gaps in the time axis are left
/// for the caller. The result depends on nothing but the arguments.
pub fn aggregate<'a>(trades: &'a [Trade], interval: CandleInterval, window: TimeWindow) -> Candles<'a> {
    let mut ordered: Vec<&'a Trade> = trades
        .iter()
        .filter(|trade| window.contains(trade.timestamp))
        .collect();
    ordered.sort_by_key(|trade| trade.timestamp);

    Candles {
        trades: ordered,
        position: 0,
        interval,
    }
}

/// Lazy candle sequence produced by [`aggregate`].
#[derive(Debug, Clone)]
pub struct Candles<'a> {
    trades: Vec<&'a Trade>,
    position: usize,
    interval: CandleInterval,
}

impl<'a> Iterator for Candles<'a> {
    type Item = Candle;

    fn next(&mut self) -> Option<Candle> {
        let first = *self.trades.get(self.position)?;
        let bucket_start = self.interval.bucket_start(first.timestamp);

        let mut candle = Candle {
            bucket_start,
            open: first.price,
            high: first.price,
            low: first.price,
            close: first.price,
            volume: 0.0,
            buy_count: 0,
            sell_count: 0,
        };

        while let Some(trade) = self.trades.get(self.position) {
            if self.interval.bucket_start(trade.timestamp) != bucket_start {
                break;
            }

            candle.high = candle.high.max(trade.price);
            candle.low = candle.low.min(trade.price);
            candle.close = trade.price;
            candle.volume += trade.volume;
            match trade.side {
                TradeSide::Buy => candle.buy_count += 1,
                TradeSide::Sell => candle.sell_count += 1,
            }

            self.position += 1;
        }

        Some(candle)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.trades.len() - self.position;
        (remaining.min(1), Some(remaining))
    }
}

impl<'a> FusedIterator for Candles<'a> {}

/// Presentation continuity for charting. Each candle opens at the previous
/// emitted close, and when one side strictly dominates the trade count the
/// close is pulled to the matching side of the open (buys: close >= open,
/// sells: close <= open). High and low widen to cover the adjusted open and
/// close. Bucket, volume and counts are untouched.
#[derive(Debug, Clone)]
pub struct Continuous<I> {
    inner: I,
    last_close: Option<f64>,
}

pub trait CandleSeriesExt: Iterator<Item = Candle> + Sized {
    fn with_continuity(self) -> Continuous<Self> {
        Continuous {
            inner: self,
            last_close: None,
        }
    }
}

impl<I: Iterator<Item = Candle>> CandleSeriesExt for I {}

impl<I: Iterator<Item = Candle>> Iterator for Continuous<I> {
    type Item = Candle;

    fn next(&mut self) -> Option<Candle> {
        let mut candle = self.inner.next()?;

        if let Some(previous_close) = self.last_close {
            candle.open = previous_close;
            candle.high = candle.high.max(candle.open);
            candle.low = candle.low.min(candle.open);
        }

        if candle.buy_count > candle.sell_count {
            candle.close = candle.close.max(candle.open);
        } else if candle.sell_count > candle.buy_count {
            candle.close = candle.close.min(candle.open);
        }

        candle.high = candle.high.max(candle.close);
        candle.low = candle.low.min(candle.close);

        self.last_close = Some(candle.close);
        Some(candle)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}
