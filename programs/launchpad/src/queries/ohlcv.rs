use anchor_lang::prelude::*;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};

use crate::errors::error_message;
use crate::facade::{LedgerReader, MarketFacade, TradeStore};
use crate::state::{Candle, TimeWindow, Trade};
use crate::utils::candles::{aggregate, CandleInterval, CandleSeriesExt};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OhlcvParams {
    pub interval: CandleInterval,
    pub window: TimeWindow,
    /// Apply presentation continuity (open = previous close, side bias)
    pub continuity: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CandleResponse {
    /// ISO-8601 bucket start; `None` when outside the calendar range
    pub time: Option<DateTime<Utc>>,
    /// Epoch seconds bucket start
    pub timestamp: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
    pub buy_count: u32,
    pub sell_count: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CandleSeriesResponse {
    pub candles: Vec<CandleResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

impl From<Candle> for CandleResponse {
    fn from(candle: Candle) -> Self {
        Self {
            time: DateTime::from_timestamp(candle.bucket_start, 0),
            timestamp: candle.bucket_start,
            open: candle.open,
            high: candle.high,
            low: candle.low,
            close: candle.close,
            volume: candle.volume,
            buy_count: candle.buy_count,
            sell_count: candle.sell_count,
        }
    }
}

/// Build the candle series for `trades`
pub fn candle_series(trades: &[Trade], params: &OhlcvParams) -> CandleSeriesResponse {
    let candles = aggregate(trades, params.interval, params.window);
    let candles = if params.continuity {
        candles.with_continuity().map(CandleResponse::from).collect()
    } else {
        candles.map(CandleResponse::from).collect()
    };

    CandleSeriesResponse {
        candles,
        warning: None,
    }
}

impl<L: LedgerReader, S: TradeStore> MarketFacade<L, S> {
    /// OHLCV candles for a launchpad. An unavailable trade store yields an
    /// empty series with a warning rather than an error.
    pub async fn candles(&self, address: &Pubkey, params: OhlcvParams) -> Result<CandleSeriesResponse> {
        params.window.validate()?;

        match self.fetch_trades(address, params.window).await {
            Ok(trades) => {
                let series = candle_series(&trades, &params);
                info!(
                    %address,
                    interval_secs = params.interval.seconds(),
                    trades = trades.len(),
                    candles = series.candles.len(),
                    "built candles"
                );
                Ok(series)
            }
            Err(err) => {
                warn!(%address, error = %err, "OHLCV data unavailable");
                Ok(CandleSeriesResponse {
                    candles: Vec::new(),
                    warning: Some(format!("OHLCV data unavailable: {}", error_message(&err))),
                })
            }
        }
    }
}
