use anchor_lang::prelude::*;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

use crate::constants::DEFAULT_RECENT_TRADES_LIMIT;
use crate::facade::{LedgerReader, MarketFacade, TradeStore};
use crate::state::{TimeWindow, Trade, TradeSide};
use crate::utils::activity::recent_trades;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeResponse {
    pub id: String,
    pub time: Option<DateTime<Utc>>,
    pub timestamp: i64,
    pub price: f64,
    pub volume: f64,
    pub notional: f64,
    pub side: TradeSide,
}

impl From<&Trade> for TradeResponse {
    fn from(trade: &Trade) -> Self {
        Self {
            id: trade.id.clone(),
            time: DateTime::from_timestamp(trade.timestamp, 0),
            timestamp: trade.timestamp,
            price: trade.price,
            volume: trade.volume,
            notional: trade.notional(),
            side: trade.side,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TradesResponse {
    pub trades: Vec<TradeResponse>,
}

pub fn trades_response(trades: &[Trade], limit: usize) -> TradesResponse {
    TradesResponse {
        trades: recent_trades(trades, limit)
            .into_iter()
            .map(TradeResponse::from)
            .collect(),
    }
}

impl<L: LedgerReader, S: TradeStore> MarketFacade<L, S> {
    /// Latest trades of a launchpad, newest first. `limit` defaults to 100.
    pub async fn recent_trades(&self, address: &Pubkey, limit: Option<usize>) -> Result<TradesResponse> {
        let limit = limit.unwrap_or(DEFAULT_RECENT_TRADES_LIMIT);
        let trades = self.fetch_trades(address, TimeWindow::all()).await?;
        debug!(%address, available = trades.len(), limit, "recent trades");

        Ok(trades_response(&trades, limit))
    }
}
