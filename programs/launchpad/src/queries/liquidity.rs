use anchor_lang::prelude::*;
use serde::Serialize;
use tracing::info;

use crate::facade::{LedgerReader, MarketFacade, TradeStore};
use crate::state::{TimeWindow, Trade};
use crate::utils::activity::{trade_activity, TradeActivity, VolumeWindow};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumeWindowResponse {
    pub volume: f64,
    pub trade_count: u64,
    pub avg_trade_size: f64,
}

impl From<VolumeWindow> for VolumeWindowResponse {
    fn from(window: VolumeWindow) -> Self {
        Self {
            volume: window.volume,
            trade_count: window.trade_count,
            avg_trade_size: window.avg_trade_size(),
        }
    }
}

/// Rolling trading activity, volumes in SOL notional
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityResponse {
    pub volume_24h: VolumeWindowResponse,
    pub volume_7d: VolumeWindowResponse,
    pub total: VolumeWindowResponse,
    pub buy_trades: u64,
    pub sell_trades: u64,
    pub total_holders: u64,
    pub unique_buyers: u64,
    pub unique_sellers: u64,
    pub active_traders: u64,
}

impl From<TradeActivity> for ActivityResponse {
    fn from(activity: TradeActivity) -> Self {
        Self {
            volume_24h: activity.last_24h.into(),
            volume_7d: activity.last_7d.into(),
            total: activity.all_time.into(),
            buy_trades: activity.buy_trades,
            sell_trades: activity.sell_trades,
            total_holders: activity.total_holders(),
            unique_buyers: activity.unique_buyers(),
            unique_sellers: activity.unique_sellers(),
            active_traders: activity.active_traders(),
        }
    }
}

pub fn activity_response(trades: &[Trade], now: i64) -> ActivityResponse {
    trade_activity(trades, now).into()
}

impl<L: LedgerReader, S: TradeStore> MarketFacade<L, S> {
    /// Volume windows as of `now` (unix seconds)
    pub async fn activity(&self, address: &Pubkey, now: i64) -> Result<ActivityResponse> {
        let trades = self.fetch_trades(address, TimeWindow::all()).await?;
        let response = activity_response(&trades, now);

        info!(
            %address,
            volume_24h = response.volume_24h.volume,
            trades = response.total.trade_count,
            "trade activity"
        );

        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::DAY_WINDOW_SECS;
    use crate::state::TradeSide;
    use serde_json::json;

    #[test]
    fn reports_windows_and_proxies() {
        let now = 1_000_000;
        let trades = [
            Trade {
                id: "1".into(),
                timestamp: now - 10,
                price: 0.5,
                volume: 4.0,
                side: TradeSide::Buy,
            },
            Trade {
                id: "2".into(),
                timestamp: now - 2 * DAY_WINDOW_SECS,
                price: 1.0,
                volume: 2.0,
                side: TradeSide::Sell,
            },
        ];
        let value = serde_json::to_value(activity_response(&trades, now)).unwrap();

        assert_eq!(value["volume24h"]["volume"], json!(2.0));
        assert_eq!(value["volume7d"]["tradeCount"], json!(2));
        assert_eq!(value["total"]["avgTradeSize"], json!(2.0));
        assert_eq!(value["uniqueSellers"], json!(1));
        assert_eq!(value["activeTraders"], json!(2));
    }
}
