use std::cmp::Reverse;

use crate::constants::{DAY_WINDOW_SECS, WEEK_WINDOW_SECS};
use crate::state::{Trade, TradeSide};

/// Notional volume (SOL) and trade count over one window.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct VolumeWindow {
    pub volume: f64,
    pub trade_count: u64,
}

impl VolumeWindow {
    fn record(&mut self, trade: &Trade) {
        self.volume += trade.notional();
        self.trade_count += 1;
    }

    /// Average notional per trade, 0 for an empty window
    pub fn avg_trade_size(&self) -> f64 {
        if self.trade_count == 0 {
            return 0.0;
        }
        self.volume / self.trade_count as f64
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TradeActivity {
    pub last_24h: VolumeWindow,
    pub last_7d: VolumeWindow,
    pub all_time: VolumeWindow,
    pub buy_trades: u64,
    pub sell_trades: u64,
}

impl TradeActivity {
    // The trade log carries no wallet addresses, so holder figures are
    // approximated from trade counts.

    pub fn total_holders(&self) -> u64 {
        self.buy_trades
    }

    pub fn unique_buyers(&self) -> u64 {
        self.buy_trades
    }

    pub fn unique_sellers(&self) -> u64 {
        self.sell_trades
    }

    pub fn active_traders(&self) -> u64 {
        self.buy_trades + self.sell_trades
    }
}

/// Rolling activity as of `now` (unix seconds). A window includes trades at
/// or after `now - window`.
pub fn trade_activity(trades: &[Trade], now: i64) -> TradeActivity {
    let day_start = now.saturating_sub(DAY_WINDOW_SECS);
    let week_start = now.saturating_sub(WEEK_WINDOW_SECS);

    trades.iter().fold(TradeActivity::default(), |mut activity, trade| {
        activity.all_time.record(trade);
        if trade.timestamp >= week_start {
            activity.last_7d.record(trade);
        }
        if trade.timestamp >= day_start {
            activity.last_24h.record(trade);
        }
        match trade.side {
            TradeSide::Buy => activity.buy_trades += 1,
            TradeSide::Sell => activity.sell_trades += 1,
        }
        activity
    })
}

/// Up to `limit` trades, newest first
pub fn recent_trades(trades: &[Trade], limit: usize) -> Vec<&Trade> {
    let mut ordered: Vec<&Trade> = trades.iter().collect();
    ordered.sort_by_key(|trade| Reverse(trade.timestamp));
    ordered.truncate(limit);
    ordered
}
