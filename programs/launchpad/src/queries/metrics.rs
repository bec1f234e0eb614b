use anchor_lang::prelude::*;
use serde::Serialize;
use tracing::{info, warn};

use crate::facade::{LedgerReader, MarketFacade, TradeStore};
use crate::state::{CampaignStatus, LaunchpadState, MarketConfig, TimeWindow, Trade};
use crate::utils::activity::trade_activity;
use crate::utils::pricing::market_cap;
use crate::utils::supply::{funding_progress, supply_breakdown};

/// Dashboard metrics of one launchpad. The market half comes from the
/// account and is always present; the activity half comes from the trade
/// log and is zeroed when the log could not be read.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsResponse {
    pub current_price: f64,
    pub market_cap: f64,
    pub market_cap_quote: f64,
    pub total_supply: f64,
    pub circulating_supply: f64,
    pub tokens_remaining: f64,
    pub sol_raised: f64,
    pub raise_target: f64,
    pub funding_progress: f64,
    pub status: CampaignStatus,

    pub volume_24h: f64,
    pub volume_7d: f64,
    pub total_volume: f64,
    pub trade_count_24h: u64,
    pub trade_count_7d: u64,
    pub total_trades: u64,
    pub avg_trade_size: f64,
    pub total_holders: u64,
    pub unique_buyers: u64,
    pub unique_sellers: u64,
    pub active_traders: u64,
    pub activity_available: bool,
}

/// Merge account-derived and trade-derived figures. `trades` is `None` when
/// the trade log was unavailable.
pub fn metrics_response(
    state: &LaunchpadState,
    trades: Option<&[Trade]>,
    now: i64,
    config: &MarketConfig,
) -> Result<MetricsResponse> {
    let cap = market_cap(state, config)?;
    let supply = supply_breakdown(state, config);
    let progress = funding_progress(state, config);
    let activity = trades
        .map(|trades| trade_activity(trades, now))
        .unwrap_or_default();

    Ok(MetricsResponse {
        current_price: cap.price.price,
        market_cap: cap.base,
        market_cap_quote: cap.quote,
        total_supply: supply.total_supply,
        circulating_supply: supply.circulating_supply,
        tokens_remaining: supply.tokens_remaining,
        sol_raised: progress.sol_raised,
        raise_target: progress.sol_raise_target,
        funding_progress: progress.percentage,
        status: state.status,
        volume_24h: activity.last_24h.volume,
        volume_7d: activity.last_7d.volume,
        total_volume: activity.all_time.volume,
        trade_count_24h: activity.last_24h.trade_count,
        trade_count_7d: activity.last_7d.trade_count,
        total_trades: activity.all_time.trade_count,
        avg_trade_size: activity.all_time.avg_trade_size(),
        total_holders: activity.total_holders(),
        unique_buyers: activity.unique_buyers(),
        unique_sellers: activity.unique_sellers(),
        active_traders: activity.active_traders(),
        activity_available: trades.is_some(),
    })
}

impl<L: LedgerReader, S: TradeStore> MarketFacade<L, S> {
    /// Account and trade log are read concurrently, each under its own
    /// timeout. Account errors are returned; trade log errors only zero the
    /// activity figures.
    pub async fn metrics(&self, address: &Pubkey, now: i64) -> Result<MetricsResponse> {
        let (state, trades) = tokio::join!(
            self.fetch_state(address),
            self.fetch_trades(address, TimeWindow::all())
        );
        let state = state?;

        let trades = match trades {
            Ok(trades) => Some(trades),
            Err(err) => {
                warn!(%address, error = %err, "trade activity unavailable, reporting zeroes");
                None
            }
        };

        let response = metrics_response(&state, trades.as_deref(), now, self.config())?;
        info!(
            %address,
            price = response.current_price,
            market_cap = response.market_cap,
            total_trades = response.total_trades,
            activity_available = response.activity_available,
            "metrics"
        );

        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::launchpad_state::tests::sample_state;
    use crate::state::TradeSide;

    #[test]
    fn missing_trade_log_zeroes_activity_only() {
        let response =
            metrics_response(&sample_state(), None, 0, &MarketConfig::default()).unwrap();

        assert!((response.current_price - 0.00003).abs() < 1e-15);
        assert!((response.market_cap - 30_000.0).abs() < 1e-6);
        assert_eq!(response.sol_raised, 12.5);
        assert_eq!(response.total_volume, 0.0);
        assert_eq!(response.avg_trade_size, 0.0);
        assert!(!response.activity_available);
        assert_eq!(response.active_traders, 0);
    }

    #[test]
    fn trade_log_feeds_activity() {
        let trades = vec![
            Trade {
                id: "1".into(),
                timestamp: 90,
                price: 0.03,
                volume: 100.0,
                side: TradeSide::Buy,
            },
            Trade {
                id: "2".into(),
                timestamp: 95,
                price: 0.03,
                volume: 50.0,
                side: TradeSide::Sell,
            },
        ];
        let response =
            metrics_response(&sample_state(), Some(&trades), 100, &MarketConfig::default())
                .unwrap();

        assert_eq!(response.trade_count_24h, 2);
        assert_eq!(response.unique_buyers, 1);
        assert_eq!(response.unique_sellers, 1);
        assert!((response.total_volume - 4.5).abs() < 1e-9);
        assert!(response.activity_available);
    }
}
