#![allow(dead_code)]

use std::collections::HashMap;
use std::time::Duration;

use anchor_lang::prelude::*;
use async_trait::async_trait;
use launchpad_market::{
    AccountSnapshot, CampaignStatus, LaunchpadState, LedgerReader, MarketConfig, MarketError,
    MarketFacade, TimeWindow, Trade, TradeSide, TradeStore,
};

#[derive(Default)]
pub struct Ledger {
    pub accounts: HashMap<Pubkey, AccountSnapshot>,
    pub delay: Option<Duration>,
}

impl Ledger {
    pub fn insert(&mut self, address: Pubkey, state: &LaunchpadState) {
        self.accounts.insert(
            address,
            AccountSnapshot {
                owner: launchpad_market::ID,
                data: state.encode().unwrap(),
            },
        );
    }
}

#[async_trait]
impl LedgerReader for Ledger {
    async fn fetch_account(&self, address: &Pubkey) -> Result<Option<AccountSnapshot>> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        Ok(self.accounts.get(address).cloned())
    }
}

#[derive(Default)]
pub struct TradeLog {
    pub trades: Vec<Trade>,
    pub delay: Option<Duration>,
    pub offline: bool,
}

#[async_trait]
impl TradeStore for TradeLog {
    async fn trades(&self, _launchpad: &Pubkey, window: TimeWindow) -> Result<Vec<Trade>> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.offline {
            return err!(MarketError::TradeStoreUnavailable);
        }
        Ok(self
            .trades
            .iter()
            .filter(|trade| window.contains(trade.timestamp))
            .cloned()
            .collect())
    }
}

pub fn launchpad_address() -> Pubkey {
    Pubkey::new_from_array([42; 32])
}

/// 30 SOL against 1,000,000 tokens, 200,000 for sale with 50,000 sold
pub fn funding_launchpad() -> LaunchpadState {
    LaunchpadState {
        authority: Pubkey::new_from_array([1; 32]),
        platform_authority: Pubkey::new_from_array([2; 32]),
        raise_token_name: "Orbital Labs".to_string(),
        raise_token_symbol: "ORBT".to_string(),
        uri: "https://example.com/orbt.json".to_string(),
        total_supply: 1_000_000_000_000_000,
        tokens_for_sale: 200_000_000_000,
        sol_raise_target: 85_000_000_000,
        virtual_sol_reserves: 30_000_000_000,
        virtual_token_reserves: 1_000_000_000_000,
        k: 30_000_000_000u128 * 1_000_000_000_000u128,
        sol_raised: 20_000_000_000,
        tokens_sold: 50_000_000_000,
        status: CampaignStatus::Funding,
        mint: Pubkey::new_from_array([3; 32]),
        token_vault: Pubkey::new_from_array([4; 32]),
    }
}

pub fn trade(id: &str, timestamp: i64, side: TradeSide, price: f64, volume: f64) -> Trade {
    Trade {
        id: id.to_string(),
        timestamp,
        price,
        volume,
        side,
    }
}

pub fn facade(state: &LaunchpadState, trade_log: TradeLog) -> MarketFacade<Ledger, TradeLog> {
    let mut ledger = Ledger::default();
    ledger.insert(launchpad_address(), state);
    MarketFacade::new(MarketConfig::default(), ledger, trade_log).unwrap()
}
