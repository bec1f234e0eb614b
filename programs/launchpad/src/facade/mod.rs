use std::sync::Arc;

use anchor_lang::prelude::*;
use async_trait::async_trait;
use tokio::time::timeout;
use tracing::{debug, warn};

use crate::errors::MarketError;
use crate::state::{AccountSnapshot, LaunchpadState, MarketConfig, TimeWindow, Trade};

/// Reads raw accounts from the ledger (an RPC client in production).
/// Implementations map transport failures to `MarketError::LedgerUnavailable`.
#[async_trait]
pub trait LedgerReader: Send + Sync {
    async fn fetch_account(&self, address: &Pubkey) -> Result<Option<AccountSnapshot>>;
}

/// Reads the append-only trade log of one launchpad.
/// Implementations map query failures to `MarketError::TradeStoreUnavailable`.
#[async_trait]
pub trait TradeStore: Send + Sync {
    async fn trades(&self, launchpad: &Pubkey, window: TimeWindow) -> Result<Vec<Trade>>;
}

#[async_trait]
impl<T: LedgerReader + ?Sized> LedgerReader for Arc<T> {
    async fn fetch_account(&self, address: &Pubkey) -> Result<Option<AccountSnapshot>> {
        (**self).fetch_account(address).await
    }
}

#[async_trait]
impl<T: TradeStore + ?Sized> TradeStore for Arc<T> {
    async fn trades(&self, launchpad: &Pubkey, window: TimeWindow) -> Result<Vec<Trade>> {
        (**self).trades(launchpad, window).await
    }
}

/// Combines the ledger, the trade store and the pricing functions. Holds no
/// mutable state; every call reads fresh data.
pub struct MarketFacade<L, S> {
    config: MarketConfig,
    ledger: L,
    store: S,
}

impl<L: LedgerReader, S: TradeStore> MarketFacade<L, S> {
    pub fn new(config: MarketConfig, ledger: L, store: S) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            ledger,
            store,
        })
    }

    pub fn config(&self) -> &MarketConfig {
        &self.config
    }

    /// Fetch and decode a launchpad state account
    pub async fn fetch_state(&self, address: &Pubkey) -> Result<LaunchpadState> {
        let fetched = timeout(self.config.ledger_timeout(), self.ledger.fetch_account(address))
            .await
            .map_err(|_| {
                warn!(%address, timeout_ms = self.config.ledger_timeout_ms, "ledger fetch timed out");
                MarketError::LedgerTimeout
            })?;

        let snapshot = fetched?.ok_or_else(|| {
            warn!(%address, "launchpad account not found");
            MarketError::AccountNotFound
        })?;
        debug!(%address, size = snapshot.data.len(), "fetched launchpad account");

        LaunchpadState::from_snapshot(&snapshot, &self.config.program_id).map_err(|err| {
            warn!(%address, error = %err, "launchpad account rejected");
            err
        })
    }

    /// Fetch the trade log of a launchpad within `window`
    pub async fn fetch_trades(&self, address: &Pubkey, window: TimeWindow) -> Result<Vec<Trade>> {
        window.validate()?;

        let trades = timeout(self.config.store_timeout(), self.store.trades(address, window))
            .await
            .map_err(|_| {
                warn!(%address, timeout_ms = self.config.store_timeout_ms, "trade store query timed out");
                MarketError::TradeStoreTimeout
            })??;
        debug!(%address, count = trades.len(), "fetched trades");

        Ok(trades)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::collections::HashMap;
    use std::time::Duration;

    use super::*;
    use crate::state::launchpad_state::tests::sample_state;

    /// In-memory ledger with an optional artificial delay.
    #[derive(Default)]
    pub(crate) struct MemoryLedger {
        pub accounts: HashMap<Pubkey, AccountSnapshot>,
        pub delay: Option<Duration>,
        pub fail: bool,
    }

    impl MemoryLedger {
        pub(crate) fn with_state(address: Pubkey, state: &LaunchpadState) -> Self {
            let mut ledger = Self::default();
            ledger.accounts.insert(
                address,
                AccountSnapshot {
                    owner: crate::ID,
                    data: state.encode().unwrap(),
                },
            );
            ledger
        }
    }

    #[async_trait]
    impl LedgerReader for MemoryLedger {
        async fn fetch_account(&self, address: &Pubkey) -> Result<Option<AccountSnapshot>> {
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            if self.fail {
                return err!(MarketError::LedgerUnavailable);
            }
            Ok(self.accounts.get(address).cloned())
        }
    }

    #[derive(Default)]
    pub(crate) struct MemoryStore {
        pub trades: Vec<Trade>,
        pub delay: Option<Duration>,
        pub fail: bool,
    }

    #[async_trait]
    impl TradeStore for MemoryStore {
        async fn trades(&self, _launchpad: &Pubkey, window: TimeWindow) -> Result<Vec<Trade>> {
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            if self.fail {
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

    pub(crate) fn address() -> Pubkey {
        Pubkey::new_from_array([7; 32])
    }

    #[tokio::test]
    async fn fetches_and_decodes_state() {
        let facade = MarketFacade::new(
            MarketConfig::default(),
            MemoryLedger::with_state(address(), &sample_state()),
            MemoryStore::default(),
        )
        .unwrap();

        assert_eq!(facade.fetch_state(&address()).await.unwrap(), sample_state());
    }

    #[tokio::test]
    async fn missing_account_is_not_found() {
        let facade = MarketFacade::new(
            MarketConfig::default(),
            MemoryLedger::default(),
            MemoryStore::default(),
        )
        .unwrap();

        assert_eq!(
            facade.fetch_state(&address()).await.unwrap_err(),
            MarketError::AccountNotFound.into()
        );
    }

    #[tokio::test(start_paused = true)]
    async fn slow_ledger_times_out() {
        let ledger = MemoryLedger {
            delay: Some(Duration::from_secs(60)),
            ..MemoryLedger::with_state(address(), &sample_state())
        };
        let facade = MarketFacade::new(MarketConfig::default(), ledger, MemoryStore::default())
            .unwrap();

        assert_eq!(
            facade.fetch_state(&address()).await.unwrap_err(),
            MarketError::LedgerTimeout.into()
        );
    }

    #[tokio::test]
    async fn foreign_program_account_is_rejected() {
        let mut ledger = MemoryLedger::with_state(address(), &sample_state());
        ledger.accounts.get_mut(&address()).unwrap().owner = Pubkey::new_from_array([8; 32]);
        let facade = MarketFacade::new(MarketConfig::default(), ledger, MemoryStore::default())
            .unwrap();

        assert_eq!(
            facade.fetch_state(&address()).await.unwrap_err(),
            MarketError::InvalidAccountOwner.into()
        );
    }

    #[tokio::test]
    async fn inverted_trade_window_is_rejected() {
        let facade = MarketFacade::new(
            MarketConfig::default(),
            MemoryLedger::default(),
            MemoryStore::default(),
        )
        .unwrap();
        let window = TimeWindow {
            from: Some(10),
            to: Some(1),
        };

        assert_eq!(
            facade.fetch_trades(&address(), window).await.unwrap_err(),
            MarketError::InvalidTimeWindow.into()
        );
    }

    #[test]
    fn invalid_config_is_rejected_at_construction() {
        let config = MarketConfig {
            quote_rate: f64::INFINITY,
            ..MarketConfig::default()
        };
        assert!(MarketFacade::new(config, MemoryLedger::default(), MemoryStore::default()).is_err());
    }
}
