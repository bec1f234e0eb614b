// ===== Account Layout =====
/// Anchor account discriminator length
pub const DISCRIMINATOR_LEN: usize = 8;

/// Borsh string length prefix (u32, little endian)
pub const STRING_PREFIX_LEN: usize = 4;

// ===== Token Configuration =====
/// Launchpad token decimals (standard SPL token)
pub const DEFAULT_TOKEN_DECIMALS: u8 = 6;

/// SOL decimals (lamports)
pub const DEFAULT_BASE_DECIMALS: u8 = 9;

pub const LAMPORTS_PER_SOL: u64 = anchor_lang::solana_program::native_token::LAMPORTS_PER_SOL;

/// Largest decimal exponent accepted by the pricing math
/// (u64::MAX * 10^19 still fits u128)
pub const MAX_DECIMALS: u8 = 19;

// ===== Reporting =====
/// Default SOL -> USD rate when none is configured
pub const DEFAULT_QUOTE_RATE: f64 = 100.0;

// ===== Collaborator Timeouts =====
/// Default ledger RPC timeout: 10 seconds
pub const DEFAULT_LEDGER_TIMEOUT_MS: u64 = 10_000;

/// Default trade store timeout: 5 seconds
pub const DEFAULT_STORE_TIMEOUT_MS: u64 = 5_000;

// ===== Candles =====
pub const SECONDS_PER_MINUTE: i64 = 60;

/// Interval used when a label is not recognised: 1 hour
pub const DEFAULT_CANDLE_INTERVAL_SECS: i64 = 60 * SECONDS_PER_MINUTE;

// ===== Activity Windows =====
/// 24 hours (in seconds)
pub const DAY_WINDOW_SECS: i64 = 24 * 60 * 60;

/// 7 days (in seconds)
pub const WEEK_WINDOW_SECS: i64 = 7 * DAY_WINDOW_SECS;

/// Default size of the recent trades listing
pub const DEFAULT_RECENT_TRADES_LIMIT: usize = 100;
