pub mod current_price;
pub mod graduate;
pub mod launchpad;
pub mod liquidity;
pub mod market_cap;
pub mod metrics;
pub mod ohlcv;
pub mod status;
pub mod supply;
pub mod trades;

pub use current_price::*;
pub use graduate::*;
pub use launchpad::*;
pub use liquidity::*;
pub use market_cap::*;
pub use metrics::*;
pub use ohlcv::*;
pub use status::*;
pub use supply::*;
pub use trades::*;
