pub mod campaign_status;
pub mod launchpad_state;
pub mod market_config;
pub mod trade;

pub use campaign_status::*;
pub use launchpad_state::*;
pub use market_config::*;
pub use trade::*;
