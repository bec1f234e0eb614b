pub mod activity;
pub mod candles;
pub mod pricing;
pub mod supply;
pub mod validation;

pub use activity::*;
pub use candles::*;
pub use pricing::*;
pub use supply::*;
pub use validation::*;
