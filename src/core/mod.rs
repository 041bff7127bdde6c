pub mod ids;
pub mod store;
pub mod time;
pub mod utils;

pub use store::{DataInfo, FinanceStore, ImportSummary, LoadOutcome};
pub use time::{Clock, FixedClock, SystemClock};
