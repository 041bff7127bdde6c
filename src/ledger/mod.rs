//! Month-partitioned transaction state and the aggregations derived from it.

pub mod document;
#[allow(clippy::module_inception)]
pub mod ledger;
pub mod totals;

pub use document::{DocumentError, LoadReport};
pub use ledger::MonthlyLedger;
pub use totals::{CategoryBreakdown, CategoryTotal, MonthTotals};
