//! Pure domain models for the month-partitioned transaction store.
//! No I/O and no storage; only data types, coercion, and display tables.

pub mod category;
pub mod common;
pub mod month;
pub mod transaction;

pub use category::{Category, CategoryLabels};
pub use common::{Amounted, Displayable, Identifiable};
pub use month::Month;
pub use transaction::{AmountInput, Transaction, TransactionDraft, TransactionId, TransactionKind};
