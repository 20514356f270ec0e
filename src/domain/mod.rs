//! Domain module
//!
//! Core domain types for session-scoped bookkeeping.

pub mod amount;
pub mod transaction;

pub use amount::{Amount, AmountError, TransactionType};
pub use transaction::{NewTransaction, SessionId, Summary, Transaction};
