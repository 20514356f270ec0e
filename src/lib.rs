//! session_ledger Library
//!
//! Re-exports modules for integration testing and the server binary.

pub mod api;
pub mod config;
pub mod db;
pub mod domain;
mod error;
pub mod store;

pub use config::Config;
pub use domain::{Amount, AmountError, NewTransaction, SessionId, Summary, Transaction, TransactionType};
pub use error::{AppError, AppResult, FieldError};
pub use store::TransactionStore;
