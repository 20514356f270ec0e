//! Transaction Store
//!
//! Persistence for the `transactions` table.

pub mod repository;

pub use repository::TransactionStore;
