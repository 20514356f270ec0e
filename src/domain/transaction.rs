//! Transaction records
//!
//! A transaction is immutable once stored. Its amount is already signed:
//! credits are positive, debits negative.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;
use uuid::Uuid;

use super::amount::{Amount, TransactionType};

/// Opaque session identifier carried in the `sessionId` cookie.
///
/// Any non-empty value is accepted; there is no server-side session table.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionId(String);

impl SessionId {
    /// Wrap a cookie value. Returns `None` for an empty value.
    pub fn parse(value: &str) -> Option<Self> {
        if value.is_empty() {
            None
        } else {
            Some(Self(value.to_string()))
        }
    }

    /// Mint a fresh session identifier
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A stored transaction
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct Transaction {
    pub id: Uuid,
    pub title: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    #[serde(skip_serializing)]
    pub session_id: String,
    pub created_at: DateTime<Utc>,
}

/// A transaction ready to be inserted
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    pub id: Uuid,
    pub title: String,
    pub amount: Decimal,
    pub session_id: SessionId,
}

impl NewTransaction {
    /// Build a new transaction with a fresh id and the signed amount for `kind`.
    pub fn new(
        title: impl Into<String>,
        amount: Amount,
        kind: TransactionType,
        session_id: SessionId,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            amount: amount.signed(kind),
            session_id,
        }
    }
}

/// Net balance of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Summary {
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
}
