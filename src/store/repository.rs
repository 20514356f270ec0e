//! Transaction Store Repository
//!
//! Every read is filtered by session id; rows are only ever inserted.

use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::{NewTransaction, SessionId, Summary, Transaction};

/// Store for transaction records, owning the connection pool
#[derive(Debug, Clone)]
pub struct TransactionStore {
    pool: PgPool,
}

impl TransactionStore {
    /// Create a new TransactionStore with a database pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a single transaction
    pub async fn insert(&self, transaction: &NewTransaction) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO transactions (id, title, amount, session_id)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(transaction.id)
        .bind(&transaction.title)
        .bind(transaction.amount)
        .bind(transaction.session_id.as_str())
        .execute(&self.pool)
        .await?;

        tracing::debug!(
            transaction_id = %transaction.id,
            amount = %transaction.amount,
            "Transaction stored"
        );

        Ok(())
    }

    /// All transactions of a session, in insertion order
    pub async fn list_by_session(
        &self,
        session_id: &SessionId,
    ) -> Result<Vec<Transaction>, sqlx::Error> {
        sqlx::query_as(
            r#"
            SELECT id, title, amount, session_id, created_at
            FROM transactions
            WHERE session_id = $1
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .bind(session_id.as_str())
        .fetch_all(&self.pool)
        .await
    }

    /// Find a transaction by id within a session.
    ///
    /// A row owned by another session is reported as `None`, same as a missing id.
    pub async fn find_by_id(
        &self,
        session_id: &SessionId,
        id: Uuid,
    ) -> Result<Option<Transaction>, sqlx::Error> {
        sqlx::query_as(
            r#"
            SELECT id, title, amount, session_id, created_at
            FROM transactions
            WHERE id = $1 AND session_id = $2
            "#,
        )
        .bind(id)
        .bind(session_id.as_str())
        .fetch_optional(&self.pool)
        .await
    }

    /// Net balance of a session; zero when it has no transactions
    pub async fn summary(&self, session_id: &SessionId) -> Result<Summary, sqlx::Error> {
        let amount: Decimal = sqlx::query_scalar(
            r#"
            SELECT COALESCE(SUM(amount), 0)
            FROM transactions
            WHERE session_id = $1
            "#,
        )
        .bind(session_id.as_str())
        .fetch_one(&self.pool)
        .await?;

        Ok(Summary { amount })
    }
}
