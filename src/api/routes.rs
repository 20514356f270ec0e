//! API Routes
//!
//! HTTP endpoint definitions, mounted under `/transactions`.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Extension, Path, State,
    },
    http::StatusCode,
    middleware,
    routing::{get, post},
    Json, Router,
};
use axum_extra::extract::cookie::CookieJar;
use rust_decimal::Decimal;
use serde::{de, Deserialize, Deserializer, Serialize};
use std::str::FromStr;
use uuid::Uuid;

use crate::domain::{Amount, NewTransaction, SessionId, Summary, Transaction, TransactionType};
use crate::error::AppResult;
use crate::store::TransactionStore;

use super::middleware::require_session;
use super::session::resolve_or_mint;

// =========================================================================
// Request/Response types
// =========================================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateTransactionRequest {
    pub title: String,
    #[serde(
        deserialize_with = "deserialize_json_number",
        serialize_with = "rust_decimal::serde::float::serialize"
    )]
    pub amount: Decimal,
    #[serde(rename = "type")]
    pub kind: TransactionType,
}

/// Accept only JSON numbers; strings such as `"5000"` are rejected.
fn deserialize_json_number<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let number = serde_json::Number::deserialize(deserializer)?;

    if let Some(value) = number.as_i64() {
        return Ok(Decimal::from(value));
    }
    if let Some(value) = number.as_u64() {
        return Ok(Decimal::from(value));
    }

    let text = number.to_string();
    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .map_err(|_| de::Error::custom(format!("amount {} is out of range", text)))
}

#[derive(Debug, Serialize)]
pub struct TransactionsResponse {
    pub transactions: Vec<Transaction>,
}

#[derive(Debug, Serialize)]
pub struct TransactionResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction: Option<Transaction>,
}

#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    pub summary: Summary,
}

// =========================================================================
// API Router
// =========================================================================

/// Create the transactions router
pub fn create_router() -> Router<TransactionStore> {
    let session_required = Router::new()
        .route("/", get(list_transactions))
        .route("/summary", get(get_summary))
        .route("/:id", get(get_transaction))
        .route_layer(middleware::from_fn(require_session));

    Router::new()
        .route("/", post(create_transaction))
        .merge(session_required)
}

// =========================================================================
// GET /transactions
// =========================================================================

/// List the caller's transactions
async fn list_transactions(
    State(store): State<TransactionStore>,
    Extension(session): Extension<SessionId>,
) -> AppResult<Json<TransactionsResponse>> {
    let transactions = store.list_by_session(&session).await?;

    Ok(Json(TransactionsResponse { transactions }))
}

// =========================================================================
// GET /transactions/:id
// =========================================================================

/// Get one of the caller's transactions. An unknown id is not an error.
async fn get_transaction(
    State(store): State<TransactionStore>,
    Extension(session): Extension<SessionId>,
    id: Result<Path<Uuid>, PathRejection>,
) -> AppResult<Json<TransactionResponse>> {
    let Path(id) = id?;

    let transaction = store.find_by_id(&session, id).await?;

    Ok(Json(TransactionResponse { transaction }))
}

// =========================================================================
// GET /transactions/summary
// =========================================================================

/// Net balance of the caller's session
async fn get_summary(
    State(store): State<TransactionStore>,
    Extension(session): Extension<SessionId>,
) -> AppResult<Json<SummaryResponse>> {
    let summary = store.summary(&session).await?;

    Ok(Json(SummaryResponse { summary }))
}

// =========================================================================
// POST /transactions
// =========================================================================

/// Record a credit or debit, minting a session when the caller has none
async fn create_transaction(
    State(store): State<TransactionStore>,
    jar: CookieJar,
    payload: Result<Json<CreateTransactionRequest>, JsonRejection>,
) -> AppResult<(CookieJar, StatusCode)> {
    let Json(request) = payload?;
    let amount = Amount::new(request.amount)?;

    let (jar, session) = resolve_or_mint(jar);

    let transaction = NewTransaction::new(request.title, amount, request.kind, session);
    store.insert(&transaction).await?;

    tracing::info!(
        transaction_id = %transaction.id,
        kind = %request.kind,
        "Transaction created"
    );

    Ok((jar, StatusCode::CREATED))
}
