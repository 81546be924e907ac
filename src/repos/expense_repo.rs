//! Expense storage interface used by the handlers.
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use crate::repos::error::RepoResult;

#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct ExpenseRow {
    #[sqlx(rename = "expenseId")]
    pub expense_id: i64,

    #[sqlx(rename = "userId")]
    pub user_id: Uuid,

    pub date: NaiveDate,
    pub amount: f64,
    pub category: String,
    pub description: Option<String>,

    #[sqlx(rename = "createdAt")]
    pub created_at: DateTime<Utc>,

    #[sqlx(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

/// Values for a record that has not been stored yet (no id, no timestamps).
#[derive(Debug, Clone, PartialEq)]
pub struct NewExpense {
    pub user_id: Uuid,
    pub date: NaiveDate,
    pub amount: f64,
    pub category: String,
    pub description: Option<String>,
}

/// Storage collaborator for expenses.
///
/// - Ownership is NOT checked here; handlers call `policy::ensure_owner` first.
/// - `list_by_owner` returns rows in insertion order.
/// - `save` overwrites the mutable fields of an existing row and fails with
///   `RepoError::Stale` if the row was removed in the meantime.
#[async_trait]
pub trait ExpenseRepo: Send + Sync + 'static {
    // Returns the storage backend name (for logging).
    fn backend_name(&self) -> &'static str;

    async fn create(&self, new: NewExpense) -> RepoResult<ExpenseRow>;

    async fn list_by_owner(&self, user_id: Uuid) -> RepoResult<Vec<ExpenseRow>>;

    async fn get(&self, expense_id: i64) -> RepoResult<Option<ExpenseRow>>;

    async fn save(&self, row: &ExpenseRow) -> RepoResult<ExpenseRow>;

    // Returns false when nothing was removed.
    async fn remove(&self, expense_id: i64) -> RepoResult<bool>;
}
