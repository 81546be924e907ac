//! Process-local expense store.
//!
//! Used by tests and by development runs without `DATABASE_URL`.
//! Data is lost on restart.
use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::repos::error::{RepoError, RepoResult};
use crate::repos::expense_repo::{ExpenseRepo, ExpenseRow, NewExpense};

#[derive(Debug, Default)]
struct Inner {
    last_id: i64,
    // BTreeMap keeps rows in id (= insertion) order
    rows: BTreeMap<i64, ExpenseRow>,
}

#[derive(Debug, Default)]
pub struct MemoryExpenseRepo {
    inner: RwLock<Inner>,
}

impl MemoryExpenseRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ExpenseRepo for MemoryExpenseRepo {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn create(&self, new: NewExpense) -> RepoResult<ExpenseRow> {
        let mut inner = self.inner.write().await;
        inner.last_id += 1;

        let now = Utc::now();
        let row = ExpenseRow {
            expense_id: inner.last_id,
            user_id: new.user_id,
            date: new.date,
            amount: new.amount,
            category: new.category,
            description: new.description,
            created_at: now,
            updated_at: now,
        };
        inner.rows.insert(row.expense_id, row.clone());

        Ok(row)
    }

    async fn list_by_owner(&self, user_id: Uuid) -> RepoResult<Vec<ExpenseRow>> {
        let inner = self.inner.read().await;
        Ok(inner
            .rows
            .values()
            .filter(|row| row.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn get(&self, expense_id: i64) -> RepoResult<Option<ExpenseRow>> {
        let inner = self.inner.read().await;
        Ok(inner.rows.get(&expense_id).cloned())
    }

    async fn save(&self, row: &ExpenseRow) -> RepoResult<ExpenseRow> {
        let mut inner = self.inner.write().await;
        let stored = inner
            .rows
            .get_mut(&row.expense_id)
            .ok_or(RepoError::Stale { id: row.expense_id })?;

        stored.date = row.date;
        stored.amount = row.amount;
        stored.category = row.category.clone();
        stored.description = row.description.clone();
        stored.updated_at = Utc::now();

        Ok(stored.clone())
    }

    async fn remove(&self, expense_id: i64) -> RepoResult<bool> {
        let mut inner = self.inner.write().await;
        Ok(inner.rows.remove(&expense_id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn new_expense(user_id: Uuid, category: &str) -> NewExpense {
        NewExpense {
            user_id,
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            amount: 10.0,
            category: category.to_string(),
            description: None,
        }
    }

    #[tokio::test]
    async fn ids_are_assigned_in_insertion_order() {
        let repo = MemoryExpenseRepo::new();
        let user = Uuid::new_v4();

        let a = repo.create(new_expense(user, "food")).await.unwrap();
        let b = repo.create(new_expense(user, "rent")).await.unwrap();

        assert!(b.expense_id > a.expense_id);
        let listed = repo.list_by_owner(user).await.unwrap();
        assert_eq!(listed, vec![a, b]);
    }

    #[tokio::test]
    async fn list_is_filtered_by_owner() {
        let repo = MemoryExpenseRepo::new();
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();

        repo.create(new_expense(alice, "food")).await.unwrap();
        repo.create(new_expense(bob, "fuel")).await.unwrap();

        let listed = repo.list_by_owner(alice).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].user_id, alice);
    }

    #[tokio::test]
    async fn save_overwrites_mutable_fields_only() {
        let repo = MemoryExpenseRepo::new();
        let user = Uuid::new_v4();
        let created = repo.create(new_expense(user, "food")).await.unwrap();

        let mut changed = created.clone();
        changed.category = "travel".to_string();
        changed.amount = 99.5;
        changed.description = Some("train".to_string());
        changed.user_id = Uuid::new_v4();

        let saved = repo.save(&changed).await.unwrap();
        assert_eq!(saved.category, "travel");
        assert_eq!(saved.amount, 99.5);
        assert_eq!(saved.description.as_deref(), Some("train"));
        assert_eq!(saved.user_id, user);
        assert_eq!(saved.created_at, created.created_at);
    }

    #[tokio::test]
    async fn save_after_remove_is_stale() {
        let repo = MemoryExpenseRepo::new();
        let created = repo
            .create(new_expense(Uuid::new_v4(), "food"))
            .await
            .unwrap();

        assert!(repo.remove(created.expense_id).await.unwrap());
        assert!(!repo.remove(created.expense_id).await.unwrap());

        let err = repo.save(&created).await.unwrap_err();
        assert!(matches!(err, RepoError::Stale { id } if id == created.expense_id));
    }
}
