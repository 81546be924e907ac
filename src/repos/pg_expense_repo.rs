/*
 * Responsibility
 * - expenses テーブル向け SQLx 操作
 * - PgPool を受け取り ExpenseRepo を実装する
 * - 所有者チェックはしない (policy 層の責務)
 */
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::repos::error::{RepoError, RepoResult};
use crate::repos::expense_repo::{ExpenseRepo, ExpenseRow, NewExpense};

#[derive(Clone, Debug)]
pub struct PgExpenseRepo {
    pool: PgPool,
}

impl PgExpenseRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Apply pending schema migrations from `migrations/`.
    pub async fn migrate(&self) -> Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("./migrations").run(&self.pool).await
    }
}

#[async_trait]
impl ExpenseRepo for PgExpenseRepo {
    fn backend_name(&self) -> &'static str {
        "postgres"
    }

    async fn create(&self, new: NewExpense) -> RepoResult<ExpenseRow> {
        let row = sqlx::query_as::<_, ExpenseRow>(
            r#"
            INSERT INTO expenses ("userId", date, amount, category, description)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING
                "expenseId", "userId", date, amount, category, description,
                "createdAt", "updatedAt"
            "#,
        )
        .bind(new.user_id)
        .bind(new.date)
        .bind(new.amount)
        .bind(&new.category)
        .bind(new.description.as_deref())
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    async fn list_by_owner(&self, user_id: Uuid) -> RepoResult<Vec<ExpenseRow>> {
        let rows = sqlx::query_as::<_, ExpenseRow>(
            r#"
            SELECT
                "expenseId", "userId", date, amount, category, description,
                "createdAt", "updatedAt"
            FROM expenses
            WHERE "userId" = $1
            ORDER BY "expenseId" ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn get(&self, expense_id: i64) -> RepoResult<Option<ExpenseRow>> {
        let row = sqlx::query_as::<_, ExpenseRow>(
            r#"
            SELECT
                "expenseId", "userId", date, amount, category, description,
                "createdAt", "updatedAt"
            FROM expenses
            WHERE "expenseId" = $1
            "#,
        )
        .bind(expense_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn save(&self, row: &ExpenseRow) -> RepoResult<ExpenseRow> {
        // 全フィールドを無条件に上書き (COALESCE しない)
        let saved = sqlx::query_as::<_, ExpenseRow>(
            r#"
            UPDATE expenses
            SET
                date = $2,
                amount = $3,
                category = $4,
                description = $5,
                "updatedAt" = now()
            WHERE "expenseId" = $1
            RETURNING
                "expenseId", "userId", date, amount, category, description,
                "createdAt", "updatedAt"
            "#,
        )
        .bind(row.expense_id)
        .bind(row.date)
        .bind(row.amount)
        .bind(&row.category)
        .bind(row.description.as_deref())
        .fetch_optional(&self.pool)
        .await?;

        saved.ok_or(RepoError::Stale { id: row.expense_id })
    }

    async fn remove(&self, expense_id: i64) -> RepoResult<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM expenses
            WHERE "expenseId" = $1
            "#,
        )
        .bind(expense_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
