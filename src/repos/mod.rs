/*
 * Responsibility
 * - storage の公開インターフェース
 * - ExpenseRepo trait と、その実装 (Postgres / in-memory)
 */
pub mod error;
pub mod expense_repo;
pub mod memory_expense_repo;
pub mod pg_expense_repo;

pub use expense_repo::{ExpenseRepo, ExpenseRow, NewExpense};
pub use memory_expense_repo::MemoryExpenseRepo;
pub use pg_expense_repo::PgExpenseRepo;
