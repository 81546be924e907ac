/**
 * Responsibility
 *  - リソースごとの「意味付きID型」を宣言する
 *  - decode ロジックや extractor 実装はここに置かない (core の責務)
 */
use super::core::PublicId;

// expenses
pub enum ExpenseTag {}
pub type PublicExpenseId = PublicId<ExpenseTag>;
