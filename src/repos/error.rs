/**
 * Responsibility
 * - repo が上位に伝える意味の定義
 * - メッセージはそのまま 400 の本文になる
 */
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepoError {
    #[error(transparent)]
    Db(#[from] sqlx::Error),
    // save 時点で行が消えていた (並行 delete との競合)
    #[error("no expense found for id {id}")]
    Stale { id: i64 },
}

pub type RepoResult<T> = Result<T, RepoError>;
