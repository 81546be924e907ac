/*
 * Responsibility
 * - Handler から見える「認証済みコンテキスト」の型
 * - middleware が検証して request extensions に格納し、handler はこの型だけを受け取る
 *
 * Notes
 * - JWT の検証ロジックは middleware/services 側の責務
 * - 所有者チェックは policy 層 (policy::ensure_owner) で行う
 */

use uuid::Uuid;

/// 認証済みのリクエストに付与されるコンテキスト
///
/// - `user_id` は token の subject (UUID)。expense の owner と比較される
/// - `jti` はログ相関用
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthCtx {
    pub user_id: Uuid,
    pub jti: Option<String>,
}

impl AuthCtx {
    pub fn new(user_id: Uuid) -> Self {
        Self { user_id, jti: None }
    }

    pub fn with_jti(mut self, jti: Option<String>) -> Self {
        self.jti = jti;
        self
    }
}
