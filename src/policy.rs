/*
 * Responsibility
 * - リソース単位の認可 (BOLA 対策)
 * - 「record の所有者 == 認証済み subject」だけを判定する
 * - 存在チェック (404) は handler 側で先に済ませる
 */
use uuid::Uuid;

use crate::api::v1::extractors::AuthCtx;
use crate::error::AppError;

/// Allow only the subject that owns the record.
pub fn ensure_owner(owner: Uuid, auth: &AuthCtx) -> Result<(), AppError> {
    if owner == auth.user_id {
        Ok(())
    } else {
        tracing::warn!(
            owner = %owner,
            subject = %auth.user_id,
            "subject is not the owner of the expense"
        );
        Err(AppError::NotOwner)
    }
}
