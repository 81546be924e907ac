/*
 * Responsibility
 * - Router に紐づける共有コンテキスト (AppState)
 *   - expenses: ExpenseRepo, id_codec: IdCodec, auth: AuthService
 * - Clone 前提で持つ (内部は Arc/Clone cheap)
 */
use std::sync::Arc;

use crate::repos::ExpenseRepo;
use crate::services::{auth::AuthService, id_codec::IdCodec};

#[derive(Clone)]
pub struct AppState {
    pub expenses: Arc<dyn ExpenseRepo>,
    pub id_codec: IdCodec,
    pub auth: Arc<AuthService>,
}

impl AppState {
    pub fn new(expenses: Arc<dyn ExpenseRepo>, id_codec: IdCodec, auth: Arc<AuthService>) -> Self {
        Self {
            expenses,
            id_codec,
            auth,
        }
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("expenses", &self.expenses.backend_name())
            .field("id_codec", &self.id_codec)
            .field("auth", &self.auth)
            .finish()
    }
}
