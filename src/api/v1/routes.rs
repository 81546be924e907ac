/*
 * Responsibility
 * - v1 の URL 構造を定義
 * - 認証不要 (public) と Bearer 必須 (protected) を分けて返し、app.rs で auth middleware を掛ける
 */
use axum::{
    Router,
    routing::{get, put},
};

use crate::state::AppState;

use crate::api::v1::handlers::{
    expenses::{create_expense, delete_expense, list_expenses, update_expense},
    health::health,
};

pub fn public_routes() -> Router<AppState> {
    Router::new().route("/health", get(health))
}

pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/expenses", get(list_expenses).post(create_expense))
        .route(
            "/expenses/{expense_id}",
            put(update_expense).delete(delete_expense),
        )
}
