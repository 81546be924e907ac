/*
 * Responsibility
 * - /expenses 系 CRUD handler
 * - AuthCtx (middleware が注入) を受け取り、一覧は owner で絞り込み、更新/削除は policy で所有者チェック
 * - Path の {expense_id} は公開 ID → extractor で復号化して内部 ID に変換して受け取る
 * - body の JSON エラーは 404/401 の判定より後に返す (存在・所有者チェックが優先)
 */
use axum::{Json, extract::State, extract::rejection::JsonRejection, http::StatusCode};

use crate::{
    api::v1::{
        dto::expenses::{ExpenseInput, ExpenseResponse, MessageResponse},
        extractors::{AuthCtxExtractor, public_id::PublicExpenseId},
    },
    error::AppError,
    policy,
    repos::{ExpenseRow, NewExpense},
    state::AppState,
};

const RESOURCE: &str = "Expense";

fn row_to_response(state: &AppState, row: ExpenseRow) -> Result<ExpenseResponse, AppError> {
    let public_id = state.id_codec.encode(row.expense_id)?;

    Ok(ExpenseResponse {
        id: public_id,
        user: row.user_id,
        date: row.date,
        amount: row.amount,
        category: row.category,
        description: row.description,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

fn parse_body(
    payload: Result<Json<ExpenseInput>, JsonRejection>,
) -> Result<ExpenseInput, AppError> {
    let Json(input) = payload?;
    Ok(input)
}

pub async fn create_expense(
    State(state): State<AppState>,
    AuthCtxExtractor(auth): AuthCtxExtractor,
    payload: Result<Json<ExpenseInput>, JsonRejection>,
) -> Result<(StatusCode, Json<ExpenseResponse>), AppError> {
    let fields = parse_body(payload)?
        .validate()
        .map_err(|msg| AppError::bad_request("VALIDATION_ERROR", msg))?;

    let row = state
        .expenses
        .create(NewExpense {
            user_id: auth.user_id,
            date: fields.date,
            amount: fields.amount,
            category: fields.category,
            description: fields.description,
        })
        .await?;

    tracing::debug!(expense_id = row.expense_id, user_id = %auth.user_id, "expense created");

    let res = row_to_response(&state, row)?;
    Ok((StatusCode::CREATED, Json(res)))
}

pub async fn list_expenses(
    State(state): State<AppState>,
    AuthCtxExtractor(auth): AuthCtxExtractor,
) -> Result<Json<Vec<ExpenseResponse>>, AppError> {
    let rows = state.expenses.list_by_owner(auth.user_id).await?;

    let mut res = Vec::with_capacity(rows.len());
    for row in rows {
        res.push(row_to_response(&state, row)?);
    }

    Ok(Json(res))
}

pub async fn update_expense(
    State(state): State<AppState>,
    AuthCtxExtractor(auth): AuthCtxExtractor,
    expense_id: PublicExpenseId,
    payload: Result<Json<ExpenseInput>, JsonRejection>,
) -> Result<Json<ExpenseResponse>, AppError> {
    let mut row = state
        .expenses
        .get(expense_id.id)
        .await?
        .ok_or(AppError::not_found(RESOURCE))?;

    policy::ensure_owner(row.user_id, &auth)?;

    let fields = parse_body(payload)?
        .validate()
        .map_err(|msg| AppError::bad_request("VALIDATION_ERROR", msg))?;

    // 全フィールドを上書き (部分更新はしない)
    row.date = fields.date;
    row.amount = fields.amount;
    row.category = fields.category;
    row.description = fields.description;

    let saved = state.expenses.save(&row).await?;

    tracing::debug!(expense_id = saved.expense_id, user_id = %auth.user_id, "expense updated");

    Ok(Json(row_to_response(&state, saved)?))
}

pub async fn delete_expense(
    State(state): State<AppState>,
    AuthCtxExtractor(auth): AuthCtxExtractor,
    expense_id: PublicExpenseId,
) -> Result<Json<MessageResponse>, AppError> {
    let row = state
        .expenses
        .get(expense_id.id)
        .await?
        .ok_or(AppError::not_found(RESOURCE))?;

    policy::ensure_owner(row.user_id, &auth)?;

    // 並行 delete で既に消えていても結果は同じなので removed フラグは見ない
    let removed = state.expenses.remove(row.expense_id).await?;

    tracing::debug!(
        expense_id = row.expense_id,
        user_id = %auth.user_id,
        removed,
        "expense removed"
    );

    Ok(Json(MessageResponse {
        message: "Expense removed",
    }))
}
