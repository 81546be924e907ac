/*
 * Responsibility
 * - Expenses の request/response DTO
 * - request は JSON 上すべて optional で受け、validate() で必須チェックして型付きの値に変換する
 * - 公開 ID は encode 済みの値を返す (内部 ID を漏らさない)
 */
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Body of POST and PUT. PUT replaces every field, so the same shape is used for both.
#[derive(Debug, Default, Deserialize)]
pub struct ExpenseInput {
    pub date: Option<NaiveDate>,
    pub amount: Option<f64>,
    pub category: Option<String>,
    // Omitted / null clears the description on update
    pub description: Option<String>,
}

/// Validated expense fields, ready for storage.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseFields {
    pub date: NaiveDate,
    pub amount: f64,
    pub category: String,
    pub description: Option<String>,
}

impl ExpenseInput {
    pub fn validate(self) -> Result<ExpenseFields, &'static str> {
        let date = self.date.ok_or("date is required")?;

        let amount = self.amount.ok_or("amount is required")?;
        if !amount.is_finite() {
            return Err("amount must be a finite number");
        }

        let category = self.category.ok_or("category is required")?;
        if category.trim().is_empty() {
            return Err("category is required");
        }

        Ok(ExpenseFields {
            date,
            amount,
            category,
            description: self.description,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct ExpenseResponse {
    pub id: String, // encoded
    pub user: Uuid, // owner
    pub date: NaiveDate,
    pub amount: f64,
    pub category: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}
