//! Dashboard summary handler

use axum::{extract::State, Json};
use chrono::Utc;
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::PgPool;

use crate::error::ApiError;
use crate::middleware::AuthenticatedUser;
use crate::models::ApiResponse;

/// Portfolio summary for the owner's dashboard
#[derive(Debug, Serialize)]
pub struct DashboardSummary {
    pub active_borrowers: i64,
    pub total_loans: i64,
    pub total_loans_amount: Decimal,
    pub due_today: Decimal,
    pub overdue_amount: Decimal,
}

pub async fn dashboard_summary(
    State(pool): State<PgPool>,
    user: AuthenticatedUser,
) -> Result<Json<ApiResponse<DashboardSummary>>, ApiError> {
    let today = Utc::now().date_naive();

    let active_borrowers: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM borrowers WHERE owner_id = $1")
            .bind(user.owner_id)
            .fetch_one(&pool)
            .await?;

    let total_loans: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM loans WHERE owner_id = $1")
        .bind(user.owner_id)
        .fetch_one(&pool)
        .await?;

    let total_loans_amount: Option<Decimal> =
        sqlx::query_scalar("SELECT SUM(principal) FROM loans WHERE owner_id = $1")
            .bind(user.owner_id)
            .fetch_one(&pool)
            .await?;

    let due_today: Option<Decimal> = sqlx::query_scalar(
        r#"
        SELECT SUM(amount_due - amount_paid) FROM payments
        WHERE owner_id = $1 AND due_date = $2 AND amount_paid < amount_due
        "#,
    )
    .bind(user.owner_id)
    .bind(today)
    .fetch_one(&pool)
    .await?;

    let overdue_amount: Option<Decimal> = sqlx::query_scalar(
        r#"
        SELECT SUM(amount_due - amount_paid) FROM payments
        WHERE owner_id = $1 AND due_date < $2 AND amount_paid < amount_due
        "#,
    )
    .bind(user.owner_id)
    .bind(today)
    .fetch_one(&pool)
    .await?;

    Ok(Json(ApiResponse::ok(DashboardSummary {
        active_borrowers,
        total_loans,
        total_loans_amount: total_loans_amount.unwrap_or(Decimal::ZERO),
        due_today: due_today.unwrap_or(Decimal::ZERO),
        overdue_amount: overdue_amount.unwrap_or(Decimal::ZERO),
    })))
}
