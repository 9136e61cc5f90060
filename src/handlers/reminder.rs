//! Manual reminder trigger

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::error::ApiError;
use crate::middleware::AuthenticatedUser;
use crate::models::ApiResponse;
use crate::payment::{Payment, PaymentService};

#[derive(Debug, Deserialize)]
pub struct ReminderQuery {
    pub days: Option<i64>,
}

/// List upcoming unsettled installments and emit a reminder line for each.
/// A real notification channel would hang off the log sink.
pub async fn send_reminders(
    State(service): State<Arc<PaymentService>>,
    user: AuthenticatedUser,
    Query(query): Query<ReminderQuery>,
) -> Result<Json<ApiResponse<Vec<Payment>>>, ApiError> {
    let payments = service
        .upcoming_payments(user.owner_id, query.days.unwrap_or(7))
        .await?;

    for payment in &payments {
        tracing::info!(
            payment_id = payment.id,
            loan_id = payment.loan_id,
            amount_due = %payment.amount_due,
            due_date = %payment.due_date,
            "Payment reminder"
        );
    }

    Ok(Json(ApiResponse::ok(payments)))
}
