//! Payment route definitions

use axum::routing::get;
use axum::Router;

use crate::handlers::*;
use crate::state::AppState;

pub fn payment_routes() -> Router<AppState> {
    Router::new()
        .route("/api/payments", get(list_payments))
        .route("/api/payments/upcoming", get(list_upcoming_payments))
        .route("/api/payments/overdue", get(list_overdue_payments))
        .route("/api/payments/:id", get(get_payment).put(record_payment))
        .route("/api/payments/loan/:loan_id", get(list_payments_by_loan))
}
