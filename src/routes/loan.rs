//! Loan route definitions

use axum::routing::{get, patch, post};
use axum::Router;

use crate::handlers::*;
use crate::state::AppState;

pub fn loan_routes() -> Router<AppState> {
    Router::new()
        .route("/api/loans", post(create_loan).get(list_loans))
        .route(
            "/api/loans/:id",
            get(get_loan).put(update_loan).delete(delete_loan),
        )
        .route("/api/loans/:id/schedule", get(get_loan_schedule))
        .route("/api/loans/:id/status", patch(update_loan_status))
        .route(
            "/api/loans/:id/recalculate-schedule",
            post(recalculate_schedule),
        )
        .route("/api/loans/:id/renew", post(renew_loan))
        .route(
            "/api/loans/borrower/:borrower_id",
            get(list_loans_by_borrower),
        )
}
