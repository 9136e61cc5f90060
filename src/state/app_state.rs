//! Application state shared across handlers

use std::sync::Arc;

use axum::extract::FromRef;
use sqlx::PgPool;

use crate::borrower::BorrowerService;
use crate::loan::LoanService;
use crate::middleware::AuthVerifier;
use crate::payment::PaymentService;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub loan_service: Arc<LoanService>,
    pub borrower_service: Arc<BorrowerService>,
    pub payment_service: Arc<PaymentService>,
    pub auth_verifier: Arc<AuthVerifier>,
    pub db_pool: PgPool,
}

impl AppState {
    pub fn new(
        loan_service: Arc<LoanService>,
        borrower_service: Arc<BorrowerService>,
        payment_service: Arc<PaymentService>,
        auth_verifier: Arc<AuthVerifier>,
        db_pool: PgPool,
    ) -> Self {
        Self {
            loan_service,
            borrower_service,
            payment_service,
            auth_verifier,
            db_pool,
        }
    }
}

impl FromRef<AppState> for Arc<LoanService> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.loan_service.clone()
    }
}

impl FromRef<AppState> for Arc<BorrowerService> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.borrower_service.clone()
    }
}

impl FromRef<AppState> for Arc<PaymentService> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.payment_service.clone()
    }
}

impl FromRef<AppState> for Arc<AuthVerifier> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.auth_verifier.clone()
    }
}

impl FromRef<AppState> for PgPool {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.db_pool.clone()
    }
}
