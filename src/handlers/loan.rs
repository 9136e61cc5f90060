//! Loan handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use std::sync::Arc;

use crate::error::ApiError;
use crate::loan::{CreateLoanRequest, Loan, LoanService, UpdateLoanRequest, UpdateStatusRequest};
use crate::middleware::AuthenticatedUser;
use crate::models::{ApiResponse, PaginationParams};
use crate::payment::{Payment, PaymentService};

/// A loan together with its installment schedule
#[derive(Debug, Serialize)]
pub struct LoanWithSchedule {
    pub loan: Loan,
    pub installments: Vec<Payment>,
}

pub async fn create_loan(
    State(service): State<Arc<LoanService>>,
    user: AuthenticatedUser,
    Json(request): Json<CreateLoanRequest>,
) -> Result<(StatusCode, Json<ApiResponse<LoanWithSchedule>>), ApiError> {
    let (loan, installments) = service.create_loan(user.owner_id, request).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(LoanWithSchedule { loan, installments })),
    ))
}

pub async fn get_loan(
    State(service): State<Arc<LoanService>>,
    user: AuthenticatedUser,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<Loan>>, ApiError> {
    let loan = service.get_loan(user.owner_id, id).await?;

    Ok(Json(ApiResponse::ok(loan)))
}

pub async fn list_loans(
    State(service): State<Arc<LoanService>>,
    user: AuthenticatedUser,
    Query(pagination): Query<PaginationParams>,
) -> Result<Json<ApiResponse<Vec<Loan>>>, ApiError> {
    let (skip, limit) = pagination.resolve();
    let loans = service.list_loans(user.owner_id, skip, limit).await?;

    Ok(Json(ApiResponse::ok(loans)))
}

pub async fn list_loans_by_borrower(
    State(service): State<Arc<LoanService>>,
    user: AuthenticatedUser,
    Path(borrower_id): Path<i64>,
) -> Result<Json<ApiResponse<Vec<Loan>>>, ApiError> {
    let loans = service.loans_by_borrower(user.owner_id, borrower_id).await?;

    Ok(Json(ApiResponse::ok(loans)))
}

pub async fn update_loan(
    State(service): State<Arc<LoanService>>,
    user: AuthenticatedUser,
    Path(id): Path<i64>,
    Json(request): Json<UpdateLoanRequest>,
) -> Result<Json<ApiResponse<Loan>>, ApiError> {
    let loan = service.update_loan(user.owner_id, id, request).await?;

    Ok(Json(ApiResponse::ok(loan)))
}

pub async fn delete_loan(
    State(service): State<Arc<LoanService>>,
    user: AuthenticatedUser,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    service.delete_loan(user.owner_id, id).await?;

    Ok(Json(ApiResponse::ok(())))
}

pub async fn get_loan_schedule(
    State(payments): State<Arc<PaymentService>>,
    user: AuthenticatedUser,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<Vec<Payment>>>, ApiError> {
    let schedule = payments.payments_by_loan(user.owner_id, id).await?;

    Ok(Json(ApiResponse::ok(schedule)))
}

pub async fn update_loan_status(
    State(service): State<Arc<LoanService>>,
    user: AuthenticatedUser,
    Path(id): Path<i64>,
    Json(request): Json<UpdateStatusRequest>,
) -> Result<Json<ApiResponse<Loan>>, ApiError> {
    let loan = service.update_status(user.owner_id, id, request).await?;

    Ok(Json(ApiResponse::ok(loan)))
}

pub async fn recalculate_schedule(
    State(service): State<Arc<LoanService>>,
    user: AuthenticatedUser,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<Vec<Payment>>>, ApiError> {
    let installments = service.recalculate_schedule(user.owner_id, id).await?;

    Ok(Json(ApiResponse::ok(installments)))
}

pub async fn renew_loan(
    State(service): State<Arc<LoanService>>,
    user: AuthenticatedUser,
    Path(id): Path<i64>,
) -> Result<(StatusCode, Json<ApiResponse<LoanWithSchedule>>), ApiError> {
    let (loan, installments) = service.renew(user.owner_id, id).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(LoanWithSchedule { loan, installments })),
    ))
}
