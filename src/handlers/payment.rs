//! Payment handlers

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::error::ApiError;
use crate::middleware::AuthenticatedUser;
use crate::models::{ApiResponse, PaginationParams};
use crate::payment::{Payment, PaymentService, RecordPaymentRequest};

#[derive(Debug, Deserialize)]
pub struct UpcomingQuery {
    pub days: Option<i64>,
}

pub async fn get_payment(
    State(service): State<Arc<PaymentService>>,
    user: AuthenticatedUser,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<Payment>>, ApiError> {
    let payment = service.get_payment(user.owner_id, id).await?;

    Ok(Json(ApiResponse::ok(payment)))
}

pub async fn list_payments(
    State(service): State<Arc<PaymentService>>,
    user: AuthenticatedUser,
    Query(pagination): Query<PaginationParams>,
) -> Result<Json<ApiResponse<Vec<Payment>>>, ApiError> {
    let (skip, limit) = pagination.resolve();
    let payments = service.list_payments(user.owner_id, skip, limit).await?;

    Ok(Json(ApiResponse::ok(payments)))
}

pub async fn list_payments_by_loan(
    State(service): State<Arc<PaymentService>>,
    user: AuthenticatedUser,
    Path(loan_id): Path<i64>,
) -> Result<Json<ApiResponse<Vec<Payment>>>, ApiError> {
    let payments = service.payments_by_loan(user.owner_id, loan_id).await?;

    Ok(Json(ApiResponse::ok(payments)))
}

pub async fn record_payment(
    State(service): State<Arc<PaymentService>>,
    user: AuthenticatedUser,
    Path(id): Path<i64>,
    Json(request): Json<RecordPaymentRequest>,
) -> Result<Json<ApiResponse<Payment>>, ApiError> {
    let payment = service.record_payment(user.owner_id, id, request).await?;

    Ok(Json(ApiResponse::ok(payment)))
}

pub async fn list_upcoming_payments(
    State(service): State<Arc<PaymentService>>,
    user: AuthenticatedUser,
    Query(query): Query<UpcomingQuery>,
) -> Result<Json<ApiResponse<Vec<Payment>>>, ApiError> {
    let payments = service
        .upcoming_payments(user.owner_id, query.days.unwrap_or(7))
        .await?;

    Ok(Json(ApiResponse::ok(payments)))
}

pub async fn list_overdue_payments(
    State(service): State<Arc<PaymentService>>,
    user: AuthenticatedUser,
) -> Result<Json<ApiResponse<Vec<Payment>>>, ApiError> {
    let payments = service.overdue_payments(user.owner_id).await?;

    Ok(Json(ApiResponse::ok(payments)))
}
