//! Borrower handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use crate::borrower::{Borrower, BorrowerService, CreateBorrowerRequest, UpdateBorrowerRequest};
use crate::error::ApiError;
use crate::middleware::AuthenticatedUser;
use crate::models::{ApiResponse, PaginationParams};

pub async fn create_borrower(
    State(service): State<Arc<BorrowerService>>,
    user: AuthenticatedUser,
    Json(request): Json<CreateBorrowerRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Borrower>>), ApiError> {
    let borrower = service.create_borrower(user.owner_id, request).await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(borrower))))
}

pub async fn get_borrower(
    State(service): State<Arc<BorrowerService>>,
    user: AuthenticatedUser,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<Borrower>>, ApiError> {
    let borrower = service.get_borrower(user.owner_id, id).await?;

    Ok(Json(ApiResponse::ok(borrower)))
}

pub async fn list_borrowers(
    State(service): State<Arc<BorrowerService>>,
    user: AuthenticatedUser,
    Query(pagination): Query<PaginationParams>,
) -> Result<Json<ApiResponse<Vec<Borrower>>>, ApiError> {
    let (skip, limit) = pagination.resolve();
    let borrowers = service.list_borrowers(user.owner_id, skip, limit).await?;

    Ok(Json(ApiResponse::ok(borrowers)))
}

pub async fn update_borrower(
    State(service): State<Arc<BorrowerService>>,
    user: AuthenticatedUser,
    Path(id): Path<i64>,
    Json(request): Json<UpdateBorrowerRequest>,
) -> Result<Json<ApiResponse<Borrower>>, ApiError> {
    let borrower = service.update_borrower(user.owner_id, id, request).await?;

    Ok(Json(ApiResponse::ok(borrower)))
}

pub async fn delete_borrower(
    State(service): State<Arc<BorrowerService>>,
    user: AuthenticatedUser,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    service.delete_borrower(user.owner_id, id).await?;

    Ok(Json(ApiResponse::ok(())))
}
