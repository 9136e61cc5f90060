//! Borrower models for Lendist

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Borrower model
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Borrower {
    pub id: i64,
    pub owner_id: Uuid,
    pub name: String,
    pub mobile: Option<String>,
    pub email_address: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Request to register a new borrower
#[derive(Debug, Deserialize, Validate)]
pub struct CreateBorrowerRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    pub mobile: Option<String>,
    #[validate(email)]
    pub email_address: Option<String>,
}

/// Request to update a borrower
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateBorrowerRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    pub mobile: Option<String>,
    #[validate(email)]
    pub email_address: Option<String>,
}
