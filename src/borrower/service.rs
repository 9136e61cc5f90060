//! Borrower service layer

use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::borrower::model::{Borrower, CreateBorrowerRequest, UpdateBorrowerRequest};
use crate::error::ApiError;

#[derive(Clone)]
pub struct BorrowerService {
    db_pool: PgPool,
}

impl BorrowerService {
    pub fn new(db_pool: PgPool) -> Self {
        Self { db_pool }
    }

    pub async fn create_borrower(
        &self,
        owner_id: Uuid,
        request: CreateBorrowerRequest,
    ) -> Result<Borrower, ApiError> {
        request.validate()?;

        let borrower = sqlx::query_as::<_, Borrower>(
            r#"
            INSERT INTO borrowers (owner_id, name, mobile, email_address)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(owner_id)
        .bind(&request.name)
        .bind(&request.mobile)
        .bind(&request.email_address)
        .fetch_one(&self.db_pool)
        .await?;

        tracing::info!(borrower_id = borrower.id, "Borrower created");

        Ok(borrower)
    }

    pub async fn get_borrower(
        &self,
        owner_id: Uuid,
        borrower_id: i64,
    ) -> Result<Borrower, ApiError> {
        let borrower = sqlx::query_as::<_, Borrower>(
            "SELECT * FROM borrowers WHERE id = $1 AND owner_id = $2",
        )
        .bind(borrower_id)
        .bind(owner_id)
        .fetch_optional(&self.db_pool)
        .await?
        .ok_or_else(|| {
            ApiError::NotFound("Borrower not found or not owned by caller".to_string())
        })?;

        Ok(borrower)
    }

    pub async fn list_borrowers(
        &self,
        owner_id: Uuid,
        skip: i64,
        limit: i64,
    ) -> Result<Vec<Borrower>, ApiError> {
        let borrowers = sqlx::query_as::<_, Borrower>(
            "SELECT * FROM borrowers WHERE owner_id = $1 ORDER BY id OFFSET $2 LIMIT $3",
        )
        .bind(owner_id)
        .bind(skip)
        .bind(limit)
        .fetch_all(&self.db_pool)
        .await?;

        Ok(borrowers)
    }

    pub async fn update_borrower(
        &self,
        owner_id: Uuid,
        borrower_id: i64,
        request: UpdateBorrowerRequest,
    ) -> Result<Borrower, ApiError> {
        request.validate()?;

        let borrower = sqlx::query_as::<_, Borrower>(
            r#"
            UPDATE borrowers SET
                name = COALESCE($3, name),
                mobile = COALESCE($4, mobile),
                email_address = COALESCE($5, email_address)
            WHERE id = $1 AND owner_id = $2
            RETURNING *
            "#,
        )
        .bind(borrower_id)
        .bind(owner_id)
        .bind(&request.name)
        .bind(&request.mobile)
        .bind(&request.email_address)
        .fetch_optional(&self.db_pool)
        .await?
        .ok_or_else(|| {
            ApiError::NotFound("Borrower not found or not owned by caller".to_string())
        })?;

        Ok(borrower)
    }

    pub async fn delete_borrower(&self, owner_id: Uuid, borrower_id: i64) -> Result<(), ApiError> {
        let deleted = sqlx::query("DELETE FROM borrowers WHERE id = $1 AND owner_id = $2")
            .bind(borrower_id)
            .bind(owner_id)
            .execute(&self.db_pool)
            .await?
            .rows_affected();

        if deleted == 0 {
            return Err(ApiError::NotFound(
                "Borrower not found or not owned by caller".to_string(),
            ));
        }

        tracing::info!(borrower_id, "Borrower deleted");

        Ok(())
    }
}
