//! Payment service layer - installment reads and collection recording
//!
//! Installment rows are created by schedule generation only; this service
//! reads them and records collection events.

use chrono::{Days, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::ApiError;
use crate::payment::model::{Payment, RecordPaymentRequest};

#[derive(Clone)]
pub struct PaymentService {
    db_pool: PgPool,
}

impl PaymentService {
    pub fn new(db_pool: PgPool) -> Self {
        Self { db_pool }
    }

    pub async fn get_payment(&self, owner_id: Uuid, payment_id: i64) -> Result<Payment, ApiError> {
        let payment = sqlx::query_as::<_, Payment>(
            "SELECT * FROM payments WHERE id = $1 AND owner_id = $2",
        )
        .bind(payment_id)
        .bind(owner_id)
        .fetch_optional(&self.db_pool)
        .await?
        .ok_or_else(|| ApiError::NotFound("Payment not found or not owned by caller".to_string()))?;

        Ok(payment)
    }

    pub async fn list_payments(
        &self,
        owner_id: Uuid,
        skip: i64,
        limit: i64,
    ) -> Result<Vec<Payment>, ApiError> {
        let payments = sqlx::query_as::<_, Payment>(
            "SELECT * FROM payments WHERE owner_id = $1 ORDER BY due_date, id OFFSET $2 LIMIT $3",
        )
        .bind(owner_id)
        .bind(skip)
        .bind(limit)
        .fetch_all(&self.db_pool)
        .await?;

        Ok(payments)
    }

    /// All installments of one loan, in due-date order
    pub async fn payments_by_loan(
        &self,
        owner_id: Uuid,
        loan_id: i64,
    ) -> Result<Vec<Payment>, ApiError> {
        let payments = sqlx::query_as::<_, Payment>(
            "SELECT * FROM payments WHERE loan_id = $1 AND owner_id = $2 ORDER BY due_date, id",
        )
        .bind(loan_id)
        .bind(owner_id)
        .fetch_all(&self.db_pool)
        .await?;

        Ok(payments)
    }

    /// Record a collection against an installment.
    ///
    /// Only `amount_paid` and `paid_at` ever change here; the owed amount is
    /// owned by the schedule engine.
    pub async fn record_payment(
        &self,
        owner_id: Uuid,
        payment_id: i64,
        request: RecordPaymentRequest,
    ) -> Result<Payment, ApiError> {
        let mut tx = self.db_pool.begin().await?;

        let payment = sqlx::query_as::<_, Payment>(
            "SELECT * FROM payments WHERE id = $1 AND owner_id = $2 FOR UPDATE",
        )
        .bind(payment_id)
        .bind(owner_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| ApiError::NotFound("Payment not found or not owned by caller".to_string()))?;

        let (amount_paid, paid_at) = if request.mark_paid {
            (
                request.amount_paid.unwrap_or(payment.amount_due),
                Some(request.paid_at.unwrap_or_else(Utc::now)),
            )
        } else {
            let amount = request.amount_paid.ok_or_else(|| {
                ApiError::ValidationError("amount_paid is required".to_string())
            })?;
            // Stamp paid_at only when supplied; a partial collection does not
            // settle the installment
            (amount, request.paid_at.or(payment.paid_at))
        };

        if amount_paid < Decimal::ZERO {
            return Err(ApiError::ValidationError(
                "amount_paid must not be negative".to_string(),
            ));
        }

        let payment = sqlx::query_as::<_, Payment>(
            r#"
            UPDATE payments SET amount_paid = $3, paid_at = $4
            WHERE id = $1 AND owner_id = $2
            RETURNING *
            "#,
        )
        .bind(payment_id)
        .bind(owner_id)
        .bind(amount_paid)
        .bind(paid_at)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        tracing::info!(
            payment_id,
            amount_paid = %payment.amount_paid,
            "Payment collection recorded"
        );

        Ok(payment)
    }

    /// Unsettled installments due within the next `days` days (inclusive)
    pub async fn upcoming_payments(
        &self,
        owner_id: Uuid,
        days: i64,
    ) -> Result<Vec<Payment>, ApiError> {
        let today = Utc::now().date_naive();
        let end_date = today + Days::new(days.max(0) as u64);

        let payments = sqlx::query_as::<_, Payment>(
            r#"
            SELECT * FROM payments
            WHERE owner_id = $1
              AND due_date BETWEEN $2 AND $3
              AND amount_paid < amount_due
            ORDER BY due_date, id
            "#,
        )
        .bind(owner_id)
        .bind(today)
        .bind(end_date)
        .fetch_all(&self.db_pool)
        .await?;

        Ok(payments)
    }

    /// Unsettled installments whose due date has passed
    pub async fn overdue_payments(&self, owner_id: Uuid) -> Result<Vec<Payment>, ApiError> {
        let today = Utc::now().date_naive();

        let payments = sqlx::query_as::<_, Payment>(
            r#"
            SELECT * FROM payments
            WHERE owner_id = $1
              AND due_date < $2
              AND amount_paid < amount_due
            ORDER BY due_date, id
            "#,
        )
        .bind(owner_id)
        .bind(today)
        .fetch_all(&self.db_pool)
        .await?;

        Ok(payments)
    }
}
