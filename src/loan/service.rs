//! Loan service layer - schedule generation and lifecycle transitions
//!
//! Every operation is scoped to an explicit owner id and runs inside a
//! single request-scoped transaction, so a failure rolls back wholesale and
//! no partial schedule is ever observable.

use chrono::Utc;
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;
use validator::Validate;

use crate::error::ApiError;
use crate::loan::model::{
    CreateLoanRequest, InterestCycle, Loan, LoanStatus, NewLoan, RepaymentType, TermFrequency,
    UpdateLoanRequest, UpdateStatusRequest,
};
use crate::payment::Payment;
use crate::schedule;

/// Loan service for managing loan lifecycle
#[derive(Clone)]
pub struct LoanService {
    db_pool: PgPool,
}

impl LoanService {
    /// Create a new loan service instance
    pub fn new(db_pool: PgPool) -> Self {
        Self { db_pool }
    }

    /// Create a loan and generate its installment schedule in one transaction
    pub async fn create_loan(
        &self,
        owner_id: Uuid,
        request: CreateLoanRequest,
    ) -> Result<(Loan, Vec<Payment>), ApiError> {
        request.validate()?;

        let term_frequency = TermFrequency::parse_or_monthly(&request.term_frequency);
        let repayment_type = RepaymentType::parse_or_amortized(&request.repayment_type);
        let interest_cycle = request
            .interest_cycle
            .as_deref()
            .map(InterestCycle::parse_or_yearly)
            .unwrap_or(InterestCycle::Yearly);

        let mut tx = self.db_pool.begin().await?;

        let borrower_id: Option<i64> =
            sqlx::query_scalar("SELECT id FROM borrowers WHERE id = $1 AND owner_id = $2")
                .bind(request.borrower_id)
                .bind(owner_id)
                .fetch_optional(&mut *tx)
                .await?;
        if borrower_id.is_none() {
            return Err(ApiError::NotFound(
                "Borrower not found or not owned by caller".to_string(),
            ));
        }

        let new_loan = NewLoan {
            owner_id,
            borrower_id: request.borrower_id,
            principal: request.principal,
            interest_rate_percent: request.interest_rate_percent,
            term_units: request.term_units,
            term_frequency,
            repayment_type,
            interest_cycle,
            start_date: request.start_date,
            status: LoanStatus::Active,
        };

        let loan = insert_loan(&mut tx, &new_loan).await?;

        let payments = schedule::replace_schedule(&mut tx, &loan).await?;

        tx.commit().await?;

        tracing::info!(
            loan_id = loan.id,
            installments = payments.len(),
            frequency = term_frequency.as_str(),
            repayment = repayment_type.as_str(),
            "Loan created with generated schedule"
        );

        Ok((loan, payments))
    }

    /// Get a loan by id, scoped to the owner
    pub async fn get_loan(&self, owner_id: Uuid, loan_id: i64) -> Result<Loan, ApiError> {
        let loan =
            sqlx::query_as::<_, Loan>("SELECT * FROM loans WHERE id = $1 AND owner_id = $2")
                .bind(loan_id)
                .bind(owner_id)
                .fetch_optional(&self.db_pool)
                .await?
                .ok_or_else(|| {
                    ApiError::NotFound("Loan not found or not owned by caller".to_string())
                })?;

        Ok(loan)
    }

    /// List the owner's loans
    pub async fn list_loans(
        &self,
        owner_id: Uuid,
        skip: i64,
        limit: i64,
    ) -> Result<Vec<Loan>, ApiError> {
        let loans = sqlx::query_as::<_, Loan>(
            "SELECT * FROM loans WHERE owner_id = $1 ORDER BY id OFFSET $2 LIMIT $3",
        )
        .bind(owner_id)
        .bind(skip)
        .bind(limit)
        .fetch_all(&self.db_pool)
        .await?;

        Ok(loans)
    }

    /// List the owner's loans for one borrower
    pub async fn loans_by_borrower(
        &self,
        owner_id: Uuid,
        borrower_id: i64,
    ) -> Result<Vec<Loan>, ApiError> {
        let loans = sqlx::query_as::<_, Loan>(
            "SELECT * FROM loans WHERE owner_id = $1 AND borrower_id = $2 ORDER BY id",
        )
        .bind(owner_id)
        .bind(borrower_id)
        .fetch_all(&self.db_pool)
        .await?;

        Ok(loans)
    }

    /// Update a loan's term fields. The stored schedule is left as is; the
    /// recalculation operation regenerates it on demand.
    pub async fn update_loan(
        &self,
        owner_id: Uuid,
        loan_id: i64,
        request: UpdateLoanRequest,
    ) -> Result<Loan, ApiError> {
        request.validate()?;

        let term_frequency = request
            .term_frequency
            .as_deref()
            .map(TermFrequency::parse_or_monthly);
        let repayment_type = request
            .repayment_type
            .as_deref()
            .map(RepaymentType::parse_or_amortized);
        let interest_cycle = request
            .interest_cycle
            .as_deref()
            .map(InterestCycle::parse_or_yearly);

        let mut tx = self.db_pool.begin().await?;

        if let Some(borrower_id) = request.borrower_id {
            let exists: Option<i64> =
                sqlx::query_scalar("SELECT id FROM borrowers WHERE id = $1 AND owner_id = $2")
                    .bind(borrower_id)
                    .bind(owner_id)
                    .fetch_optional(&mut *tx)
                    .await?;
            if exists.is_none() {
                return Err(ApiError::NotFound(
                    "Borrower not found or not owned by caller".to_string(),
                ));
            }
        }

        let loan = sqlx::query_as::<_, Loan>(
            r#"
            UPDATE loans SET
                borrower_id = COALESCE($3, borrower_id),
                principal = COALESCE($4, principal),
                interest_rate_percent = COALESCE($5, interest_rate_percent),
                term_units = COALESCE($6, term_units),
                term_frequency = COALESCE($7, term_frequency),
                repayment_type = COALESCE($8, repayment_type),
                interest_cycle = COALESCE($9, interest_cycle),
                start_date = COALESCE($10, start_date)
            WHERE id = $1 AND owner_id = $2
            RETURNING *
            "#,
        )
        .bind(loan_id)
        .bind(owner_id)
        .bind(request.borrower_id)
        .bind(request.principal)
        .bind(request.interest_rate_percent)
        .bind(request.term_units)
        .bind(term_frequency)
        .bind(repayment_type)
        .bind(interest_cycle)
        .bind(request.start_date)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| ApiError::NotFound("Loan not found or not owned by caller".to_string()))?;

        tx.commit().await?;

        Ok(loan)
    }

    /// Delete a loan and its installments
    pub async fn delete_loan(&self, owner_id: Uuid, loan_id: i64) -> Result<(), ApiError> {
        let mut tx = self.db_pool.begin().await?;

        sqlx::query("DELETE FROM payments WHERE loan_id = $1 AND owner_id = $2")
            .bind(loan_id)
            .bind(owner_id)
            .execute(&mut *tx)
            .await?;

        let deleted = sqlx::query("DELETE FROM loans WHERE id = $1 AND owner_id = $2")
            .bind(loan_id)
            .bind(owner_id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        if deleted == 0 {
            return Err(ApiError::NotFound(
                "Loan not found or not owned by caller".to_string(),
            ));
        }

        tx.commit().await?;

        tracing::info!(loan_id, "Loan deleted");

        Ok(())
    }

    /// Patch a loan's status, enforcing the transition table.
    ///
    /// Unrecognized values are a validation error; recognized-but-illegal
    /// transitions fail the precondition. Neither mutates anything.
    pub async fn update_status(
        &self,
        owner_id: Uuid,
        loan_id: i64,
        request: UpdateStatusRequest,
    ) -> Result<Loan, ApiError> {
        let next = LoanStatus::parse(&request.status).ok_or_else(|| {
            ApiError::ValidationError(format!(
                "Invalid status '{}'. Must be one of: active, completed, defaulted, cancelled",
                request.status
            ))
        })?;

        let mut tx = self.db_pool.begin().await?;

        let loan = sqlx::query_as::<_, Loan>(
            "SELECT * FROM loans WHERE id = $1 AND owner_id = $2 FOR UPDATE",
        )
        .bind(loan_id)
        .bind(owner_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| ApiError::NotFound("Loan not found or not owned by caller".to_string()))?;

        if !loan.status.can_transition_to(next) {
            return Err(ApiError::PreconditionFailed(format!(
                "Loan {} cannot move from '{}' to '{}'",
                loan.id,
                loan.status.as_str(),
                next.as_str()
            )));
        }

        let loan = sqlx::query_as::<_, Loan>(
            "UPDATE loans SET status = $3 WHERE id = $1 AND owner_id = $2 RETURNING *",
        )
        .bind(loan_id)
        .bind(owner_id)
        .bind(next)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        tracing::info!(loan_id, status = next.as_str(), "Loan status updated");

        Ok(loan)
    }

    /// Regenerate a loan's schedule from its current persisted parameters.
    ///
    /// Settled loans keep their schedule frozen. The delete-then-insert is
    /// atomic within the transaction, so concurrent readers never observe a
    /// partial set. Calling this repeatedly with unchanged parameters yields
    /// an identical set of dates and amounts.
    pub async fn recalculate_schedule(
        &self,
        owner_id: Uuid,
        loan_id: i64,
    ) -> Result<Vec<Payment>, ApiError> {
        let mut tx = self.db_pool.begin().await?;

        let loan = sqlx::query_as::<_, Loan>(
            "SELECT * FROM loans WHERE id = $1 AND owner_id = $2 FOR UPDATE",
        )
        .bind(loan_id)
        .bind(owner_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| ApiError::NotFound("Loan not found or not owned by caller".to_string()))?;

        if loan.status.is_terminal() {
            return Err(ApiError::PreconditionFailed(format!(
                "Loan {} is '{}' and its schedule is frozen",
                loan.id,
                loan.status.as_str()
            )));
        }

        let payments = schedule::replace_schedule(&mut tx, &loan).await?;

        tx.commit().await?;

        tracing::info!(
            loan_id,
            installments = payments.len(),
            "Schedule recalculated"
        );

        Ok(payments)
    }

    /// Renew a loan: write off its remaining balance, complete it, and open
    /// a successor with the same terms starting today.
    pub async fn renew(
        &self,
        owner_id: Uuid,
        loan_id: i64,
    ) -> Result<(Loan, Vec<Payment>), ApiError> {
        let mut tx = self.db_pool.begin().await?;

        let original = sqlx::query_as::<_, Loan>(
            "SELECT * FROM loans WHERE id = $1 AND owner_id = $2 FOR UPDATE",
        )
        .bind(loan_id)
        .bind(owner_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| ApiError::NotFound("Loan not found or not owned by caller".to_string()))?;

        if !original.status.is_renewable() {
            return Err(ApiError::PreconditionFailed(format!(
                "Loan {} (status: '{}') cannot be renewed. Ensure it is 'active' or 'defaulted'",
                original.id,
                original.status.as_str()
            )));
        }

        let now = Utc::now();

        // Write off every installment not fully settled
        let written_off = sqlx::query(
            r#"
            UPDATE payments SET amount_paid = amount_due, paid_at = $3
            WHERE loan_id = $1 AND owner_id = $2 AND amount_paid < amount_due
            "#,
        )
        .bind(original.id)
        .bind(owner_id)
        .bind(now)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        sqlx::query("UPDATE loans SET status = $3 WHERE id = $1 AND owner_id = $2")
            .bind(original.id)
            .bind(owner_id)
            .bind(LoanStatus::Completed)
            .execute(&mut *tx)
            .await?;

        let successor = insert_loan(&mut tx, &original.successor(now.date_naive())).await?;

        let payments = schedule::replace_schedule(&mut tx, &successor).await?;

        tx.commit().await?;

        tracing::info!(
            original_loan_id = original.id,
            successor_loan_id = successor.id,
            written_off,
            "Loan renewed"
        );

        Ok((successor, payments))
    }
}

/// Insert a loan row inside the caller's transaction. Creation and renewal
/// both go through here.
async fn insert_loan(
    tx: &mut Transaction<'_, Postgres>,
    new_loan: &NewLoan,
) -> Result<Loan, ApiError> {
    let loan = sqlx::query_as::<_, Loan>(
        r#"
        INSERT INTO loans (
            owner_id, borrower_id, principal, interest_rate_percent,
            term_units, term_frequency, repayment_type, interest_cycle,
            start_date, status
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
        RETURNING *
        "#,
    )
    .bind(new_loan.owner_id)
    .bind(new_loan.borrower_id)
    .bind(new_loan.principal)
    .bind(new_loan.interest_rate_percent)
    .bind(new_loan.term_units)
    .bind(new_loan.term_frequency)
    .bind(new_loan.repayment_type)
    .bind(new_loan.interest_cycle)
    .bind(new_loan.start_date)
    .bind(new_loan.status)
    .fetch_one(&mut **tx)
    .await?;

    Ok(loan)
}
