//! Atomic replacement of a loan's installment set
//!
//! Runs inside the caller's transaction so a concurrent reader either sees
//! the old schedule or the new one, never an empty or partial set.

use sqlx::{Postgres, Transaction};

use crate::error::ApiError;
use crate::loan::Loan;
use crate::payment::Payment;
use crate::schedule::generator::{self, ScheduleTerms};

/// Delete every installment of the loan and insert a freshly generated set.
///
/// Idempotent on the resulting set for unchanged loan parameters. Only rows
/// belonging to this loan and owner are touched.
pub async fn replace_schedule(
    tx: &mut Transaction<'_, Postgres>,
    loan: &Loan,
) -> Result<Vec<Payment>, ApiError> {
    let deleted = sqlx::query("DELETE FROM payments WHERE loan_id = $1 AND owner_id = $2")
        .bind(loan.id)
        .bind(loan.owner_id)
        .execute(&mut **tx)
        .await?
        .rows_affected();

    let entries = generator::generate(&ScheduleTerms::from(loan));

    let mut payments = Vec::with_capacity(entries.len());
    for entry in &entries {
        let payment = sqlx::query_as::<_, Payment>(
            r#"
            INSERT INTO payments (owner_id, loan_id, due_date, amount_due)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(loan.owner_id)
        .bind(loan.id)
        .bind(entry.due_date)
        .bind(entry.amount_due)
        .fetch_one(&mut **tx)
        .await?;
        payments.push(payment);
    }

    tracing::debug!(
        loan_id = loan.id,
        deleted,
        inserted = payments.len(),
        "Replaced installment schedule"
    );

    Ok(payments)
}
