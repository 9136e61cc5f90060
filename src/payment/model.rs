//! Payment (installment) models for Lendist

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One installment of a loan's schedule.
///
/// Rows are created only by schedule generation and mutated only to record a
/// collection event, or deleted wholesale when a schedule is replaced.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Payment {
    pub id: i64,
    pub owner_id: Uuid,
    pub loan_id: i64,
    pub due_date: NaiveDate,
    pub amount_due: Decimal,
    pub amount_paid: Decimal,
    pub paid_at: Option<DateTime<Utc>>,
}

impl Payment {
    /// An installment is settled once the collected amount covers what is due
    pub fn is_settled(&self) -> bool {
        self.amount_paid >= self.amount_due
    }
}

/// Request to record a collection against an installment.
///
/// With `mark_paid`, omitted fields default to settling the installment in
/// full right now.
#[derive(Debug, Deserialize)]
pub struct RecordPaymentRequest {
    pub amount_paid: Option<Decimal>,
    pub paid_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub mark_paid: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn payment(due: Decimal, paid: Decimal) -> Payment {
        Payment {
            id: 1,
            owner_id: Uuid::nil(),
            loan_id: 1,
            due_date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            amount_due: due,
            amount_paid: paid,
            paid_at: None,
        }
    }

    #[test]
    fn test_is_settled() {
        assert!(payment(dec!(100), dec!(100)).is_settled());
        assert!(payment(dec!(100), dec!(150)).is_settled());
        assert!(!payment(dec!(100), dec!(99.99)).is_settled());
        assert!(!payment(dec!(100), Decimal::ZERO).is_settled());
    }
}
