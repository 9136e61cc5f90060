//! Loan models for Lendist

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// Loan status enum
///
/// ACTIVE is the initial state. COMPLETED and CANCELLED are terminal: a loan
/// in either must never gain, lose, or change installments. ACTIVE and
/// DEFAULTED convert in both directions; renewal takes ACTIVE or DEFAULTED
/// loans to COMPLETED.
#[derive(Debug, Serialize, Deserialize, sqlx::Type, Clone, Copy, PartialEq, Eq)]
#[sqlx(type_name = "loan_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum LoanStatus {
    Active,
    Completed,
    Defaulted,
    Cancelled,
}

impl LoanStatus {
    /// Parse a status value from its wire form. Unrecognized values are an
    /// input error, not a fallback.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "active" => Some(LoanStatus::Active),
            "completed" => Some(LoanStatus::Completed),
            "defaulted" => Some(LoanStatus::Defaulted),
            "cancelled" => Some(LoanStatus::Cancelled),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LoanStatus::Active => "active",
            LoanStatus::Completed => "completed",
            LoanStatus::Defaulted => "defaulted",
            LoanStatus::Cancelled => "cancelled",
        }
    }

    /// Terminal statuses admit no further transitions
    pub fn is_terminal(&self) -> bool {
        matches!(self, LoanStatus::Completed | LoanStatus::Cancelled)
    }

    /// The single source of truth for legal status transitions.
    /// Same-state patches are accepted as no-ops.
    pub fn can_transition_to(self, next: LoanStatus) -> bool {
        if self == next {
            return true;
        }
        match self {
            LoanStatus::Active => true,
            LoanStatus::Defaulted => true,
            LoanStatus::Completed | LoanStatus::Cancelled => false,
        }
    }

    /// Only live loans can be renewed
    pub fn is_renewable(&self) -> bool {
        matches!(self, LoanStatus::Active | LoanStatus::Defaulted)
    }
}

/// Cadence at which installments fall due
#[derive(Debug, Serialize, Deserialize, sqlx::Type, Clone, Copy, PartialEq, Eq)]
#[sqlx(type_name = "term_frequency", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TermFrequency {
    Daily,
    Weekly,
    Monthly,
    Quarterly,
    Yearly,
}

impl TermFrequency {
    /// Parse a frequency, falling back to MONTHLY for unrecognized input.
    ///
    /// The fallback is a deliberate compatibility choice carried over from
    /// earlier API clients that sent free-form frequency strings. It applies
    /// only at the input boundary; the column itself is a closed enum.
    pub fn parse_or_monthly(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "daily" => TermFrequency::Daily,
            "weekly" => TermFrequency::Weekly,
            "monthly" => TermFrequency::Monthly,
            "quarterly" => TermFrequency::Quarterly,
            "yearly" => TermFrequency::Yearly,
            _ => TermFrequency::Monthly,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TermFrequency::Daily => "daily",
            TermFrequency::Weekly => "weekly",
            TermFrequency::Monthly => "monthly",
            TermFrequency::Quarterly => "quarterly",
            TermFrequency::Yearly => "yearly",
        }
    }
}

/// How each installment's amount is computed
#[derive(Debug, Serialize, Deserialize, sqlx::Type, Clone, Copy, PartialEq, Eq)]
#[sqlx(type_name = "repayment_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum RepaymentType {
    Flat,
    Amortized,
}

impl RepaymentType {
    /// Anything that is not FLAT amortizes, matching the historical behavior
    /// of the schedule generator.
    pub fn parse_or_amortized(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "flat" => RepaymentType::Flat,
            _ => RepaymentType::Amortized,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RepaymentType::Flat => "flat",
            RepaymentType::Amortized => "amortized",
        }
    }
}

/// Time unit the nominal interest rate is stated against
#[derive(Debug, Serialize, Deserialize, sqlx::Type, Clone, Copy, PartialEq, Eq)]
#[sqlx(type_name = "interest_cycle", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum InterestCycle {
    #[sqlx(rename = "one-time")]
    #[serde(rename = "one-time")]
    OneTime,
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl InterestCycle {
    /// Parse a cycle, falling back to YEARLY. An unrecognized cycle left the
    /// nominal rate un-annualized in the historical generator, which is the
    /// same arithmetic as YEARLY.
    pub fn parse_or_yearly(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "one-time" | "onetime" | "one_time" => InterestCycle::OneTime,
            "daily" => InterestCycle::Daily,
            "weekly" => InterestCycle::Weekly,
            "monthly" => InterestCycle::Monthly,
            _ => InterestCycle::Yearly,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            InterestCycle::OneTime => "one-time",
            InterestCycle::Daily => "daily",
            InterestCycle::Weekly => "weekly",
            InterestCycle::Monthly => "monthly",
            InterestCycle::Yearly => "yearly",
        }
    }
}

/// Loan model
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Loan {
    pub id: i64,
    pub owner_id: Uuid,
    pub borrower_id: i64,
    pub principal: Decimal,
    pub interest_rate_percent: Decimal,
    pub term_units: i32,
    pub term_frequency: TermFrequency,
    pub repayment_type: RepaymentType,
    pub interest_cycle: InterestCycle,
    pub start_date: NaiveDate,
    pub status: LoanStatus,
    pub created_at: DateTime<Utc>,
}

/// Field values for a loan row about to be inserted.
///
/// Built either from a create request or from an existing loan being
/// renewed; the single insert path keeps the two in lockstep.
#[derive(Debug, Clone)]
pub struct NewLoan {
    pub owner_id: Uuid,
    pub borrower_id: i64,
    pub principal: Decimal,
    pub interest_rate_percent: Decimal,
    pub term_units: i32,
    pub term_frequency: TermFrequency,
    pub repayment_type: RepaymentType,
    pub interest_cycle: InterestCycle,
    pub start_date: NaiveDate,
    pub status: LoanStatus,
}

impl Loan {
    /// The successor opened by renewal: every term carried over unchanged,
    /// schedule restarted from `start_date`, status ACTIVE.
    pub fn successor(&self, start_date: NaiveDate) -> NewLoan {
        NewLoan {
            owner_id: self.owner_id,
            borrower_id: self.borrower_id,
            principal: self.principal,
            interest_rate_percent: self.interest_rate_percent,
            term_units: self.term_units,
            term_frequency: self.term_frequency,
            repayment_type: self.repayment_type,
            interest_cycle: self.interest_cycle,
            start_date,
            status: LoanStatus::Active,
        }
    }
}

fn positive_decimal(value: &Decimal) -> Result<(), ValidationError> {
    if value.is_sign_positive() && !value.is_zero() {
        Ok(())
    } else {
        Err(ValidationError::new("must be positive"))
    }
}

fn non_negative_decimal(value: &Decimal) -> Result<(), ValidationError> {
    if value.is_sign_negative() {
        Err(ValidationError::new("must not be negative"))
    } else {
        Ok(())
    }
}

/// Request to create a new loan
///
/// Frequency, repayment type and cycle arrive as strings and are resolved
/// through the documented parse fallbacks.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateLoanRequest {
    pub borrower_id: i64,
    #[validate(custom = "positive_decimal")]
    pub principal: Decimal,
    #[validate(custom = "non_negative_decimal")]
    pub interest_rate_percent: Decimal,
    #[validate(range(min = 1))]
    pub term_units: i32,
    pub term_frequency: String,
    pub repayment_type: String,
    pub interest_cycle: Option<String>,
    pub start_date: NaiveDate,
}

/// Request to update a loan's non-schedule fields
///
/// Changing terms does not regenerate the schedule; the explicit
/// recalculation endpoint does.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateLoanRequest {
    pub borrower_id: Option<i64>,
    #[validate(custom = "positive_decimal")]
    pub principal: Option<Decimal>,
    #[validate(custom = "non_negative_decimal")]
    pub interest_rate_percent: Option<Decimal>,
    #[validate(range(min = 1))]
    pub term_units: Option<i32>,
    pub term_frequency: Option<String>,
    pub repayment_type: Option<String>,
    pub interest_cycle: Option<String>,
    pub start_date: Option<NaiveDate>,
}

/// Request to patch a loan's status
#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parse() {
        assert_eq!(LoanStatus::parse("active"), Some(LoanStatus::Active));
        assert_eq!(LoanStatus::parse("COMPLETED"), Some(LoanStatus::Completed));
        assert_eq!(LoanStatus::parse("bogus"), None);
        assert_eq!(LoanStatus::parse(""), None);
    }

    #[test]
    fn test_terminal_states_admit_nothing() {
        for next in [
            LoanStatus::Active,
            LoanStatus::Defaulted,
            LoanStatus::Cancelled,
        ] {
            assert!(!LoanStatus::Completed.can_transition_to(next));
        }
        for next in [
            LoanStatus::Active,
            LoanStatus::Defaulted,
            LoanStatus::Completed,
        ] {
            assert!(!LoanStatus::Cancelled.can_transition_to(next));
        }
    }

    #[test]
    fn test_active_defaulted_convert_both_ways() {
        assert!(LoanStatus::Active.can_transition_to(LoanStatus::Defaulted));
        assert!(LoanStatus::Defaulted.can_transition_to(LoanStatus::Active));
    }

    #[test]
    fn test_same_state_patch_is_noop() {
        assert!(LoanStatus::Completed.can_transition_to(LoanStatus::Completed));
        assert!(LoanStatus::Active.can_transition_to(LoanStatus::Active));
    }

    #[test]
    fn test_renewable() {
        assert!(LoanStatus::Active.is_renewable());
        assert!(LoanStatus::Defaulted.is_renewable());
        assert!(!LoanStatus::Completed.is_renewable());
        assert!(!LoanStatus::Cancelled.is_renewable());
    }

    #[test]
    fn test_frequency_fallback_to_monthly() {
        assert_eq!(
            TermFrequency::parse_or_monthly("fortnightly"),
            TermFrequency::Monthly
        );
        assert_eq!(
            TermFrequency::parse_or_monthly("WEEKLY"),
            TermFrequency::Weekly
        );
    }

    #[test]
    fn test_cycle_fallback_to_yearly() {
        assert_eq!(
            InterestCycle::parse_or_yearly("one-time"),
            InterestCycle::OneTime
        );
        assert_eq!(
            InterestCycle::parse_or_yearly("hourly"),
            InterestCycle::Yearly
        );
    }
}
