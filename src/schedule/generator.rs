//! Schedule generation for FLAT and AMORTIZED loans

use chrono::NaiveDate;
use rust_decimal::{Decimal, MathematicalOps};
use rust_decimal_macros::dec;

use crate::loan::{InterestCycle, Loan, RepaymentType, TermFrequency};
use crate::schedule::{calendar, rate};

/// One generated installment: when it is due and how much
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleEntry {
    pub due_date: NaiveDate,
    pub amount_due: Decimal,
}

/// The loan parameters the generator consumes
#[derive(Debug, Clone)]
pub struct ScheduleTerms {
    pub principal: Decimal,
    pub interest_rate_percent: Decimal,
    pub term_units: i32,
    pub term_frequency: TermFrequency,
    pub repayment_type: RepaymentType,
    pub interest_cycle: InterestCycle,
    pub start_date: NaiveDate,
}

impl From<&Loan> for ScheduleTerms {
    fn from(loan: &Loan) -> Self {
        Self {
            principal: loan.principal,
            interest_rate_percent: loan.interest_rate_percent,
            term_units: loan.term_units,
            term_frequency: loan.term_frequency,
            repayment_type: loan.repayment_type,
            interest_cycle: loan.interest_cycle,
            start_date: loan.start_date,
        }
    }
}

/// Generate the ordered installment list for a loan.
///
/// The first due date is one period after the start date, not the start date
/// itself. Amounts are rounded to 2 decimal places exactly once, at emission.
pub fn generate(terms: &ScheduleTerms) -> Vec<ScheduleEntry> {
    let periodic_rate = rate::periodic_rate_percent(
        terms.interest_rate_percent,
        terms.interest_cycle,
        terms.term_frequency,
        terms.term_units,
    );

    let amount_due = match terms.repayment_type {
        RepaymentType::Flat => flat_installment(terms.principal, periodic_rate, terms.term_units),
        RepaymentType::Amortized => {
            amortized_installment(terms.principal, periodic_rate, terms.term_units)
        }
    };

    let mut entries = Vec::with_capacity(terms.term_units as usize);
    let mut due_date = calendar::step(terms.start_date, terms.term_frequency);
    for _ in 0..terms.term_units {
        entries.push(ScheduleEntry {
            due_date,
            amount_due,
        });
        due_date = calendar::step(due_date, terms.term_frequency);
    }

    entries
}

/// FLAT: interest on the full original principal every period, principal
/// repaid in equal parts. No declining-balance effect.
fn flat_installment(principal: Decimal, periodic_rate: Decimal, term_units: i32) -> Decimal {
    let interest_per_period = principal * periodic_rate / dec!(100);
    let principal_per_period = principal / Decimal::from(term_units);
    (principal_per_period + interest_per_period).round_dp(2)
}

/// AMORTIZED: level-payment annuity. A zero periodic rate degenerates to
/// straight-line repayment to avoid dividing by zero.
fn amortized_installment(principal: Decimal, periodic_rate: Decimal, term_units: i32) -> Decimal {
    let r = periodic_rate / dec!(100);
    if r.is_zero() {
        return (principal / Decimal::from(term_units)).round_dp(2);
    }

    let growth = (Decimal::ONE + r).powi(term_units as i64);
    let payment = principal * r * growth / (growth - Decimal::ONE);

    payment.round_dp(2)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn terms(
        principal: Decimal,
        rate: Decimal,
        units: i32,
        frequency: TermFrequency,
        repayment: RepaymentType,
        cycle: InterestCycle,
    ) -> ScheduleTerms {
        ScheduleTerms {
            principal,
            interest_rate_percent: rate,
            term_units: units,
            term_frequency: frequency,
            repayment_type: repayment,
            interest_cycle: cycle,
            start_date: d(2024, 1, 15),
        }
    }

    #[test]
    fn test_flat_installments_are_constant() {
        // 12000 at 12% yearly over 12 monthly installments:
        // 1000 principal + 120 interest per period
        let t = terms(
            dec!(12000),
            dec!(12),
            12,
            TermFrequency::Monthly,
            RepaymentType::Flat,
            InterestCycle::Yearly,
        );
        let schedule = generate(&t);
        assert_eq!(schedule.len(), 12);
        for entry in &schedule {
            assert_eq!(entry.amount_due, dec!(1120.00));
        }
    }

    #[test]
    fn test_amortized_level_payment() {
        // 12000 at 1%/month over 12 months: 120 / (1 - 1.01^-12) = 1066.19
        let t = terms(
            dec!(12000),
            dec!(12),
            12,
            TermFrequency::Monthly,
            RepaymentType::Amortized,
            InterestCycle::Yearly,
        );
        let schedule = generate(&t);
        assert_eq!(schedule.len(), 12);
        for entry in &schedule {
            assert_eq!(entry.amount_due, dec!(1066.19));
        }
    }

    #[test]
    fn test_amortized_balance_amortizes_to_zero() {
        // Walking the declining balance with the unrounded level payment
        // leaves no residual after the final installment
        let principal = dec!(12000);
        let r = dec!(0.01);
        let growth = (Decimal::ONE + r).powi(12);
        let payment = principal * r * growth / (growth - Decimal::ONE);

        let mut remaining = principal;
        for _ in 0..12 {
            let interest_portion = remaining * r;
            remaining -= payment - interest_portion;
        }
        assert!(remaining.abs() < dec!(0.000001), "residual {}", remaining);
    }

    #[test]
    fn test_amortized_total_exceeds_principal_when_rate_positive() {
        let t = terms(
            dec!(5000),
            dec!(18),
            24,
            TermFrequency::Monthly,
            RepaymentType::Amortized,
            InterestCycle::Yearly,
        );
        let total: Decimal = generate(&t).iter().map(|e| e.amount_due).sum();
        assert!(total >= dec!(5000));
    }

    #[test]
    fn test_amortized_zero_rate_falls_back_to_straight_line() {
        let t = terms(
            dec!(1200),
            Decimal::ZERO,
            12,
            TermFrequency::Monthly,
            RepaymentType::Amortized,
            InterestCycle::Yearly,
        );
        let schedule = generate(&t);
        for entry in &schedule {
            assert_eq!(entry.amount_due, dec!(100.00));
        }
        let total: Decimal = schedule.iter().map(|e| e.amount_due).sum();
        assert_eq!(total, dec!(1200.00));
    }

    #[test]
    fn test_due_dates_start_one_period_after_start() {
        let t = terms(
            dec!(1000),
            dec!(10),
            4,
            TermFrequency::Weekly,
            RepaymentType::Flat,
            InterestCycle::Yearly,
        );
        let schedule = generate(&t);
        let dates: Vec<NaiveDate> = schedule.iter().map(|e| e.due_date).collect();
        assert_eq!(
            dates,
            vec![
                d(2024, 1, 22),
                d(2024, 1, 29),
                d(2024, 2, 5),
                d(2024, 2, 12),
            ]
        );
    }

    #[test]
    fn test_monthly_due_dates_clamp_at_month_end() {
        let mut t = terms(
            dec!(1000),
            dec!(10),
            3,
            TermFrequency::Monthly,
            RepaymentType::Flat,
            InterestCycle::Yearly,
        );
        t.start_date = d(2024, 1, 31);
        let dates: Vec<NaiveDate> = generate(&t).iter().map(|e| e.due_date).collect();
        // Once clamped to Feb 29 the chain continues from the 29th
        assert_eq!(dates, vec![d(2024, 2, 29), d(2024, 3, 29), d(2024, 4, 29)]);
    }

    #[test]
    fn test_one_time_cycle_flat() {
        // 10% one-time over 4 installments: 2.5% of principal interest each
        let t = terms(
            dec!(2000),
            dec!(10),
            4,
            TermFrequency::Monthly,
            RepaymentType::Flat,
            InterestCycle::OneTime,
        );
        let schedule = generate(&t);
        // 500 principal + 50 interest
        for entry in &schedule {
            assert_eq!(entry.amount_due, dec!(550.00));
        }
    }

    #[test]
    fn test_generation_is_deterministic() {
        let t = terms(
            dec!(7500),
            dec!(9.5),
            18,
            TermFrequency::Monthly,
            RepaymentType::Amortized,
            InterestCycle::Yearly,
        );
        assert_eq!(generate(&t), generate(&t));
    }
}
