//! Rate resolution: nominal rate + accrual cycle -> per-installment rate

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::loan::{InterestCycle, TermFrequency};

/// Resolve a nominal rate into the rate applied once per installment.
///
/// ONE_TIME rates are the total rate for the loan's whole life and are spread
/// evenly across the installments. Every other cycle is annualized first and
/// then re-spread over the installment cadence.
pub fn periodic_rate_percent(
    nominal_rate_percent: Decimal,
    cycle: InterestCycle,
    frequency: TermFrequency,
    term_units: i32,
) -> Decimal {
    if cycle == InterestCycle::OneTime {
        return nominal_rate_percent / Decimal::from(term_units);
    }

    let annual = nominal_rate_percent * cycle_multiplier(cycle);
    annual / frequency_divisor(frequency)
}

fn cycle_multiplier(cycle: InterestCycle) -> Decimal {
    match cycle {
        InterestCycle::Daily => dec!(365),
        InterestCycle::Weekly => dec!(52),
        InterestCycle::Monthly => dec!(12),
        InterestCycle::Yearly => Decimal::ONE,
        // handled by the caller before annualizing
        InterestCycle::OneTime => Decimal::ONE,
    }
}

fn frequency_divisor(frequency: TermFrequency) -> Decimal {
    match frequency {
        TermFrequency::Daily => dec!(365),
        TermFrequency::Weekly => dec!(52),
        TermFrequency::Monthly => dec!(12),
        TermFrequency::Quarterly => dec!(4),
        TermFrequency::Yearly => Decimal::ONE,
    }
}
