//! Calendar arithmetic for due-date stepping

use chrono::{Days, Months, NaiveDate};

use crate::loan::TermFrequency;

/// Advance a date by one installment period.
///
/// Month-based steps clamp the day to the target month's last day, so
/// Jan 31 + 1 month lands on Feb 28 (or Feb 29 in a leap year).
pub fn step(date: NaiveDate, frequency: TermFrequency) -> NaiveDate {
    match frequency {
        TermFrequency::Daily => date + Days::new(1),
        TermFrequency::Weekly => date + Days::new(7),
        TermFrequency::Monthly => date + Months::new(1),
        TermFrequency::Quarterly => date + Months::new(3),
        TermFrequency::Yearly => date + Months::new(12),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_daily_and_weekly_steps() {
        assert_eq!(step(d(2024, 3, 31), TermFrequency::Daily), d(2024, 4, 1));
        assert_eq!(step(d(2024, 12, 30), TermFrequency::Weekly), d(2025, 1, 6));
    }

    #[test]
    fn test_month_step_clamps_to_leap_february() {
        assert_eq!(step(d(2024, 1, 31), TermFrequency::Monthly), d(2024, 2, 29));
    }

    #[test]
    fn test_month_step_clamps_to_plain_february() {
        assert_eq!(step(d(2023, 1, 31), TermFrequency::Monthly), d(2023, 2, 28));
    }

    #[test]
    fn test_quarterly_step() {
        assert_eq!(
            step(d(2024, 11, 30), TermFrequency::Quarterly),
            d(2025, 2, 28)
        );
    }

    #[test]
    fn test_yearly_step_from_leap_day() {
        assert_eq!(step(d(2024, 2, 29), TermFrequency::Yearly), d(2025, 2, 28));
    }

    #[test]
    fn test_mid_month_does_not_clamp() {
        assert_eq!(step(d(2024, 1, 15), TermFrequency::Monthly), d(2024, 2, 15));
    }
}
