//! Installment schedule engine
//!
//! Pure date/decimal arithmetic that turns loan terms into an ordered list
//! of installments, plus the store that swaps a loan's installment set
//! atomically inside the caller's transaction.

pub mod calendar;
pub mod generator;
pub mod rate;
pub mod store;

pub use generator::{generate, ScheduleEntry, ScheduleTerms};
pub use store::replace_schedule;
