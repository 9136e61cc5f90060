//! Route definitions for the Lendist API

mod borrower;
mod dashboard;
mod loan;
mod payment;
mod reminder;

pub use borrower::borrower_routes;
pub use dashboard::dashboard_routes;
pub use loan::loan_routes;
pub use payment::payment_routes;
pub use reminder::reminder_routes;
