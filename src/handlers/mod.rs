//! API handlers for the Lendist backend

pub mod borrower;
pub mod dashboard;
pub mod loan;
pub mod payment;
pub mod reminder;

pub use borrower::*;
pub use dashboard::*;
pub use loan::*;
pub use payment::*;
pub use reminder::*;

// Re-export AuthenticatedUser from middleware for handler use
pub use crate::middleware::AuthenticatedUser;
