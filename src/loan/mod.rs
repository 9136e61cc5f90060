pub mod model;
pub mod service;

pub use model::{
    CreateLoanRequest, InterestCycle, Loan, LoanStatus, NewLoan, RepaymentType, TermFrequency,
    UpdateLoanRequest, UpdateStatusRequest,
};
pub use service::LoanService;
