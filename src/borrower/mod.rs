pub mod model;
pub mod service;

pub use model::{Borrower, CreateBorrowerRequest, UpdateBorrowerRequest};
pub use service::BorrowerService;
