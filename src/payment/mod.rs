pub mod model;
pub mod service;

pub use model::{Payment, RecordPaymentRequest};
pub use service::PaymentService;
