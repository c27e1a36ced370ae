pub mod cache;
pub mod models;
pub mod payment;
pub mod workflow;

pub use cache::BookingCache;
pub use models::{BookingUpdate, SelectionView};
pub use payment::PaymentFlow;
pub use workflow::BookingWorkflow;
