pub mod billing;
pub mod document;
pub mod fine;

pub use billing::{PaymentWithCustomer, SubscriptionWithCustomer};
pub use document::DocumentWithOutcome;
pub use fine::{DefenseWithFine, FineWithDefenses, FineWithUser};
