pub mod prelude;

pub mod analytics_events;
pub mod case_outcomes;
pub mod defenses;
pub mod fines;
pub mod legal_documents;
pub mod payments;
pub mod stripe_customers;
pub mod stripe_subscriptions;
pub mod users;
