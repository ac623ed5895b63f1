pub use super::analytics_events::Entity as AnalyticsEvents;
pub use super::case_outcomes::Entity as CaseOutcomes;
pub use super::defenses::Entity as Defenses;
pub use super::fines::Entity as Fines;
pub use super::legal_documents::Entity as LegalDocuments;
pub use super::payments::Entity as Payments;
pub use super::stripe_customers::Entity as StripeCustomers;
pub use super::stripe_subscriptions::Entity as StripeSubscriptions;
pub use super::users::Entity as Users;
