pub mod analytics;
pub mod billing;
pub mod defense;
pub mod document;
pub mod fine;

pub use analytics::AnalyticsRepository;
pub use billing::BillingRepository;
pub use defense::DefenseRepository;
pub use document::DocumentRepository;
pub use fine::FineRepository;
