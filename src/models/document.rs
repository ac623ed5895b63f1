use serde::Serialize;

use crate::entities::{case_outcomes, legal_documents};

#[derive(Debug, Clone, Serialize)]
pub struct DocumentWithOutcome {
    #[serde(flatten)]
    pub document: legal_documents::Model,
    pub case_outcome: Option<case_outcomes::Model>,
}
