use crate::db::QueryError;
use crate::db::batch;
use crate::entities::{case_outcomes, legal_documents, prelude::*};
use crate::models::DocumentWithOutcome;
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder};

pub struct DocumentRepository<'a, C> {
    conn: &'a C,
}

impl<'a, C: ConnectionTrait> DocumentRepository<'a, C> {
    #[must_use]
    pub const fn new(conn: &'a C) -> Self {
        Self { conn }
    }

    /// Legal documents, optionally restricted to `document_types`, each with
    /// its case outcome if one was recorded.
    /// Two statements regardless of how many documents match.
    pub async fn with_outcomes(
        &self,
        document_types: Option<&[String]>,
    ) -> Result<Vec<DocumentWithOutcome>, QueryError> {
        let mut query = LegalDocuments::find().order_by_asc(legal_documents::Column::Id);

        if let Some(types) = document_types {
            query = query
                .filter(legal_documents::Column::DocumentType.is_in(types.iter().cloned()));
        }

        let documents = query.all(self.conn).await?;

        let document_ids = batch::distinct_keys(documents.iter().map(|d| d.id));
        let outcomes = CaseOutcomes::find()
            .filter(case_outcomes::Column::DocumentId.is_in(document_ids))
            .order_by_asc(case_outcomes::Column::Id)
            .all(self.conn)
            .await?;

        Ok(
            batch::group_children(documents, outcomes, |d| d.id, |o| o.document_id)
                .into_iter()
                .map(|(document, outcomes)| DocumentWithOutcome {
                    document,
                    case_outcome: outcomes.into_iter().next(),
                })
                .collect(),
        )
    }
}
