use sea_orm::entity::prelude::*;
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "case_outcomes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub document_id: i32,
    pub outcome: String,
    pub decided_at: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::legal_documents::Entity",
        from = "Column::DocumentId",
        to = "super::legal_documents::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    LegalDocument,
}

impl Related<super::legal_documents::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::LegalDocument.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
