use sea_orm::entity::prelude::*;
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "legal_documents")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub document_type: String,
    pub title: String,
    pub content: String,
    pub created_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_one = "super::case_outcomes::Entity")]
    CaseOutcome,
}

impl Related<super::case_outcomes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CaseOutcome.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
