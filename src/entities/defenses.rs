use sea_orm::entity::prelude::*;
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "defenses")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub fine_id: i32,
    pub content: String,
    pub defense_type: String,
    pub status: String,
    pub created_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::fines::Entity",
        from = "Column::FineId",
        to = "super::fines::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Fine,
}

impl Related<super::fines::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Fine.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
