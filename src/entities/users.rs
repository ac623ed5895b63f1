use sea_orm::entity::prelude::*;
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(unique)]
    pub email: String,

    #[sea_orm(unique)]
    pub username: String,

    /// Never leaves the process.
    #[serde(skip_serializing)]
    pub password_hash: String,

    pub full_name: Option<String>,

    pub phone: Option<String>,

    /// Soft lifecycle flag; users are deactivated rather than deleted.
    pub is_active: bool,

    pub is_verified: bool,

    pub created_at: String,

    pub updated_at: String,

    pub last_login: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::fines::Entity")]
    Fines,
    #[sea_orm(has_one = "super::stripe_customers::Entity")]
    StripeCustomer,
}

impl Related<super::fines::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Fines.def()
    }
}

impl Related<super::stripe_customers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::StripeCustomer.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
