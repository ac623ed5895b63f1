use crate::db::QueryError;
use crate::db::batch;
use crate::entities::{defenses, fines, prelude::*};
use crate::models::DefenseWithFine;
use sea_orm::{
    ColumnTrait, ConnectionTrait, EntityTrait, JoinType, QueryFilter, QueryOrder, QuerySelect,
    RelationTrait,
};

/// Defense lookups. Every method loads the owning fine with one extra
/// `IN (...)` statement, never one statement per defense.
pub struct DefenseRepository<'a, C> {
    conn: &'a C,
}

impl<'a, C: ConnectionTrait> DefenseRepository<'a, C> {
    #[must_use]
    pub const fn new(conn: &'a C) -> Self {
        Self { conn }
    }

    pub async fn by_fine(&self, fine_id: i32) -> Result<Vec<DefenseWithFine>, QueryError> {
        let defenses = Defenses::find()
            .filter(defenses::Column::FineId.eq(fine_id))
            .order_by_asc(defenses::Column::Id)
            .all(self.conn)
            .await?;

        self.attach_fines(defenses).await
    }

    pub async fn by_user_with_fine(
        &self,
        user_id: i32,
    ) -> Result<Vec<DefenseWithFine>, QueryError> {
        let defenses = Defenses::find()
            .join(JoinType::InnerJoin, defenses::Relation::Fine.def())
            .filter(fines::Column::UserId.eq(user_id))
            .order_by_asc(defenses::Column::Id)
            .all(self.conn)
            .await?;

        self.attach_fines(defenses).await
    }

    /// Same two-statement shape as the collection lookups, so a missing
    /// defense still costs the (empty) secondary fetch.
    pub async fn get_with_fine(
        &self,
        defense_id: i32,
    ) -> Result<Option<DefenseWithFine>, QueryError> {
        let defenses: Vec<defenses::Model> = Defenses::find_by_id(defense_id)
            .one(self.conn)
            .await?
            .into_iter()
            .collect();

        Ok(self.attach_fines(defenses).await?.into_iter().next())
    }

    async fn attach_fines(
        &self,
        defenses: Vec<defenses::Model>,
    ) -> Result<Vec<DefenseWithFine>, QueryError> {
        let fine_ids = batch::distinct_keys(defenses.iter().map(|d| d.fine_id));
        let fines = Fines::find()
            .filter(fines::Column::Id.is_in(fine_ids))
            .all(self.conn)
            .await?;

        Ok(
            batch::attach_parent(defenses, fines, |d| d.fine_id, |f| f.id)
                .into_iter()
                .map(|(defense, fine)| DefenseWithFine { defense, fine })
                .collect(),
        )
    }
}
