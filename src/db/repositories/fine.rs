use crate::db::QueryError;
use crate::db::batch;
use crate::entities::{defenses, fines, prelude::*};
use crate::models::{FineWithDefenses, FineWithUser};
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder};

pub struct FineRepository<'a, C> {
    conn: &'a C,
}

impl<'a, C: ConnectionTrait> FineRepository<'a, C> {
    #[must_use]
    pub const fn new(conn: &'a C) -> Self {
        Self { conn }
    }

    /// Fines owned by `user_id`, each with its defenses.
    ///
    /// Two statements regardless of how many fines the user has.
    pub async fn by_user_with_defenses(
        &self,
        user_id: i32,
    ) -> Result<Vec<FineWithDefenses>, QueryError> {
        let fines = Fines::find()
            .filter(fines::Column::UserId.eq(user_id))
            .order_by_asc(fines::Column::Id)
            .all(self.conn)
            .await?;

        let fine_ids = batch::distinct_keys(fines.iter().map(|f| f.id));
        let defenses = Defenses::find()
            .filter(defenses::Column::FineId.is_in(fine_ids))
            .order_by_asc(defenses::Column::Id)
            .all(self.conn)
            .await?;

        Ok(
            batch::group_children(fines, defenses, |f| f.id, |d| d.fine_id)
                .into_iter()
                .map(|(fine, defenses)| FineWithDefenses { fine, defenses })
                .collect(),
        )
    }

    /// A single fine joined with its owner in one statement.
    pub async fn get_with_user(&self, fine_id: i32) -> Result<Option<FineWithUser>, QueryError> {
        let row = Fines::find_by_id(fine_id)
            .find_also_related(Users)
            .one(self.conn)
            .await?;

        Ok(row.map(|(fine, user)| FineWithUser { fine, user }))
    }
}
