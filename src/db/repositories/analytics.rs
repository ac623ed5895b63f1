use crate::db::QueryError;
use crate::entities::{analytics_events, prelude::*};
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect};

pub const DEFAULT_EVENT_LIMIT: u64 = 100;

pub struct AnalyticsRepository<'a, C> {
    conn: &'a C,
}

impl<'a, C: ConnectionTrait> AnalyticsRepository<'a, C> {
    #[must_use]
    pub const fn new(conn: &'a C) -> Self {
        Self { conn }
    }

    /// Events whose type is one of `event_types`, newest first, at most
    /// `limit` rows. Equal timestamps fall back to insertion order, newest first.
    pub async fn by_types(
        &self,
        event_types: &[String],
        limit: u64,
    ) -> Result<Vec<analytics_events::Model>, QueryError> {
        let events = AnalyticsEvents::find()
            .filter(analytics_events::Column::EventType.is_in(event_types.iter().cloned()))
            .order_by_desc(analytics_events::Column::CreatedAt)
            .order_by_desc(analytics_events::Column::Id)
            .limit(limit)
            .all(self.conn)
            .await?;

        Ok(events)
    }
}
