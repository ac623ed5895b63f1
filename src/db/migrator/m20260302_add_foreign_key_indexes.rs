use crate::entities::{
    analytics_events, defenses, fines, payments, prelude::*, stripe_subscriptions,
};
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Every batched secondary fetch filters on one of these columns with
/// `IN (...)`; without an index that statement degrades to a table scan.
#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_index(
                Index::create()
                    .name("idx_fines_user_id")
                    .table(Fines)
                    .col(fines::Column::UserId)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_defenses_fine_id")
                    .table(Defenses)
                    .col(defenses::Column::FineId)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_stripe_subscriptions_customer_id")
                    .table(StripeSubscriptions)
                    .col(stripe_subscriptions::Column::CustomerId)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_payments_customer_id")
                    .table(Payments)
                    .col(payments::Column::CustomerId)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        // stripe_customers.user_id and case_outcomes.document_id are unique
        // columns and already carry an index.
        manager
            .create_index(
                Index::create()
                    .name("idx_analytics_events_type_created_at")
                    .table(AnalyticsEvents)
                    .col(analytics_events::Column::EventType)
                    .col(analytics_events::Column::CreatedAt)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for (name, table) in [
            ("idx_analytics_events_type_created_at", "analytics_events"),
            ("idx_payments_customer_id", "payments"),
            ("idx_stripe_subscriptions_customer_id", "stripe_subscriptions"),
            ("idx_defenses_fine_id", "defenses"),
            ("idx_fines_user_id", "fines"),
        ] {
            manager
                .drop_index(Index::drop().name(name).table(Alias::new(table)).to_owned())
                .await?;
        }

        Ok(())
    }
}
