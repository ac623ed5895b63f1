use crate::db::QueryError;
use crate::entities::{payments, prelude::*, stripe_customers, stripe_subscriptions};
use crate::models::{PaymentWithCustomer, SubscriptionWithCustomer};
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder};

/// Billing lookups keyed by user, each a single join through the customer
/// table.
pub struct BillingRepository<'a, C> {
    conn: &'a C,
}

impl<'a, C: ConnectionTrait> BillingRepository<'a, C> {
    #[must_use]
    pub const fn new(conn: &'a C) -> Self {
        Self { conn }
    }

    pub async fn subscriptions_by_user(
        &self,
        user_id: i32,
    ) -> Result<Vec<SubscriptionWithCustomer>, QueryError> {
        let rows = StripeSubscriptions::find()
            .find_also_related(StripeCustomers)
            .filter(stripe_customers::Column::UserId.eq(user_id))
            .order_by_asc(stripe_subscriptions::Column::Id)
            .all(self.conn)
            .await?;

        // The filter on the joined table rules out a missing customer.
        Ok(rows
            .into_iter()
            .filter_map(|(subscription, customer)| {
                customer.map(|customer| SubscriptionWithCustomer {
                    subscription,
                    customer,
                })
            })
            .collect())
    }

    pub async fn payments_by_user(
        &self,
        user_id: i32,
    ) -> Result<Vec<PaymentWithCustomer>, QueryError> {
        let rows = Payments::find()
            .find_also_related(StripeCustomers)
            .filter(stripe_customers::Column::UserId.eq(user_id))
            .order_by_asc(payments::Column::Id)
            .all(self.conn)
            .await?;

        Ok(rows
            .into_iter()
            .filter_map(|(payment, customer)| {
                customer.map(|customer| PaymentWithCustomer { payment, customer })
            })
            .collect())
    }
}
