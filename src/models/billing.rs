use serde::Serialize;

use crate::entities::{payments, stripe_customers, stripe_subscriptions};

#[derive(Debug, Clone, Serialize)]
pub struct SubscriptionWithCustomer {
    #[serde(flatten)]
    pub subscription: stripe_subscriptions::Model,
    pub customer: stripe_customers::Model,
}

#[derive(Debug, Clone, Serialize)]
pub struct PaymentWithCustomer {
    #[serde(flatten)]
    pub payment: payments::Model,
    pub customer: stripe_customers::Model,
}
