use crate::config::DatabaseConfig;
use crate::entities::{analytics_events, prelude::*};
use crate::models::{
    DefenseWithFine, DocumentWithOutcome, FineWithDefenses, FineWithUser, PaymentWithCustomer,
    SubscriptionWithCustomer,
};
use anyhow::Result;
use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseConnection, EntityTrait, PaginatorTrait,
    Statement,
};
use std::future::Future;
use std::path::Path;
use std::time::Duration;
use tracing::info;

pub mod batch;
pub mod error;
pub mod inspect;
pub mod migrator;
pub mod repositories;

pub use error::{OptionExt, QueryError};
pub use inspect::{
    BATCHED_FETCH, BudgetReport, QueryCounter, QueryInspector, SINGLE_QUERY, measure,
};
pub use repositories::{
    AnalyticsRepository, BillingRepository, DefenseRepository, DocumentRepository, FineRepository,
};

/// Owns the connection pool and hands borrowed connections to the
/// repositories. Every facade method is metered against the statement
/// budget of its loading strategy.
#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
    counter: QueryCounter,
    inspector: QueryInspector,
    analytics_default_limit: u64,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::connect(&DatabaseConfig::with_url(db_url)).await
    }

    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        let db_url = config.url.as_str();
        let in_memory = db_url.contains(":memory:");

        if !in_memory {
            let path_str = sqlite_path(db_url);
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        // Each pooled connection to an in-memory database would see its own
        // empty schema.
        let (max_connections, min_connections) = if in_memory {
            (1, 1)
        } else {
            (config.max_connections, config.min_connections)
        };

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let mut conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        let counter = QueryCounter::new();
        counter.install(&mut conn, config.slow_query_threshold());

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self {
            conn,
            counter,
            inspector: QueryInspector::new(config.detect_n_plus_one),
            analytics_default_limit: config.analytics_default_limit,
        })
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    #[must_use]
    pub const fn query_counter(&self) -> &QueryCounter {
        &self.counter
    }

    pub async fn table_counts(&self) -> Result<Vec<(&'static str, u64)>> {
        Ok(vec![
            ("users", Users::find().count(&self.conn).await?),
            ("fines", Fines::find().count(&self.conn).await?),
            ("defenses", Defenses::find().count(&self.conn).await?),
            ("legal_documents", LegalDocuments::find().count(&self.conn).await?),
            ("case_outcomes", CaseOutcomes::find().count(&self.conn).await?),
            ("analytics_events", AnalyticsEvents::find().count(&self.conn).await?),
            ("stripe_customers", StripeCustomers::find().count(&self.conn).await?),
            (
                "stripe_subscriptions",
                StripeSubscriptions::find().count(&self.conn).await?,
            ),
            ("payments", Payments::find().count(&self.conn).await?),
        ])
    }

    #[must_use]
    pub const fn fine_repo(&self) -> FineRepository<'_, DatabaseConnection> {
        FineRepository::new(&self.conn)
    }

    #[must_use]
    pub const fn defense_repo(&self) -> DefenseRepository<'_, DatabaseConnection> {
        DefenseRepository::new(&self.conn)
    }

    #[must_use]
    pub const fn document_repo(&self) -> DocumentRepository<'_, DatabaseConnection> {
        DocumentRepository::new(&self.conn)
    }

    #[must_use]
    pub const fn billing_repo(&self) -> BillingRepository<'_, DatabaseConnection> {
        BillingRepository::new(&self.conn)
    }

    #[must_use]
    pub const fn analytics_repo(&self) -> AnalyticsRepository<'_, DatabaseConnection> {
        AnalyticsRepository::new(&self.conn)
    }

    async fn metered<T, F>(
        &self,
        operation: &'static str,
        budget: u64,
        fut: F,
    ) -> Result<T, QueryError>
    where
        F: Future<Output = Result<T, QueryError>>,
    {
        let (result, _report) = self.inspector.metered(operation, budget, fut).await;
        result
    }

    pub async fn get_defenses_by_fine(
        &self,
        fine_id: i32,
    ) -> Result<Vec<DefenseWithFine>, QueryError> {
        self.metered(
            "defenses_by_fine",
            BATCHED_FETCH,
            self.defense_repo().by_fine(fine_id),
        )
        .await
    }

    pub async fn get_fines_with_defenses(
        &self,
        user_id: i32,
    ) -> Result<Vec<FineWithDefenses>, QueryError> {
        self.metered(
            "fines_with_defenses",
            BATCHED_FETCH,
            self.fine_repo().by_user_with_defenses(user_id),
        )
        .await
    }

    pub async fn get_defenses_by_user(
        &self,
        user_id: i32,
    ) -> Result<Vec<DefenseWithFine>, QueryError> {
        self.metered(
            "defenses_by_user",
            BATCHED_FETCH,
            self.defense_repo().by_user_with_fine(user_id),
        )
        .await
    }

    pub async fn get_defense_with_fine(
        &self,
        defense_id: i32,
    ) -> Result<Option<DefenseWithFine>, QueryError> {
        self.metered(
            "defense_with_fine",
            BATCHED_FETCH,
            self.defense_repo().get_with_fine(defense_id),
        )
        .await
    }

    pub async fn get_fine_with_user(
        &self,
        fine_id: i32,
    ) -> Result<Option<FineWithUser>, QueryError> {
        self.metered(
            "fine_with_user",
            SINGLE_QUERY,
            self.fine_repo().get_with_user(fine_id),
        )
        .await
    }

    /// Falls back to the configured default cap when `limit` is `None`.
    pub async fn get_analytics_events(
        &self,
        event_types: &[String],
        limit: Option<u64>,
    ) -> Result<Vec<analytics_events::Model>, QueryError> {
        let limit = limit.unwrap_or(self.analytics_default_limit);
        self.metered(
            "analytics_events_by_type",
            SINGLE_QUERY,
            self.analytics_repo().by_types(event_types, limit),
        )
        .await
    }

    pub async fn get_legal_documents(
        &self,
        document_types: Option<&[String]>,
    ) -> Result<Vec<DocumentWithOutcome>, QueryError> {
        self.metered(
            "legal_documents_with_outcomes",
            BATCHED_FETCH,
            self.document_repo().with_outcomes(document_types),
        )
        .await
    }

    pub async fn get_subscriptions_by_user(
        &self,
        user_id: i32,
    ) -> Result<Vec<SubscriptionWithCustomer>, QueryError> {
        self.metered(
            "subscriptions_by_user",
            SINGLE_QUERY,
            self.billing_repo().subscriptions_by_user(user_id),
        )
        .await
    }

    pub async fn get_payments_by_user(
        &self,
        user_id: i32,
    ) -> Result<Vec<PaymentWithCustomer>, QueryError> {
        self.metered(
            "payments_by_user",
            SINGLE_QUERY,
            self.billing_repo().payments_by_user(user_id),
        )
        .await
    }
}

/// Filesystem path of a `sqlite:` URL, without scheme or query string.
fn sqlite_path(db_url: &str) -> &str {
    let path = db_url.trim_start_matches("sqlite:");
    let path = path.strip_prefix("//").unwrap_or(path);
    path.split('?').next().unwrap_or(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sqlite_path() {
        assert_eq!(sqlite_path("sqlite:data/fines.db"), "data/fines.db");
        assert_eq!(sqlite_path("sqlite://data/fines.db?mode=rwc"), "data/fines.db");
        assert_eq!(sqlite_path("sqlite:///tmp/fines.db"), "/tmp/fines.db");
    }
}
