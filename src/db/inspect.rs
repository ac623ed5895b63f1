//! Statement accounting for the query layer.
//!
//! Every statement sent through a connection carrying a [`QueryCounter`] is
//! counted twice: once on the process-wide total and once on the tally of
//! the task currently inside [`measure`]. The per-task tally is what makes
//! N+1 detection exact under concurrent requests sharing one pool.

use sea_orm::DatabaseConnection;
use sea_orm::metric::Info;
use std::cell::Cell;
use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tracing::{trace, warn};

/// Statements allowed for a single-query operation (plain select or inline join).
pub const SINGLE_QUERY: u64 = 1;

/// Statements allowed for a batched secondary fetch: roots, then relations.
pub const BATCHED_FETCH: u64 = 2;

tokio::task_local! {
    static TALLY: Cell<u64>;
}

#[derive(Debug, Clone, Default)]
pub struct QueryCounter {
    total: Arc<AtomicU64>,
}

impl QueryCounter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Hooks the counter into the connection's metric callback.
    ///
    /// Must run before the connection is cloned: clones taken earlier keep
    /// the callback they were created with.
    pub fn install(&self, conn: &mut DatabaseConnection, slow_threshold: Duration) {
        let total = Arc::clone(&self.total);
        conn.set_metric_callback(move |info: &Info<'_>| {
            note_statement(&total);
            record_statement(info, slow_threshold);
        });
    }

    /// Statements issued through every connection carrying this counter.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.total.load(Ordering::Relaxed)
    }
}

fn note_statement(total: &AtomicU64) {
    total.fetch_add(1, Ordering::Relaxed);
    let _ = TALLY.try_with(|tally| tally.set(tally.get() + 1));
}

fn record_statement(info: &Info<'_>, slow_threshold: Duration) {
    metrics::counter!("db_queries_total").increment(1);
    metrics::histogram!("db_query_duration_seconds").record(info.elapsed.as_secs_f64());

    let elapsed_ms = u64::try_from(info.elapsed.as_millis()).unwrap_or(u64::MAX);

    if info.failed {
        metrics::counter!("db_query_failures_total").increment(1);
        warn!(elapsed_ms, sql = %info.statement.sql, "Statement failed");
    } else if info.elapsed >= slow_threshold {
        metrics::counter!("db_slow_queries_total").increment(1);
        warn!(elapsed_ms, sql = %info.statement.sql, "Slow query");
    } else {
        trace!(elapsed_ms, sql = %info.statement.sql, "Query executed");
    }
}

/// Runs `fut` and returns its output along with the number of statements it
/// issued through counted connections.
///
/// Nested measurements also count toward the enclosing one.
pub async fn measure<F: Future>(fut: F) -> (F::Output, u64) {
    let (output, issued) = TALLY
        .scope(Cell::new(0), async {
            let output = fut.await;
            (output, TALLY.with(Cell::get))
        })
        .await;

    let _ = TALLY.try_with(|outer| outer.set(outer.get() + issued));
    (output, issued)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BudgetReport {
    pub operation: &'static str,
    pub budget: u64,
    pub issued: u64,
}

impl BudgetReport {
    #[must_use]
    pub const fn exceeded(&self) -> bool {
        self.issued > self.budget
    }
}

/// Compares the statements an operation issued with what its loading
/// strategy allows.
#[derive(Debug, Clone, Copy)]
pub struct QueryInspector {
    detect_n_plus_one: bool,
}

impl QueryInspector {
    #[must_use]
    pub const fn new(detect_n_plus_one: bool) -> Self {
        Self { detect_n_plus_one }
    }

    pub fn check(&self, operation: &'static str, budget: u64, issued: u64) -> BudgetReport {
        let report = BudgetReport {
            operation,
            budget,
            issued,
        };

        if self.detect_n_plus_one && report.exceeded() {
            metrics::counter!("db_n_plus_one_suspected_total", "operation" => operation)
                .increment(1);
            warn!(
                operation,
                budget, issued, "Possible N+1 query pattern: statement budget exceeded"
            );
        }

        report
    }

    /// Measures `fut` and checks it against `budget`.
    pub async fn metered<F: Future>(
        &self,
        operation: &'static str,
        budget: u64,
        fut: F,
    ) -> (F::Output, BudgetReport) {
        let (output, issued) = measure(fut).await;
        (output, self.check(operation, budget, issued))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_measure_counts_statements_in_scope() {
        let total = AtomicU64::new(0);

        let ((), issued) = measure(async {
            note_statement(&total);
            note_statement(&total);
        })
        .await;

        assert_eq!(issued, 2);
        assert_eq!(total.load(Ordering::Relaxed), 2);
    }

    #[tokio::test]
    async fn test_statements_outside_scope_are_not_attributed() {
        let total = AtomicU64::new(0);
        note_statement(&total);

        let ((), issued) = measure(async {}).await;

        assert_eq!(issued, 0);
        assert_eq!(total.load(Ordering::Relaxed), 1);
    }

    #[tokio::test]
    async fn test_nested_measure_rolls_up() {
        let total = AtomicU64::new(0);

        let (inner, outer) = measure(async {
            note_statement(&total);
            let ((), inner) = measure(async {
                note_statement(&total);
                note_statement(&total);
            })
            .await;
            inner
        })
        .await;

        assert_eq!(inner, 2);
        assert_eq!(outer, 3);
    }

    #[test]
    fn test_check_flags_exceeded_budget() {
        let inspector = QueryInspector::new(true);

        let report = inspector.check("fines_by_user_with_defenses", BATCHED_FETCH, 101);
        assert!(report.exceeded());

        let report = inspector.check("fine_with_user", SINGLE_QUERY, 1);
        assert!(!report.exceeded());
    }

    #[tokio::test]
    async fn test_metered_reports_issued_statements() {
        let total = AtomicU64::new(0);
        let inspector = QueryInspector::new(false);

        let (value, report) = inspector
            .metered("defense_with_fine", BATCHED_FETCH, async {
                note_statement(&total);
                note_statement(&total);
                7
            })
            .await;

        assert_eq!(value, 7);
        assert_eq!(report.issued, 2);
        assert!(!report.exceeded());
    }
}
