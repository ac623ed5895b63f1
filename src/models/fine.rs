use serde::Serialize;

use crate::entities::{defenses, fines, users};

/// A fine with every defense drafted against it.
#[derive(Debug, Clone, Serialize)]
pub struct FineWithDefenses {
    #[serde(flatten)]
    pub fine: fines::Model,
    pub defenses: Vec<defenses::Model>,
}

/// A fine with its owning user, fetched through a single join.
#[derive(Debug, Clone, Serialize)]
pub struct FineWithUser {
    #[serde(flatten)]
    pub fine: fines::Model,
    pub user: Option<users::Model>,
}

/// A defense with the fine it argues against.
///
/// `fine` is always `Some` while the foreign key constraint holds; it is kept
/// optional so a dangling row is surfaced instead of dropped.
#[derive(Debug, Clone, Serialize)]
pub struct DefenseWithFine {
    #[serde(flatten)]
    pub defense: defenses::Model,
    pub fine: Option<fines::Model>,
}

impl FineWithDefenses {
    #[must_use]
    pub fn defense_ids(&self) -> Vec<i32> {
        self.defenses.iter().map(|d| d.id).collect()
    }
}
