use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Per-scope document number counter.
///
/// One row per (company, prefix, period); `last_value` only moves forward and
/// is read under an exclusive row lock by the sequence service.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "sequence_counters")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    pub company_id: Uuid,

    /// Document-kind prefix, e.g. "PO", "JE", "INV".
    pub prefix: String,

    /// Period component of the scope, e.g. "202501".
    pub period_key: String,

    /// Highest suffix issued for this scope so far; 0 before first use.
    pub last_value: i64,

    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
