use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::workflow::DocumentState;

/// HR leave request. Routed through approval on `days`; never touches
/// balances, so `approved` is its final state.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "leave_requests")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub company_id: Uuid,

    pub number: String,

    pub employee_id: Uuid,

    pub status: DocumentState,

    /// Leave category, e.g. "annual", "sick", "unpaid".
    pub leave_type: String,

    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub days: Decimal,

    pub reason: Option<String>,

    pub status_changed_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
