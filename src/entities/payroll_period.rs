use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::workflow::DocumentState;

/// Payroll run for one period. Paying the period withdraws `net_total` from
/// the configured bank account.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "payroll_periods")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub company_id: Uuid,

    pub number: String,

    pub status: DocumentState,

    /// Calendar period, e.g. "2025-01".
    pub period_month: String,

    pub gross_total: Decimal,
    pub net_total: Decimal,

    /// Account debited when the period is paid.
    pub bank_account_id: Option<Uuid>,

    pub paid_at: Option<DateTime<Utc>>,

    pub status_changed_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
