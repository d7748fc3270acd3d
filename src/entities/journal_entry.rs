use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::workflow::DocumentState;

/// Double-entry journal header. Posting requires total_debit == total_credit
/// and applies each line's signed amount to its ledger account.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "journal_entries")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub company_id: Uuid,

    pub number: String,

    pub status: DocumentState,

    pub entry_date: DateTime<Utc>,
    pub memo: Option<String>,

    pub total_debit: Decimal,
    pub total_credit: Decimal,

    pub posted_at: Option<DateTime<Utc>>,

    pub status_changed_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::journal_entry_line::Entity")]
    Lines,
}

impl Related<super::journal_entry_line::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Lines.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
