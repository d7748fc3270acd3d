use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "journal_entry_lines")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub journal_entry_id: Uuid,

    pub ledger_account_id: Uuid,

    pub description: Option<String>,

    pub debit: Decimal,
    pub credit: Decimal,

    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::journal_entry::Entity",
        from = "Column::JournalEntryId",
        to = "super::journal_entry::Column::Id"
    )]
    JournalEntry,
    #[sea_orm(
        belongs_to = "super::ledger_account::Entity",
        from = "Column::LedgerAccountId",
        to = "super::ledger_account::Column::Id"
    )]
    LedgerAccount,
}

impl Related<super::journal_entry::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::JournalEntry.def()
    }
}

impl Related<super::ledger_account::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::LedgerAccount.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Signed ledger delta for this line (debits increase, credits decrease).
    pub fn signed_amount(&self) -> Decimal {
        self.debit - self.credit
    }
}
