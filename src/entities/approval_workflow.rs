use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::workflow::DocumentKind;

/// Approval workflow definition: applies to documents of `document_kind`
/// whose amount falls in `[min_amount, max_amount)` (open-ended when
/// `max_amount` is null).
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "approval_workflows")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub company_id: Uuid,

    pub document_kind: DocumentKind,

    pub name: String,

    pub min_amount: Decimal,
    pub max_amount: Option<Decimal>,

    pub active: bool,

    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::approval_level::Entity")]
    Levels,
    #[sea_orm(has_many = "super::approval_request::Entity")]
    Requests,
}

impl Related<super::approval_level::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Levels.def()
    }
}

impl Related<super::approval_request::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Requests.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// True when `amount` falls inside this workflow's threshold range.
    pub fn covers(&self, amount: Decimal) -> bool {
        amount >= self.min_amount && self.max_amount.map_or(true, |max| amount < max)
    }
}
