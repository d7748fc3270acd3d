use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::workflow::DocumentKind;

/// Lifecycle of an approval request instance.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    EnumIter,
    DeriveActiveEnum,
    Serialize,
    Deserialize,
    strum::Display,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ApprovalStatus {
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "approved")]
    Approved,
    #[sea_orm(string_value = "rejected")]
    Rejected,
    #[sea_orm(string_value = "cancelled")]
    Cancelled,
}

/// Informational urgency tag derived from the document amount.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    EnumIter,
    DeriveActiveEnum,
    Serialize,
    Deserialize,
    strum::Display,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ApprovalPriority {
    #[sea_orm(string_value = "low")]
    Low,
    #[sea_orm(string_value = "medium")]
    Medium,
    #[sea_orm(string_value = "high")]
    High,
    #[sea_orm(string_value = "urgent")]
    Urgent,
}

impl ApprovalPriority {
    /// Threshold tagging: >=100000 urgent, >=50000 high, >=10000 medium.
    pub fn from_amount(amount: Decimal) -> Self {
        if amount >= Decimal::from(100_000) {
            ApprovalPriority::Urgent
        } else if amount >= Decimal::from(50_000) {
            ApprovalPriority::High
        } else if amount >= Decimal::from(10_000) {
            ApprovalPriority::Medium
        } else {
            ApprovalPriority::Low
        }
    }
}

/// Runtime instance of a workflow sign-off for one document. At most one
/// pending request may exist per document.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "approval_requests")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub company_id: Uuid,

    pub document_kind: DocumentKind,
    pub document_id: Uuid,

    pub workflow_id: Uuid,

    pub current_level: i32,

    pub status: ApprovalStatus,

    /// Approver assigned at the current level.
    pub approver_id: Uuid,

    /// Document amount captured at routing time.
    pub amount: Decimal,

    pub priority: ApprovalPriority,

    pub reason: Option<String>,

    pub decided_by: Option<Uuid>,
    pub decided_at: Option<DateTime<Utc>>,

    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::approval_workflow::Entity",
        from = "Column::WorkflowId",
        to = "super::approval_workflow::Column::Id"
    )]
    Workflow,
}

impl Related<super::approval_workflow::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Workflow.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn priority_thresholds() {
        assert_eq!(
            ApprovalPriority::from_amount(dec!(5000)),
            ApprovalPriority::Low
        );
        assert_eq!(
            ApprovalPriority::from_amount(dec!(10000)),
            ApprovalPriority::Medium
        );
        assert_eq!(
            ApprovalPriority::from_amount(dec!(99999.99)),
            ApprovalPriority::High
        );
        assert_eq!(
            ApprovalPriority::from_amount(dec!(100000)),
            ApprovalPriority::Urgent
        );
    }
}
