use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, TransactionTrait, Set,
};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use uuid::Uuid;
use validator::Validate;

use crate::{
    entities::payroll_period,
    errors::ServiceError,
    events::{Event, EventSender},
    services::{approvals, documents, ledger, sequences},
    workflow::{DocumentKind, DocumentRef, DocumentState},
};

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreatePayrollPeriod {
    pub company_id: Uuid,
    /// Calendar period, e.g. "2025-01".
    #[validate(length(min = 7, max = 7, message = "period_month must look like YYYY-MM"))]
    pub period_month: String,
    pub gross_total: Decimal,
    pub net_total: Decimal,
    /// Account the net payroll is withdrawn from on payment.
    pub bank_account_id: Option<Uuid>,
}

#[derive(Clone)]
pub struct PayrollPeriodService {
    db: Arc<DatabaseConnection>,
    event_sender: EventSender,
}

impl PayrollPeriodService {
    pub fn new(db: Arc<DatabaseConnection>, event_sender: EventSender) -> Self {
        Self { db, event_sender }
    }

    #[instrument(skip(self, input), fields(company_id = %input.company_id))]
    pub async fn create(
        &self,
        input: CreatePayrollPeriod,
    ) -> Result<payroll_period::Model, ServiceError> {
        input.validate()?;
        if input.gross_total < Decimal::ZERO
            || input.net_total < Decimal::ZERO
            || input.net_total > input.gross_total
        {
            return Err(ServiceError::ValidationError(
                "totals must be non-negative and net_total must not exceed gross_total".into(),
            ));
        }

        let txn = self.db.begin().await?;
        let now = Utc::now();

        let number =
            sequences::next_number(&txn, input.company_id, DocumentKind::PayrollPeriod, now)
                .await?;

        let period = payroll_period::ActiveModel {
            id: Set(Uuid::new_v4()),
            company_id: Set(input.company_id),
            number: Set(number.clone()),
            status: Set(DocumentState::Draft),
            period_month: Set(input.period_month.clone()),
            gross_total: Set(input.gross_total),
            net_total: Set(input.net_total),
            bank_account_id: Set(input.bank_account_id),
            paid_at: Set(None),
            status_changed_at: Set(now),
            created_at: Set(now),
            updated_at: Set(None),
            version: Set(1),
        }
        .insert(&txn)
        .await?;
        txn.commit().await?;

        self.event_sender
            .send(Event::DocumentCreated {
                document: DocumentRef::new(DocumentKind::PayrollPeriod, period.id),
                number,
            })
            .await
            .map_err(ServiceError::EventError)?;

        Ok(period)
    }

    pub async fn get(&self, id: Uuid) -> Result<payroll_period::Model, ServiceError> {
        payroll_period::Entity::find_by_id(id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Payroll period {id} not found")))
    }

    /// Submits for approval routing on the gross total.
    #[instrument(skip(self), fields(prl_id = %id))]
    pub async fn submit(&self, id: Uuid) -> Result<approvals::SubmitOutcome, ServiceError> {
        let txn = self.db.begin().await?;

        let period = payroll_period::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Payroll period {id} not found")))?;

        let document = DocumentRef::new(DocumentKind::PayrollPeriod, id);
        let outcome =
            approvals::submit_document(&txn, period.company_id, document, period.gross_total)
                .await?;
        txn.commit().await?;

        self.event_sender
            .send(Event::DocumentSubmitted { document })
            .await
            .map_err(ServiceError::EventError)?;
        Ok(outcome)
    }

    /// Pays an approved period: withdraws the net total from the configured
    /// bank account and records the state change atomically.
    #[instrument(skip(self), fields(prl_id = %id))]
    pub async fn pay(&self, id: Uuid) -> Result<payroll_period::Model, ServiceError> {
        let txn = self.db.begin().await?;

        let period = payroll_period::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Payroll period {id} not found")))?;

        let document = DocumentRef::new(DocumentKind::PayrollPeriod, id);
        documents::transition(&txn, document, DocumentState::Paid).await?;

        if let Some(bank_account_id) = period.bank_account_id {
            ledger::apply(
                &txn,
                ledger::BalanceTarget::BankAccount(bank_account_id),
                -period.net_total,
            )
            .await?;
        }
        txn.commit().await?;

        self.event_sender
            .send(Event::PayrollPeriodPaid {
                payroll_period_id: id,
                net_total: period.net_total,
            })
            .await
            .map_err(ServiceError::EventError)?;

        let period = self.get(id).await?;
        info!(prl_number = %period.number, net = %period.net_total, "payroll period paid");
        Ok(period)
    }

    #[instrument(skip(self), fields(prl_id = %id))]
    pub async fn cancel(&self, id: Uuid) -> Result<payroll_period::Model, ServiceError> {
        let txn = self.db.begin().await?;
        let document = DocumentRef::new(DocumentKind::PayrollPeriod, id);
        documents::transition(&txn, document, DocumentState::Cancelled).await?;
        approvals::cancel_open_request(&txn, document).await?;
        txn.commit().await?;

        self.event_sender
            .send(Event::DocumentCancelled { document })
            .await
            .map_err(ServiceError::EventError)?;

        self.get(id).await
    }
}
