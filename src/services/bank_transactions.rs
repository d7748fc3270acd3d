use std::sync::Arc;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, QuerySelect, TransactionTrait, Set,
};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use uuid::Uuid;
use validator::Validate;

use crate::{
    entities::bank_transaction,
    errors::ServiceError,
    events::{Event, EventSender},
    services::{approvals, documents, ledger, sequences},
    workflow::{DocumentKind, DocumentRef, DocumentState},
};

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateBankTransaction {
    pub company_id: Uuid,
    pub bank_account_id: Uuid,
    /// Signed: deposits positive, withdrawals negative.
    pub amount: Decimal,
    pub transacted_at: DateTime<Utc>,
    #[validate(length(max = 1000))]
    pub memo: Option<String>,
}

#[derive(Clone)]
pub struct BankTransactionService {
    db: Arc<DatabaseConnection>,
    event_sender: EventSender,
}

impl BankTransactionService {
    pub fn new(db: Arc<DatabaseConnection>, event_sender: EventSender) -> Self {
        Self { db, event_sender }
    }

    #[instrument(skip(self, input), fields(company_id = %input.company_id))]
    pub async fn create(
        &self,
        input: CreateBankTransaction,
    ) -> Result<bank_transaction::Model, ServiceError> {
        input.validate()?;
        if input.amount.is_zero() {
            return Err(ServiceError::ValidationError(
                "amount must not be zero".into(),
            ));
        }

        let txn = self.db.begin().await?;
        let now = Utc::now();

        let number = sequences::next_number(
            &txn,
            input.company_id,
            DocumentKind::BankTransaction,
            input.transacted_at,
        )
        .await?;

        let tx = bank_transaction::ActiveModel {
            id: Set(Uuid::new_v4()),
            company_id: Set(input.company_id),
            number: Set(number.clone()),
            bank_account_id: Set(input.bank_account_id),
            status: Set(DocumentState::Draft),
            amount: Set(input.amount),
            transacted_at: Set(input.transacted_at),
            memo: Set(input.memo.clone()),
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
                document: DocumentRef::new(DocumentKind::BankTransaction, tx.id),
                number,
            })
            .await
            .map_err(ServiceError::EventError)?;

        Ok(tx)
    }

    pub async fn get(&self, id: Uuid) -> Result<bank_transaction::Model, ServiceError> {
        bank_transaction::Entity::find_by_id(id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Bank transaction {id} not found")))
    }

    /// Submits for approval routing on the absolute amount.
    #[instrument(skip(self), fields(bt_id = %id))]
    pub async fn submit(&self, id: Uuid) -> Result<approvals::SubmitOutcome, ServiceError> {
        let txn = self.db.begin().await?;

        let tx = bank_transaction::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Bank transaction {id} not found")))?;

        let document = DocumentRef::new(DocumentKind::BankTransaction, id);
        let outcome =
            approvals::submit_document(&txn, tx.company_id, document, tx.amount.abs()).await?;
        txn.commit().await?;

        self.event_sender
            .send(Event::DocumentSubmitted { document })
            .await
            .map_err(ServiceError::EventError)?;
        Ok(outcome)
    }

    /// Posts an approved transaction, applying its signed amount to the bank
    /// account balance in the same transaction as the status write.
    #[instrument(skip(self), fields(bt_id = %id))]
    pub async fn post(&self, id: Uuid) -> Result<bank_transaction::Model, ServiceError> {
        let txn = self.db.begin().await?;

        let tx = bank_transaction::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Bank transaction {id} not found")))?;

        let document = DocumentRef::new(DocumentKind::BankTransaction, id);
        documents::transition(&txn, document, DocumentState::Posted).await?;

        let new_balance = ledger::apply(
            &txn,
            ledger::BalanceTarget::BankAccount(tx.bank_account_id),
            tx.amount,
        )
        .await?;
        txn.commit().await?;

        self.event_sender
            .send(Event::BankTransactionPosted {
                bank_transaction_id: id,
                amount: tx.amount,
                new_balance,
            })
            .await
            .map_err(ServiceError::EventError)?;

        let tx = self.get(id).await?;
        info!(bt_number = %tx.number, amount = %tx.amount, %new_balance, "bank transaction posted");
        Ok(tx)
    }

    /// Changes the amount of a transaction. On a posted transaction the old
    /// amount is reversed and the new one applied; the balance never receives
    /// a computed difference.
    #[instrument(skip(self), fields(bt_id = %id, new_amount = %new_amount))]
    pub async fn update_amount(
        &self,
        id: Uuid,
        new_amount: Decimal,
    ) -> Result<bank_transaction::Model, ServiceError> {
        if new_amount.is_zero() {
            return Err(ServiceError::ValidationError(
                "amount must not be zero".into(),
            ));
        }

        let txn = self.db.begin().await?;

        let tx = bank_transaction::Entity::find_by_id(id)
            .lock_exclusive()
            .one(&txn)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Bank transaction {id} not found")))?;

        match tx.status {
            DocumentState::Draft => {}
            DocumentState::Posted => {
                let target = ledger::BalanceTarget::BankAccount(tx.bank_account_id);
                ledger::reverse(&txn, target, tx.amount).await?;
                ledger::apply(&txn, target, new_amount).await?;
            }
            other => {
                return Err(ServiceError::InvalidOperation(format!(
                    "Bank transaction {} cannot be edited in state '{}'",
                    tx.number, other
                )));
            }
        }

        let version = tx.version;
        let mut active: bank_transaction::ActiveModel = tx.into();
        active.amount = Set(new_amount);
        active.updated_at = Set(Some(Utc::now()));
        active.version = Set(version + 1);
        let updated = active.update(&txn).await?;

        txn.commit().await?;
        Ok(updated)
    }

    #[instrument(skip(self), fields(bt_id = %id))]
    pub async fn cancel(&self, id: Uuid) -> Result<bank_transaction::Model, ServiceError> {
        let txn = self.db.begin().await?;
        let document = DocumentRef::new(DocumentKind::BankTransaction, id);
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
