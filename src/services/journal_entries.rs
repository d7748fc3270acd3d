use std::sync::Arc;

use chrono::{DateTime, Utc};
use lazy_static::lazy_static;
use prometheus::IntCounter;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder, TransactionTrait, Set,
};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use uuid::Uuid;
use validator::Validate;

use crate::{
    entities::{journal_entry, journal_entry_line},
    errors::ServiceError,
    events::{Event, EventSender},
    services::{approvals, documents, ledger, sequences},
    workflow::{DocumentKind, DocumentRef, DocumentState},
};

lazy_static! {
    static ref JE_POSTINGS: IntCounter = IntCounter::new(
        "journal_entry_postings_total",
        "Total number of journal entries posted"
    )
    .expect("metric can be created");
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateJournalEntry {
    pub company_id: Uuid,
    pub entry_date: DateTime<Utc>,
    #[validate(length(max = 1000))]
    pub memo: Option<String>,
    #[validate(length(min = 2, message = "A journal entry needs at least two lines"))]
    pub lines: Vec<JournalLineInput>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalLineInput {
    pub ledger_account_id: Uuid,
    pub description: Option<String>,
    #[serde(default)]
    pub debit: Decimal,
    #[serde(default)]
    pub credit: Decimal,
}

#[derive(Clone)]
pub struct JournalEntryService {
    db: Arc<DatabaseConnection>,
    event_sender: EventSender,
}

impl JournalEntryService {
    pub fn new(db: Arc<DatabaseConnection>, event_sender: EventSender) -> Self {
        Self { db, event_sender }
    }

    /// Creates a draft journal entry. Balance is checked again at post time;
    /// here only line shape is validated.
    #[instrument(skip(self, input), fields(company_id = %input.company_id))]
    pub async fn create(
        &self,
        input: CreateJournalEntry,
    ) -> Result<journal_entry::Model, ServiceError> {
        input.validate()?;

        let mut total_debit = Decimal::ZERO;
        let mut total_credit = Decimal::ZERO;
        for (index, line) in input.lines.iter().enumerate() {
            if line.debit < Decimal::ZERO || line.credit < Decimal::ZERO {
                return Err(ServiceError::ValidationError(format!(
                    "line {index}: debit and credit must not be negative"
                )));
            }
            if (line.debit.is_zero()) == (line.credit.is_zero()) {
                return Err(ServiceError::ValidationError(format!(
                    "line {index}: exactly one of debit or credit must be set"
                )));
            }
            total_debit += line.debit;
            total_credit += line.credit;
        }

        let txn = self.db.begin().await?;
        let now = Utc::now();

        let number = sequences::next_number(
            &txn,
            input.company_id,
            DocumentKind::JournalEntry,
            input.entry_date,
        )
        .await?;

        let entry = journal_entry::ActiveModel {
            id: Set(Uuid::new_v4()),
            company_id: Set(input.company_id),
            number: Set(number.clone()),
            status: Set(DocumentState::Draft),
            entry_date: Set(input.entry_date),
            memo: Set(input.memo.clone()),
            total_debit: Set(total_debit),
            total_credit: Set(total_credit),
            posted_at: Set(None),
            status_changed_at: Set(now),
            created_at: Set(now),
            updated_at: Set(None),
            version: Set(1),
        }
        .insert(&txn)
        .await?;

        for line in &input.lines {
            journal_entry_line::ActiveModel {
                id: Set(Uuid::new_v4()),
                journal_entry_id: Set(entry.id),
                ledger_account_id: Set(line.ledger_account_id),
                description: Set(line.description.clone()),
                debit: Set(line.debit),
                credit: Set(line.credit),
                created_at: Set(now),
            }
            .insert(&txn)
            .await?;
        }
        txn.commit().await?;

        self.event_sender
            .send(Event::DocumentCreated {
                document: DocumentRef::new(DocumentKind::JournalEntry, entry.id),
                number,
            })
            .await
            .map_err(ServiceError::EventError)?;

        Ok(entry)
    }

    pub async fn get(
        &self,
        id: Uuid,
    ) -> Result<(journal_entry::Model, Vec<journal_entry_line::Model>), ServiceError> {
        let entry = journal_entry::Entity::find_by_id(id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Journal entry {id} not found")))?;
        let lines = entry
            .find_related(journal_entry_line::Entity)
            .order_by_asc(journal_entry_line::Column::CreatedAt)
            .all(&*self.db)
            .await?;
        Ok((entry, lines))
    }

    /// Submits the entry for approval routing on its debit total.
    #[instrument(skip(self), fields(je_id = %id))]
    pub async fn submit(&self, id: Uuid) -> Result<approvals::SubmitOutcome, ServiceError> {
        let txn = self.db.begin().await?;

        let entry = journal_entry::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Journal entry {id} not found")))?;

        let document = DocumentRef::new(DocumentKind::JournalEntry, id);
        let outcome =
            approvals::submit_document(&txn, entry.company_id, document, entry.total_debit)
                .await?;
        txn.commit().await?;

        self.event_sender
            .send(Event::DocumentSubmitted { document })
            .await
            .map_err(ServiceError::EventError)?;
        Ok(outcome)
    }

    /// Posts an approved entry: verifies the debit/credit balance, applies
    /// each line's signed delta to its ledger account, and records the state
    /// change, all in one transaction.
    #[instrument(skip(self), fields(je_id = %id))]
    pub async fn post(&self, id: Uuid) -> Result<journal_entry::Model, ServiceError> {
        let txn = self.db.begin().await?;

        let entry = journal_entry::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Journal entry {id} not found")))?;

        let document = DocumentRef::new(DocumentKind::JournalEntry, id);

        // State check first: a draft entry must not reach the balance check.
        documents::transition(&txn, document, DocumentState::Posted).await?;

        let lines = journal_entry_line::Entity::find()
            .filter(journal_entry_line::Column::JournalEntryId.eq(id))
            .all(&txn)
            .await?;

        let debits: Decimal = lines.iter().map(|l| l.debit).sum();
        let credits: Decimal = lines.iter().map(|l| l.credit).sum();
        if debits != credits {
            // Dropping the transaction rolls the status write back.
            return Err(ServiceError::UnbalancedEntry { debits, credits });
        }

        for line in &lines {
            ledger::apply(
                &txn,
                ledger::BalanceTarget::LedgerAccount(line.ledger_account_id),
                line.signed_amount(),
            )
            .await?;
        }

        txn.commit().await?;
        JE_POSTINGS.inc();

        self.event_sender
            .send(Event::JournalEntryPosted {
                journal_entry_id: id,
                total_debit: debits,
            })
            .await
            .map_err(ServiceError::EventError)?;

        let (entry, _) = self.get(entry.id).await?;
        info!(je_number = %entry.number, total = %debits, "journal entry posted");
        Ok(entry)
    }

    #[instrument(skip(self), fields(je_id = %id))]
    pub async fn cancel(&self, id: Uuid) -> Result<journal_entry::Model, ServiceError> {
        let txn = self.db.begin().await?;
        let document = DocumentRef::new(DocumentKind::JournalEntry, id);
        documents::transition(&txn, document, DocumentState::Cancelled).await?;
        approvals::cancel_open_request(&txn, document).await?;
        txn.commit().await?;

        self.event_sender
            .send(Event::DocumentCancelled { document })
            .await
            .map_err(ServiceError::EventError)?;

        let (entry, _) = self.get(id).await?;
        Ok(entry)
    }
}
