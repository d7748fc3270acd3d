#![allow(dead_code)] // not every test binary uses every helper

use std::sync::Arc;

use rust_decimal::Decimal;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;
use tempfile::TempDir;
use uuid::Uuid;

use backflow_api::events::{self, EventSender};
use backflow_api::handlers::AppServices;
use backflow_api::migrator::Migrator;
use backflow_api::services::accounts::{CreateBankAccount, CreateLedgerAccount};
use backflow_api::services::approvals::{ApprovalLevelInput, CreateApprovalWorkflow};
use backflow_api::services::purchase_orders::PurchaseOrderLineInput;
use backflow_api::services::totals::LineInput;
use backflow_api::workflow::DocumentKind;

/// Test harness backed by a throwaway SQLite database with the full
/// schema migrated in.
pub struct TestApp {
    pub db: Arc<DatabaseConnection>,
    pub services: AppServices,
    pub event_sender: EventSender,
    pub company_id: Uuid,
    _event_task: tokio::task::JoinHandle<()>,
    _tmp: TempDir,
}

impl TestApp {
    pub async fn new() -> Self {
        let tmp = TempDir::new().expect("failed to create temp dir");
        let db_path = tmp.path().join("backflow_test.db");
        let url = format!("sqlite://{}?mode=rwc", db_path.display());

        let mut opts = ConnectOptions::new(url);
        opts.max_connections(1).sqlx_logging(false);
        let pool = Database::connect(opts)
            .await
            .expect("failed to create test database");
        Migrator::up(&pool, None)
            .await
            .expect("failed to run migrations");

        let (event_sender, event_rx) = EventSender::channel(256);
        let event_task = tokio::spawn(events::run_event_logger(event_rx));

        let db = Arc::new(pool);
        let services = AppServices::new(db.clone(), event_sender.clone());

        Self {
            db,
            services,
            event_sender,
            company_id: Uuid::new_v4(),
            _event_task: event_task,
            _tmp: tmp,
        }
    }

    /// Creates a ledger account with an opening balance and returns its id.
    pub async fn seed_ledger_account(&self, code: &str, opening: Decimal) -> Uuid {
        let account = self
            .services
            .accounts
            .create_ledger_account(CreateLedgerAccount {
                company_id: self.company_id,
                code: code.to_string(),
                name: format!("Account {code}"),
                account_type: "asset".to_string(),
                opening_balance: opening,
            })
            .await
            .expect("failed to seed ledger account");
        account.id
    }

    /// Creates a bank account with an opening balance and returns its id.
    pub async fn seed_bank_account(&self, name: &str, opening: Decimal) -> Uuid {
        let account = self
            .services
            .accounts
            .create_bank_account(CreateBankAccount {
                company_id: self.company_id,
                name: name.to_string(),
                account_number: "0001-2345".to_string(),
                opening_balance: opening,
            })
            .await
            .expect("failed to seed bank account");
        account.id
    }

    /// Registers an approval workflow over an amount band with one approver
    /// per listed level, in order.
    pub async fn seed_workflow(
        &self,
        kind: DocumentKind,
        min_amount: Decimal,
        max_amount: Option<Decimal>,
        approvers: &[Uuid],
    ) -> Uuid {
        let levels = approvers
            .iter()
            .enumerate()
            .map(|(i, approver_id)| ApprovalLevelInput {
                level_number: (i + 1) as i32,
                approver_id: *approver_id,
            })
            .collect();
        let workflow = self
            .services
            .approvals
            .create_workflow(CreateApprovalWorkflow {
                company_id: self.company_id,
                document_kind: kind,
                name: format!("{kind} approvals from {min_amount}"),
                min_amount,
                max_amount,
                levels,
            })
            .await
            .expect("failed to seed approval workflow");
        workflow.id
    }
}

/// Shorthand for a purchase order line.
pub fn po_line(
    description: &str,
    quantity: Decimal,
    unit_price: Decimal,
    discount_pct: Decimal,
    tax_pct: Decimal,
) -> PurchaseOrderLineInput {
    PurchaseOrderLineInput {
        description: description.to_string(),
        amounts: LineInput {
            quantity,
            unit_price,
            discount_pct,
            tax_pct,
        },
    }
}
