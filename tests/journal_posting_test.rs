//! Journal entry posting: balanced entries move ledger balances by their
//! signed line amounts, unbalanced entries are refused whole.

mod common;

use assert_matches::assert_matches;
use chrono::Utc;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use uuid::Uuid;

use backflow_api::errors::ServiceError;
use backflow_api::services::journal_entries::{CreateJournalEntry, JournalLineInput};
use backflow_api::workflow::DocumentState;
use common::TestApp;

fn line(account: Uuid, debit: Decimal, credit: Decimal) -> JournalLineInput {
    JournalLineInput {
        ledger_account_id: account,
        description: None,
        debit,
        credit,
    }
}

fn entry_input(app: &TestApp, lines: Vec<JournalLineInput>) -> CreateJournalEntry {
    CreateJournalEntry {
        company_id: app.company_id,
        entry_date: Utc::now(),
        memo: None,
        lines,
    }
}

#[tokio::test]
async fn balanced_posting_moves_account_balances() {
    let app = TestApp::new().await;
    let cash = app.seed_ledger_account("1000", dec!(500)).await;
    let expense = app.seed_ledger_account("6000", dec!(0)).await;

    let entry = app
        .services
        .journal_entries
        .create(entry_input(
            &app,
            vec![line(expense, dec!(120), dec!(0)), line(cash, dec!(0), dec!(120))],
        ))
        .await
        .unwrap();
    assert_eq!(entry.total_debit, dec!(120));
    assert_eq!(entry.total_credit, dec!(120));

    app.services.journal_entries.submit(entry.id).await.unwrap();
    let posted = app.services.journal_entries.post(entry.id).await.unwrap();
    assert_eq!(posted.status, DocumentState::Posted);
    assert!(posted.posted_at.is_some());

    // Debit raises, credit lowers.
    let expense_acct = app.services.accounts.get_ledger_account(expense).await.unwrap();
    let cash_acct = app.services.accounts.get_ledger_account(cash).await.unwrap();
    assert_eq!(expense_acct.balance, dec!(120));
    assert_eq!(cash_acct.balance, dec!(380));
}

#[tokio::test]
async fn unbalanced_entry_is_refused_and_nothing_moves() {
    let app = TestApp::new().await;
    let cash = app.seed_ledger_account("1000", dec!(500)).await;
    let expense = app.seed_ledger_account("6000", dec!(0)).await;

    let entry = app
        .services
        .journal_entries
        .create(entry_input(
            &app,
            vec![line(expense, dec!(100), dec!(0)), line(cash, dec!(0), dec!(90))],
        ))
        .await
        .unwrap();
    app.services.journal_entries.submit(entry.id).await.unwrap();

    let result = app.services.journal_entries.post(entry.id).await;
    match result {
        Err(ServiceError::UnbalancedEntry { debits, credits }) => {
            assert_eq!(debits, dec!(100));
            assert_eq!(credits, dec!(90));
        }
        other => panic!("expected unbalanced entry error, got {other:?}"),
    }

    // The whole posting rolled back: status and balances are untouched.
    let (reloaded, _) = app.services.journal_entries.get(entry.id).await.unwrap();
    assert_eq!(reloaded.status, DocumentState::Approved);
    let cash_acct = app.services.accounts.get_ledger_account(cash).await.unwrap();
    let expense_acct = app.services.accounts.get_ledger_account(expense).await.unwrap();
    assert_eq!(cash_acct.balance, dec!(500));
    assert_eq!(expense_acct.balance, dec!(0));
}

#[tokio::test]
async fn posting_requires_approval_first() {
    let app = TestApp::new().await;
    let cash = app.seed_ledger_account("1000", dec!(0)).await;
    let other = app.seed_ledger_account("2000", dec!(0)).await;

    let entry = app
        .services
        .journal_entries
        .create(entry_input(
            &app,
            vec![line(cash, dec!(10), dec!(0)), line(other, dec!(0), dec!(10))],
        ))
        .await
        .unwrap();

    let result = app.services.journal_entries.post(entry.id).await;
    assert_matches!(result, Err(ServiceError::InvalidStateTransition { .. }));
}

#[tokio::test]
async fn lines_must_carry_exactly_one_side() {
    let app = TestApp::new().await;
    let cash = app.seed_ledger_account("1000", dec!(0)).await;
    let other = app.seed_ledger_account("2000", dec!(0)).await;

    // Both sides set on one line.
    let result = app
        .services
        .journal_entries
        .create(entry_input(
            &app,
            vec![line(cash, dec!(10), dec!(5)), line(other, dec!(0), dec!(5))],
        ))
        .await;
    assert_matches!(result, Err(ServiceError::ValidationError(_)));

    // Neither side set.
    let result = app
        .services
        .journal_entries
        .create(entry_input(
            &app,
            vec![line(cash, dec!(0), dec!(0)), line(other, dec!(0), dec!(0))],
        ))
        .await;
    assert_matches!(result, Err(ServiceError::ValidationError(_)));
}

#[tokio::test]
async fn posted_entries_cannot_be_cancelled() {
    let app = TestApp::new().await;
    let cash = app.seed_ledger_account("1000", dec!(100)).await;
    let other = app.seed_ledger_account("2000", dec!(0)).await;

    let entry = app
        .services
        .journal_entries
        .create(entry_input(
            &app,
            vec![line(other, dec!(25), dec!(0)), line(cash, dec!(0), dec!(25))],
        ))
        .await
        .unwrap();
    app.services.journal_entries.submit(entry.id).await.unwrap();
    app.services.journal_entries.post(entry.id).await.unwrap();

    let result = app.services.journal_entries.cancel(entry.id).await;
    assert_matches!(result, Err(ServiceError::InvalidStateTransition { .. }));
}
