//! Signed-delta balance propagation.
//!
//! Every balance field in the system (ledger accounts, bank accounts, invoice
//! paid/outstanding amounts) is mutated exclusively through [`apply`] /
//! [`reverse`], always on the caller's transaction and always through an
//! exclusive row lock. Editing a posted effect reverses the old delta and
//! applies the new one; balances are never patched with a computed diff.

use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ConnectionTrait, EntityTrait, QuerySelect, Set,
};
use chrono::Utc;
use tracing::debug;
use uuid::Uuid;

use crate::{
    entities::{bank_account, invoice, ledger_account},
    errors::ServiceError,
};

/// Addresses one balance field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BalanceTarget {
    LedgerAccount(Uuid),
    BankAccount(Uuid),
    /// The outstanding `balance_amount` of a posted invoice.
    InvoiceBalance(Uuid),
}

impl std::fmt::Display for BalanceTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BalanceTarget::LedgerAccount(id) => write!(f, "ledger_account/{id}"),
            BalanceTarget::BankAccount(id) => write!(f, "bank_account/{id}"),
            BalanceTarget::InvoiceBalance(id) => write!(f, "invoice/{id}"),
        }
    }
}

/// Adds `delta` to the target balance and returns the new value.
pub async fn apply<C: ConnectionTrait>(
    conn: &C,
    target: BalanceTarget,
    delta: Decimal,
) -> Result<Decimal, ServiceError> {
    let new_balance = match target {
        BalanceTarget::LedgerAccount(id) => {
            let account = ledger_account::Entity::find_by_id(id)
                .lock_exclusive()
                .one(conn)
                .await?
                .ok_or_else(|| ServiceError::NotFound(format!("Ledger account {id} not found")))?;
            let balance = account.balance + delta;
            let mut active: ledger_account::ActiveModel = account.into();
            active.balance = Set(balance);
            active.updated_at = Set(Some(Utc::now()));
            active.update(conn).await?;
            balance
        }
        BalanceTarget::BankAccount(id) => {
            let account = bank_account::Entity::find_by_id(id)
                .lock_exclusive()
                .one(conn)
                .await?
                .ok_or_else(|| ServiceError::NotFound(format!("Bank account {id} not found")))?;
            let balance = account.balance + delta;
            let mut active: bank_account::ActiveModel = account.into();
            active.balance = Set(balance);
            active.updated_at = Set(Some(Utc::now()));
            active.update(conn).await?;
            balance
        }
        BalanceTarget::InvoiceBalance(id) => {
            let inv = invoice::Entity::find_by_id(id)
                .lock_exclusive()
                .one(conn)
                .await?
                .ok_or_else(|| ServiceError::NotFound(format!("Invoice {id} not found")))?;
            let balance = inv.balance_amount + delta;
            let mut active: invoice::ActiveModel = inv.into();
            active.balance_amount = Set(balance);
            active.updated_at = Set(Some(Utc::now()));
            active.update(conn).await?;
            balance
        }
    };

    debug!(%target, %delta, %new_balance, "applied balance delta");
    Ok(new_balance)
}

/// Exact inverse of [`apply`] for the same delta.
pub async fn reverse<C: ConnectionTrait>(
    conn: &C,
    target: BalanceTarget,
    delta: Decimal,
) -> Result<Decimal, ServiceError> {
    apply(conn, target, -delta).await
}
