//! Setup surface for the balance-carrying master records: ledger accounts
//! and bank accounts. Balances start at an opening value and afterwards move
//! only through the ledger service.

use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use serde::{Deserialize, Serialize};
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use crate::{
    entities::{bank_account, ledger_account},
    errors::ServiceError,
};

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateLedgerAccount {
    pub company_id: Uuid,
    #[validate(length(min = 1, max = 20))]
    pub code: String,
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(length(min = 1, max = 50))]
    pub account_type: String,
    #[serde(default)]
    pub opening_balance: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateBankAccount {
    pub company_id: Uuid,
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(length(min = 1, max = 50))]
    pub account_number: String,
    #[serde(default)]
    pub opening_balance: Decimal,
}

#[derive(Clone)]
pub struct AccountService {
    db: Arc<DatabaseConnection>,
}

impl AccountService {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    #[instrument(skip(self, input), fields(company_id = %input.company_id, code = %input.code))]
    pub async fn create_ledger_account(
        &self,
        input: CreateLedgerAccount,
    ) -> Result<ledger_account::Model, ServiceError> {
        input.validate()?;
        let account = ledger_account::ActiveModel {
            id: Set(Uuid::new_v4()),
            company_id: Set(input.company_id),
            code: Set(input.code.clone()),
            name: Set(input.name.clone()),
            account_type: Set(input.account_type.clone()),
            balance: Set(input.opening_balance),
            created_at: Set(Utc::now()),
            updated_at: Set(None),
        }
        .insert(&*self.db)
        .await?;
        Ok(account)
    }

    pub async fn get_ledger_account(
        &self,
        id: Uuid,
    ) -> Result<ledger_account::Model, ServiceError> {
        ledger_account::Entity::find_by_id(id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Ledger account {id} not found")))
    }

    pub async fn list_ledger_accounts(
        &self,
        company_id: Uuid,
    ) -> Result<Vec<ledger_account::Model>, ServiceError> {
        let accounts = ledger_account::Entity::find()
            .filter(ledger_account::Column::CompanyId.eq(company_id))
            .order_by_asc(ledger_account::Column::Code)
            .all(&*self.db)
            .await?;
        Ok(accounts)
    }

    #[instrument(skip(self, input), fields(company_id = %input.company_id))]
    pub async fn create_bank_account(
        &self,
        input: CreateBankAccount,
    ) -> Result<bank_account::Model, ServiceError> {
        input.validate()?;
        let account = bank_account::ActiveModel {
            id: Set(Uuid::new_v4()),
            company_id: Set(input.company_id),
            name: Set(input.name.clone()),
            account_number: Set(input.account_number.clone()),
            balance: Set(input.opening_balance),
            created_at: Set(Utc::now()),
            updated_at: Set(None),
        }
        .insert(&*self.db)
        .await?;
        Ok(account)
    }

    pub async fn get_bank_account(&self, id: Uuid) -> Result<bank_account::Model, ServiceError> {
        bank_account::Entity::find_by_id(id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Bank account {id} not found")))
    }
}
