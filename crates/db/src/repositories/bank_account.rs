//! Bank account repository for database operations.
//!
//! Balances are mutated only by payments, ledger entries, and settlements,
//! always inside the caller's database transaction.

use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::entities::{bank_accounts, sea_orm_active_enums::BankAccountType};

/// Error types for bank account operations.
#[derive(Debug, thiserror::Error)]
pub enum BankAccountError {
    /// Bank account not found.
    #[error("Bank account not found: {0}")]
    NotFound(Uuid),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for creating a bank account.
#[derive(Debug, Clone)]
pub struct CreateBankAccountInput {
    /// Display name.
    pub name: String,
    /// Bank institution name.
    pub bank_name: Option<String>,
    /// Kind of account.
    pub account_type: BankAccountType,
    /// Opening balance.
    pub initial_balance: Decimal,
}

/// Bank account repository for CRUD operations and balance adjustments.
#[derive(Debug, Clone)]
pub struct BankAccountRepository {
    db: DatabaseConnection,
}

impl BankAccountRepository {
    /// Creates a new bank account repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists all bank accounts for a user.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self, user_id: Uuid) -> Result<Vec<bank_accounts::Model>, DbErr> {
        bank_accounts::Entity::find()
            .filter(bank_accounts::Column::UserId.eq(user_id))
            .order_by_asc(bank_accounts::Column::Name)
            .all(&self.db)
            .await
    }

    /// Finds a bank account by ID, scoped to the user.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(
        &self,
        user_id: Uuid,
        id: Uuid,
    ) -> Result<Option<bank_accounts::Model>, DbErr> {
        bank_accounts::Entity::find_by_id(id)
            .filter(bank_accounts::Column::UserId.eq(user_id))
            .one(&self.db)
            .await
    }

    /// Creates a new bank account.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn create(
        &self,
        user_id: Uuid,
        input: CreateBankAccountInput,
    ) -> Result<bank_accounts::Model, DbErr> {
        let now = chrono::Utc::now().into();
        let account = bank_accounts::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(user_id),
            name: Set(input.name),
            bank_name: Set(input.bank_name),
            account_type: Set(input.account_type),
            balance: Set(input.initial_balance),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
        };

        account.insert(&self.db).await
    }

    /// Updates name/bank/active flag. Returns `None` if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the database update fails.
    pub async fn update(
        &self,
        user_id: Uuid,
        id: Uuid,
        name: Option<String>,
        bank_name: Option<String>,
        is_active: Option<bool>,
    ) -> Result<Option<bank_accounts::Model>, DbErr> {
        let Some(account) = self.find_by_id(user_id, id).await? else {
            return Ok(None);
        };

        let mut active: bank_accounts::ActiveModel = account.into();
        if let Some(name) = name {
            active.name = Set(name);
        }
        if let Some(bank_name) = bank_name {
            active.bank_name = Set(Some(bank_name));
        }
        if let Some(is_active) = is_active {
            active.is_active = Set(is_active);
        }
        active.updated_at = Set(chrono::Utc::now().into());

        Ok(Some(active.update(&self.db).await?))
    }

    /// Applies a signed delta to an account balance inside a transaction.
    ///
    /// Callers are responsible for balance checks before debiting.
    ///
    /// # Errors
    ///
    /// Returns `BankAccountError::NotFound` if the account does not exist.
    pub async fn adjust_balance<C: ConnectionTrait>(
        conn: &C,
        account_id: Uuid,
        delta: Decimal,
    ) -> Result<bank_accounts::Model, BankAccountError> {
        let account = bank_accounts::Entity::find_by_id(account_id)
            .one(conn)
            .await?
            .ok_or(BankAccountError::NotFound(account_id))?;

        let new_balance = account.balance + delta;
        let mut active: bank_accounts::ActiveModel = account.into();
        active.balance = Set(new_balance);
        active.updated_at = Set(chrono::Utc::now().into());

        Ok(active.update(conn).await?)
    }
}
