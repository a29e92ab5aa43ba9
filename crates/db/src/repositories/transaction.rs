//! Ledger transaction repository for database operations.
//!
//! A ledger transaction is a realized income or expense. When linked to a
//! bank account, creating one adjusts the account balance and deleting one
//! reverses the adjustment, both inside a single database transaction.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use uuid::Uuid;

use crate::entities::{bank_accounts, sea_orm_active_enums::EntryKind, transactions};
use crate::repositories::bank_account::BankAccountRepository;
use centavo_shared::types::PageRequest;

/// Error types for ledger transaction operations.
#[derive(Debug, thiserror::Error)]
pub enum TransactionError {
    /// Transaction not found.
    #[error("Transaction not found: {0}")]
    NotFound(Uuid),

    /// Bank account not found.
    #[error("Bank account not found: {0}")]
    BankAccountNotFound(Uuid),

    /// Bank account balance does not cover the expense.
    #[error("Insufficient balance: required {required}, available {available}")]
    InsufficientBalance {
        /// Amount required.
        required: Decimal,
        /// Balance available.
        available: Decimal,
    },

    /// Amount must be positive.
    #[error("Amount must be positive")]
    NonPositiveAmount,

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<crate::repositories::bank_account::BankAccountError> for TransactionError {
    fn from(value: crate::repositories::bank_account::BankAccountError) -> Self {
        match value {
            crate::repositories::bank_account::BankAccountError::NotFound(id) => {
                Self::BankAccountNotFound(id)
            }
            crate::repositories::bank_account::BankAccountError::Database(e) => Self::Database(e),
        }
    }
}

/// Input for creating a ledger transaction.
#[derive(Debug, Clone)]
pub struct CreateTransactionInput {
    /// Optional bank account to debit/credit.
    pub bank_account_id: Option<Uuid>,
    /// Optional category.
    pub category_id: Option<Uuid>,
    /// Description.
    pub description: String,
    /// Amount (positive).
    pub amount: Decimal,
    /// Income or expense.
    pub kind: EntryKind,
    /// Date the entry applies to.
    pub entry_date: NaiveDate,
}

/// Filter options for listing transactions.
#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    /// Filter by kind.
    pub kind: Option<EntryKind>,
    /// Filter by category.
    pub category_id: Option<Uuid>,
    /// Filter by date range start.
    pub date_from: Option<NaiveDate>,
    /// Filter by date range end.
    pub date_to: Option<NaiveDate>,
}

/// Ledger transaction repository.
#[derive(Debug, Clone)]
pub struct TransactionRepository {
    db: DatabaseConnection,
}

impl TransactionRepository {
    /// Creates a new transaction repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a ledger transaction, adjusting the bank account balance if linked.
    ///
    /// # Errors
    ///
    /// Returns `TransactionError::InsufficientBalance` if an expense exceeds
    /// the linked account balance. All changes roll back on failure.
    pub async fn create(
        &self,
        user_id: Uuid,
        input: CreateTransactionInput,
    ) -> Result<transactions::Model, TransactionError> {
        if input.amount <= Decimal::ZERO {
            return Err(TransactionError::NonPositiveAmount);
        }

        let txn = self.db.begin().await?;

        if let Some(account_id) = input.bank_account_id {
            let account = bank_accounts::Entity::find_by_id(account_id)
                .filter(bank_accounts::Column::UserId.eq(user_id))
                .one(&txn)
                .await?
                .ok_or(TransactionError::BankAccountNotFound(account_id))?;

            let delta = match input.kind {
                EntryKind::Income => input.amount,
                EntryKind::Expense => {
                    if input.amount > account.balance {
                        return Err(TransactionError::InsufficientBalance {
                            required: input.amount,
                            available: account.balance,
                        });
                    }
                    -input.amount
                }
            };
            BankAccountRepository::adjust_balance(&txn, account_id, delta).await?;
        }

        let now = chrono::Utc::now().into();
        let transaction = transactions::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(user_id),
            bank_account_id: Set(input.bank_account_id),
            category_id: Set(input.category_id),
            description: Set(input.description),
            amount: Set(input.amount),
            kind: Set(input.kind),
            entry_date: Set(input.entry_date),
            created_at: Set(now),
            updated_at: Set(now),
        };
        let inserted = transaction.insert(&txn).await?;

        txn.commit().await?;
        Ok(inserted)
    }

    /// Lists transactions for a user with filters and pagination.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(
        &self,
        user_id: Uuid,
        filter: TransactionFilter,
        page: &PageRequest,
    ) -> Result<(Vec<transactions::Model>, u64), DbErr> {
        let mut query =
            transactions::Entity::find().filter(transactions::Column::UserId.eq(user_id));

        if let Some(kind) = filter.kind {
            query = query.filter(transactions::Column::Kind.eq(kind));
        }
        if let Some(category_id) = filter.category_id {
            query = query.filter(transactions::Column::CategoryId.eq(category_id));
        }
        if let Some(from) = filter.date_from {
            query = query.filter(transactions::Column::EntryDate.gte(from));
        }
        if let Some(to) = filter.date_to {
            query = query.filter(transactions::Column::EntryDate.lte(to));
        }

        let total = query.clone().count(&self.db).await?;
        let items = query
            .order_by_desc(transactions::Column::EntryDate)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await?;

        Ok((items, total))
    }

    /// Finds a transaction by ID, scoped to the user.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(
        &self,
        user_id: Uuid,
        id: Uuid,
    ) -> Result<Option<transactions::Model>, DbErr> {
        transactions::Entity::find_by_id(id)
            .filter(transactions::Column::UserId.eq(user_id))
            .one(&self.db)
            .await
    }

    /// Deletes a transaction, reversing any balance adjustment.
    ///
    /// # Errors
    ///
    /// Returns `TransactionError::NotFound` if the transaction does not exist.
    pub async fn delete(&self, user_id: Uuid, id: Uuid) -> Result<(), TransactionError> {
        let txn = self.db.begin().await?;

        let transaction = transactions::Entity::find_by_id(id)
            .filter(transactions::Column::UserId.eq(user_id))
            .one(&txn)
            .await?
            .ok_or(TransactionError::NotFound(id))?;

        if let Some(account_id) = transaction.bank_account_id {
            let delta = match transaction.kind {
                EntryKind::Income => -transaction.amount,
                EntryKind::Expense => transaction.amount,
            };
            BankAccountRepository::adjust_balance(&txn, account_id, delta).await?;
        }

        transactions::Entity::delete_by_id(transaction.id)
            .exec(&txn)
            .await?;

        txn.commit().await?;
        Ok(())
    }
}
