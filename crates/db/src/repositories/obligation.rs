//! Obligation repository for database operations.
//!
//! Obligations are one-off payables and receivables. Settling one creates a
//! ledger transaction and adjusts the chosen bank account in the same
//! database transaction, mirroring how fixed-account occurrences are paid.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use uuid::Uuid;

use crate::entities::{
    bank_accounts, obligations,
    sea_orm_active_enums::{EntryKind, ObligationDirection, ObligationStatus},
    transactions,
};
use crate::repositories::bank_account::{BankAccountError, BankAccountRepository};
use centavo_shared::types::PageRequest;

/// Error types for obligation operations.
#[derive(Debug, thiserror::Error)]
pub enum ObligationError {
    /// Obligation not found.
    #[error("Obligation not found: {0}")]
    NotFound(Uuid),

    /// Obligation has already been settled.
    #[error("Obligation already settled: {0}")]
    AlreadySettled(Uuid),

    /// A payable needs a supplier, a receivable needs a customer.
    #[error("Obligation direction does not match its counterparty")]
    CounterpartyMismatch,

    /// Bank account not found.
    #[error("Bank account not found: {0}")]
    BankAccountNotFound(Uuid),

    /// Bank account balance does not cover the payable.
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

impl From<BankAccountError> for ObligationError {
    fn from(value: BankAccountError) -> Self {
        match value {
            BankAccountError::NotFound(id) => Self::BankAccountNotFound(id),
            BankAccountError::Database(e) => Self::Database(e),
        }
    }
}

/// Input for creating an obligation.
#[derive(Debug, Clone)]
pub struct CreateObligationInput {
    /// Payable or receivable.
    pub direction: ObligationDirection,
    /// Supplier counterparty (payables).
    pub supplier_id: Option<Uuid>,
    /// Customer counterparty (receivables).
    pub customer_id: Option<Uuid>,
    /// Description.
    pub description: String,
    /// Amount (positive).
    pub amount: Decimal,
    /// Due date.
    pub due_date: NaiveDate,
}

/// Obligation repository.
#[derive(Debug, Clone)]
pub struct ObligationRepository {
    db: DatabaseConnection,
}

impl ObligationRepository {
    /// Creates a new obligation repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates an obligation in the open state.
    ///
    /// # Errors
    ///
    /// Returns `ObligationError::CounterpartyMismatch` when the counterparty
    /// does not fit the direction.
    pub async fn create(
        &self,
        user_id: Uuid,
        input: CreateObligationInput,
    ) -> Result<obligations::Model, ObligationError> {
        if input.amount <= Decimal::ZERO {
            return Err(ObligationError::NonPositiveAmount);
        }
        let counterparty_ok = match input.direction {
            ObligationDirection::Payable => {
                input.supplier_id.is_some() && input.customer_id.is_none()
            }
            ObligationDirection::Receivable => {
                input.customer_id.is_some() && input.supplier_id.is_none()
            }
        };
        if !counterparty_ok {
            return Err(ObligationError::CounterpartyMismatch);
        }

        let now = chrono::Utc::now().into();
        let obligation = obligations::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(user_id),
            direction: Set(input.direction),
            supplier_id: Set(input.supplier_id),
            customer_id: Set(input.customer_id),
            description: Set(input.description),
            amount: Set(input.amount),
            due_date: Set(input.due_date),
            status: Set(ObligationStatus::Open),
            transaction_id: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        };

        Ok(obligation.insert(&self.db).await?)
    }

    /// Lists obligations for a user, optionally filtered by direction and
    /// status, soonest due first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(
        &self,
        user_id: Uuid,
        direction: Option<ObligationDirection>,
        status: Option<ObligationStatus>,
        page: &PageRequest,
    ) -> Result<(Vec<obligations::Model>, u64), DbErr> {
        let mut query =
            obligations::Entity::find().filter(obligations::Column::UserId.eq(user_id));
        if let Some(direction) = direction {
            query = query.filter(obligations::Column::Direction.eq(direction));
        }
        if let Some(status) = status {
            query = query.filter(obligations::Column::Status.eq(status));
        }

        let total = query.clone().count(&self.db).await?;
        let items = query
            .order_by_asc(obligations::Column::DueDate)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await?;

        Ok((items, total))
    }

    /// Finds an obligation by ID, scoped to the user.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(
        &self,
        user_id: Uuid,
        id: Uuid,
    ) -> Result<Option<obligations::Model>, DbErr> {
        obligations::Entity::find_by_id(id)
            .filter(obligations::Column::UserId.eq(user_id))
            .one(&self.db)
            .await
    }

    /// Settles an obligation against a bank account.
    ///
    /// A payable debits the account and a receivable credits it. The ledger
    /// transaction, the balance adjustment, and the status flip commit
    /// together or not at all.
    ///
    /// # Errors
    ///
    /// Returns `ObligationError::AlreadySettled` for settled obligations and
    /// `ObligationError::InsufficientBalance` when a payable exceeds the
    /// account balance.
    pub async fn settle(
        &self,
        user_id: Uuid,
        id: Uuid,
        bank_account_id: Uuid,
        settled_at: Option<NaiveDate>,
    ) -> Result<obligations::Model, ObligationError> {
        let settled_at = settled_at.unwrap_or_else(|| chrono::Utc::now().date_naive());

        let txn = self.db.begin().await?;

        let obligation = obligations::Entity::find_by_id(id)
            .filter(obligations::Column::UserId.eq(user_id))
            .one(&txn)
            .await?
            .ok_or(ObligationError::NotFound(id))?;
        if obligation.status == ObligationStatus::Settled {
            return Err(ObligationError::AlreadySettled(id));
        }

        let account = bank_accounts::Entity::find_by_id(bank_account_id)
            .filter(bank_accounts::Column::UserId.eq(user_id))
            .one(&txn)
            .await?
            .ok_or(ObligationError::BankAccountNotFound(bank_account_id))?;

        let (kind, delta) = match obligation.direction {
            ObligationDirection::Payable => {
                if obligation.amount > account.balance {
                    return Err(ObligationError::InsufficientBalance {
                        required: obligation.amount,
                        available: account.balance,
                    });
                }
                (EntryKind::Expense, -obligation.amount)
            }
            ObligationDirection::Receivable => (EntryKind::Income, obligation.amount),
        };

        let now = chrono::Utc::now().into();
        let entry = transactions::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(user_id),
            bank_account_id: Set(Some(bank_account_id)),
            category_id: Set(None),
            description: Set(obligation.description.clone()),
            amount: Set(obligation.amount),
            kind: Set(kind),
            entry_date: Set(settled_at),
            created_at: Set(now),
            updated_at: Set(now),
        };
        let entry = entry.insert(&txn).await?;

        BankAccountRepository::adjust_balance(&txn, bank_account_id, delta).await?;

        let mut active: obligations::ActiveModel = obligation.into();
        active.status = Set(ObligationStatus::Settled);
        active.transaction_id = Set(Some(entry.id));
        active.updated_at = Set(now);
        let settled = active.update(&txn).await?;

        txn.commit().await?;
        Ok(settled)
    }

    /// Flips open obligations past their due date to overdue. Returns the
    /// number of rows changed.
    ///
    /// # Errors
    ///
    /// Returns an error if the database update fails.
    pub async fn mark_overdue(&self, user_id: Uuid, today: NaiveDate) -> Result<u64, DbErr> {
        let result = obligations::Entity::update_many()
            .col_expr(
                obligations::Column::Status,
                sea_orm::sea_query::Expr::value(ObligationStatus::Overdue),
            )
            .filter(obligations::Column::UserId.eq(user_id))
            .filter(obligations::Column::Status.eq(ObligationStatus::Open))
            .filter(obligations::Column::DueDate.lt(today))
            .exec(&self.db)
            .await?;

        Ok(result.rows_affected)
    }

    /// Deletes an open or overdue obligation. Settled ones keep their
    /// ledger history and cannot be removed.
    ///
    /// # Errors
    ///
    /// Returns `ObligationError::AlreadySettled` for settled obligations.
    pub async fn delete(&self, user_id: Uuid, id: Uuid) -> Result<(), ObligationError> {
        let obligation = self
            .find_by_id(user_id, id)
            .await?
            .ok_or(ObligationError::NotFound(id))?;
        if obligation.status == ObligationStatus::Settled {
            return Err(ObligationError::AlreadySettled(id));
        }

        obligations::Entity::delete_by_id(obligation.id)
            .exec(&self.db)
            .await?;
        Ok(())
    }
}
