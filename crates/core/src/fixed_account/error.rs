//! Fixed-account error types.

use rust_decimal::Decimal;
use thiserror::Error;
use uuid::Uuid;

/// Fixed-account domain errors.
#[derive(Debug, Error)]
pub enum FixedAccountError {
    /// Fixed account not found.
    #[error("Fixed account not found: {0}")]
    NotFound(Uuid),

    /// Occurrence not found.
    #[error("Occurrence not found: {0}")]
    OccurrenceNotFound(Uuid),

    /// Template is inactive and cannot generate or pay occurrences.
    #[error("Fixed account is inactive")]
    InactiveTemplate,

    /// Occurrence has already been paid.
    #[error("Occurrence already paid: {0}")]
    AlreadyPaid(Uuid),

    /// Bank account balance does not cover the payment.
    #[error("Insufficient balance: required {required}, available {available}")]
    InsufficientBalance {
        /// Total amount required by the payment batch.
        required: Decimal,
        /// Balance available on the bank account.
        available: Decimal,
    },

    /// No bank account linked to the template or supplied with the payment.
    #[error("No bank account linked for payment")]
    NoBankAccount,

    /// Category not found.
    #[error("Category not found: {0}")]
    CategoryNotFound(Uuid),

    /// Supplier not found.
    #[error("Supplier not found: {0}")]
    SupplierNotFound(Uuid),

    /// Bank account not found.
    #[error("Bank account not found: {0}")]
    BankAccountNotFound(Uuid),

    /// Amount must be positive.
    #[error("Amount must be positive")]
    NonPositiveAmount,

    /// Empty payment batch.
    #[error("Payment batch contains no occurrences")]
    EmptyBatch,
}
