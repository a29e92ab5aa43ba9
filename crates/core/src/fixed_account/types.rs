//! Fixed-account data types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::recurrence::Periodicity;

/// Whether an entry moves money in or out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    /// Money coming in (credits the bank account).
    Income,
    /// Money going out (debits the bank account, requires balance).
    Expense,
}

impl std::fmt::Display for EntryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Income => write!(f, "income"),
            Self::Expense => write!(f, "expense"),
        }
    }
}

/// Lifecycle state of a single due occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OccurrenceStatus {
    /// Generated, not yet paid, not yet past due.
    Pending,
    /// Paid, linked to a realized ledger transaction.
    Paid,
    /// Past its due date without payment.
    Overdue,
}

impl OccurrenceStatus {
    /// Returns true if the occurrence can still be paid.
    #[must_use]
    pub const fn is_open(self) -> bool {
        matches!(self, Self::Pending | Self::Overdue)
    }
}

impl std::fmt::Display for OccurrenceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Paid => write!(f, "paid"),
            Self::Overdue => write!(f, "overdue"),
        }
    }
}

/// Slim projection of a template used by statistics aggregation.
#[derive(Debug, Clone)]
pub struct TemplateSnapshot {
    /// Per-occurrence amount.
    pub amount: Decimal,
    /// Income or expense.
    pub kind: EntryKind,
    /// Recurrence period.
    pub periodicity: Periodicity,
    /// Whether the template is active.
    pub is_active: bool,
    /// Whether the current occurrence is paid.
    pub is_paid: bool,
    /// Category name.
    pub category: String,
    /// Supplier name, if linked.
    pub supplier: Option<String>,
}

/// Aggregated statistics over a user's fixed accounts.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FixedAccountStats {
    /// Total number of templates.
    pub total: u64,
    /// Active templates.
    pub active: u64,
    /// Inactive templates.
    pub inactive: u64,
    /// Active templates whose current occurrence is paid.
    pub paid: u64,
    /// Active templates whose current occurrence is unpaid.
    pub unpaid: u64,
    /// Template counts keyed by periodicity name.
    pub by_periodicity: BTreeMap<String, u64>,
    /// Template counts keyed by category name.
    pub by_category: BTreeMap<String, u64>,
    /// Template counts keyed by supplier name.
    pub by_supplier: BTreeMap<String, u64>,
    /// Monthly-equivalent expense total over active templates.
    pub monthly_expense: Decimal,
    /// Monthly-equivalent income total over active templates.
    pub monthly_income: Decimal,
    /// Yearly-equivalent expense total over active templates.
    pub yearly_expense: Decimal,
    /// Yearly-equivalent income total over active templates.
    pub yearly_income: Decimal,
}
