//! Postgres enum mappings.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// User role.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "user_role")]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    /// Administrator with access to the admin overview.
    #[sea_orm(string_value = "admin")]
    Admin,
    /// Regular user.
    #[sea_orm(string_value = "user")]
    User,
}

/// Income or expense.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "entry_kind")]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    /// Money coming in.
    #[sea_orm(string_value = "income")]
    Income,
    /// Money going out.
    #[sea_orm(string_value = "expense")]
    Expense,
}

impl From<EntryKind> for centavo_core::fixed_account::EntryKind {
    fn from(value: EntryKind) -> Self {
        match value {
            EntryKind::Income => Self::Income,
            EntryKind::Expense => Self::Expense,
        }
    }
}

/// Recurrence period of a fixed account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "periodicity")]
#[serde(rename_all = "snake_case")]
pub enum Periodicity {
    /// Every day.
    #[sea_orm(string_value = "daily")]
    Daily,
    /// Every 7 days.
    #[sea_orm(string_value = "weekly")]
    Weekly,
    /// Every month.
    #[sea_orm(string_value = "monthly")]
    Monthly,
    /// Every 3 months.
    #[sea_orm(string_value = "quarterly")]
    Quarterly,
    /// Every year.
    #[sea_orm(string_value = "yearly")]
    Yearly,
}

impl From<Periodicity> for centavo_core::recurrence::Periodicity {
    fn from(value: Periodicity) -> Self {
        match value {
            Periodicity::Daily => Self::Daily,
            Periodicity::Weekly => Self::Weekly,
            Periodicity::Monthly => Self::Monthly,
            Periodicity::Quarterly => Self::Quarterly,
            Periodicity::Yearly => Self::Yearly,
        }
    }
}

/// Lifecycle state of a fixed-account occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "occurrence_status")]
#[serde(rename_all = "snake_case")]
pub enum OccurrenceStatus {
    /// Generated, awaiting payment.
    #[sea_orm(string_value = "pending")]
    Pending,
    /// Paid and linked to a ledger transaction.
    #[sea_orm(string_value = "paid")]
    Paid,
    /// Past due without payment.
    #[sea_orm(string_value = "overdue")]
    Overdue,
}

impl From<OccurrenceStatus> for centavo_core::fixed_account::OccurrenceStatus {
    fn from(value: OccurrenceStatus) -> Self {
        match value {
            OccurrenceStatus::Pending => Self::Pending,
            OccurrenceStatus::Paid => Self::Paid,
            OccurrenceStatus::Overdue => Self::Overdue,
        }
    }
}

/// Payment method recorded on a fixed account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "payment_method")]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Instant transfer.
    #[sea_orm(string_value = "pix")]
    Pix,
    /// Bank slip.
    #[sea_orm(string_value = "boleto")]
    Boleto,
    /// Credit/debit card.
    #[sea_orm(string_value = "card")]
    Card,
    /// Wire/bank transfer.
    #[sea_orm(string_value = "transfer")]
    Transfer,
    /// Cash.
    #[sea_orm(string_value = "cash")]
    Cash,
}

/// Kind of bank account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "bank_account_type")]
#[serde(rename_all = "snake_case")]
pub enum BankAccountType {
    /// Checking account.
    #[sea_orm(string_value = "checking")]
    Checking,
    /// Savings account.
    #[sea_orm(string_value = "savings")]
    Savings,
    /// Cash wallet / prepaid.
    #[sea_orm(string_value = "wallet")]
    Wallet,
}

/// Direction of an obligation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "obligation_direction")]
#[serde(rename_all = "snake_case")]
pub enum ObligationDirection {
    /// Money owed to a supplier (account payable).
    #[sea_orm(string_value = "payable")]
    Payable,
    /// Money owed by a customer (account receivable).
    #[sea_orm(string_value = "receivable")]
    Receivable,
}

/// Lifecycle state of an obligation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "obligation_status")]
#[serde(rename_all = "snake_case")]
pub enum ObligationStatus {
    /// Awaiting settlement.
    #[sea_orm(string_value = "open")]
    Open,
    /// Settled against a ledger transaction.
    #[sea_orm(string_value = "settled")]
    Settled,
    /// Past due without settlement.
    #[sea_orm(string_value = "overdue")]
    Overdue,
}

/// Kind of investment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "investment_kind")]
#[serde(rename_all = "snake_case")]
pub enum InvestmentKind {
    /// Savings account deposit.
    #[sea_orm(string_value = "savings")]
    Savings,
    /// Fixed-income certificate.
    #[sea_orm(string_value = "cdb")]
    Cdb,
    /// Stocks.
    #[sea_orm(string_value = "stocks")]
    Stocks,
    /// Investment funds.
    #[sea_orm(string_value = "funds")]
    Funds,
    /// Cryptocurrency.
    #[sea_orm(string_value = "crypto")]
    Crypto,
    /// Anything else.
    #[sea_orm(string_value = "other")]
    Other,
}

/// Kind of notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "notification_kind")]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    /// An occurrence falls due within its reminder window.
    #[sea_orm(string_value = "due_reminder")]
    DueReminder,
    /// An occurrence went overdue.
    #[sea_orm(string_value = "overdue")]
    Overdue,
    /// A payment was applied.
    #[sea_orm(string_value = "payment")]
    Payment,
    /// System message.
    #[sea_orm(string_value = "system")]
    System,
}
