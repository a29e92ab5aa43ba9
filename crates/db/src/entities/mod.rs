//! `SeaORM` entity definitions.

pub mod bank_accounts;
pub mod categories;
pub mod customers;
pub mod fixed_account_transactions;
pub mod fixed_accounts;
pub mod investments;
pub mod notifications;
pub mod obligations;
pub mod sea_orm_active_enums;
pub mod suppliers;
pub mod transactions;
pub mod users;
