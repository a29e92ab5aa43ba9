//! `SeaORM` Entity for the fixed_accounts (recurring template) table.
//!
//! A row is a template for a recurring obligation. `next_due_date` always
//! reflects the soonest unresolved occurrence; `is_paid` refers to the
//! current occurrence only.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::{EntryKind, PaymentMethod, Periodicity};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "fixed_accounts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub category_id: Uuid,
    pub supplier_id: Option<Uuid>,
    pub bank_account_id: Option<Uuid>,
    pub description: String,
    pub amount: Decimal,
    pub kind: EntryKind,
    pub periodicity: Periodicity,
    pub start_date: Date,
    pub next_due_date: Date,
    pub is_active: bool,
    pub is_paid: bool,
    pub payment_method: Option<PaymentMethod>,
    /// Days ahead of the due date to raise a reminder notification.
    pub reminder_days: i32,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id"
    )]
    Users,
    #[sea_orm(
        belongs_to = "super::categories::Entity",
        from = "Column::CategoryId",
        to = "super::categories::Column::Id"
    )]
    Categories,
    #[sea_orm(
        belongs_to = "super::suppliers::Entity",
        from = "Column::SupplierId",
        to = "super::suppliers::Column::Id"
    )]
    Suppliers,
    #[sea_orm(
        belongs_to = "super::bank_accounts::Entity",
        from = "Column::BankAccountId",
        to = "super::bank_accounts::Column::Id"
    )]
    BankAccounts,
    #[sea_orm(has_many = "super::fixed_account_transactions::Entity")]
    FixedAccountTransactions,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl Related<super::categories::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Categories.def()
    }
}

impl Related<super::suppliers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Suppliers.def()
    }
}

impl Related<super::bank_accounts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BankAccounts.def()
    }
}

impl Related<super::fixed_account_transactions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FixedAccountTransactions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
