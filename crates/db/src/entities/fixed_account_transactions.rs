//! `SeaORM` Entity for the fixed_account_transactions (occurrence) table.
//!
//! One row per due occurrence of a fixed account. `(fixed_account_id,
//! due_date)` is unique so a double sweep cannot duplicate occurrences.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::OccurrenceStatus;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "fixed_account_transactions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub fixed_account_id: Uuid,
    pub due_date: Date,
    pub amount: Decimal,
    pub status: OccurrenceStatus,
    /// Back-reference to the realized ledger transaction once paid.
    pub transaction_id: Option<Uuid>,
    pub paid_at: Option<Date>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::fixed_accounts::Entity",
        from = "Column::FixedAccountId",
        to = "super::fixed_accounts::Column::Id"
    )]
    FixedAccounts,
    #[sea_orm(
        belongs_to = "super::transactions::Entity",
        from = "Column::TransactionId",
        to = "super::transactions::Column::Id"
    )]
    Transactions,
}

impl Related<super::fixed_accounts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FixedAccounts.def()
    }
}

impl Related<super::transactions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Transactions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
