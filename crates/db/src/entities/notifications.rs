//! `SeaORM` Entity for the notifications table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::NotificationKind;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "notifications")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub is_read: bool,
    /// Occurrence that triggered the notification, if any.
    pub fixed_account_transaction_id: Option<Uuid>,
    pub created_at: DateTimeWithTimeZone,
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
        belongs_to = "super::fixed_account_transactions::Entity",
        from = "Column::FixedAccountTransactionId",
        to = "super::fixed_account_transactions::Column::Id"
    )]
    FixedAccountTransactions,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl Related<super::fixed_account_transactions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FixedAccountTransactions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
