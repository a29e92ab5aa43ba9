//! Notification repository for database operations.
//!
//! Notifications are written by the overdue sweep and by payments, always
//! through [`NotificationRepository::create_in`] so they commit or roll back
//! with the operation that produced them.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

use crate::entities::{notifications, sea_orm_active_enums::NotificationKind};
use centavo_shared::types::PageRequest;

/// Notification repository.
#[derive(Debug, Clone)]
pub struct NotificationRepository {
    db: DatabaseConnection,
}

impl NotificationRepository {
    /// Creates a new notification repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Inserts a notification on the caller's connection or transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn create_in<C: ConnectionTrait>(
        conn: &C,
        user_id: Uuid,
        kind: NotificationKind,
        title: &str,
        message: &str,
        occurrence_id: Option<Uuid>,
    ) -> Result<notifications::Model, DbErr> {
        let notification = notifications::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(user_id),
            kind: Set(kind),
            title: Set(title.to_string()),
            message: Set(message.to_string()),
            is_read: Set(false),
            fixed_account_transaction_id: Set(occurrence_id),
            created_at: Set(chrono::Utc::now().into()),
        };

        notification.insert(conn).await
    }

    /// Checks whether a notification with this exact message already exists.
    ///
    /// Used by the overdue sweep to avoid repeating the same reminder on
    /// every run.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn exists_with_message<C: ConnectionTrait>(
        conn: &C,
        user_id: Uuid,
        kind: NotificationKind,
        message: &str,
    ) -> Result<bool, DbErr> {
        let count = notifications::Entity::find()
            .filter(notifications::Column::UserId.eq(user_id))
            .filter(notifications::Column::Kind.eq(kind))
            .filter(notifications::Column::Message.eq(message))
            .count(conn)
            .await?;

        Ok(count > 0)
    }

    /// Lists notifications for a user, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(
        &self,
        user_id: Uuid,
        unread_only: bool,
        page: &PageRequest,
    ) -> Result<(Vec<notifications::Model>, u64), DbErr> {
        let mut query =
            notifications::Entity::find().filter(notifications::Column::UserId.eq(user_id));
        if unread_only {
            query = query.filter(notifications::Column::IsRead.eq(false));
        }

        let total = query.clone().count(&self.db).await?;
        let items = query
            .order_by_desc(notifications::Column::CreatedAt)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await?;

        Ok((items, total))
    }

    /// Counts unread notifications for a user.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn unread_count(&self, user_id: Uuid) -> Result<u64, DbErr> {
        notifications::Entity::find()
            .filter(notifications::Column::UserId.eq(user_id))
            .filter(notifications::Column::IsRead.eq(false))
            .count(&self.db)
            .await
    }

    /// Marks a notification as read. Returns `None` if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the database update fails.
    pub async fn mark_read(
        &self,
        user_id: Uuid,
        id: Uuid,
    ) -> Result<Option<notifications::Model>, DbErr> {
        let Some(notification) = notifications::Entity::find_by_id(id)
            .filter(notifications::Column::UserId.eq(user_id))
            .one(&self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut active: notifications::ActiveModel = notification.into();
        active.is_read = Set(true);

        Ok(Some(active.update(&self.db).await?))
    }

    /// Marks every unread notification for a user as read.
    ///
    /// # Errors
    ///
    /// Returns an error if the database update fails.
    pub async fn mark_all_read(&self, user_id: Uuid) -> Result<u64, DbErr> {
        let result = notifications::Entity::update_many()
            .col_expr(notifications::Column::IsRead, sea_orm::sea_query::Expr::value(true))
            .filter(notifications::Column::UserId.eq(user_id))
            .filter(notifications::Column::IsRead.eq(false))
            .exec(&self.db)
            .await?;

        Ok(result.rows_affected)
    }

    /// Deletes a notification. Returns false if it did not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the database delete fails.
    pub async fn delete(&self, user_id: Uuid, id: Uuid) -> Result<bool, DbErr> {
        let result = notifications::Entity::delete_many()
            .filter(notifications::Column::Id.eq(id))
            .filter(notifications::Column::UserId.eq(user_id))
            .exec(&self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }
}
