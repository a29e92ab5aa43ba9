//! Category repository for database operations.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::entities::{categories, fixed_accounts, sea_orm_active_enums::EntryKind};

/// Error types for category operations.
#[derive(Debug, thiserror::Error)]
pub enum CategoryError {
    /// Category not found.
    #[error("Category not found: {0}")]
    NotFound(Uuid),

    /// Category name already exists for this user and kind.
    #[error("Category '{0}' already exists")]
    DuplicateName(String),

    /// Category is referenced by fixed accounts and cannot be deleted.
    #[error("Category is in use by {0} fixed accounts")]
    InUse(u64),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Category repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct CategoryRepository {
    db: DatabaseConnection,
}

impl CategoryRepository {
    /// Creates a new category repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists all categories for a user.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self, user_id: Uuid) -> Result<Vec<categories::Model>, DbErr> {
        categories::Entity::find()
            .filter(categories::Column::UserId.eq(user_id))
            .order_by_asc(categories::Column::Name)
            .all(&self.db)
            .await
    }

    /// Finds a category by ID, scoped to the user.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(
        &self,
        user_id: Uuid,
        id: Uuid,
    ) -> Result<Option<categories::Model>, DbErr> {
        categories::Entity::find_by_id(id)
            .filter(categories::Column::UserId.eq(user_id))
            .one(&self.db)
            .await
    }

    /// Creates a new category.
    ///
    /// # Errors
    ///
    /// Returns `CategoryError::DuplicateName` if the name is taken for this kind.
    pub async fn create(
        &self,
        user_id: Uuid,
        name: &str,
        kind: EntryKind,
        color: Option<String>,
    ) -> Result<categories::Model, CategoryError> {
        let existing = categories::Entity::find()
            .filter(categories::Column::UserId.eq(user_id))
            .filter(categories::Column::Name.eq(name))
            .filter(categories::Column::Kind.eq(kind))
            .count(&self.db)
            .await?;
        if existing > 0 {
            return Err(CategoryError::DuplicateName(name.to_string()));
        }

        let now = chrono::Utc::now().into();
        let category = categories::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(user_id),
            name: Set(name.to_string()),
            kind: Set(kind),
            color: Set(color),
            created_at: Set(now),
            updated_at: Set(now),
        };

        Ok(category.insert(&self.db).await?)
    }

    /// Updates a category's name and color.
    ///
    /// # Errors
    ///
    /// Returns `CategoryError::NotFound` if the category does not exist.
    pub async fn update(
        &self,
        user_id: Uuid,
        id: Uuid,
        name: Option<String>,
        color: Option<String>,
    ) -> Result<categories::Model, CategoryError> {
        let category = self
            .find_by_id(user_id, id)
            .await?
            .ok_or(CategoryError::NotFound(id))?;

        let mut active: categories::ActiveModel = category.into();
        if let Some(name) = name {
            active.name = Set(name);
        }
        if let Some(color) = color {
            active.color = Set(Some(color));
        }
        active.updated_at = Set(chrono::Utc::now().into());

        Ok(active.update(&self.db).await?)
    }

    /// Deletes a category.
    ///
    /// # Errors
    ///
    /// Returns `CategoryError::InUse` if fixed accounts reference the category.
    pub async fn delete(&self, user_id: Uuid, id: Uuid) -> Result<(), CategoryError> {
        let category = self
            .find_by_id(user_id, id)
            .await?
            .ok_or(CategoryError::NotFound(id))?;

        let references = fixed_accounts::Entity::find()
            .filter(fixed_accounts::Column::CategoryId.eq(id))
            .count(&self.db)
            .await?;
        if references > 0 {
            return Err(CategoryError::InUse(references));
        }

        categories::Entity::delete_by_id(category.id)
            .exec(&self.db)
            .await?;
        Ok(())
    }
}
