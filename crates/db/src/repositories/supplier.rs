//! Supplier repository for database operations.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

use crate::entities::suppliers;
use centavo_shared::types::PageRequest;

/// Input for creating or updating a supplier.
#[derive(Debug, Clone, Default)]
pub struct SupplierInput {
    /// Supplier name.
    pub name: Option<String>,
    /// Tax document (CPF/CNPJ or similar).
    pub document: Option<String>,
    /// Contact email.
    pub email: Option<String>,
    /// Contact phone.
    pub phone: Option<String>,
    /// Whether the supplier is active.
    pub is_active: Option<bool>,
}

/// Supplier repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct SupplierRepository {
    db: DatabaseConnection,
}

impl SupplierRepository {
    /// Creates a new supplier repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists suppliers for a user with pagination.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(
        &self,
        user_id: Uuid,
        page: &PageRequest,
    ) -> Result<(Vec<suppliers::Model>, u64), DbErr> {
        let query = suppliers::Entity::find().filter(suppliers::Column::UserId.eq(user_id));

        let total = query.clone().count(&self.db).await?;
        let items = query
            .order_by_asc(suppliers::Column::Name)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await?;

        Ok((items, total))
    }

    /// Finds a supplier by ID, scoped to the user.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(
        &self,
        user_id: Uuid,
        id: Uuid,
    ) -> Result<Option<suppliers::Model>, DbErr> {
        suppliers::Entity::find_by_id(id)
            .filter(suppliers::Column::UserId.eq(user_id))
            .one(&self.db)
            .await
    }

    /// Creates a new supplier.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn create(
        &self,
        user_id: Uuid,
        name: &str,
        input: SupplierInput,
    ) -> Result<suppliers::Model, DbErr> {
        let now = chrono::Utc::now().into();
        let supplier = suppliers::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(user_id),
            name: Set(name.to_string()),
            document: Set(input.document),
            email: Set(input.email),
            phone: Set(input.phone),
            is_active: Set(input.is_active.unwrap_or(true)),
            created_at: Set(now),
            updated_at: Set(now),
        };

        supplier.insert(&self.db).await
    }

    /// Updates a supplier. Returns `None` if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the database update fails.
    pub async fn update(
        &self,
        user_id: Uuid,
        id: Uuid,
        input: SupplierInput,
    ) -> Result<Option<suppliers::Model>, DbErr> {
        let Some(supplier) = self.find_by_id(user_id, id).await? else {
            return Ok(None);
        };

        let mut active: suppliers::ActiveModel = supplier.into();
        if let Some(name) = input.name {
            active.name = Set(name);
        }
        if let Some(document) = input.document {
            active.document = Set(Some(document));
        }
        if let Some(email) = input.email {
            active.email = Set(Some(email));
        }
        if let Some(phone) = input.phone {
            active.phone = Set(Some(phone));
        }
        if let Some(is_active) = input.is_active {
            active.is_active = Set(is_active);
        }
        active.updated_at = Set(chrono::Utc::now().into());

        Ok(Some(active.update(&self.db).await?))
    }

    /// Deletes a supplier. Returns false if it did not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the database delete fails.
    pub async fn delete(&self, user_id: Uuid, id: Uuid) -> Result<bool, DbErr> {
        let result = suppliers::Entity::delete_many()
            .filter(suppliers::Column::Id.eq(id))
            .filter(suppliers::Column::UserId.eq(user_id))
            .exec(&self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }
}
