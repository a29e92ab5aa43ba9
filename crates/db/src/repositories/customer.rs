//! Customer repository for database operations.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

use crate::entities::customers;
use centavo_shared::types::PageRequest;

/// Input for creating or updating a customer.
#[derive(Debug, Clone, Default)]
pub struct CustomerInput {
    /// Customer name.
    pub name: Option<String>,
    /// Tax document.
    pub document: Option<String>,
    /// Contact email.
    pub email: Option<String>,
    /// Contact phone.
    pub phone: Option<String>,
}

/// Customer repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct CustomerRepository {
    db: DatabaseConnection,
}

impl CustomerRepository {
    /// Creates a new customer repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists customers for a user with pagination.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(
        &self,
        user_id: Uuid,
        page: &PageRequest,
    ) -> Result<(Vec<customers::Model>, u64), DbErr> {
        let query = customers::Entity::find().filter(customers::Column::UserId.eq(user_id));

        let total = query.clone().count(&self.db).await?;
        let items = query
            .order_by_asc(customers::Column::Name)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await?;

        Ok((items, total))
    }

    /// Finds a customer by ID, scoped to the user.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(
        &self,
        user_id: Uuid,
        id: Uuid,
    ) -> Result<Option<customers::Model>, DbErr> {
        customers::Entity::find_by_id(id)
            .filter(customers::Column::UserId.eq(user_id))
            .one(&self.db)
            .await
    }

    /// Creates a new customer.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn create(
        &self,
        user_id: Uuid,
        name: &str,
        input: CustomerInput,
    ) -> Result<customers::Model, DbErr> {
        let now = chrono::Utc::now().into();
        let customer = customers::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(user_id),
            name: Set(name.to_string()),
            document: Set(input.document),
            email: Set(input.email),
            phone: Set(input.phone),
            created_at: Set(now),
            updated_at: Set(now),
        };

        customer.insert(&self.db).await
    }

    /// Updates a customer. Returns `None` if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the database update fails.
    pub async fn update(
        &self,
        user_id: Uuid,
        id: Uuid,
        input: CustomerInput,
    ) -> Result<Option<customers::Model>, DbErr> {
        let Some(customer) = self.find_by_id(user_id, id).await? else {
            return Ok(None);
        };

        let mut active: customers::ActiveModel = customer.into();
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
        active.updated_at = Set(chrono::Utc::now().into());

        Ok(Some(active.update(&self.db).await?))
    }

    /// Deletes a customer. Returns false if it did not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the database delete fails.
    pub async fn delete(&self, user_id: Uuid, id: Uuid) -> Result<bool, DbErr> {
        let result = customers::Entity::delete_many()
            .filter(customers::Column::Id.eq(id))
            .filter(customers::Column::UserId.eq(user_id))
            .exec(&self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }
}
