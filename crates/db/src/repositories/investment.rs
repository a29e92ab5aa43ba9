//! Investment repository for database operations.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

use crate::entities::{investments, sea_orm_active_enums::InvestmentKind};
use centavo_shared::types::PageRequest;

/// Input for creating an investment.
#[derive(Debug, Clone)]
pub struct CreateInvestmentInput {
    /// Display name.
    pub name: String,
    /// Kind of investment.
    pub kind: InvestmentKind,
    /// Amount originally invested.
    pub amount_invested: Decimal,
    /// Application date.
    pub applied_at: NaiveDate,
    /// Free-form notes.
    pub notes: Option<String>,
}

/// Investment repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct InvestmentRepository {
    db: DatabaseConnection,
}

impl InvestmentRepository {
    /// Creates a new investment repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists investments for a user with pagination, newest application first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(
        &self,
        user_id: Uuid,
        page: &PageRequest,
    ) -> Result<(Vec<investments::Model>, u64), DbErr> {
        let query = investments::Entity::find().filter(investments::Column::UserId.eq(user_id));

        let total = query.clone().count(&self.db).await?;
        let items = query
            .order_by_desc(investments::Column::AppliedAt)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await?;

        Ok((items, total))
    }

    /// Finds an investment by ID, scoped to the user.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(
        &self,
        user_id: Uuid,
        id: Uuid,
    ) -> Result<Option<investments::Model>, DbErr> {
        investments::Entity::find_by_id(id)
            .filter(investments::Column::UserId.eq(user_id))
            .one(&self.db)
            .await
    }

    /// Creates an investment. The current value starts at the invested amount.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn create(
        &self,
        user_id: Uuid,
        input: CreateInvestmentInput,
    ) -> Result<investments::Model, DbErr> {
        let now = chrono::Utc::now().into();
        let investment = investments::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(user_id),
            name: Set(input.name),
            kind: Set(input.kind),
            amount_invested: Set(input.amount_invested),
            current_value: Set(input.amount_invested),
            applied_at: Set(input.applied_at),
            redeemed_at: Set(None),
            notes: Set(input.notes),
            created_at: Set(now),
            updated_at: Set(now),
        };

        investment.insert(&self.db).await
    }

    /// Updates an investment's name, current value, or notes. Returns `None`
    /// if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the database update fails.
    pub async fn update(
        &self,
        user_id: Uuid,
        id: Uuid,
        name: Option<String>,
        current_value: Option<Decimal>,
        notes: Option<String>,
    ) -> Result<Option<investments::Model>, DbErr> {
        let Some(investment) = self.find_by_id(user_id, id).await? else {
            return Ok(None);
        };

        let mut active: investments::ActiveModel = investment.into();
        if let Some(name) = name {
            active.name = Set(name);
        }
        if let Some(current_value) = current_value {
            active.current_value = Set(current_value);
        }
        if let Some(notes) = notes {
            active.notes = Set(Some(notes));
        }
        active.updated_at = Set(chrono::Utc::now().into());

        Ok(Some(active.update(&self.db).await?))
    }

    /// Records a redemption date, closing the position. Returns `None` if
    /// the investment does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the database update fails.
    pub async fn redeem(
        &self,
        user_id: Uuid,
        id: Uuid,
        redeemed_at: NaiveDate,
        final_value: Option<Decimal>,
    ) -> Result<Option<investments::Model>, DbErr> {
        let Some(investment) = self.find_by_id(user_id, id).await? else {
            return Ok(None);
        };

        let mut active: investments::ActiveModel = investment.into();
        active.redeemed_at = Set(Some(redeemed_at));
        if let Some(final_value) = final_value {
            active.current_value = Set(final_value);
        }
        active.updated_at = Set(chrono::Utc::now().into());

        Ok(Some(active.update(&self.db).await?))
    }

    /// Deletes an investment. Returns false if it did not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the database delete fails.
    pub async fn delete(&self, user_id: Uuid, id: Uuid) -> Result<bool, DbErr> {
        let result = investments::Entity::delete_many()
            .filter(investments::Column::Id.eq(id))
            .filter(investments::Column::UserId.eq(user_id))
            .exec(&self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }
}
