//! Dashboard repository: read-only aggregates for the user dashboard and
//! the admin overview.

use chrono::{Datelike, Months, NaiveDate};
use rust_decimal::Decimal;
use sea_orm::{
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, JoinType, PaginatorTrait, QueryFilter,
    QuerySelect, RelationTrait,
};
use serde::Serialize;
use uuid::Uuid;

use crate::entities::{
    bank_accounts, fixed_account_transactions, fixed_accounts, notifications, obligations,
    sea_orm_active_enums::{EntryKind, ObligationDirection, ObligationStatus, OccurrenceStatus},
    transactions, users,
};

/// Aggregates shown on a user's dashboard.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardSummary {
    /// Sum of active bank account balances.
    pub total_balance: Decimal,
    /// Ledger income in the current month.
    pub month_income: Decimal,
    /// Ledger expense in the current month.
    pub month_expense: Decimal,
    /// Pending occurrences awaiting payment.
    pub open_occurrences: u64,
    /// Occurrences past their due date.
    pub overdue_occurrences: u64,
    /// Active templates due within the next seven days.
    pub due_next_week: u64,
    /// Total of open payables.
    pub open_payables: Decimal,
    /// Total of open receivables.
    pub open_receivables: Decimal,
    /// Unread notifications.
    pub unread_notifications: u64,
}

/// Aggregates shown on the admin overview.
#[derive(Debug, Clone, Serialize)]
pub struct AdminOverview {
    /// Registered users.
    pub users: u64,
    /// Active templates across all users.
    pub active_templates: u64,
    /// Pending occurrences across all users.
    pub pending_occurrences: u64,
    /// Paid occurrences across all users.
    pub paid_occurrences: u64,
    /// Overdue occurrences across all users.
    pub overdue_occurrences: u64,
    /// Ledger transaction count across all users.
    pub ledger_entries: u64,
    /// Total ledger amount moved across all users.
    pub ledger_volume: Decimal,
}

/// Dashboard repository.
#[derive(Debug, Clone)]
pub struct DashboardRepository {
    db: DatabaseConnection,
}

impl DashboardRepository {
    /// Creates a new dashboard repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Builds the dashboard summary for a user as of `today`.
    ///
    /// # Errors
    ///
    /// Returns an error if any of the aggregate queries fail.
    pub async fn summary(&self, user_id: Uuid, today: NaiveDate) -> Result<DashboardSummary, DbErr> {
        let total_balance = self
            .sum_column(
                bank_accounts::Entity::find()
                    .filter(bank_accounts::Column::UserId.eq(user_id))
                    .filter(bank_accounts::Column::IsActive.eq(true)),
                bank_accounts::Column::Balance,
            )
            .await?;

        let (month_start, month_end) = month_bounds(today);
        let month_income = self
            .sum_column(
                transactions::Entity::find()
                    .filter(transactions::Column::UserId.eq(user_id))
                    .filter(transactions::Column::Kind.eq(EntryKind::Income))
                    .filter(transactions::Column::EntryDate.gte(month_start))
                    .filter(transactions::Column::EntryDate.lt(month_end)),
                transactions::Column::Amount,
            )
            .await?;
        let month_expense = self
            .sum_column(
                transactions::Entity::find()
                    .filter(transactions::Column::UserId.eq(user_id))
                    .filter(transactions::Column::Kind.eq(EntryKind::Expense))
                    .filter(transactions::Column::EntryDate.gte(month_start))
                    .filter(transactions::Column::EntryDate.lt(month_end)),
                transactions::Column::Amount,
            )
            .await?;

        let open_occurrences = self
            .count_occurrences(user_id, OccurrenceStatus::Pending)
            .await?;
        let overdue_occurrences = self
            .count_occurrences(user_id, OccurrenceStatus::Overdue)
            .await?;

        let week_end = today
            .checked_add_days(chrono::Days::new(7))
            .unwrap_or(NaiveDate::MAX);
        let due_next_week = fixed_accounts::Entity::find()
            .filter(fixed_accounts::Column::UserId.eq(user_id))
            .filter(fixed_accounts::Column::IsActive.eq(true))
            .filter(fixed_accounts::Column::NextDueDate.gt(today))
            .filter(fixed_accounts::Column::NextDueDate.lte(week_end))
            .count(&self.db)
            .await?;

        let open_payables = self
            .sum_open_obligations(user_id, ObligationDirection::Payable)
            .await?;
        let open_receivables = self
            .sum_open_obligations(user_id, ObligationDirection::Receivable)
            .await?;

        let unread_notifications = notifications::Entity::find()
            .filter(notifications::Column::UserId.eq(user_id))
            .filter(notifications::Column::IsRead.eq(false))
            .count(&self.db)
            .await?;

        Ok(DashboardSummary {
            total_balance,
            month_income,
            month_expense,
            open_occurrences,
            overdue_occurrences,
            due_next_week,
            open_payables,
            open_receivables,
            unread_notifications,
        })
    }

    /// Builds the cross-user admin overview.
    ///
    /// # Errors
    ///
    /// Returns an error if any of the aggregate queries fail.
    pub async fn admin_overview(&self) -> Result<AdminOverview, DbErr> {
        let users = users::Entity::find().count(&self.db).await?;
        let active_templates = fixed_accounts::Entity::find()
            .filter(fixed_accounts::Column::IsActive.eq(true))
            .count(&self.db)
            .await?;

        let pending_occurrences = fixed_account_transactions::Entity::find()
            .filter(fixed_account_transactions::Column::Status.eq(OccurrenceStatus::Pending))
            .count(&self.db)
            .await?;
        let paid_occurrences = fixed_account_transactions::Entity::find()
            .filter(fixed_account_transactions::Column::Status.eq(OccurrenceStatus::Paid))
            .count(&self.db)
            .await?;
        let overdue_occurrences = fixed_account_transactions::Entity::find()
            .filter(fixed_account_transactions::Column::Status.eq(OccurrenceStatus::Overdue))
            .count(&self.db)
            .await?;

        let ledger_entries = transactions::Entity::find().count(&self.db).await?;
        let ledger_volume = self
            .sum_column(transactions::Entity::find(), transactions::Column::Amount)
            .await?;

        Ok(AdminOverview {
            users,
            active_templates,
            pending_occurrences,
            paid_occurrences,
            overdue_occurrences,
            ledger_entries,
            ledger_volume,
        })
    }

    async fn count_occurrences(
        &self,
        user_id: Uuid,
        status: OccurrenceStatus,
    ) -> Result<u64, DbErr> {
        fixed_account_transactions::Entity::find()
            .join(
                JoinType::InnerJoin,
                fixed_account_transactions::Relation::FixedAccounts.def(),
            )
            .filter(fixed_accounts::Column::UserId.eq(user_id))
            .filter(fixed_account_transactions::Column::Status.eq(status))
            .count(&self.db)
            .await
    }

    async fn sum_open_obligations(
        &self,
        user_id: Uuid,
        direction: ObligationDirection,
    ) -> Result<Decimal, DbErr> {
        self.sum_column(
            obligations::Entity::find()
                .filter(obligations::Column::UserId.eq(user_id))
                .filter(obligations::Column::Direction.eq(direction))
                .filter(
                    obligations::Column::Status
                        .is_in([ObligationStatus::Open, ObligationStatus::Overdue]),
                ),
            obligations::Column::Amount,
        )
        .await
    }

    async fn sum_column<E, C>(
        &self,
        query: sea_orm::Select<E>,
        column: C,
    ) -> Result<Decimal, DbErr>
    where
        E: EntityTrait,
        C: ColumnTrait,
    {
        let total: Option<Option<Decimal>> = query
            .select_only()
            .column_as(column.sum(), "total")
            .into_tuple()
            .one(&self.db)
            .await?;

        Ok(total.flatten().unwrap_or(Decimal::ZERO))
    }
}

/// First day of `today`'s month and first day of the following month.
fn month_bounds(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    let start = today.with_day(1).unwrap_or(today);
    let end = start
        .checked_add_months(Months::new(1))
        .unwrap_or(NaiveDate::MAX);
    (start, end)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_month_bounds_mid_month() {
        let (start, end) = month_bounds(d(2026, 8, 23));
        assert_eq!(start, d(2026, 8, 1));
        assert_eq!(end, d(2026, 9, 1));
    }

    #[test]
    fn test_month_bounds_december_rolls_over() {
        let (start, end) = month_bounds(d(2026, 12, 31));
        assert_eq!(start, d(2026, 12, 1));
        assert_eq!(end, d(2027, 1, 1));
    }
}
