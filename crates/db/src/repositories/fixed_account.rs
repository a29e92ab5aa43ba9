//! Fixed-account repository: templates, occurrences, the overdue sweep,
//! batch payment, and statistics.
//!
//! Templates describe a recurring obligation; occurrences are the dated
//! instances the sweep materializes from them. Payment converts occurrences
//! into ledger transactions and adjusts bank balances, all-or-nothing per
//! batch.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use serde::Serialize;
use tracing::error;
use uuid::Uuid;

use crate::entities::{
    bank_accounts, categories, fixed_account_transactions, fixed_accounts,
    sea_orm_active_enums::{EntryKind, NotificationKind, OccurrenceStatus, PaymentMethod, Periodicity},
    suppliers, transactions,
};
use crate::repositories::bank_account::{BankAccountError, BankAccountRepository};
use crate::repositories::notification::NotificationRepository;
use centavo_core::fixed_account::{aggregate_stats, FixedAccountError, FixedAccountService, FixedAccountStats, TemplateSnapshot};
use centavo_shared::types::PageRequest;

/// Error types for fixed-account operations.
#[derive(Debug, thiserror::Error)]
pub enum FixedAccountRepoError {
    /// Domain rule violation.
    #[error(transparent)]
    Domain(#[from] FixedAccountError),

    /// Template has paid occurrences and must be deactivated instead of deleted.
    #[error("Fixed account has {0} paid occurrences and cannot be deleted")]
    HasPaidOccurrences(u64),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<BankAccountError> for FixedAccountRepoError {
    fn from(value: BankAccountError) -> Self {
        match value {
            BankAccountError::NotFound(id) => {
                Self::Domain(FixedAccountError::BankAccountNotFound(id))
            }
            BankAccountError::Database(e) => Self::Database(e),
        }
    }
}

/// Input for creating a fixed-account template.
#[derive(Debug, Clone)]
pub struct CreateFixedAccountInput {
    /// Category (required).
    pub category_id: Uuid,
    /// Supplier, if the obligation has a counterparty.
    pub supplier_id: Option<Uuid>,
    /// Default bank account for payments.
    pub bank_account_id: Option<Uuid>,
    /// Description shown on occurrences and ledger entries.
    pub description: String,
    /// Per-occurrence amount (positive).
    pub amount: Decimal,
    /// Income or expense.
    pub kind: EntryKind,
    /// Recurrence period.
    pub periodicity: Periodicity,
    /// First due date.
    pub start_date: NaiveDate,
    /// How the obligation is usually paid.
    pub payment_method: Option<PaymentMethod>,
    /// Days ahead of the due date to raise a reminder.
    pub reminder_days: i32,
}

/// Input for updating a template. `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateFixedAccountInput {
    /// New description.
    pub description: Option<String>,
    /// New per-occurrence amount.
    pub amount: Option<Decimal>,
    /// New category.
    pub category_id: Option<Uuid>,
    /// New supplier.
    pub supplier_id: Option<Uuid>,
    /// New default bank account.
    pub bank_account_id: Option<Uuid>,
    /// New payment method.
    pub payment_method: Option<PaymentMethod>,
    /// New reminder window.
    pub reminder_days: Option<i32>,
    /// Activate or deactivate the template.
    pub is_active: Option<bool>,
}

/// Input for paying a batch of occurrences.
#[derive(Debug, Clone)]
pub struct PayOccurrencesInput {
    /// Occurrences to pay. Must not be empty.
    pub occurrence_ids: Vec<Uuid>,
    /// Bank account override. Falls back to each template's linked account.
    pub bank_account_id: Option<Uuid>,
    /// Payment date. Defaults to today.
    pub paid_at: Option<NaiveDate>,
}

/// Template joined with its category and supplier names.
#[derive(Debug, Clone, Serialize)]
pub struct FixedAccountWithRefs {
    /// The template row.
    #[serde(flatten)]
    pub account: fixed_accounts::Model,
    /// Category name.
    pub category_name: String,
    /// Supplier name, if linked.
    pub supplier_name: Option<String>,
}

/// Outcome of an overdue sweep.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct OverdueCheckReport {
    /// Occurrences generated from due templates.
    pub generated: u64,
    /// Pending occurrences flipped to overdue.
    pub marked_overdue: u64,
    /// Templates or occurrences skipped after an error.
    pub failed: u64,
}

/// Fixed-account repository.
#[derive(Debug, Clone)]
pub struct FixedAccountRepository {
    db: DatabaseConnection,
}

impl FixedAccountRepository {
    /// Creates a new fixed-account repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a template. The first due date is the start date.
    ///
    /// # Errors
    ///
    /// Returns a domain error for non-positive amounts or dangling
    /// category/supplier/bank account references.
    pub async fn create(
        &self,
        user_id: Uuid,
        input: CreateFixedAccountInput,
    ) -> Result<fixed_accounts::Model, FixedAccountRepoError> {
        FixedAccountService::validate_amount(input.amount)?;
        self.ensure_refs(
            user_id,
            Some(input.category_id),
            input.supplier_id,
            input.bank_account_id,
        )
        .await?;

        let now = chrono::Utc::now().into();
        let template = fixed_accounts::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(user_id),
            category_id: Set(input.category_id),
            supplier_id: Set(input.supplier_id),
            bank_account_id: Set(input.bank_account_id),
            description: Set(input.description),
            amount: Set(input.amount),
            kind: Set(input.kind),
            periodicity: Set(input.periodicity),
            start_date: Set(input.start_date),
            next_due_date: Set(input.start_date),
            is_active: Set(true),
            is_paid: Set(false),
            payment_method: Set(input.payment_method),
            reminder_days: Set(input.reminder_days),
            created_at: Set(now),
            updated_at: Set(now),
        };

        Ok(template.insert(&self.db).await?)
    }

    /// Lists templates for a user, soonest due first, with category and
    /// supplier names attached.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(
        &self,
        user_id: Uuid,
        is_active: Option<bool>,
        page: &PageRequest,
    ) -> Result<(Vec<FixedAccountWithRefs>, u64), FixedAccountRepoError> {
        let mut query =
            fixed_accounts::Entity::find().filter(fixed_accounts::Column::UserId.eq(user_id));
        if let Some(active) = is_active {
            query = query.filter(fixed_accounts::Column::IsActive.eq(active));
        }

        let total = query.clone().count(&self.db).await?;
        let items = query
            .order_by_asc(fixed_accounts::Column::NextDueDate)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await?;

        Ok((self.attach_refs(items).await?, total))
    }

    /// Finds a template by ID, scoped to the user.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(
        &self,
        user_id: Uuid,
        id: Uuid,
    ) -> Result<Option<fixed_accounts::Model>, DbErr> {
        fixed_accounts::Entity::find_by_id(id)
            .filter(fixed_accounts::Column::UserId.eq(user_id))
            .one(&self.db)
            .await
    }

    /// Finds a template with category and supplier names attached.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_with_refs(
        &self,
        user_id: Uuid,
        id: Uuid,
    ) -> Result<Option<FixedAccountWithRefs>, FixedAccountRepoError> {
        let Some(template) = self.find_by_id(user_id, id).await? else {
            return Ok(None);
        };
        Ok(self.attach_refs(vec![template]).await?.into_iter().next())
    }

    /// Updates a template.
    ///
    /// # Errors
    ///
    /// Returns `FixedAccountError::NotFound` if the template does not exist,
    /// or a domain error for invalid amounts or dangling references.
    pub async fn update(
        &self,
        user_id: Uuid,
        id: Uuid,
        input: UpdateFixedAccountInput,
    ) -> Result<fixed_accounts::Model, FixedAccountRepoError> {
        let template = self
            .find_by_id(user_id, id)
            .await?
            .ok_or(FixedAccountError::NotFound(id))?;

        if let Some(amount) = input.amount {
            FixedAccountService::validate_amount(amount)?;
        }
        self.ensure_refs(
            user_id,
            input.category_id,
            input.supplier_id,
            input.bank_account_id,
        )
        .await?;

        let mut active: fixed_accounts::ActiveModel = template.into();
        if let Some(description) = input.description {
            active.description = Set(description);
        }
        if let Some(amount) = input.amount {
            active.amount = Set(amount);
        }
        if let Some(category_id) = input.category_id {
            active.category_id = Set(category_id);
        }
        if let Some(supplier_id) = input.supplier_id {
            active.supplier_id = Set(Some(supplier_id));
        }
        if let Some(bank_account_id) = input.bank_account_id {
            active.bank_account_id = Set(Some(bank_account_id));
        }
        if let Some(payment_method) = input.payment_method {
            active.payment_method = Set(Some(payment_method));
        }
        if let Some(reminder_days) = input.reminder_days {
            active.reminder_days = Set(reminder_days);
        }
        if let Some(is_active) = input.is_active {
            active.is_active = Set(is_active);
        }
        active.updated_at = Set(chrono::Utc::now().into());

        Ok(active.update(&self.db).await?)
    }

    /// Deletes a template and its unpaid occurrences.
    ///
    /// # Errors
    ///
    /// Returns `FixedAccountRepoError::HasPaidOccurrences` when payment
    /// history exists. Such templates are deactivated, never deleted.
    pub async fn delete(&self, user_id: Uuid, id: Uuid) -> Result<(), FixedAccountRepoError> {
        let template = self
            .find_by_id(user_id, id)
            .await?
            .ok_or(FixedAccountError::NotFound(id))?;

        let paid = fixed_account_transactions::Entity::find()
            .filter(fixed_account_transactions::Column::FixedAccountId.eq(id))
            .filter(fixed_account_transactions::Column::Status.eq(OccurrenceStatus::Paid))
            .count(&self.db)
            .await?;
        if paid > 0 {
            return Err(FixedAccountRepoError::HasPaidOccurrences(paid));
        }

        let txn = self.db.begin().await?;
        fixed_account_transactions::Entity::delete_many()
            .filter(fixed_account_transactions::Column::FixedAccountId.eq(id))
            .exec(&txn)
            .await?;
        fixed_accounts::Entity::delete_by_id(template.id)
            .exec(&txn)
            .await?;
        txn.commit().await?;
        Ok(())
    }

    /// Lists occurrences of a template, newest due date first.
    ///
    /// # Errors
    ///
    /// Returns `FixedAccountError::NotFound` if the template does not exist.
    pub async fn list_occurrences(
        &self,
        user_id: Uuid,
        fixed_account_id: Uuid,
    ) -> Result<Vec<fixed_account_transactions::Model>, FixedAccountRepoError> {
        self.find_by_id(user_id, fixed_account_id)
            .await?
            .ok_or(FixedAccountError::NotFound(fixed_account_id))?;

        Ok(fixed_account_transactions::Entity::find()
            .filter(fixed_account_transactions::Column::FixedAccountId.eq(fixed_account_id))
            .order_by_desc(fixed_account_transactions::Column::DueDate)
            .all(&self.db)
            .await?)
    }

    /// Runs the overdue sweep for a user.
    ///
    /// Three passes: generate occurrences for templates whose due date has
    /// arrived, flip stale pending occurrences to overdue, and raise
    /// reminders for templates inside their reminder window. Each template
    /// is processed in its own transaction so one failure cannot poison the
    /// whole sweep.
    ///
    /// # Errors
    ///
    /// Returns an error only when the initial queries fail. Per-template
    /// failures are logged and counted in the report instead.
    pub async fn check_overdue(
        &self,
        user_id: Uuid,
        today: NaiveDate,
    ) -> Result<OverdueCheckReport, DbErr> {
        let mut report = OverdueCheckReport::default();

        let due_templates = fixed_accounts::Entity::find()
            .filter(fixed_accounts::Column::UserId.eq(user_id))
            .filter(fixed_accounts::Column::IsActive.eq(true))
            .filter(fixed_accounts::Column::NextDueDate.lte(today))
            .all(&self.db)
            .await?;
        for template in due_templates {
            match self.generate_for_template(&template, today).await {
                Ok(generated) => report.generated += generated,
                Err(err) => {
                    error!(template_id = %template.id, error = %err, "occurrence generation failed");
                    report.failed += 1;
                }
            }
        }

        let stale = fixed_account_transactions::Entity::find()
            .find_also_related(fixed_accounts::Entity)
            .filter(fixed_accounts::Column::UserId.eq(user_id))
            .filter(fixed_account_transactions::Column::Status.eq(OccurrenceStatus::Pending))
            .filter(fixed_account_transactions::Column::DueDate.lt(today))
            .all(&self.db)
            .await?;
        for (occurrence, template) in stale {
            let Some(template) = template else { continue };
            match self.mark_overdue(occurrence, &template).await {
                Ok(()) => report.marked_overdue += 1,
                Err(err) => {
                    error!(template_id = %template.id, error = %err, "overdue transition failed");
                    report.failed += 1;
                }
            }
        }

        let upcoming = fixed_accounts::Entity::find()
            .filter(fixed_accounts::Column::UserId.eq(user_id))
            .filter(fixed_accounts::Column::IsActive.eq(true))
            .filter(fixed_accounts::Column::NextDueDate.gt(today))
            .all(&self.db)
            .await?;
        for template in upcoming {
            if !FixedAccountService::within_reminder_window(
                template.next_due_date,
                today,
                template.reminder_days,
            ) {
                continue;
            }
            if let Err(err) = self.remind(&template).await {
                error!(template_id = %template.id, error = %err, "reminder failed");
                report.failed += 1;
            }
        }

        Ok(report)
    }

    /// Pays a batch of occurrences in a single transaction.
    ///
    /// Every occurrence must belong to the user, come from an active
    /// template, and still be open; each bank account involved must cover
    /// its summed expense amount. Repeated IDs in the batch are collapsed
    /// so an occurrence settles at most once. On success each occurrence is
    /// marked paid and linked to a freshly created ledger transaction.
    ///
    /// # Errors
    ///
    /// Returns a domain error and rolls back everything when any occurrence
    /// in the batch fails validation.
    pub async fn pay_occurrences(
        &self,
        user_id: Uuid,
        input: PayOccurrencesInput,
    ) -> Result<Vec<fixed_account_transactions::Model>, FixedAccountRepoError> {
        if input.occurrence_ids.is_empty() {
            return Err(FixedAccountError::EmptyBatch.into());
        }
        let occurrence_ids = dedup_ids(&input.occurrence_ids);
        let paid_at = input
            .paid_at
            .unwrap_or_else(|| chrono::Utc::now().date_naive());

        let txn = self.db.begin().await?;

        let mut planned = Vec::with_capacity(occurrence_ids.len());
        for id in &occurrence_ids {
            let Some((occurrence, Some(template))) = fixed_account_transactions::Entity::find_by_id(*id)
                .find_also_related(fixed_accounts::Entity)
                .one(&txn)
                .await?
            else {
                return Err(FixedAccountError::OccurrenceNotFound(*id).into());
            };
            if template.user_id != user_id {
                return Err(FixedAccountError::OccurrenceNotFound(*id).into());
            }
            FixedAccountService::ensure_active(template.is_active)?;
            FixedAccountService::ensure_payable(occurrence.id, occurrence.status.into())?;

            let account_id = input
                .bank_account_id
                .or(template.bank_account_id)
                .ok_or(FixedAccountError::NoBankAccount)?;
            planned.push((occurrence, template, account_id));
        }

        let required = expense_totals(
            planned
                .iter()
                .map(|(occurrence, template, account_id)| {
                    (*account_id, template.kind, occurrence.amount)
                }),
        );
        for (account_id, total) in &required {
            let account = bank_accounts::Entity::find_by_id(*account_id)
                .filter(bank_accounts::Column::UserId.eq(user_id))
                .one(&txn)
                .await?
                .ok_or(FixedAccountError::BankAccountNotFound(*account_id))?;
            FixedAccountService::ensure_balance(
                centavo_core::fixed_account::EntryKind::Expense,
                account.balance,
                *total,
            )?;
        }

        let mut paid = Vec::with_capacity(planned.len());
        for (occurrence, template, account_id) in planned {
            let now = chrono::Utc::now().into();
            let entry = transactions::ActiveModel {
                id: Set(Uuid::new_v4()),
                user_id: Set(user_id),
                bank_account_id: Set(Some(account_id)),
                category_id: Set(Some(template.category_id)),
                description: Set(template.description.clone()),
                amount: Set(occurrence.amount),
                kind: Set(template.kind),
                entry_date: Set(paid_at),
                created_at: Set(now),
                updated_at: Set(now),
            };
            let entry = entry.insert(&txn).await?;

            let delta = FixedAccountService::balance_delta(template.kind.into(), occurrence.amount);
            BankAccountRepository::adjust_balance(&txn, account_id, delta).await?;

            let due_date = occurrence.due_date;
            let mut active: fixed_account_transactions::ActiveModel = occurrence.into();
            active.status = Set(OccurrenceStatus::Paid);
            active.transaction_id = Set(Some(entry.id));
            active.paid_at = Set(Some(paid_at));
            active.updated_at = Set(now);
            let updated = active.update(&txn).await?;

            // The template's paid flag tracks the current occurrence only.
            if due_date == template.next_due_date {
                let mut template: fixed_accounts::ActiveModel = template.clone().into();
                template.is_paid = Set(true);
                template.updated_at = Set(now);
                template.update(&txn).await?;
            }

            NotificationRepository::create_in(
                &txn,
                user_id,
                NotificationKind::Payment,
                "Payment applied",
                &format!("{} paid on {}", template.description, paid_at),
                Some(updated.id),
            )
            .await?;

            paid.push(updated);
        }

        txn.commit().await?;
        Ok(paid)
    }

    /// Pays the current occurrence of a template.
    ///
    /// Targets the oldest open occurrence, materializing one at the next
    /// due date when none exists yet so a cycle can be paid ahead of time.
    ///
    /// # Errors
    ///
    /// Returns `FixedAccountError::InactiveTemplate` for inactive templates,
    /// plus any batch payment error.
    pub async fn pay_template(
        &self,
        user_id: Uuid,
        template_id: Uuid,
        bank_account_id: Option<Uuid>,
        paid_at: Option<NaiveDate>,
    ) -> Result<Vec<fixed_account_transactions::Model>, FixedAccountRepoError> {
        let template = self
            .find_by_id(user_id, template_id)
            .await?
            .ok_or(FixedAccountError::NotFound(template_id))?;
        FixedAccountService::ensure_active(template.is_active)?;

        let open = fixed_account_transactions::Entity::find()
            .filter(fixed_account_transactions::Column::FixedAccountId.eq(template.id))
            .filter(fixed_account_transactions::Column::Status.is_in([
                OccurrenceStatus::Pending,
                OccurrenceStatus::Overdue,
            ]))
            .order_by_asc(fixed_account_transactions::Column::DueDate)
            .one(&self.db)
            .await?;

        let occurrence = match open {
            Some(occurrence) => occurrence,
            None => {
                // No open occurrence and the current cycle already settled.
                if template.is_paid {
                    return Err(FixedAccountError::AlreadyPaid(template_id).into());
                }
                self.materialize_next(&template).await?
            }
        };

        self.pay_occurrences(
            user_id,
            PayOccurrencesInput {
                occurrence_ids: vec![occurrence.id],
                bank_account_id,
                paid_at,
            },
        )
        .await
    }

    /// Aggregates statistics over a user's templates.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn statistics(&self, user_id: Uuid) -> Result<FixedAccountStats, FixedAccountRepoError> {
        let templates = fixed_accounts::Entity::find()
            .filter(fixed_accounts::Column::UserId.eq(user_id))
            .all(&self.db)
            .await?;
        let with_refs = self.attach_refs(templates).await?;

        let snapshots: Vec<TemplateSnapshot> = with_refs
            .into_iter()
            .map(|item| TemplateSnapshot {
                amount: item.account.amount,
                kind: item.account.kind.into(),
                periodicity: item.account.periodicity.into(),
                is_active: item.account.is_active,
                is_paid: item.account.is_paid,
                category: item.category_name,
                supplier: item.supplier_name,
            })
            .collect();

        Ok(aggregate_stats(&snapshots))
    }

    /// Generates every occurrence a template owes up to `today` and advances
    /// its due date past them, in one transaction.
    async fn generate_for_template(
        &self,
        template: &fixed_accounts::Model,
        today: NaiveDate,
    ) -> Result<u64, DbErr> {
        let txn = self.db.begin().await?;
        let periodicity = centavo_core::recurrence::Periodicity::from(template.periodicity);

        let mut generated = 0u64;
        let mut next_due = template.next_due_date;
        while next_due <= today {
            let exists = fixed_account_transactions::Entity::find()
                .filter(fixed_account_transactions::Column::FixedAccountId.eq(template.id))
                .filter(fixed_account_transactions::Column::DueDate.eq(next_due))
                .count(&txn)
                .await?
                > 0;
            if FixedAccountService::needs_generation(next_due, today, exists) {
                let now = chrono::Utc::now().into();
                let occurrence = fixed_account_transactions::ActiveModel {
                    id: Set(Uuid::new_v4()),
                    fixed_account_id: Set(template.id),
                    due_date: Set(next_due),
                    amount: Set(template.amount),
                    status: Set(OccurrenceStatus::Pending),
                    transaction_id: Set(None),
                    paid_at: Set(None),
                    created_at: Set(now),
                    updated_at: Set(now),
                };
                occurrence.insert(&txn).await?;
                generated += 1;
            }
            next_due = periodicity.advance(next_due);
        }

        let mut active: fixed_accounts::ActiveModel = template.clone().into();
        active.next_due_date = Set(next_due);
        active.is_paid = Set(false);
        active.updated_at = Set(chrono::Utc::now().into());
        active.update(&txn).await?;

        txn.commit().await?;
        Ok(generated)
    }

    /// Flips a pending occurrence to overdue and notifies the owner.
    async fn mark_overdue(
        &self,
        occurrence: fixed_account_transactions::Model,
        template: &fixed_accounts::Model,
    ) -> Result<(), DbErr> {
        let txn = self.db.begin().await?;

        let occurrence_id = occurrence.id;
        let message = format!(
            "{} ({}) was due on {}",
            template.description, occurrence.amount, occurrence.due_date
        );
        let mut active: fixed_account_transactions::ActiveModel = occurrence.into();
        active.status = Set(OccurrenceStatus::Overdue);
        active.updated_at = Set(chrono::Utc::now().into());
        active.update(&txn).await?;

        NotificationRepository::create_in(
            &txn,
            template.user_id,
            NotificationKind::Overdue,
            "Payment overdue",
            &message,
            Some(occurrence_id),
        )
        .await?;

        txn.commit().await?;
        Ok(())
    }

    /// Raises a due-soon reminder once per template and due date.
    async fn remind(&self, template: &fixed_accounts::Model) -> Result<(), DbErr> {
        let message = format!("{} is due on {}", template.description, template.next_due_date);
        let already_sent = NotificationRepository::exists_with_message(
            &self.db,
            template.user_id,
            NotificationKind::DueReminder,
            &message,
        )
        .await?;
        if already_sent {
            return Ok(());
        }

        NotificationRepository::create_in(
            &self.db,
            template.user_id,
            NotificationKind::DueReminder,
            "Upcoming payment",
            &message,
            None,
        )
        .await?;
        Ok(())
    }

    /// Creates the occurrence for the template's next due date without
    /// advancing it, so an early payment still counts as the current cycle.
    async fn materialize_next(
        &self,
        template: &fixed_accounts::Model,
    ) -> Result<fixed_account_transactions::Model, DbErr> {
        let now = chrono::Utc::now().into();
        let occurrence = fixed_account_transactions::ActiveModel {
            id: Set(Uuid::new_v4()),
            fixed_account_id: Set(template.id),
            due_date: Set(template.next_due_date),
            amount: Set(template.amount),
            status: Set(OccurrenceStatus::Pending),
            transaction_id: Set(None),
            paid_at: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        };
        occurrence.insert(&self.db).await
    }

    /// Validates that referenced rows exist and belong to the user.
    async fn ensure_refs(
        &self,
        user_id: Uuid,
        category_id: Option<Uuid>,
        supplier_id: Option<Uuid>,
        bank_account_id: Option<Uuid>,
    ) -> Result<(), FixedAccountRepoError> {
        if let Some(id) = category_id {
            let found = categories::Entity::find_by_id(id)
                .filter(categories::Column::UserId.eq(user_id))
                .count(&self.db)
                .await?;
            if found == 0 {
                return Err(FixedAccountError::CategoryNotFound(id).into());
            }
        }
        if let Some(id) = supplier_id {
            let found = suppliers::Entity::find_by_id(id)
                .filter(suppliers::Column::UserId.eq(user_id))
                .count(&self.db)
                .await?;
            if found == 0 {
                return Err(FixedAccountError::SupplierNotFound(id).into());
            }
        }
        if let Some(id) = bank_account_id {
            let found = bank_accounts::Entity::find_by_id(id)
                .filter(bank_accounts::Column::UserId.eq(user_id))
                .count(&self.db)
                .await?;
            if found == 0 {
                return Err(FixedAccountError::BankAccountNotFound(id).into());
            }
        }
        Ok(())
    }

    /// Joins category and supplier names onto template rows.
    async fn attach_refs(
        &self,
        items: Vec<fixed_accounts::Model>,
    ) -> Result<Vec<FixedAccountWithRefs>, DbErr> {
        let category_ids: Vec<Uuid> = items.iter().map(|t| t.category_id).collect();
        let supplier_ids: Vec<Uuid> = items.iter().filter_map(|t| t.supplier_id).collect();

        let category_names: HashMap<Uuid, String> = if category_ids.is_empty() {
            HashMap::new()
        } else {
            categories::Entity::find()
                .filter(categories::Column::Id.is_in(category_ids))
                .all(&self.db)
                .await?
                .into_iter()
                .map(|c| (c.id, c.name))
                .collect()
        };
        let supplier_names: HashMap<Uuid, String> = if supplier_ids.is_empty() {
            HashMap::new()
        } else {
            suppliers::Entity::find()
                .filter(suppliers::Column::Id.is_in(supplier_ids))
                .all(&self.db)
                .await?
                .into_iter()
                .map(|s| (s.id, s.name))
                .collect()
        };

        Ok(items
            .into_iter()
            .map(|account| {
                let category_name = category_names
                    .get(&account.category_id)
                    .cloned()
                    .unwrap_or_default();
                let supplier_name = account
                    .supplier_id
                    .and_then(|id| supplier_names.get(&id).cloned());
                FixedAccountWithRefs {
                    account,
                    category_name,
                    supplier_name,
                }
            })
            .collect())
    }
}

/// Sums expense amounts per bank account. Income entries never consume
/// balance, so they are excluded from the requirement.
fn expense_totals<I>(items: I) -> BTreeMap<Uuid, Decimal>
where
    I: IntoIterator<Item = (Uuid, EntryKind, Decimal)>,
{
    let mut totals = BTreeMap::new();
    for (account_id, kind, amount) in items {
        if kind == EntryKind::Expense {
            *totals.entry(account_id).or_insert(Decimal::ZERO) += amount;
        }
    }
    totals
}

/// Drops repeated IDs keeping first-seen order. A duplicated entry in a
/// payment batch must not settle the same occurrence twice.
fn dedup_ids(ids: &[Uuid]) -> Vec<Uuid> {
    let mut seen = BTreeSet::new();
    ids.iter().copied().filter(|id| seen.insert(*id)).collect()
}

#[cfg(test)]
#[path = "fixed_account_tests.rs"]
mod tests;
