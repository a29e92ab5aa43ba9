//! Fixed-account payment and generation rules.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use uuid::Uuid;

use super::error::FixedAccountError;
use super::types::{EntryKind, OccurrenceStatus};

/// Stateless rule set for fixed accounts.
pub struct FixedAccountService;

impl FixedAccountService {
    /// Checks that a template may generate or pay occurrences.
    ///
    /// # Errors
    ///
    /// Returns `FixedAccountError::InactiveTemplate` for inactive templates.
    pub const fn ensure_active(is_active: bool) -> Result<(), FixedAccountError> {
        if is_active {
            Ok(())
        } else {
            Err(FixedAccountError::InactiveTemplate)
        }
    }

    /// Checks that an occurrence is still payable.
    ///
    /// # Errors
    ///
    /// Returns `FixedAccountError::AlreadyPaid` for paid occurrences.
    pub const fn ensure_payable(
        occurrence_id: Uuid,
        status: OccurrenceStatus,
    ) -> Result<(), FixedAccountError> {
        if status.is_open() {
            Ok(())
        } else {
            Err(FixedAccountError::AlreadyPaid(occurrence_id))
        }
    }

    /// Checks that a bank account covers an expense batch total.
    ///
    /// Income batches never fail this check; they only credit the account.
    ///
    /// # Errors
    ///
    /// Returns `FixedAccountError::InsufficientBalance` when an expense total
    /// exceeds the available balance.
    pub fn ensure_balance(
        kind: EntryKind,
        available: Decimal,
        required: Decimal,
    ) -> Result<(), FixedAccountError> {
        if kind == EntryKind::Expense && required > available {
            return Err(FixedAccountError::InsufficientBalance {
                required,
                available,
            });
        }
        Ok(())
    }

    /// Signed balance change a payment applies to the bank account.
    #[must_use]
    pub fn balance_delta(kind: EntryKind, amount: Decimal) -> Decimal {
        match kind {
            EntryKind::Income => amount,
            EntryKind::Expense => -amount,
        }
    }

    /// Whether the overdue sweep must generate a new occurrence.
    ///
    /// Generation happens when the template's next due date has arrived and
    /// no occurrence row exists for that date yet.
    #[must_use]
    pub fn needs_generation(
        next_due_date: NaiveDate,
        today: NaiveDate,
        occurrence_exists_at_due: bool,
    ) -> bool {
        next_due_date <= today && !occurrence_exists_at_due
    }

    /// Whether an open occurrence should flip to overdue.
    #[must_use]
    pub fn is_overdue(status: OccurrenceStatus, due_date: NaiveDate, today: NaiveDate) -> bool {
        status == OccurrenceStatus::Pending && due_date < today
    }

    /// Whether a due date falls inside the template's reminder window.
    ///
    /// The window covers today through `reminder_days` ahead, inclusive.
    #[must_use]
    pub fn within_reminder_window(
        due_date: NaiveDate,
        today: NaiveDate,
        reminder_days: i32,
    ) -> bool {
        let days_until = (due_date - today).num_days();
        days_until >= 0 && days_until <= i64::from(reminder_days)
    }

    /// Validates a template amount.
    ///
    /// # Errors
    ///
    /// Returns `FixedAccountError::NonPositiveAmount` for zero or negative amounts.
    pub fn validate_amount(amount: Decimal) -> Result<(), FixedAccountError> {
        if amount <= Decimal::ZERO {
            return Err(FixedAccountError::NonPositiveAmount);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_inactive_template_rejected() {
        assert!(FixedAccountService::ensure_active(true).is_ok());
        assert!(matches!(
            FixedAccountService::ensure_active(false),
            Err(FixedAccountError::InactiveTemplate)
        ));
    }

    #[rstest]
    #[case(OccurrenceStatus::Pending, true)]
    #[case(OccurrenceStatus::Overdue, true)]
    #[case(OccurrenceStatus::Paid, false)]
    fn test_payable_statuses(#[case] status: OccurrenceStatus, #[case] payable: bool) {
        let result = FixedAccountService::ensure_payable(Uuid::new_v4(), status);
        assert_eq!(result.is_ok(), payable);
    }

    #[test]
    fn test_expense_requires_balance() {
        assert!(
            FixedAccountService::ensure_balance(EntryKind::Expense, dec!(100), dec!(100)).is_ok()
        );

        let err = FixedAccountService::ensure_balance(EntryKind::Expense, dec!(99.99), dec!(100))
            .unwrap_err();
        assert!(matches!(
            err,
            FixedAccountError::InsufficientBalance { required, available }
                if required == dec!(100) && available == dec!(99.99)
        ));
    }

    #[test]
    fn test_income_ignores_balance() {
        assert!(
            FixedAccountService::ensure_balance(EntryKind::Income, dec!(0), dec!(5000)).is_ok()
        );
    }

    #[test]
    fn test_balance_delta_signs() {
        assert_eq!(
            FixedAccountService::balance_delta(EntryKind::Expense, dec!(120)),
            dec!(-120)
        );
        assert_eq!(
            FixedAccountService::balance_delta(EntryKind::Income, dec!(120)),
            dec!(120)
        );
    }

    #[test]
    fn test_needs_generation() {
        let today = d(2026, 8, 23);

        // Due today, no row yet: generate
        assert!(FixedAccountService::needs_generation(today, today, false));
        // Past due, no row yet: generate
        assert!(FixedAccountService::needs_generation(
            d(2026, 8, 1),
            today,
            false
        ));
        // Row already exists at the due date: skip
        assert!(!FixedAccountService::needs_generation(today, today, true));
        // Not yet due: skip
        assert!(!FixedAccountService::needs_generation(
            d(2026, 9, 1),
            today,
            false
        ));
    }

    #[test]
    fn test_overdue_detection() {
        let today = d(2026, 8, 23);

        assert!(FixedAccountService::is_overdue(
            OccurrenceStatus::Pending,
            d(2026, 8, 22),
            today
        ));
        // Due today is not overdue yet
        assert!(!FixedAccountService::is_overdue(
            OccurrenceStatus::Pending,
            today,
            today
        ));
        // Paid occurrences never flip
        assert!(!FixedAccountService::is_overdue(
            OccurrenceStatus::Paid,
            d(2026, 1, 1),
            today
        ));
    }

    #[rstest]
    #[case(d(2026, 8, 25), 3, true)] // 2 days ahead, window 3
    #[case(d(2026, 8, 26), 3, true)] // exactly at window edge
    #[case(d(2026, 8, 27), 3, false)] // past window
    #[case(d(2026, 8, 22), 3, false)] // already past due
    #[case(d(2026, 8, 23), 0, true)] // due today, zero window
    fn test_reminder_window(
        #[case] due: NaiveDate,
        #[case] window: i32,
        #[case] expected: bool,
    ) {
        let today = d(2026, 8, 23);
        assert_eq!(
            FixedAccountService::within_reminder_window(due, today, window),
            expected
        );
    }

    #[test]
    fn test_amount_validation() {
        assert!(FixedAccountService::validate_amount(dec!(0.01)).is_ok());
        assert!(FixedAccountService::validate_amount(dec!(0)).is_err());
        assert!(FixedAccountService::validate_amount(dec!(-10)).is_err());
    }
}
