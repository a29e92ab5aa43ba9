//! Statistics aggregation over fixed-account templates.
//!
//! A read-only pass computing counts by status, periodicity, category, and
//! supplier, with amounts normalized to monthly and yearly equivalents so
//! that a weekly subscription and a yearly insurance premium are comparable.

use super::types::{EntryKind, FixedAccountStats, TemplateSnapshot};

/// Aggregates statistics over a user's templates.
#[must_use]
pub fn aggregate_stats(templates: &[TemplateSnapshot]) -> FixedAccountStats {
    let mut stats = FixedAccountStats {
        total: templates.len() as u64,
        ..FixedAccountStats::default()
    };

    for t in templates {
        if t.is_active {
            stats.active += 1;
            if t.is_paid {
                stats.paid += 1;
            } else {
                stats.unpaid += 1;
            }
        } else {
            stats.inactive += 1;
        }

        *stats
            .by_periodicity
            .entry(t.periodicity.to_string())
            .or_insert(0) += 1;
        *stats.by_category.entry(t.category.clone()).or_insert(0) += 1;
        if let Some(supplier) = &t.supplier {
            *stats.by_supplier.entry(supplier.clone()).or_insert(0) += 1;
        }

        // Normalized totals only count templates that still generate occurrences.
        if t.is_active {
            let monthly = t.periodicity.monthly_equivalent(t.amount);
            let yearly = t.periodicity.yearly_equivalent(t.amount);
            match t.kind {
                EntryKind::Expense => {
                    stats.monthly_expense += monthly;
                    stats.yearly_expense += yearly;
                }
                EntryKind::Income => {
                    stats.monthly_income += monthly;
                    stats.yearly_income += yearly;
                }
            }
        }
    }

    stats.monthly_expense = stats.monthly_expense.round_dp(2);
    stats.monthly_income = stats.monthly_income.round_dp(2);
    stats.yearly_expense = stats.yearly_expense.round_dp(2);
    stats.yearly_income = stats.yearly_income.round_dp(2);
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recurrence::Periodicity;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn snapshot(
        amount: Decimal,
        kind: EntryKind,
        periodicity: Periodicity,
        is_active: bool,
        is_paid: bool,
        category: &str,
        supplier: Option<&str>,
    ) -> TemplateSnapshot {
        TemplateSnapshot {
            amount,
            kind,
            periodicity,
            is_active,
            is_paid,
            category: category.to_string(),
            supplier: supplier.map(ToString::to_string),
        }
    }

    #[test]
    fn test_empty_input() {
        let stats = aggregate_stats(&[]);
        assert_eq!(stats.total, 0);
        assert_eq!(stats.monthly_expense, Decimal::ZERO);
        assert!(stats.by_category.is_empty());
    }

    #[test]
    fn test_status_counts() {
        let templates = vec![
            snapshot(
                dec!(1200),
                EntryKind::Expense,
                Periodicity::Monthly,
                true,
                true,
                "Housing",
                None,
            ),
            snapshot(
                dec!(45),
                EntryKind::Expense,
                Periodicity::Monthly,
                true,
                false,
                "Subscriptions",
                Some("StreamCo"),
            ),
            snapshot(
                dec!(80),
                EntryKind::Expense,
                Periodicity::Weekly,
                false,
                false,
                "Subscriptions",
                Some("GymCo"),
            ),
        ];

        let stats = aggregate_stats(&templates);
        assert_eq!(stats.total, 3);
        assert_eq!(stats.active, 2);
        assert_eq!(stats.inactive, 1);
        assert_eq!(stats.paid, 1);
        assert_eq!(stats.unpaid, 1);
        assert_eq!(stats.by_category["Subscriptions"], 2);
        assert_eq!(stats.by_supplier["StreamCo"], 1);
        assert_eq!(stats.by_periodicity["monthly"], 2);
    }

    #[test]
    fn test_normalization_factors() {
        // weekly 100 -> 433/month, quarterly 300 -> 100/month, yearly 1200 -> 100/month
        let templates = vec![
            snapshot(
                dec!(100),
                EntryKind::Expense,
                Periodicity::Weekly,
                true,
                false,
                "A",
                None,
            ),
            snapshot(
                dec!(300),
                EntryKind::Expense,
                Periodicity::Quarterly,
                true,
                false,
                "B",
                None,
            ),
            snapshot(
                dec!(1200),
                EntryKind::Income,
                Periodicity::Yearly,
                true,
                false,
                "C",
                None,
            ),
        ];

        let stats = aggregate_stats(&templates);
        assert_eq!(stats.monthly_expense, dec!(533));
        assert_eq!(stats.monthly_income, dec!(100));
        assert_eq!(stats.yearly_expense, dec!(6400));
        assert_eq!(stats.yearly_income, dec!(1200));
    }

    #[test]
    fn test_inactive_excluded_from_totals() {
        let templates = vec![snapshot(
            dec!(500),
            EntryKind::Expense,
            Periodicity::Monthly,
            false,
            false,
            "Old",
            None,
        )];

        let stats = aggregate_stats(&templates);
        assert_eq!(stats.monthly_expense, Decimal::ZERO);
        // Still counted in breakdowns
        assert_eq!(stats.by_category["Old"], 1);
    }

}
