use super::*;
use rust_decimal_macros::dec;

fn id(n: u8) -> Uuid {
    Uuid::from_bytes([n; 16])
}

#[test]
fn test_expense_totals_groups_by_account() {
    let a = id(1);
    let b = id(2);
    let totals = expense_totals([
        (a, EntryKind::Expense, dec!(100)),
        (a, EntryKind::Expense, dec!(50.50)),
        (b, EntryKind::Expense, dec!(10)),
    ]);

    assert_eq!(totals[&a], dec!(150.50));
    assert_eq!(totals[&b], dec!(10));
}

#[test]
fn test_expense_totals_ignores_income() {
    let a = id(1);
    let totals = expense_totals([
        (a, EntryKind::Income, dec!(5000)),
        (a, EntryKind::Expense, dec!(75)),
    ]);

    assert_eq!(totals[&a], dec!(75));
    assert_eq!(totals.len(), 1);
}

#[test]
fn test_expense_totals_empty_batch() {
    let items: [(Uuid, EntryKind, Decimal); 0] = [];
    assert!(expense_totals(items).is_empty());
}

#[test]
fn test_dedup_ids_collapses_repeats() {
    // A batch like [x, x] must pay x once, not debit the account twice.
    let a = id(1);
    let b = id(2);
    assert_eq!(dedup_ids(&[a, a, b, a, b]), vec![a, b]);
}

#[test]
fn test_dedup_ids_preserves_first_seen_order() {
    let ids = [id(9), id(3), id(7)];
    assert_eq!(dedup_ids(&ids), ids.to_vec());
}

#[test]
fn test_dedup_ids_empty() {
    assert!(dedup_ids(&[]).is_empty());
}

#[test]
fn test_mixed_batch_requires_only_expense_cover() {
    // An income and an expense on the same account: the requirement is the
    // expense alone, the income only credits.
    let a = id(3);
    let totals = expense_totals([
        (a, EntryKind::Income, dec!(200)),
        (a, EntryKind::Expense, dec!(120)),
        (a, EntryKind::Expense, dec!(80)),
    ]);

    assert_eq!(totals[&a], dec!(200));
}
