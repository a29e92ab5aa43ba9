//! Periodicity calendar arithmetic for recurring obligations.
//!
//! Due dates advance by calendar units, never by fixed day counts: a monthly
//! obligation due on Jan 31 falls due on Feb 28 (or 29), not on Mar 2.

use chrono::{Days, Months, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// How often a fixed account falls due.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Periodicity {
    /// Due every day.
    Daily,
    /// Due every 7 days.
    Weekly,
    /// Due on the same day of each month (clamped to month length).
    Monthly,
    /// Due every 3 months.
    Quarterly,
    /// Due on the same date each year (Feb 29 clamps to Feb 28).
    Yearly,
}

impl Periodicity {
    /// All periodicities, in ascending frequency order.
    pub const ALL: [Self; 5] = [
        Self::Daily,
        Self::Weekly,
        Self::Monthly,
        Self::Quarterly,
        Self::Yearly,
    ];

    /// Advances a due date by one period.
    ///
    /// Month-based periods clamp the day to the target month's length.
    /// Calendar overflow (far beyond year 200,000) clamps to `NaiveDate::MAX`.
    #[must_use]
    pub fn advance(self, date: NaiveDate) -> NaiveDate {
        let next = match self {
            Self::Daily => date.checked_add_days(Days::new(1)),
            Self::Weekly => date.checked_add_days(Days::new(7)),
            Self::Monthly => date.checked_add_months(Months::new(1)),
            Self::Quarterly => date.checked_add_months(Months::new(3)),
            Self::Yearly => date.checked_add_months(Months::new(12)),
        };
        next.unwrap_or(NaiveDate::MAX)
    }

    /// Average number of occurrences per month, for normalized reporting.
    ///
    /// Weekly uses the conventional 4.33 weeks/month factor; daily uses 30.
    #[must_use]
    pub fn occurrences_per_month(self) -> Decimal {
        match self {
            Self::Daily => Decimal::from(30),
            Self::Weekly => Decimal::new(433, 2),
            Self::Monthly => Decimal::ONE,
            Self::Quarterly => Decimal::ONE / Decimal::from(3),
            Self::Yearly => Decimal::ONE / Decimal::from(12),
        }
    }

    /// Number of occurrences per year, for normalized reporting.
    #[must_use]
    pub fn occurrences_per_year(self) -> Decimal {
        match self {
            Self::Daily => Decimal::from(365),
            Self::Weekly => Decimal::from(52),
            Self::Monthly => Decimal::from(12),
            Self::Quarterly => Decimal::from(4),
            Self::Yearly => Decimal::ONE,
        }
    }

    /// Normalizes a per-occurrence amount to its monthly equivalent.
    #[must_use]
    pub fn monthly_equivalent(self, amount: Decimal) -> Decimal {
        (amount * self.occurrences_per_month()).round_dp(2)
    }

    /// Normalizes a per-occurrence amount to its yearly equivalent.
    #[must_use]
    pub fn yearly_equivalent(self, amount: Decimal) -> Decimal {
        (amount * self.occurrences_per_year()).round_dp(2)
    }
}

impl std::fmt::Display for Periodicity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Daily => write!(f, "daily"),
            Self::Weekly => write!(f, "weekly"),
            Self::Monthly => write!(f, "monthly"),
            Self::Quarterly => write!(f, "quarterly"),
            Self::Yearly => write!(f, "yearly"),
        }
    }
}

impl std::str::FromStr for Periodicity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "daily" => Ok(Self::Daily),
            "weekly" => Ok(Self::Weekly),
            "monthly" => Ok(Self::Monthly),
            "quarterly" => Ok(Self::Quarterly),
            "yearly" => Ok(Self::Yearly),
            other => Err(format!("unknown periodicity: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;
    use proptest::prelude::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[rstest]
    #[case(Periodicity::Daily, d(2026, 3, 15), d(2026, 3, 16))]
    #[case(Periodicity::Daily, d(2026, 12, 31), d(2027, 1, 1))]
    #[case(Periodicity::Weekly, d(2026, 2, 26), d(2026, 3, 5))]
    #[case(Periodicity::Monthly, d(2026, 3, 15), d(2026, 4, 15))]
    #[case(Periodicity::Quarterly, d(2026, 1, 10), d(2026, 4, 10))]
    #[case(Periodicity::Yearly, d(2026, 7, 1), d(2027, 7, 1))]
    fn test_advance_plain_dates(
        #[case] periodicity: Periodicity,
        #[case] from: NaiveDate,
        #[case] expected: NaiveDate,
    ) {
        assert_eq!(periodicity.advance(from), expected);
    }

    #[test]
    fn test_monthly_clamps_to_month_end() {
        // Jan 31 -> Feb 28 in a non-leap year
        assert_eq!(Periodicity::Monthly.advance(d(2026, 1, 31)), d(2026, 2, 28));
        // Jan 31 -> Feb 29 in a leap year
        assert_eq!(Periodicity::Monthly.advance(d(2028, 1, 31)), d(2028, 2, 29));
        // Clamped dates do not creep: Feb 28 advances to Mar 28, not Mar 31
        assert_eq!(Periodicity::Monthly.advance(d(2026, 2, 28)), d(2026, 3, 28));
    }

    #[test]
    fn test_quarterly_clamps_to_month_end() {
        // Nov 30 -> Feb 28 (2027 is not a leap year)
        assert_eq!(
            Periodicity::Quarterly.advance(d(2026, 11, 30)),
            d(2027, 2, 28)
        );
        assert_eq!(
            Periodicity::Quarterly.advance(d(2026, 5, 31)),
            d(2026, 8, 31)
        );
    }

    #[test]
    fn test_yearly_clamps_leap_day() {
        assert_eq!(Periodicity::Yearly.advance(d(2028, 2, 29)), d(2029, 2, 28));
    }

    #[test]
    fn test_monthly_equivalents() {
        assert_eq!(Periodicity::Weekly.monthly_equivalent(dec!(100)), dec!(433));
        assert_eq!(
            Periodicity::Quarterly.monthly_equivalent(dec!(300)),
            dec!(100)
        );
        assert_eq!(
            Periodicity::Yearly.monthly_equivalent(dec!(1200)),
            dec!(100)
        );
        assert_eq!(Periodicity::Daily.monthly_equivalent(dec!(10)), dec!(300));
        assert_eq!(
            Periodicity::Monthly.monthly_equivalent(dec!(250)),
            dec!(250)
        );
    }

    #[test]
    fn test_yearly_equivalents() {
        assert_eq!(Periodicity::Weekly.yearly_equivalent(dec!(100)), dec!(5200));
        assert_eq!(
            Periodicity::Quarterly.yearly_equivalent(dec!(300)),
            dec!(1200)
        );
        assert_eq!(Periodicity::Monthly.yearly_equivalent(dec!(100)), dec!(1200));
    }

    #[test]
    fn test_parse_roundtrip() {
        for p in Periodicity::ALL {
            assert_eq!(p.to_string().parse::<Periodicity>().unwrap(), p);
        }
        assert!("fortnightly".parse::<Periodicity>().is_err());
    }

    proptest! {
        /// Advancing always moves the date forward.
        #[test]
        fn test_advance_is_strictly_increasing(
            days in 0u32..40_000,
            idx in 0usize..5,
        ) {
            let date = d(2000, 1, 1) + Days::new(u64::from(days));
            let p = Periodicity::ALL[idx];
            prop_assert!(p.advance(date) > date);
        }

        /// For days that exist in every month, monthly advance preserves the day.
        #[test]
        fn test_monthly_preserves_safe_days(
            day in 1u32..=28,
            month in 1u32..=12,
            year in 2000i32..2100,
        ) {
            let date = d(year, month, day);
            let next = Periodicity::Monthly.advance(date);
            prop_assert_eq!(next.day(), day);
        }
    }
}
