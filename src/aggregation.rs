//! This file defines the functions that aggregate a user's ledger into the
//! monthly summary: per-category totals, overall totals and the balance.

use std::collections::HashMap;

use crate::{
    Error,
    models::{Amount, CategoryTotals, Kind, LedgerEntry, MonthlySummary, Period, UserID},
    stores::{LedgerQuery, LedgerStore},
};

/// Aggregate one user's ledger entries for one calendar month.
///
/// A month with no entries produces a summary with zero totals and empty
/// category maps, not an error.
///
/// # Errors
///
/// This function will return an [Error::SqlError] if the underlying store
/// fails.
pub fn compute_monthly_summary<L>(
    ledger_store: &L,
    user_id: UserID,
    period: Period,
) -> Result<MonthlySummary, Error>
where
    L: LedgerStore,
{
    let incomes = ledger_store.get_query(LedgerQuery {
        user_id,
        kind: Kind::Income,
        date_range: Some(period.date_range()),
    })?;
    let expenses = ledger_store.get_query(LedgerQuery {
        user_id,
        kind: Kind::Expense,
        date_range: Some(period.date_range()),
    })?;

    let income_by_category = sum_by_category(&incomes);
    let expense_by_category = sum_by_category(&expenses);

    let total_income = income_by_category.total();
    let total_expense = expense_by_category.total();
    let balance = total_income.as_decimal() - total_expense.as_decimal();

    Ok(MonthlySummary {
        year: period.year(),
        month: period.month(),
        total_income,
        total_expense,
        balance,
        income_by_category,
        expense_by_category,
    })
}

/// Sum entries per category and order the result by descending total.
///
/// The sort is stable, so categories with equal totals keep the order in
/// which they were first encountered in `entries`.
pub fn sum_by_category(entries: &[LedgerEntry]) -> CategoryTotals {
    let mut totals: Vec<(String, Amount)> = Vec::new();
    let mut index_by_name: HashMap<&str, usize> = HashMap::new();

    for entry in entries {
        match index_by_name.get(entry.category_name.as_str()) {
            Some(&index) => totals[index].1 += entry.amount,
            None => {
                index_by_name.insert(&entry.category_name, totals.len());
                totals.push((entry.category_name.clone(), entry.amount));
            }
        }
    }

    totals.sort_by(|(_, left), (_, right)| right.cmp(left));

    CategoryTotals::new(totals)
}

#[cfg(test)]
mod sum_by_category_tests {
    use time::macros::date;

    use crate::models::{Amount, Kind, LedgerEntry, UserID};

    use super::sum_by_category;

    fn entry(category: &str, amount: &str) -> LedgerEntry {
        LedgerEntry {
            id: 0,
            user_id: UserID::new(1),
            kind: Kind::Expense,
            category_id: 0,
            category_name: category.to_string(),
            amount: amount.parse().unwrap(),
            description: None,
            date: date!(2025 - 08 - 15),
        }
    }

    #[test]
    fn empty_ledger_produces_empty_totals() {
        let totals = sum_by_category(&[]);

        assert!(totals.is_empty());
        assert_eq!(totals.total(), Amount::zero());
    }

    #[test]
    fn entries_are_summed_per_category() {
        let entries = [
            entry("Food", "100.00"),
            entry("Rent", "800.00"),
            entry("Food", "350.50"),
        ];

        let totals = sum_by_category(&entries);

        assert_eq!(
            totals.as_slice(),
            &[
                ("Rent".to_string(), "800.00".parse().unwrap()),
                ("Food".to_string(), "450.50".parse().unwrap()),
            ]
        );
    }

    #[test]
    fn categories_are_ordered_by_descending_total() {
        let entries = [
            entry("Coffee", "4.50"),
            entry("Rent", "800.00"),
            entry("Groceries", "120.00"),
        ];

        let totals = sum_by_category(&entries);

        let names: Vec<&str> = totals
            .as_slice()
            .iter()
            .map(|(name, _)| name.as_str())
            .collect();
        assert_eq!(names, vec!["Rent", "Groceries", "Coffee"]);
    }

    #[test]
    fn equal_totals_keep_first_encounter_order() {
        let entries = [
            entry("Books", "50.00"),
            entry("Games", "50.00"),
            entry("Music", "50.00"),
        ];

        let totals = sum_by_category(&entries);

        let names: Vec<&str> = totals
            .as_slice()
            .iter()
            .map(|(name, _)| name.as_str())
            .collect();
        assert_eq!(names, vec!["Books", "Games", "Music"]);
    }

    #[test]
    fn many_small_amounts_sum_exactly() {
        let entries: Vec<_> = (0..1000).map(|_| entry("Coffee", "0.10")).collect();

        let totals = sum_by_category(&entries);

        assert_eq!(totals.as_slice()[0].1, "100.00".parse().unwrap());
    }
}

#[cfg(test)]
mod compute_monthly_summary_tests {
    use time::{Date, macros::date};

    use crate::{
        Error,
        models::{DatabaseID, Kind, LedgerEntry, NewEntry, Period, UserID},
        stores::{LedgerQuery, LedgerStore},
    };

    use super::compute_monthly_summary;

    /// A ledger store that serves a fixed set of entries, applying the same
    /// filters the real store would.
    struct FakeLedgerStore {
        entries: Vec<LedgerEntry>,
    }

    impl LedgerStore for FakeLedgerStore {
        fn create(&self, _entry: NewEntry) -> Result<LedgerEntry, Error> {
            unimplemented!()
        }

        fn get_query(&self, query: LedgerQuery) -> Result<Vec<LedgerEntry>, Error> {
            let mut entries: Vec<LedgerEntry> = self
                .entries
                .iter()
                .filter(|entry| entry.user_id == query.user_id && entry.kind == query.kind)
                .filter(|entry| {
                    query
                        .date_range
                        .as_ref()
                        .is_none_or(|range| range.contains(&entry.date))
                })
                .cloned()
                .collect();
            entries.sort_by(|a, b| b.date.cmp(&a.date));

            Ok(entries)
        }

        fn delete(&self, _entry_id: DatabaseID, _kind: Kind, _user_id: UserID) -> Result<(), Error> {
            unimplemented!()
        }
    }

    fn entry(
        user_id: i64,
        kind: Kind,
        category: &str,
        amount: &str,
        date: Date,
    ) -> LedgerEntry {
        LedgerEntry {
            id: 0,
            user_id: UserID::new(user_id),
            kind,
            category_id: 0,
            category_name: category.to_string(),
            amount: amount.parse().unwrap(),
            description: None,
            date,
        }
    }

    #[test]
    fn summary_aggregates_one_month_of_one_user() {
        let store = FakeLedgerStore {
            entries: vec![
                entry(1, Kind::Income, "Salary", "1500.00", date!(2025 - 08 - 01)),
                entry(1, Kind::Income, "Freelance", "200.00", date!(2025 - 08 - 15)),
                entry(1, Kind::Expense, "Rent", "800.00", date!(2025 - 08 - 03)),
                entry(1, Kind::Expense, "Food", "100.00", date!(2025 - 08 - 10)),
                entry(1, Kind::Expense, "Food", "350.50", date!(2025 - 08 - 24)),
                // Outside the period or owned by someone else.
                entry(1, Kind::Income, "Salary", "1500.00", date!(2025 - 07 - 01)),
                entry(2, Kind::Expense, "Rent", "999.00", date!(2025 - 08 - 03)),
            ],
        };

        let summary =
            compute_monthly_summary(&store, UserID::new(1), Period::new(2025, 8).unwrap())
                .unwrap();

        assert_eq!(summary.year, 2025);
        assert_eq!(summary.month, 8);
        assert_eq!(summary.total_income, "1700.00".parse().unwrap());
        assert_eq!(summary.total_expense, "1250.50".parse().unwrap());
        assert_eq!(summary.balance.to_string(), "449.50");
        assert_eq!(
            summary.income_by_category.as_slice(),
            &[
                ("Salary".to_string(), "1500.00".parse().unwrap()),
                ("Freelance".to_string(), "200.00".parse().unwrap()),
            ]
        );
        assert_eq!(
            summary.expense_by_category.as_slice(),
            &[
                ("Rent".to_string(), "800.00".parse().unwrap()),
                ("Food".to_string(), "450.50".parse().unwrap()),
            ]
        );
    }

    #[test]
    fn empty_month_produces_zero_summary() {
        let store = FakeLedgerStore { entries: vec![] };

        let summary =
            compute_monthly_summary(&store, UserID::new(1), Period::new(2025, 8).unwrap())
                .unwrap();

        assert_eq!(summary.total_income.to_string(), "0.00");
        assert_eq!(summary.total_expense.to_string(), "0.00");
        assert_eq!(summary.balance.to_string(), "0.00");
        assert!(summary.income_by_category.is_empty());
        assert!(summary.expense_by_category.is_empty());
    }

    #[test]
    fn balance_can_be_negative() {
        let store = FakeLedgerStore {
            entries: vec![
                entry(1, Kind::Income, "Salary", "100.00", date!(2025 - 08 - 01)),
                entry(1, Kind::Expense, "Rent", "800.00", date!(2025 - 08 - 03)),
            ],
        };

        let summary =
            compute_monthly_summary(&store, UserID::new(1), Period::new(2025, 8).unwrap())
                .unwrap();

        assert_eq!(summary.balance.to_string(), "-700.00");
    }

    #[test]
    fn entries_on_month_boundaries_are_included() {
        let store = FakeLedgerStore {
            entries: vec![
                entry(1, Kind::Expense, "Rent", "1.00", date!(2025 - 08 - 01)),
                entry(1, Kind::Expense, "Rent", "2.00", date!(2025 - 08 - 31)),
            ],
        };

        let summary =
            compute_monthly_summary(&store, UserID::new(1), Period::new(2025, 8).unwrap())
                .unwrap();

        assert_eq!(summary.total_expense, "3.00".parse().unwrap());
    }
}
