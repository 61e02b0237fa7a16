//! This file defines the `MonthlySummary` response model and the ordered
//! per-category totals it contains.

use std::fmt;

use rust_decimal::Decimal;
use serde::{
    Deserialize, Deserializer, Serialize, Serializer,
    de::{MapAccess, Visitor},
    ser::SerializeMap,
};

use crate::models::Amount;

/// Per-category totals, ordered by descending amount.
///
/// Serialized as a JSON object whose key order is meaningful, so this is a
/// vector of pairs rather than a map type that would lose the order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CategoryTotals(Vec<(String, Amount)>);

impl CategoryTotals {
    /// Wrap an already ordered list of `(category name, total)` pairs.
    pub fn new(totals: Vec<(String, Amount)>) -> Self {
        Self(totals)
    }

    /// The ordered `(category name, total)` pairs.
    pub fn as_slice(&self) -> &[(String, Amount)] {
        &self.0
    }

    /// Whether there are no categories with entries in the period.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The sum of all category totals.
    pub fn total(&self) -> Amount {
        self.0.iter().map(|(_, amount)| *amount).sum()
    }
}

impl Serialize for CategoryTotals {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;

        for (name, amount) in &self.0 {
            map.serialize_entry(name, amount)?;
        }

        map.end()
    }
}

impl<'de> Deserialize<'de> for CategoryTotals {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct TotalsVisitor;

        impl<'de> Visitor<'de> for TotalsVisitor {
            type Value = CategoryTotals;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a map of category names to amounts")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut totals = Vec::with_capacity(access.size_hint().unwrap_or(0));

                // Entries are kept in document order.
                while let Some(entry) = access.next_entry()? {
                    totals.push(entry);
                }

                Ok(CategoryTotals(totals))
            }
        }

        deserializer.deserialize_map(TotalsVisitor)
    }
}

/// The aggregated view of one user's ledger for one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlySummary {
    /// The year of the summarized period.
    pub year: i32,
    /// The month of the summarized period, in `[1, 12]`.
    pub month: u8,
    /// The sum of all incomes in the period.
    pub total_income: Amount,
    /// The sum of all expenses in the period.
    pub total_expense: Amount,
    /// Incomes minus expenses. May be negative.
    pub balance: Decimal,
    /// Income totals per category, ordered by descending amount.
    pub income_by_category: CategoryTotals,
    /// Expense totals per category, ordered by descending amount.
    pub expense_by_category: CategoryTotals,
}

#[cfg(test)]
mod category_totals_tests {
    use rust_decimal::Decimal;

    use crate::models::Amount;

    use super::CategoryTotals;

    fn amount(cents: i64) -> Amount {
        Amount::new(Decimal::new(cents, 2)).unwrap()
    }

    #[test]
    fn serializes_in_given_order() {
        let totals = CategoryTotals::new(vec![
            ("Salary".to_string(), amount(150_000)),
            ("Freelance".to_string(), amount(20_000)),
        ]);

        let json = serde_json::to_string(&totals).unwrap();

        assert_eq!(json, r#"{"Salary":"1500.00","Freelance":"200.00"}"#);
    }

    #[test]
    fn deserializes_preserving_document_order() {
        let totals: CategoryTotals =
            serde_json::from_str(r#"{"Rent":"800.00","Food":"450.50"}"#).unwrap();

        assert_eq!(
            totals.as_slice(),
            &[
                ("Rent".to_string(), amount(80_000)),
                ("Food".to_string(), amount(45_050)),
            ]
        );
    }

    #[test]
    fn total_sums_all_categories() {
        let totals = CategoryTotals::new(vec![
            ("Rent".to_string(), amount(80_000)),
            ("Food".to_string(), amount(45_050)),
        ]);

        assert_eq!(totals.total(), amount(125_050));
    }

    #[test]
    fn empty_totals_serialize_as_empty_object() {
        let json = serde_json::to_string(&CategoryTotals::default()).unwrap();

        assert_eq!(json, "{}");
    }
}
