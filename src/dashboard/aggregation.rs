//! Transaction data aggregation for the dashboard charts.
//!
//! Provides functions to total the current month's expenses by category and
//! to calculate the net cash flow of every month, and to turn both into the
//! parallel label/value sequences the charts are built from.

use std::{collections::HashMap, fmt::Display, str::FromStr};

use time::{Date, Month};

use crate::{
    Error,
    transaction::{Transaction, TransactionType},
};

/// A calendar month, displayed and parsed as `YYYY-MM`.
///
/// Month keys order chronologically, which for four digit years is the same
/// as the lexicographic order of their `YYYY-MM` strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthKey {
    year: i32,
    /// 1 to 12.
    month: u8,
}

impl MonthKey {
    /// The key for `month` of `year`.
    pub fn new(year: i32, month: Month) -> Self {
        Self {
            year,
            month: month as u8,
        }
    }

    /// The month that `date` falls in.
    pub fn of(date: Date) -> Self {
        Self::new(date.year(), date.month())
    }

    /// Whether `date` falls in this month.
    pub fn contains(self, date: Date) -> bool {
        Self::of(date) == self
    }
}

impl Display for MonthKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for MonthKey {
    type Err = Error;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::InvalidMonth(text.to_owned());

        let (year, month) = text.split_once('-').ok_or_else(invalid)?;

        if year.len() != 4 || month.len() != 2 {
            return Err(invalid());
        }

        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u8 = month.parse().map_err(|_| invalid())?;
        let month = Month::try_from(month).map_err(|_| invalid())?;

        Ok(Self::new(year, month))
    }
}

/// Totals the expenses of `reference_month` by category.
///
/// Income and expenses from other months are ignored. Only categories with
/// at least one matching expense appear in the result.
///
/// # Returns
/// HashMap mapping each category to the sum of its expense amounts. The sums
/// do not depend on the order of `transactions`.
pub fn bucket_by_category(
    transactions: &[Transaction],
    reference_month: MonthKey,
) -> HashMap<String, f64> {
    let mut amounts: HashMap<String, Vec<f64>> = HashMap::new();

    for transaction in transactions.iter().filter(|t| {
        t.kind == TransactionType::Expense && reference_month.contains(t.date)
    }) {
        amounts
            .entry(transaction.category.clone())
            .or_default()
            .push(transaction.amount);
    }

    amounts
        .into_iter()
        .map(|(category, amounts)| (category, sum_sorted(amounts)))
        .collect()
}

/// Converts category totals into labels and values for charting.
///
/// # Returns
/// Tuple of (category names sorted alphabetically, corresponding totals).
pub fn category_labels_and_values(totals: &HashMap<String, f64>) -> (Vec<String>, Vec<f64>) {
    let mut labels: Vec<String> = totals.keys().cloned().collect();
    labels.sort();

    let values = labels.iter().map(|label| totals[label]).collect();

    (labels, values)
}

/// Calculates the net cash flow (income minus expenses) of each month.
///
/// Months without transactions are not filled in. As with
/// [bucket_by_category], the order of `transactions` does not affect the sums.
///
/// # Returns
/// Vector of (month, net) pairs in ascending chronological order.
pub fn net_by_month(transactions: &[Transaction]) -> Vec<(MonthKey, f64)> {
    let mut amounts: HashMap<MonthKey, Vec<f64>> = HashMap::new();

    for transaction in transactions {
        amounts
            .entry(MonthKey::of(transaction.date))
            .or_default()
            .push(transaction.signed_amount());
    }

    let mut series: Vec<_> = amounts
        .into_iter()
        .map(|(month, amounts)| (month, sum_sorted(amounts)))
        .collect();
    series.sort_unstable_by_key(|(month, _)| *month);
    series
}

/// Sums `amounts` in ascending order, so any permutation gives the same total.
fn sum_sorted(mut amounts: Vec<f64>) -> f64 {
    amounts.sort_unstable_by(f64::total_cmp);
    amounts.into_iter().sum()
}

/// Converts a monthly net series into labels and values for charting.
///
/// # Returns
/// Tuple of (`YYYY-MM` labels, corresponding net values), in the series' order.
pub fn net_labels_and_values(series: &[(MonthKey, f64)]) -> (Vec<String>, Vec<f64>) {
    series
        .iter()
        .map(|(month, net)| (month.to_string(), *net))
        .unzip()
}
