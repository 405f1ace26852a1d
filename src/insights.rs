//! The insights summary computed by the server and returned by `GET /api/insights`.
//!
//! The dashboard does not recompute any of these values, it only renders them.

use serde::Deserialize;
use time::Date;

use crate::transaction::iso_date;

/// Server-computed analytics for the current month.
///
/// Every field may be missing from the response, in which case it takes its
/// empty value. Fields the dashboard does not render are ignored.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct InsightsSummary {
    /// The largest expense categories this month, largest first.
    #[serde(default)]
    pub top_categories_this_month: Vec<CategoryTotal>,
    /// The projected net (income minus expenses) for next month, if the
    /// server could compute one.
    #[serde(default)]
    pub forecast_next_month_net: Option<f64>,
    /// Free-text budgeting recommendations.
    #[serde(default)]
    pub recommendations: Vec<String>,
    /// Unusually large expenses.
    #[serde(default)]
    pub outliers: Vec<Outlier>,
}

/// The total spent in one category.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CategoryTotal {
    /// The category label.
    pub category: String,
    /// The amount spent in the category.
    pub total: f64,
}

/// An expense that exceeded the usual spending for its category.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Outlier {
    /// The category of the expense.
    pub category: String,
    /// The amount of the expense.
    pub amount: f64,
    /// The day of the expense.
    #[serde(with = "iso_date")]
    pub date: Date,
    /// The amount above which an expense in this category counts as unusual.
    pub threshold: f64,
}
