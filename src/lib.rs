//! Budget Dashboard is the client side of a personal finance tracker.
//!
//! It fetches transactions and a server-computed insights summary from the
//! persistence service, totals this month's expenses by category and each
//! month's net cash flow, and renders the table, the two charts and the
//! insights list as an HTML page.
//!
//! The page is kept consistent by [Dashboard]: every mutation is followed by a
//! refresh that redraws the table, charts and insights together.

#![warn(missing_docs)]

mod api;
mod config;
mod dashboard;
mod error;
mod html;
mod insights;
mod logging;
mod transaction;

pub use api::{HttpApi, TransactionApi};
pub use config::{ClientConfig, DEFAULT_API_BASE};
pub use dashboard::{
    CATEGORY_SERIES_LABEL, ChartBackend, ChartKind, ChartRegistry, ChartSlot, Dashboard,
    DashboardView, EChartsBackend, EChartsInstance, HtmlDashboard, MonthKey, NET_SERIES_LABEL,
    NO_DATA_MESSAGE, RefreshOutcome, bucket_by_category, category_labels_and_values,
    chart_options, insight_lines, insights_list, net_by_month, net_labels_and_values,
    transactions_table,
};
pub use error::Error;
pub use html::{CURRENCY_SYMBOL, format_currency};
pub use insights::{CategoryTotal, InsightsSummary, Outlier};
pub use logging::LOG_BODY_LENGTH_LIMIT;
pub use transaction::{MutationResponse, NewTransaction, Transaction, TransactionId, TransactionType};
