//! Dashboard module
//!
//! Aggregates the transactions into the category and monthly net charts,
//! renders the transactions table and insights list, and keeps them all in
//! step with the service through [Dashboard].

mod aggregation;
mod charts;
mod insights;
mod refresh;
mod tables;
mod view;

#[cfg(test)]
mod test_utils;

pub use aggregation::{
    MonthKey, bucket_by_category, category_labels_and_values, net_by_month,
    net_labels_and_values,
};
pub use charts::{
    ChartBackend, ChartKind, ChartRegistry, ChartSlot, EChartsBackend, EChartsInstance,
    chart_options,
};
pub use insights::{NO_DATA_MESSAGE, insight_lines, insights_list};
pub use refresh::{CATEGORY_SERIES_LABEL, Dashboard, NET_SERIES_LABEL, RefreshOutcome};
pub use tables::transactions_table;
pub use view::{DashboardView, HtmlDashboard};
