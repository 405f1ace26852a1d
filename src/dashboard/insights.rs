//! Renders the server-computed insights summary as a bulleted list.

use maud::{Markup, html};

use crate::{html::format_currency, insights::InsightsSummary};

/// Shown in place of the top categories line when the month has no expenses.
pub const NO_DATA_MESSAGE: &str = "No data for this month yet. Add transactions to see insights.";

/// Builds the insight lines in display order.
///
/// 1. The top categories of the month, or [NO_DATA_MESSAGE] if there are none.
/// 2. The forecast for next month's net, tagged `surplus` when it is zero or
///    more and `deficit` otherwise. Omitted if there is no forecast.
/// 3. Each recommendation, verbatim.
/// 4. The first outlier. Further outliers are not shown.
pub fn insight_lines(summary: &InsightsSummary) -> Vec<Markup> {
    let mut lines = Vec::new();

    if summary.top_categories_this_month.is_empty() {
        lines.push(html! { (NO_DATA_MESSAGE) });
    } else {
        let top_categories = summary
            .top_categories_this_month
            .iter()
            .map(|category| format!("{}: {}", category.category, format_currency(category.total)))
            .collect::<Vec<_>>()
            .join(", ");

        lines.push(html! { "Top categories this month - " (top_categories) "." });
    }

    if let Some(forecast) = summary.forecast_next_month_net {
        let tag = if forecast >= 0.0 { "surplus" } else { "deficit" };

        lines.push(html! {
            "Projected next month net: " (format_currency(forecast)) " (" (tag) ")."
        });
    }

    for recommendation in &summary.recommendations {
        lines.push(html! { (recommendation) });
    }

    if let Some(outlier) = summary.outliers.first() {
        lines.push(html! {
            "Possible outlier in " b { (outlier.category) } ": "
            (format_currency(outlier.amount)) " on " (outlier.date)
            " (>" (format_currency(outlier.threshold)) ")."
        });
    }

    lines
}

/// The `ul#insights` list wrapping [insight_lines].
pub fn insights_list(summary: &InsightsSummary) -> Markup {
    html! {
        ul id="insights" class="list-disc list-inside space-y-1" {
            @for line in insight_lines(summary) {
                li { (line) }
            }
        }
    }
}
