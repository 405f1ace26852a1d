//! The page the dashboard draws into.
//!
//! [DashboardView] is what the refresh loop needs from a page: somewhere to
//! put the table and insights, the current form input, and a way to alert
//! the user. [HtmlDashboard] keeps that state in memory and renders it as a
//! complete HTML document.

use maud::{Markup, PreEscaped, html};
use time::Date;

use crate::{
    dashboard::charts::{ChartSlot, EChartsInstance},
    html::{
        BUTTON_PRIMARY_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, PAGE_CONTAINER_STYLE,
        base,
    },
    transaction::{NewTransaction, TransactionType},
};

const PAGE_TITLE: &str = "Dashboard";

const ALERT_STYLE: &str = "w-full p-4 mb-4 text-sm text-red-800 rounded-lg bg-red-50 \
    dark:bg-gray-800 dark:text-red-400";

/// The page elements the refresh loop writes to and reads from.
pub trait DashboardView {
    /// Replace the transactions table.
    fn show_table(&mut self, table: Markup);

    /// Replace the insights list.
    fn show_insights(&mut self, insights: Markup);

    /// The transaction form's current input.
    fn form_input(&self) -> NewTransaction;

    /// Clear the transaction form and set its date to `today`.
    fn reset_form(&mut self, today: Date);

    /// Show `message` to the user.
    fn alert(&mut self, message: &str);
}

/// A [DashboardView] held in memory and rendered to HTML on demand.
#[derive(Debug, Clone)]
pub struct HtmlDashboard {
    table: Option<Markup>,
    insights: Option<Markup>,
    form: NewTransaction,
    alert: Option<String>,
}

impl HtmlDashboard {
    /// An empty page with a blank form dated `today`.
    pub fn new(today: Date) -> Self {
        Self {
            table: None,
            insights: None,
            form: NewTransaction::blank(today),
            alert: None,
        }
    }

    /// Fill in the transaction form, as if the user had typed `input`.
    pub fn set_form_input(&mut self, input: NewTransaction) {
        self.form = input;
    }

    /// The most recent alert, if any.
    pub fn last_alert(&self) -> Option<&str> {
        self.alert.as_deref()
    }

    /// Render the whole document, initialising each of `charts` once the page has loaded.
    pub fn page(&self, charts: &[&EChartsInstance]) -> Markup {
        let content = html! {
            div class=(PAGE_CONTAINER_STYLE) {
                h1 class="text-2xl font-bold mb-6" { "Budget Tracker" }

                @if let Some(message) = &self.alert {
                    div id="alert" role="alert" class=(ALERT_STYLE) { (message) }
                }

                div class="w-full max-w-5xl space-y-8" {
                    (transaction_form(&self.form))

                    section class="grid grid-cols-1 lg:grid-cols-2 gap-4" {
                        @for slot in ChartSlot::ALL {
                            div id=(slot.element_id()) class="min-h-[380px] rounded-lg bg-white dark:bg-gray-800" {}
                        }
                    }

                    section {
                        h2 class="text-xl font-semibold mb-4" { "Transactions" }
                        @match &self.table {
                            Some(table) => { (table) }
                            None => { p class="text-gray-500" { "Loading..." } }
                        }
                    }

                    section {
                        h2 class="text-xl font-semibold mb-4" { "Insights" }
                        @match &self.insights {
                            Some(insights) => { (insights) }
                            None => { ul id="insights" {} }
                        }
                    }
                }
            }
        };

        base(PAGE_TITLE, &[charts_script(charts)], &content)
    }
}

impl DashboardView for HtmlDashboard {
    fn show_table(&mut self, table: Markup) {
        self.table = Some(table);
    }

    fn show_insights(&mut self, insights: Markup) {
        self.insights = Some(insights);
    }

    fn form_input(&self) -> NewTransaction {
        self.form.clone()
    }

    fn reset_form(&mut self, today: Date) {
        self.form = NewTransaction::blank(today);
    }

    fn alert(&mut self, message: &str) {
        self.alert = Some(message.to_owned());
    }
}

fn charts_script(charts: &[&EChartsInstance]) -> PreEscaped<String> {
    let script_content = charts
        .iter()
        .map(|chart| chart.init_script())
        .collect::<Vec<_>>()
        .join("\n");

    PreEscaped(format!(
        "document.addEventListener('DOMContentLoaded', function() {{\n{script_content}\n}});"
    ))
}

fn transaction_form(form: &NewTransaction) -> Markup {
    html! {
        form id="tx-form" {
            p id="tx-form-hint" class="mb-2 text-sm text-gray-500 dark:text-gray-400" {
                "This page is a snapshot. Add a transaction with "
                code { "dashboard add" }
                " and delete one with "
                code { "dashboard delete <ID>" }
                "."
            }

            fieldset disabled class="grid grid-cols-1 md:grid-cols-6 gap-4 items-end" {
                div {
                    label for="date" class=(FORM_LABEL_STYLE) { "Date" }
                    input id="date" name="date" type="date" value=(form.date) class=(FORM_TEXT_INPUT_STYLE);
                }

                div {
                    label for="amount" class=(FORM_LABEL_STYLE) { "Amount" }
                    input id="amount" name="amount" type="number" step="0.01" value=(form.amount) class=(FORM_TEXT_INPUT_STYLE);
                }

                div {
                    label for="type" class=(FORM_LABEL_STYLE) { "Type" }
                    select id="type" name="type" class=(FORM_TEXT_INPUT_STYLE) {
                        @for kind in [TransactionType::Expense, TransactionType::Income] {
                            option value=(kind) selected[form.kind == kind.as_str()] { (kind) }
                        }
                    }
                }

                div {
                    label for="category" class=(FORM_LABEL_STYLE) { "Category" }
                    input id="category" name="category" type="text" value=(form.category) class=(FORM_TEXT_INPUT_STYLE);
                }

                div {
                    label for="note" class=(FORM_LABEL_STYLE) { "Note" }
                    input id="note" name="note" type="text" value=(form.note) class=(FORM_TEXT_INPUT_STYLE);
                }

                button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Add" }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use maud::html;
    use scraper::{Html, Selector};
    use time::macros::date;

    use crate::{
        dashboard::charts::{ChartBackend, ChartKind, ChartSlot, EChartsBackend, chart_options},
        transaction::NewTransaction,
    };

    use super::{DashboardView, HtmlDashboard};

    fn select_attr(document: &Html, selector: &str, attr: &str) -> Option<String> {
        document
            .select(&Selector::parse(selector).unwrap())
            .next()
            .and_then(|element| element.value().attr(attr))
            .map(ToOwned::to_owned)
    }

    #[test]
    fn new_page_has_blank_form_dated_today() {
        let view = HtmlDashboard::new(date!(2024 - 05 - 15));

        let document = Html::parse_document(&view.page(&[]).into_string());

        assert_eq!(select_attr(&document, "#date", "value").as_deref(), Some("2024-05-15"));
        assert_eq!(select_attr(&document, "#amount", "value").as_deref(), Some(""));
        assert_eq!(
            select_attr(&document, "#type option[selected]", "value").as_deref(),
            Some("expense")
        );
    }

    #[test]
    fn reset_form_clears_input() {
        let mut view = HtmlDashboard::new(date!(2024 - 05 - 15));
        view.set_form_input(NewTransaction {
            date: "2024-05-01".to_owned(),
            amount: "12.50".to_owned(),
            kind: "income".to_owned(),
            category: "Gifts".to_owned(),
            note: "birthday".to_owned(),
        });

        view.reset_form(date!(2024 - 05 - 16));

        assert_eq!(view.form_input(), NewTransaction::blank(date!(2024 - 05 - 16)));
    }

    #[test]
    fn page_shows_table_insights_and_alert() {
        let mut view = HtmlDashboard::new(date!(2024 - 05 - 15));
        view.show_table(html! { table id="tx-table" {} });
        view.show_insights(html! { ul id="insights" { li { "hello" } } });
        view.alert("Error: bad amount");

        let document = Html::parse_document(&view.page(&[]).into_string());

        assert_eq!(document.select(&Selector::parse("#tx-table").unwrap()).count(), 1);
        assert_eq!(document.select(&Selector::parse("#insights li").unwrap()).count(), 1);
        let alert: String = document
            .select(&Selector::parse("#alert").unwrap())
            .next()
            .unwrap()
            .text()
            .collect();
        assert_eq!(alert, "Error: bad amount");
        assert_eq!(view.last_alert(), Some("Error: bad amount"));
    }

    #[test]
    fn form_controls_are_disabled_with_command_hint() {
        let view = HtmlDashboard::new(date!(2024 - 05 - 15));

        let document = Html::parse_document(&view.page(&[]).into_string());

        let fieldset = document
            .select(&Selector::parse("#tx-form fieldset").unwrap())
            .next()
            .unwrap();
        assert!(fieldset.value().attr("disabled").is_some());
        assert_eq!(
            fieldset
                .select(&Selector::parse("input, select, button").unwrap())
                .count(),
            6
        );
        let hint: String = document
            .select(&Selector::parse("#tx-form-hint").unwrap())
            .next()
            .unwrap()
            .text()
            .collect();
        assert!(hint.contains("dashboard add"), "got {hint}");
        assert!(hint.contains("dashboard delete <ID>"), "got {hint}");
    }

    #[test]
    fn page_has_a_container_per_chart_slot() {
        let view = HtmlDashboard::new(date!(2024 - 05 - 15));

        let document = Html::parse_document(&view.page(&[]).into_string());

        for slot in ChartSlot::ALL {
            let selector = format!("#{}", slot.element_id());
            assert_eq!(
                document.select(&Selector::parse(&selector).unwrap()).count(),
                1,
                "missing container for {slot:?}"
            );
        }
    }

    #[test]
    fn page_includes_chart_init_scripts() {
        let view = HtmlDashboard::new(date!(2024 - 05 - 15));
        let mut backend = EChartsBackend::default();
        let category = backend.construct(
            ChartSlot::Category,
            chart_options(ChartKind::CategoryPie, vec!["Food".to_owned()], vec![100.0], "This Month"),
        );
        let net = backend.construct(
            ChartSlot::Net,
            chart_options(ChartKind::NetLine, vec!["2024-05".to_owned()], vec![900.0], "Net"),
        );

        let page = view.page(&[&category, &net]).into_string();

        assert!(page.contains("DOMContentLoaded"));
        assert!(page.contains(&category.init_script()));
        assert!(page.contains(&net.init_script()));
    }
}
