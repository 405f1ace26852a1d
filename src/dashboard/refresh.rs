//! The refresh loop that keeps the table, charts and insights consistent.

use std::cell::{Cell, Ref, RefCell, RefMut};

use maud::Markup;
use time::Date;

use crate::{
    Error,
    api::TransactionApi,
    dashboard::{
        aggregation::{
            MonthKey, bucket_by_category, category_labels_and_values, net_by_month,
            net_labels_and_values,
        },
        charts::{ChartBackend, ChartKind, ChartRegistry, ChartSlot, EChartsBackend},
        insights::insights_list,
        tables::transactions_table,
        view::{DashboardView, HtmlDashboard},
    },
    insights::InsightsSummary,
    transaction::{Transaction, TransactionId},
};

/// The series label of the category chart.
pub const CATEGORY_SERIES_LABEL: &str = "This Month";
/// The series label of the net chart.
pub const NET_SERIES_LABEL: &str = "Net (Income - Expenses)";

/// How a refresh cycle ended when both fetches succeeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// The cycle's data was drawn to the page.
    Rendered,
    /// A later cycle started while this one was fetching, so its data was dropped.
    Superseded,
}

/// Drives a [DashboardView] and the charts from the service behind a [TransactionApi].
///
/// All methods take `&self` so that several cycles can be in flight on one
/// thread. Each cycle is numbered when it starts and only the most recently
/// started cycle may draw.
pub struct Dashboard<A, B: ChartBackend, V> {
    api: A,
    charts: RefCell<ChartRegistry<B>>,
    view: RefCell<V>,
    latest_cycle: Cell<u64>,
}

impl<A, B, V> Dashboard<A, B, V>
where
    A: TransactionApi,
    B: ChartBackend,
    V: DashboardView,
{
    /// Create a dashboard with nothing drawn yet.
    pub fn new(api: A, backend: B, view: V) -> Self {
        Self {
            api,
            charts: RefCell::new(ChartRegistry::new(backend)),
            view: RefCell::new(view),
            latest_cycle: Cell::new(0),
        }
    }

    /// Fetch the transactions and insights and redraw the page.
    ///
    /// The category chart covers `reference_month`. Everything is drawn in one
    /// go once both fetches are done: the table, the category chart, the net
    /// chart and then the insights.
    ///
    /// # Errors
    /// Returns the first error from either fetch. Nothing is drawn in that
    /// case and the page keeps showing the previous cycle's data.
    pub async fn refresh(&self, reference_month: MonthKey) -> Result<RefreshOutcome, Error> {
        let cycle = self.latest_cycle.get() + 1;
        self.latest_cycle.set(cycle);
        tracing::info!("starting refresh cycle {cycle} for {reference_month}");

        let (transactions, insights) =
            tokio::try_join!(self.api.list_transactions(), self.api.fetch_insights())
                .inspect_err(|error| tracing::error!("refresh cycle {cycle} failed: {error}"))?;

        let latest = self.latest_cycle.get();
        if cycle != latest {
            tracing::warn!("discarding refresh cycle {cycle}, superseded by cycle {latest}");
            return Ok(RefreshOutcome::Superseded);
        }

        self.render(&transactions, &insights, reference_month);
        tracing::info!(
            "refresh cycle {cycle} rendered {} transactions",
            transactions.len()
        );

        Ok(RefreshOutcome::Rendered)
    }

    // Must not await: one cycle's renders are never interleaved with another's.
    fn render(
        &self,
        transactions: &[Transaction],
        insights: &InsightsSummary,
        reference_month: MonthKey,
    ) {
        let mut view = self.view.borrow_mut();
        let mut charts = self.charts.borrow_mut();

        view.show_table(transactions_table(transactions));

        let category_totals = bucket_by_category(transactions, reference_month);
        let (labels, values) = category_labels_and_values(&category_totals);
        charts.render_chart(
            ChartSlot::Category,
            ChartKind::CategoryPie,
            labels,
            values,
            CATEGORY_SERIES_LABEL,
        );

        let monthly_net = net_by_month(transactions);
        let (labels, values) = net_labels_and_values(&monthly_net);
        charts.render_chart(
            ChartSlot::Net,
            ChartKind::NetLine,
            labels,
            values,
            NET_SERIES_LABEL,
        );

        view.show_insights(insights_list(insights));
    }

    /// Create a transaction from the form input, then clear the form and
    /// refresh with the category chart covering `reference_month`.
    ///
    /// # Errors
    /// If the service rejects the input, the user is alerted with the
    /// server's message and [Error::ValidationRejected] is returned. The form
    /// keeps its input and no refresh happens.
    ///
    /// Transport errors from the create request or the refresh are returned as is.
    pub async fn submit_form(
        &self,
        today: Date,
        reference_month: MonthKey,
    ) -> Result<RefreshOutcome, Error> {
        let payload = self.view.borrow().form_input();

        let response = self.api.create_transaction(&payload).await?;

        if let Err(error) = response.into_result() {
            tracing::warn!("could not create transaction: {error}");

            let message = match &error {
                Error::ValidationRejected(message) => message.as_str(),
                _ => "unknown",
            };
            self.view.borrow_mut().alert(&format!("Error: {message}"));

            return Err(error);
        }

        tracing::info!("created {} transaction in {}", payload.kind, payload.category);
        self.view.borrow_mut().reset_form(today);

        self.refresh(reference_month).await
    }

    /// Delete the transaction with `id`, then refresh.
    ///
    /// The refresh runs even if the service reports that the delete failed.
    ///
    /// # Errors
    /// Returns transport errors from the delete request or the refresh.
    pub async fn delete_transaction(
        &self,
        id: TransactionId,
        reference_month: MonthKey,
    ) -> Result<RefreshOutcome, Error> {
        let response = self.api.delete_transaction(id).await?;

        match response.into_result() {
            Ok(()) => tracing::info!("deleted transaction {id}"),
            Err(error) => tracing::warn!("could not delete transaction {id}: {error}"),
        }

        self.refresh(reference_month).await
    }

    /// Release every live chart.
    pub fn teardown(&self) {
        self.charts.borrow_mut().teardown_all();
    }

    /// The service client.
    pub fn api(&self) -> &A {
        &self.api
    }

    /// The page being drawn to.
    pub fn view(&self) -> Ref<'_, V> {
        self.view.borrow()
    }

    /// Mutable access to the page, e.g. to fill in the form.
    pub fn view_mut(&self) -> RefMut<'_, V> {
        self.view.borrow_mut()
    }

    /// The live charts.
    pub fn charts(&self) -> Ref<'_, ChartRegistry<B>> {
        self.charts.borrow()
    }
}

impl<A: TransactionApi> Dashboard<A, EChartsBackend, HtmlDashboard> {
    /// Render the page as a complete HTML document with the live charts.
    pub fn render_page(&self) -> Markup {
        let charts = self.charts.borrow();
        let instances: Vec<_> = charts.live_instances().collect();

        self.view.borrow().page(&instances)
    }
}
