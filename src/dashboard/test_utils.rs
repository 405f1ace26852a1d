//! Test doubles for the dashboard's collaborators.
//!
//! [RecordingBackend] and [RecordingView] write into a shared [EventLog] so
//! tests can assert on the order in which a refresh touches the page.

use std::{
    cell::{Cell, RefCell},
    collections::VecDeque,
    rc::Rc,
};

use charming::Chart;
use maud::Markup;
use time::Date;
use tokio::sync::oneshot;

use crate::{
    Error,
    api::TransactionApi,
    dashboard::{
        charts::{ChartBackend, ChartSlot},
        view::DashboardView,
    },
    insights::InsightsSummary,
    transaction::{MutationResponse, NewTransaction, Transaction, TransactionId},
};

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum RenderEvent {
    Table(String),
    ChartConstructed(ChartSlot, u32),
    ChartReleased(ChartSlot, u32),
    Insights(String),
    Alert(String),
    FormReset,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct EventLog(Rc<RefCell<Vec<RenderEvent>>>);

impl EventLog {
    pub(crate) fn push(&self, event: RenderEvent) {
        self.0.borrow_mut().push(event);
    }

    pub(crate) fn events(&self) -> Vec<RenderEvent> {
        self.0.borrow().clone()
    }

    pub(crate) fn clear(&self) {
        self.0.borrow_mut().clear();
    }
}

#[derive(Debug)]
pub(crate) struct RecordedChart {
    pub slot: ChartSlot,
    pub id: u32,
    pub options: String,
}

/// Hands out sequential IDs and logs every construct and release.
#[derive(Debug)]
pub(crate) struct RecordingBackend {
    log: EventLog,
    next_id: u32,
    live_count: usize,
}

impl RecordingBackend {
    pub(crate) fn new(log: EventLog) -> Self {
        Self {
            log,
            next_id: 0,
            live_count: 0,
        }
    }

    pub(crate) fn live_count(&self) -> usize {
        self.live_count
    }
}

impl ChartBackend for RecordingBackend {
    type Instance = RecordedChart;

    fn construct(&mut self, slot: ChartSlot, options: Chart) -> Self::Instance {
        let id = self.next_id;
        self.next_id += 1;
        self.live_count += 1;
        self.log.push(RenderEvent::ChartConstructed(slot, id));

        RecordedChart {
            slot,
            id,
            options: options.to_string(),
        }
    }

    fn release(&mut self, chart: Self::Instance) {
        self.live_count -= 1;
        self.log.push(RenderEvent::ChartReleased(chart.slot, chart.id));
    }
}

#[derive(Debug)]
pub(crate) struct RecordingView {
    log: EventLog,
    form: NewTransaction,
}

impl RecordingView {
    pub(crate) fn new(log: EventLog, form: NewTransaction) -> Self {
        Self { log, form }
    }
}

impl DashboardView for RecordingView {
    fn show_table(&mut self, table: Markup) {
        self.log.push(RenderEvent::Table(table.into_string()));
    }

    fn show_insights(&mut self, insights: Markup) {
        self.log.push(RenderEvent::Insights(insights.into_string()));
    }

    fn form_input(&self) -> NewTransaction {
        self.form.clone()
    }

    fn reset_form(&mut self, today: Date) {
        self.form = NewTransaction::blank(today);
        self.log.push(RenderEvent::FormReset);
    }

    fn alert(&mut self, message: &str) {
        self.log.push(RenderEvent::Alert(message.to_owned()));
    }
}

/// An in-memory [TransactionApi] that counts calls.
#[derive(Debug, Default)]
pub(crate) struct FakeApi {
    transactions: RefCell<Vec<Transaction>>,
    insights: RefCell<InsightsSummary>,
    create_response: RefCell<Option<MutationResponse>>,
    delete_response: RefCell<Option<MutationResponse>>,
    insights_error: RefCell<Option<Error>>,
    list_gates: RefCell<VecDeque<oneshot::Receiver<Vec<Transaction>>>>,
    pub list_calls: Cell<usize>,
    pub insights_calls: Cell<usize>,
    pub created: RefCell<Vec<NewTransaction>>,
    pub deleted: RefCell<Vec<TransactionId>>,
}

impl FakeApi {
    pub(crate) fn new(transactions: Vec<Transaction>, insights: InsightsSummary) -> Self {
        Self {
            transactions: RefCell::new(transactions),
            insights: RefCell::new(insights),
            ..Default::default()
        }
    }

    pub(crate) fn set_transactions(&self, transactions: Vec<Transaction>) {
        *self.transactions.borrow_mut() = transactions;
    }

    pub(crate) fn respond_to_create(&self, response: MutationResponse) {
        *self.create_response.borrow_mut() = Some(response);
    }

    pub(crate) fn respond_to_delete(&self, response: MutationResponse) {
        *self.delete_response.borrow_mut() = Some(response);
    }

    pub(crate) fn fail_insights(&self, error: Error) {
        *self.insights_error.borrow_mut() = Some(error);
    }

    /// The next call to `list_transactions` waits for the returned sender
    /// and answers with whatever is sent.
    pub(crate) fn gate_next_list(&self) -> oneshot::Sender<Vec<Transaction>> {
        let (sender, receiver) = oneshot::channel();
        self.list_gates.borrow_mut().push_back(receiver);
        sender
    }
}

fn ok_response() -> MutationResponse {
    MutationResponse {
        ok: true,
        error: None,
    }
}

impl TransactionApi for FakeApi {
    async fn list_transactions(&self) -> Result<Vec<Transaction>, Error> {
        self.list_calls.set(self.list_calls.get() + 1);

        let gate = self.list_gates.borrow_mut().pop_front();

        match gate {
            Some(gate) => gate
                .await
                .map_err(|_| Error::Transport("gate was dropped".to_owned())),
            None => Ok(self.transactions.borrow().clone()),
        }
    }

    async fn create_transaction(
        &self,
        payload: &NewTransaction,
    ) -> Result<MutationResponse, Error> {
        self.created.borrow_mut().push(payload.clone());

        Ok(self
            .create_response
            .borrow()
            .clone()
            .unwrap_or_else(ok_response))
    }

    async fn delete_transaction(&self, id: TransactionId) -> Result<MutationResponse, Error> {
        self.deleted.borrow_mut().push(id);

        Ok(self
            .delete_response
            .borrow()
            .clone()
            .unwrap_or_else(ok_response))
    }

    async fn fetch_insights(&self) -> Result<InsightsSummary, Error> {
        self.insights_calls.set(self.insights_calls.get() + 1);

        match self.insights_error.borrow().clone() {
            Some(error) => Err(error),
            None => Ok(self.insights.borrow().clone()),
        }
    }
}
