//! Chart generation and lifecycle for the dashboard.
//!
//! The dashboard has two chart slots:
//! - **Category chart**: a pie of this month's expenses by category
//! - **Net chart**: a line of each month's net cash flow
//!
//! Each slot owns at most one live chart instance. [ChartRegistry] is the
//! only place instances are stored, and it always releases the instance in a
//! slot before the replacement is constructed.

use std::collections::HashMap;

use charming::{
    Chart,
    component::{Axis, Legend},
    element::{AxisType, JsFunction, Tooltip, Trigger},
    series::{Line, Pie},
};

/// A fixed location on the dashboard that holds one chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChartSlot {
    /// This month's expenses by category.
    Category,
    /// Net cash flow by month.
    Net,
}

impl ChartSlot {
    /// Every slot, in the order they appear on the page.
    pub const ALL: [ChartSlot; 2] = [ChartSlot::Category, ChartSlot::Net];

    /// The HTML element ID of the slot's drawing surface (kebab-case).
    pub fn element_id(self) -> &'static str {
        match self {
            ChartSlot::Category => "category-chart",
            ChartSlot::Net => "net-chart",
        }
    }
}

/// The kinds of chart the dashboard draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    /// A pie chart, one sector per label.
    CategoryPie,
    /// A line chart with the labels along the x-axis.
    NetLine,
}

/// Builds the ECharts configuration for a chart with a single data series.
///
/// All charts put the legend at the bottom and show tooltips. Line charts
/// keep zero on the value axis.
///
/// Mismatched `labels` and `values` lengths are passed through to ECharts as is.
pub fn chart_options(
    kind: ChartKind,
    labels: Vec<String>,
    values: Vec<f64>,
    series_label: &str,
) -> Chart {
    let chart = Chart::new().legend(Legend::new().bottom(0));

    match kind {
        ChartKind::CategoryPie => {
            let data: Vec<(f64, &str)> = values
                .iter()
                .zip(labels.iter())
                .map(|(value, label)| (*value, label.as_str()))
                .collect();

            chart
                .tooltip(currency_tooltip(Trigger::Item))
                .series(Pie::new().name(series_label).data(data))
        }
        ChartKind::NetLine => chart
            .tooltip(currency_tooltip(Trigger::Axis))
            .x_axis(Axis::new().type_(AxisType::Category).data(labels))
            .y_axis(
                Axis::new()
                    .type_(AxisType::Value)
                    // Keeps zero inside the axis range instead of fitting the data.
                    .scale(false),
            )
            .series(Line::new().name(series_label).data(values)),
    }
}

#[inline]
fn currency_formatter() -> JsFunction {
    JsFunction::new_with_args(
        "number",
        "const currencyFormatter = new Intl.NumberFormat('en-IN', {
              style: 'currency',
              currency: 'INR'
            });
            return currencyFormatter.format(number);",
    )
}

/// Creates a tooltip configuration for currency values
fn currency_tooltip(trigger: Trigger) -> Tooltip {
    Tooltip::new()
        .trigger(trigger)
        .value_formatter(currency_formatter())
}

/// The charting primitive that turns chart options into live instances.
pub trait ChartBackend {
    /// A live chart. Holding one means its drawing resources are allocated.
    type Instance;

    /// Create a chart bound to `slot`'s drawing surface.
    fn construct(&mut self, slot: ChartSlot, options: Chart) -> Self::Instance;

    /// Free everything `instance` holds. The instance is consumed.
    fn release(&mut self, instance: Self::Instance);
}

/// Owns the live chart instance of each [ChartSlot].
pub struct ChartRegistry<B: ChartBackend> {
    backend: B,
    live: HashMap<ChartSlot, B::Instance>,
}

impl<B: ChartBackend> ChartRegistry<B> {
    /// Create a registry with no live charts.
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            live: HashMap::new(),
        }
    }

    /// Draw a chart of `kind` in `slot`, replacing whatever chart was there.
    pub fn render_chart(
        &mut self,
        slot: ChartSlot,
        kind: ChartKind,
        labels: Vec<String>,
        values: Vec<f64>,
        series_label: &str,
    ) {
        let options = chart_options(kind, labels, values, series_label);
        self.replace(slot, options);
    }

    /// Release the instance in `slot`, if any, then construct and store a new
    /// instance from `options`.
    pub fn replace(&mut self, slot: ChartSlot, options: Chart) {
        self.teardown(slot);

        let instance = self.backend.construct(slot, options);
        self.live.insert(slot, instance);
    }

    /// Release the instance in `slot` without replacing it.
    ///
    /// # Returns
    /// Whether there was an instance to release.
    pub fn teardown(&mut self, slot: ChartSlot) -> bool {
        match self.live.remove(&slot) {
            Some(previous) => {
                self.backend.release(previous);
                true
            }
            None => false,
        }
    }

    /// Release every live instance.
    pub fn teardown_all(&mut self) {
        for slot in ChartSlot::ALL {
            self.teardown(slot);
        }
    }

    /// The live instance in `slot`.
    pub fn live(&self, slot: ChartSlot) -> Option<&B::Instance> {
        self.live.get(&slot)
    }

    /// The live instances in page order.
    pub fn live_instances(&self) -> impl Iterator<Item = &B::Instance> {
        ChartSlot::ALL
            .into_iter()
            .filter_map(move |slot| self.live.get(&slot))
    }

    /// The backend the instances are constructed with.
    pub fn backend(&self) -> &B {
        &self.backend
    }
}

/// A [ChartBackend] for ECharts running in the dashboard page.
#[derive(Debug, Default)]
pub struct EChartsBackend {
    next_generation: u64,
    live_count: usize,
}

impl EChartsBackend {
    /// The number of instances constructed and not yet released.
    pub fn live_count(&self) -> usize {
        self.live_count
    }
}

impl ChartBackend for EChartsBackend {
    type Instance = EChartsInstance;

    fn construct(&mut self, slot: ChartSlot, options: Chart) -> EChartsInstance {
        let generation = self.next_generation;
        self.next_generation += 1;
        self.live_count += 1;

        tracing::debug!(
            "constructed chart {generation} in {}, {} live",
            slot.element_id(),
            self.live_count
        );

        EChartsInstance {
            slot,
            generation,
            options: options.to_string(),
        }
    }

    fn release(&mut self, instance: EChartsInstance) {
        self.live_count = self.live_count.saturating_sub(1);

        tracing::debug!(
            "released chart {} in {}, {} live",
            instance.generation,
            instance.slot.element_id(),
            self.live_count
        );
    }
}

/// A chart instance with its ECharts configuration serialized as JSON.
#[derive(Debug, Clone, PartialEq)]
pub struct EChartsInstance {
    slot: ChartSlot,
    generation: u64,
    options: String,
}

impl EChartsInstance {
    /// The slot the chart is drawn in.
    pub fn slot(&self) -> ChartSlot {
        self.slot
    }

    /// Counts up from zero with every chart the backend constructs.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// The ECharts configuration as a JSON string.
    pub fn options(&self) -> &str {
        &self.options
    }

    /// JavaScript that draws the chart into its slot's element.
    ///
    /// A chart already bound to the element is disposed first and its resize
    /// listener removed, so re-running the script never stacks instances.
    pub fn init_script(&self) -> String {
        // Labels come from user input, so `</script>` must not close the tag early.
        let options = self.options.replace('<', "\\u003c");

        format!(
            r#"(function() {{
                const chartDom = document.getElementById("{}");
                const existing = echarts.getInstanceByDom(chartDom);
                if (existing) {{
                    window.removeEventListener('resize', existing.__onResize);
                    existing.dispose();
                }}
                const chart = echarts.init(chartDom);
                chart.__onResize = () => chart.resize();
                window.addEventListener('resize', chart.__onResize);
                const option = {};
                chart.setOption(option);
            }})();"#,
            self.slot.element_id(),
            options
        )
    }
}
