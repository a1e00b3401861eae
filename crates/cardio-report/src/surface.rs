//! Display surface abstraction.

use std::collections::BTreeMap;
use std::fmt;

use crate::chart::DoughnutChart;
use crate::error::{ReportError, Result};
use crate::renderer::ResultView;

/// Handle to a chart that lives on a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ChartId(pub u64);

impl fmt::Display for ChartId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "chart-{}", self.0)
    }
}

/// Where results, charts and notifications are shown.
pub trait DisplaySurface {
    /// Show or hide the loading indicator.
    fn set_loading(&mut self, visible: bool);

    fn show_result(&mut self, view: &ResultView);

    fn hide_result(&mut self);

    /// Create a chart and return its handle.
    fn create_chart(&mut self, chart: &DoughnutChart) -> Result<ChartId>;

    /// Release a chart created by [`DisplaySurface::create_chart`].
    fn destroy_chart(&mut self, id: ChartId);

    /// Blocking notification to the user.
    fn alert(&mut self, message: &str);
}

/// In-memory surface that records what is displayed.
#[derive(Debug, Default)]
pub struct MemorySurface {
    loading: bool,
    result: Option<ResultView>,
    charts: BTreeMap<ChartId, DoughnutChart>,
    next_chart: u64,
    destroyed: Vec<ChartId>,
    alerts: Vec<String>,
    fail_charts: bool,
}

impl MemorySurface {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Surface whose chart creation always fails.
    #[must_use]
    pub fn with_failing_charts() -> Self {
        Self {
            fail_charts: true,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// The result block, if visible.
    #[must_use]
    pub fn result(&self) -> Option<&ResultView> {
        self.result.as_ref()
    }

    #[must_use]
    pub fn live_chart_count(&self) -> usize {
        self.charts.len()
    }

    #[must_use]
    pub fn live_chart(&self, id: ChartId) -> Option<&DoughnutChart> {
        self.charts.get(&id)
    }

    /// Charts destroyed so far, in order.
    #[must_use]
    pub fn destroyed(&self) -> &[ChartId] {
        &self.destroyed
    }

    #[must_use]
    pub fn alerts(&self) -> &[String] {
        &self.alerts
    }
}

impl DisplaySurface for MemorySurface {
    fn set_loading(&mut self, visible: bool) {
        self.loading = visible;
    }

    fn show_result(&mut self, view: &ResultView) {
        self.result = Some(view.clone());
    }

    fn hide_result(&mut self) {
        self.result = None;
    }

    fn create_chart(&mut self, chart: &DoughnutChart) -> Result<ChartId> {
        if self.fail_charts {
            return Err(ReportError::Chart("no drawing context".to_string()));
        }
        self.next_chart += 1;
        let id = ChartId(self.next_chart);
        self.charts.insert(id, chart.clone());
        Ok(id)
    }

    fn destroy_chart(&mut self, id: ChartId) {
        if self.charts.remove(&id).is_some() {
            self.destroyed.push(id);
        }
    }

    fn alert(&mut self, message: &str) {
        self.alerts.push(message.to_string());
    }
}
