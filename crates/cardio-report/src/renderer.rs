//! Maps prediction results onto a display surface.

use cardio_model::{PredictionResult, RiskClass};

use crate::chart::DoughnutChart;
use crate::error::Result;
use crate::surface::{ChartId, DisplaySurface};

/// What the result block shows.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultView {
    pub risk_class: RiskClass,
    pub message: String,
    /// e.g. `Probability: 87.00%`
    pub probability_text: String,
}

impl ResultView {
    #[must_use]
    pub fn from_result(result: &PredictionResult) -> Self {
        Self {
            risk_class: result.risk_class(),
            message: result.display_message().to_string(),
            probability_text: format!("Probability: {}%", result.percent_text()),
        }
    }
}

/// Owner of at most one live chart.
///
/// The previous chart is always destroyed before a new one is created.
#[derive(Debug, Default)]
pub struct ChartSlot {
    current: Option<ChartId>,
}

impl ChartSlot {
    #[must_use]
    pub fn get(&self) -> Option<ChartId> {
        self.current
    }

    /// Replace the owned chart with a new one drawn from `chart`.
    ///
    /// If creation fails the slot is left empty.
    pub fn set<S: DisplaySurface + ?Sized>(
        &mut self,
        surface: &mut S,
        chart: &DoughnutChart,
    ) -> Result<ChartId> {
        self.clear(surface);
        let id = surface.create_chart(chart)?;
        self.current = Some(id);
        Ok(id)
    }

    /// Destroy the owned chart, if any.
    pub fn clear<S: DisplaySurface + ?Sized>(&mut self, surface: &mut S) {
        if let Some(id) = self.current.take() {
            surface.destroy_chart(id);
        }
    }
}

/// Renders results on a surface it owns.
#[derive(Debug)]
pub struct ResultRenderer<S> {
    surface: S,
    chart: ChartSlot,
}

impl<S: DisplaySurface> ResultRenderer<S> {
    pub fn new(surface: S) -> Self {
        Self {
            surface,
            chart: ChartSlot::default(),
        }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn into_surface(mut self) -> S {
        self.chart.clear(&mut self.surface);
        self.surface
    }

    /// Handle of the live chart.
    pub fn chart(&self) -> Option<ChartId> {
        self.chart.get()
    }

    /// Show `result` and redraw the chart.
    ///
    /// A chart failure is logged and leaves no chart; the result block is
    /// still shown.
    pub fn render(&mut self, result: &PredictionResult) -> ResultView {
        let view = ResultView::from_result(result);
        self.surface.show_result(&view);

        let chart = DoughnutChart::for_probability(result.probability_or_zero());
        match self.chart.set(&mut self.surface, &chart) {
            Ok(id) => tracing::debug!(chart = %id, risk = %view.risk_class, "chart updated"),
            Err(error) => tracing::error!(%error, "error updating chart"),
        }
        view
    }

    /// Hide the result and destroy the chart.
    pub fn reset(&mut self) {
        self.surface.hide_result();
        self.chart.clear(&mut self.surface);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::MemorySurface;

    #[test]
    fn test_view_for_missing_fields() {
        let result = PredictionResult {
            prediction: 0.0,
            probability: None,
            message: None,
            timestamp: None,
        };
        let view = ResultView::from_result(&result);
        assert_eq!(view.risk_class, RiskClass::LowRisk);
        assert_eq!(view.message, "Prediction completed");
        assert_eq!(view.probability_text, "Probability: 0.00%");
    }

    #[test]
    fn test_slot_replaces_chart() {
        let mut surface = MemorySurface::new();
        let mut slot = ChartSlot::default();
        let first = slot
            .set(&mut surface, &DoughnutChart::for_probability(0.2))
            .unwrap();
        let second = slot
            .set(&mut surface, &DoughnutChart::for_probability(0.8))
            .unwrap();
        assert_ne!(first, second);
        assert_eq!(slot.get(), Some(second));
        assert_eq!(surface.live_chart_count(), 1);
        assert_eq!(surface.destroyed(), &[first]);

        slot.clear(&mut surface);
        assert!(slot.get().is_none());
        assert_eq!(surface.live_chart_count(), 0);
    }

    #[test]
    fn test_into_surface_releases_chart() {
        let mut renderer = ResultRenderer::new(MemorySurface::new());
        renderer.render(&PredictionResult::new(1, 0.6, "High risk"));
        let surface = renderer.into_surface();
        assert_eq!(surface.live_chart_count(), 0);
    }
}
