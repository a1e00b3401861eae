//! Result rendering and report generation.
//!
//! - **Renderer**: maps a [`PredictionResult`](cardio_model::PredictionResult)
//!   onto a [`DisplaySurface`] and owns the single live risk chart
//! - **Chart**: two-slice doughnut chart rendered as standalone SVG
//! - **Report**: self-contained printable HTML summary of a record and result

mod chart;
mod error;
mod renderer;
mod report;
mod surface;

pub use chart::{ChartSlice, DoughnutChart};
pub use error::{ReportError, Result};
pub use renderer::{ChartSlot, ResultRenderer, ResultView};
pub use report::{
    PRINT_SETTLE_DELAY, PrintTarget, REPORT_TITLE, ReportDocument, ReportRow, generate_report,
    print_report,
};
pub use surface::{ChartId, DisplaySurface, MemorySurface};
