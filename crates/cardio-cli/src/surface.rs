//! Terminal display surface and HTML print target.

use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use cardio_report::{
    ChartId, DisplaySurface, DoughnutChart, PrintTarget, ReportDocument, ReportError, ResultView,
};

use crate::summary::result_table;

/// Shows results as a table on `out` and charts as SVG files.
///
/// Chart files live in `chart_dir` as `chart-N.svg` and are removed when the
/// chart is destroyed. Alerts go to stderr.
pub struct TerminalSurface<W: Write> {
    out: W,
    chart_dir: PathBuf,
    charts: BTreeMap<ChartId, PathBuf>,
    next_chart: u64,
    result_visible: bool,
}

impl<W: Write> TerminalSurface<W> {
    pub fn new(out: W, chart_dir: impl Into<PathBuf>) -> Self {
        Self {
            out,
            chart_dir: chart_dir.into(),
            charts: BTreeMap::new(),
            next_chart: 0,
            result_visible: false,
        }
    }

    /// Path of a live chart.
    pub fn chart_path(&self, id: ChartId) -> Option<&Path> {
        self.charts.get(&id).map(PathBuf::as_path)
    }

    pub fn result_visible(&self) -> bool {
        self.result_visible
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_line(&mut self, line: &str) {
        if let Err(error) = writeln!(self.out, "{line}") {
            tracing::warn!(%error, "failed to write to terminal");
        }
    }
}

impl<W: Write> DisplaySurface for TerminalSurface<W> {
    fn set_loading(&mut self, visible: bool) {
        if visible {
            self.write_line("Predicting...");
        }
    }

    fn show_result(&mut self, view: &ResultView) {
        let table = result_table(view).to_string();
        self.write_line(&table);
        self.result_visible = true;
    }

    fn hide_result(&mut self) {
        self.result_visible = false;
    }

    fn create_chart(&mut self, chart: &DoughnutChart) -> cardio_report::Result<ChartId> {
        let svg = chart.to_svg()?;
        fs::create_dir_all(&self.chart_dir)?;
        let id = ChartId(self.next_chart + 1);
        let path = self.chart_dir.join(format!("{id}.svg"));
        fs::write(&path, svg)?;
        self.next_chart = id.0;
        self.write_line(&format!("Chart: {}", path.display()));
        self.charts.insert(id, path);
        Ok(id)
    }

    fn destroy_chart(&mut self, id: ChartId) {
        if let Some(path) = self.charts.remove(&id)
            && let Err(error) = fs::remove_file(&path)
        {
            tracing::warn!(%error, path = %path.display(), "failed to remove chart");
        }
    }

    fn alert(&mut self, message: &str) {
        eprintln!("{message}");
    }
}

/// Writes the report as an HTML file and prints it by opening the file with
/// the system viewer.
#[derive(Debug)]
pub struct HtmlFileTarget {
    path: PathBuf,
    open_viewer: bool,
    written: bool,
}

impl HtmlFileTarget {
    pub fn new(path: impl Into<PathBuf>, open_viewer: bool) -> Self {
        Self {
            path: path.into(),
            open_viewer,
            written: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PrintTarget for HtmlFileTarget {
    fn open(&mut self, document: &ReportDocument) -> cardio_report::Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, document.to_html())?;
        self.written = true;
        tracing::info!(path = %self.path.display(), "report written");
        Ok(())
    }

    fn print(&mut self) -> cardio_report::Result<()> {
        if !self.written {
            return Err(ReportError::Print("report has not been written".to_string()));
        }
        if self.open_viewer {
            open::that(&self.path).map_err(|e| {
                ReportError::Print(format!("failed to open {}: {e}", self.path.display()))
            })?;
        }
        Ok(())
    }
}
