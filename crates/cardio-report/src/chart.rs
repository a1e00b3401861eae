//! Doughnut chart of the risk probability.

use std::f64::consts::PI;

use quick_xml::Writer;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};

use cardio_model::RiskClass;

use crate::error::Result;

const SVG_NS: &str = "http://www.w3.org/2000/svg";
const WIDTH: f64 = 200.0;
const HEIGHT: f64 = 240.0;
const CENTER: f64 = 100.0;
const OUTER_RADIUS: f64 = 90.0;
/// Ring thickness; the hole is half the outer radius.
const RING_WIDTH: f64 = OUTER_RADIUS / 2.0;

/// One slice of the chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSlice {
    pub label: &'static str,
    /// Fraction of the whole, in `[0, 1]`.
    pub value: f64,
    pub color: &'static str,
}

/// Two-slice proportion chart: low risk then high risk.
#[derive(Debug, Clone, PartialEq)]
pub struct DoughnutChart {
    pub slices: [ChartSlice; 2],
}

impl DoughnutChart {
    /// Slices `[1 - p, p]`; `p` is clamped to `[0, 1]`.
    #[must_use]
    pub fn for_probability(probability: f64) -> Self {
        let p = if probability.is_nan() {
            0.0
        } else {
            probability.clamp(0.0, 1.0)
        };
        Self {
            slices: [
                ChartSlice {
                    label: RiskClass::LowRisk.label(),
                    value: 1.0 - p,
                    color: RiskClass::LowRisk.color(),
                },
                ChartSlice {
                    label: RiskClass::HighRisk.label(),
                    value: p,
                    color: RiskClass::HighRisk.color(),
                },
            ],
        }
    }

    /// Value of the high-risk slice.
    #[must_use]
    pub fn probability(&self) -> f64 {
        self.slices[1].value
    }

    /// Render as a standalone SVG document with the legend below the ring.
    pub fn to_svg(&self) -> Result<String> {
        let mut writer = Writer::new(Vec::new());

        let view_box = format!("0 0 {WIDTH} {HEIGHT}");
        let width = WIDTH.to_string();
        let height = HEIGHT.to_string();
        writer.write_event(Event::Start(BytesStart::new("svg").with_attributes([
            ("xmlns", SVG_NS),
            ("viewBox", view_box.as_str()),
            ("width", width.as_str()),
            ("height", height.as_str()),
        ])))?;

        let radius = OUTER_RADIUS - RING_WIDTH / 2.0;
        let circumference = 2.0 * PI * radius;
        let r = fmt_num(radius);
        let stroke_width = fmt_num(RING_WIDTH);
        let center = fmt_num(CENTER);
        let rotate = format!("rotate(-90 {center} {center})");

        let mut offset = 0.0;
        for slice in &self.slices {
            if slice.value <= 0.0 {
                continue;
            }
            let length = slice.value * circumference;
            let dash = format!(
                "{} {}",
                fmt_num(length),
                fmt_num(circumference - length)
            );
            let dash_offset = fmt_num(-offset);
            writer.write_event(Event::Empty(BytesStart::new("circle").with_attributes([
                ("cx", center.as_str()),
                ("cy", center.as_str()),
                ("r", r.as_str()),
                ("fill", "none"),
                ("stroke", slice.color),
                ("stroke-width", stroke_width.as_str()),
                ("stroke-dasharray", dash.as_str()),
                ("stroke-dashoffset", dash_offset.as_str()),
                ("transform", rotate.as_str()),
            ])))?;
            offset += length;
        }

        for (index, slice) in self.slices.iter().enumerate() {
            let x = 20.0 + 90.0 * index as f64;
            let swatch_x = fmt_num(x);
            let text_x = fmt_num(x + 16.0);
            writer.write_event(Event::Empty(BytesStart::new("rect").with_attributes([
                ("x", swatch_x.as_str()),
                ("y", "212"),
                ("width", "12"),
                ("height", "12"),
                ("fill", slice.color),
            ])))?;
            writer.write_event(Event::Start(BytesStart::new("text").with_attributes([
                ("x", text_x.as_str()),
                ("y", "222"),
                ("font-family", "Arial, sans-serif"),
                ("font-size", "12"),
            ])))?;
            writer.write_event(Event::Text(BytesText::new(slice.label)))?;
            writer.write_event(Event::End(BytesEnd::new("text")))?;
        }

        writer.write_event(Event::End(BytesEnd::new("svg")))?;
        Ok(String::from_utf8(writer.into_inner())?)
    }
}

/// Format with at most three decimals and no trailing zeros.
fn fmt_num(value: f64) -> String {
    let text = format!("{value:.3}");
    let text = text.trim_end_matches('0').trim_end_matches('.');
    if text == "-0" {
        "0".to_string()
    } else {
        text.to_string()
    }
}
