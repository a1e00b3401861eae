//! Printable risk assessment report.

use std::fmt::Write as _;
use std::time::Duration;

use chrono::NaiveDateTime;
use quick_xml::escape::escape;

use cardio_model::{PatientRecord, PredictionResult, RiskClass};

use crate::error::Result;

/// Title of the generated document.
pub const REPORT_TITLE: &str = "Heart Disease Risk Assessment Report";

/// Time the opened report is given to lay out before printing.
pub const PRINT_SETTLE_DELAY: Duration = Duration::from_millis(250);

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const RECOMMENDATIONS: &[&str] = &[
    "Regular check-ups with your healthcare provider",
    "Maintain a healthy diet and exercise routine",
    "Monitor blood pressure and cholesterol levels",
    "Follow prescribed medications and treatments",
];

const FOOTER: &[&str] = &[
    "This report is generated for medical reference purposes.",
    "Please consult with your healthcare provider for professional medical advice.",
];

const STYLE: &str = "\
body { font-family: Arial, sans-serif; line-height: 1.6; padding: 20px; max-width: 800px; margin: 0 auto; }
.header { text-align: center; border-bottom: 2px solid #333; padding-bottom: 10px; margin-bottom: 20px; }
.section { margin-bottom: 20px; }
.result { padding: 15px; border-radius: 5px; margin: 20px 0; text-align: center; }
.high-risk { background-color: #f8d7da; border: 1px solid #f5c6cb; color: #721c24; }
.low-risk { background-color: #d4edda; border: 1px solid #c3e6cb; color: #155724; }
table { width: 100%; border-collapse: collapse; margin: 20px 0; }
th, td { padding: 10px; border: 1px solid #ddd; text-align: left; }
th { background-color: #f8f9fa; }
.footer { margin-top: 40px; text-align: center; font-size: 0.9em; color: #666; }
";

/// One row of the patient table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRow {
    pub label: &'static str,
    pub value: String,
}

impl ReportRow {
    fn new(label: &'static str, value: impl Into<String>) -> Self {
        Self {
            label,
            value: value.into(),
        }
    }
}

/// Report content, independent of how it is displayed.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportDocument {
    pub title: &'static str,
    pub generated_at: String,
    /// Clinical summary of the record.
    pub patient_rows: Vec<ReportRow>,
    pub risk_class: RiskClass,
    pub message: String,
    /// e.g. `Risk Probability: 91.00%`
    pub probability_text: String,
    pub recommendations: &'static [&'static str],
    pub footer: &'static [&'static str],
}

/// Build the report for `record` and `result`, stamped with `generated_at`.
#[must_use]
pub fn generate_report(
    record: &PatientRecord,
    result: &PredictionResult,
    generated_at: NaiveDateTime,
) -> ReportDocument {
    let patient_rows = vec![
        ReportRow::new("Age", format!("{} years", record.age)),
        ReportRow::new("Gender", if record.is_male() { "Male" } else { "Female" }),
        ReportRow::new("Blood Pressure", format!("{} mm Hg", record.trestbps)),
        ReportRow::new("Cholesterol", format!("{} mg/dl", record.chol)),
        ReportRow::new(
            "Fasting Blood Sugar",
            if record.fbs == 1 {
                "> 120 mg/dl"
            } else {
                "≤ 120 mg/dl"
            },
        ),
        ReportRow::new("Maximum Heart Rate", format!("{} bpm", record.thalach)),
        ReportRow::new(
            "Exercise Induced Angina",
            if record.exang == 1 { "Yes" } else { "No" },
        ),
        ReportRow::new("ST Depression", record.oldpeak.to_string()),
    ];

    ReportDocument {
        title: REPORT_TITLE,
        generated_at: generated_at.format(TIMESTAMP_FORMAT).to_string(),
        patient_rows,
        risk_class: result.risk_class(),
        message: result.display_message().to_string(),
        probability_text: format!("Risk Probability: {}%", result.percent_text()),
        recommendations: RECOMMENDATIONS,
        footer: FOOTER,
    }
}

impl ReportDocument {
    /// Render as a self-contained HTML document.
    #[must_use]
    pub fn to_html(&self) -> String {
        let mut html = String::with_capacity(4096);
        let title = escape(self.title);

        html.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
        let _ = writeln!(html, "<title>{title}</title>");
        let _ = writeln!(html, "<style>\n{STYLE}</style>");
        html.push_str("</head>\n<body>\n");

        html.push_str("<div class=\"header\">\n");
        let _ = writeln!(html, "<h1>{title}</h1>");
        let _ = writeln!(
            html,
            "<p>Report Generated: {}</p>",
            escape(self.generated_at.as_str())
        );
        html.push_str("</div>\n");

        html.push_str("<div class=\"section\">\n<h2>Patient Information</h2>\n<table>\n");
        for row in &self.patient_rows {
            let _ = writeln!(
                html,
                "<tr><th>{}</th><td>{}</td></tr>",
                escape(row.label),
                escape(row.value.as_str())
            );
        }
        html.push_str("</table>\n</div>\n");

        html.push_str("<div class=\"section\">\n<h2>Risk Assessment Results</h2>\n");
        let _ = writeln!(html, "<div class=\"result {}\">", self.risk_class.css_class());
        let _ = writeln!(html, "<h3>{}</h3>", escape(self.message.as_str()));
        let _ = writeln!(html, "<p>{}</p>", escape(self.probability_text.as_str()));
        html.push_str("</div>\n</div>\n");

        html.push_str("<div class=\"section\">\n<h2>Recommendations</h2>\n<ul>\n");
        for item in self.recommendations {
            let _ = writeln!(html, "<li>{}</li>", escape(*item));
        }
        html.push_str("</ul>\n</div>\n");

        html.push_str("<div class=\"footer\">\n");
        for line in self.footer {
            let _ = writeln!(html, "<p>{}</p>", escape(*line));
        }
        html.push_str("</div>\n</body>\n</html>\n");
        html
    }

    /// Value of a patient row by label.
    #[must_use]
    pub fn row(&self, label: &str) -> Option<&str> {
        self.patient_rows
            .iter()
            .find(|row| row.label == label)
            .map(|row| row.value.as_str())
    }
}

/// A surface that can show a report and print it.
pub trait PrintTarget {
    /// Open a new surface showing `document`.
    fn open(&mut self, document: &ReportDocument) -> Result<()>;

    /// Print the opened document.
    fn print(&mut self) -> Result<()>;
}

/// Open `document` on `target` and print it once layout has settled.
pub async fn print_report<T: PrintTarget + ?Sized>(
    target: &mut T,
    document: &ReportDocument,
) -> Result<()> {
    target.open(document)?;
    tokio::time::sleep(PRINT_SETTLE_DELAY).await;
    target.print()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn timestamp() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 1)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap()
    }

    fn record() -> PatientRecord {
        PatientRecord {
            age: 45.0,
            sex: 0,
            cp: 1,
            trestbps: 120.0,
            chol: 180.5,
            fbs: 0,
            restecg: 1,
            thalach: 170.0,
            exang: 1,
            oldpeak: 0.0,
            slope: 2,
            ca: 0,
            thal: 2,
        }
    }

    #[test]
    fn test_rows_for_low_risk_female() {
        let doc = generate_report(&record(), &PredictionResult::new(0, 0.12, "Low risk"), timestamp());
        assert_eq!(doc.generated_at, "2024-05-01 09:30:00");
        assert_eq!(doc.row("Gender"), Some("Female"));
        assert_eq!(doc.row("Cholesterol"), Some("180.5 mg/dl"));
        assert_eq!(doc.row("Fasting Blood Sugar"), Some("≤ 120 mg/dl"));
        assert_eq!(doc.row("Exercise Induced Angina"), Some("Yes"));
        assert_eq!(doc.row("ST Depression"), Some("0"));
        assert_eq!(doc.probability_text, "Risk Probability: 12.00%");
        assert_eq!(doc.risk_class, RiskClass::LowRisk);
    }

    #[test]
    fn test_html_escapes_message() {
        let result = PredictionResult::new(1, 0.5, "<b>High</b> & rising");
        let html = generate_report(&record(), &result, timestamp()).to_html();
        assert!(html.contains("<h3>&lt;b&gt;High&lt;/b&gt; &amp; rising</h3>"));
        assert!(html.contains("<div class=\"result high-risk\">"));
    }

    #[test]
    fn test_html_is_self_contained() {
        let html = generate_report(&record(), &PredictionResult::new(0, 0.3, "Low"), timestamp())
            .to_html();
        assert!(!html.contains("<link"));
        assert!(!html.contains("<script"));
        assert!(!html.contains("src="));
        assert!(html.contains("<style>"));
    }
}
