//! Submit, reset and print lifecycle tests.

use std::cell::Cell;
use std::collections::BTreeMap;
use std::time::Duration;

use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use chrono::NaiveDate;
use serde_json::json;

use cardio_cli::flow::{FlowError, FlowState, PredictionFlow};
use cardio_cli::surface::HtmlFileTarget;
use cardio_client::{ApiConfig, PredictError, PredictionClient, Predictor};
use cardio_model::{PatientRecord, PredictionResult, RiskClass, ValidationReason};
use cardio_report::{MemorySurface, PrintTarget, ReportDocument};

async fn spawn_mock(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

fn client_for(base_url: &str) -> PredictionClient {
    PredictionClient::new(&ApiConfig::with_base_url(base_url)).unwrap()
}

fn sample_form() -> BTreeMap<String, String> {
    [
        ("age", "63"),
        ("sex", "1"),
        ("cp", "3"),
        ("trestbps", "145"),
        ("chol", "233"),
        ("fbs", "1"),
        ("restecg", "0"),
        ("thalach", "150"),
        ("exang", "0"),
        ("oldpeak", "2.3"),
        ("slope", "0"),
        ("ca", "0"),
        ("thal", "1"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

fn timestamp() -> chrono::NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 5, 1)
        .unwrap()
        .and_hms_opt(9, 30, 0)
        .unwrap()
}

/// Answers every request with a fixed result and counts calls.
struct FixedPredictor {
    calls: Cell<usize>,
    result: PredictionResult,
}

impl FixedPredictor {
    fn new(result: PredictionResult) -> Self {
        Self {
            calls: Cell::new(0),
            result,
        }
    }
}

impl Predictor for FixedPredictor {
    async fn predict(&self, _record: &PatientRecord) -> cardio_client::Result<PredictionResult> {
        self.calls.set(self.calls.get() + 1);
        Ok(self.result.clone())
    }
}

/// Never answers.
struct StalledPredictor;

impl Predictor for StalledPredictor {
    async fn predict(&self, _record: &PatientRecord) -> cardio_client::Result<PredictionResult> {
        std::future::pending().await
    }
}

#[derive(Default)]
struct RecordingTarget {
    opened: Option<String>,
    printed: bool,
}

impl PrintTarget for RecordingTarget {
    fn open(&mut self, document: &ReportDocument) -> cardio_report::Result<()> {
        self.opened = Some(document.to_html());
        Ok(())
    }

    fn print(&mut self) -> cardio_report::Result<()> {
        self.printed = true;
        Ok(())
    }
}

#[tokio::test]
async fn end_to_end_high_risk() {
    let router = Router::new().route(
        "/api/predict",
        post(|Json(record): Json<PatientRecord>| async move {
            assert_eq!(record.trestbps, 145.0);
            Json(json!({"prediction": 1, "probability": 0.91, "message": "High risk"}))
        }),
    );
    let base = spawn_mock(router).await;
    let mut flow = PredictionFlow::new(client_for(&base), MemorySurface::new());

    let submission = flow.submit(&sample_form()).await.unwrap();
    assert_eq!(submission.record.chol, 233.0);
    assert!(matches!(flow.state(), FlowState::Success(_)));

    let surface = flow.surface();
    assert!(!surface.is_loading());
    let view = surface.result().unwrap();
    assert_eq!(view.risk_class, RiskClass::HighRisk);
    assert_eq!(view.probability_text, "Probability: 91.00%");
    assert_eq!(view.message, "High risk");
    assert_eq!(surface.live_chart_count(), 1);

    let mut target = RecordingTarget::default();
    let document = flow.print(&mut target, timestamp()).await.unwrap();
    assert!(target.printed);
    let html = target.opened.unwrap();
    assert!(html.contains("145 mm Hg"));
    assert!(html.contains("233 mg/dl"));
    assert_eq!(document.probability_text, "Risk Probability: 91.00%");
}

#[tokio::test]
async fn validation_failure_skips_request() {
    let predictor = FixedPredictor::new(PredictionResult::new(0, 0.1, "Low risk"));
    let mut flow = PredictionFlow::new(predictor, MemorySurface::new());
    let mut form = sample_form();
    form.insert("chol".to_string(), "high".to_string());

    let err = flow.submit(&form).await.unwrap_err();
    let FlowError::Validation(validation) = &err else {
        panic!("expected validation error, got {err:?}");
    };
    assert_eq!(validation.field, "chol");
    assert_eq!(validation.reason, ValidationReason::NotANumber);

    assert_eq!(flow.state(), &FlowState::Idle);
    let surface = flow.surface();
    assert!(!surface.is_loading());
    assert!(surface.result().is_none());
    assert_eq!(surface.alerts(), ["Please enter a valid value for chol"]);
    assert_eq!(flow.predictor().calls.get(), 0);
}

#[tokio::test]
async fn only_valid_submits_reach_the_predictor() {
    let mut form = sample_form();
    form.remove("thal");
    let mut flow = PredictionFlow::new(
        FixedPredictor::new(PredictionResult::new(0, 0.1, "Low risk")),
        MemorySurface::new(),
    );
    assert!(flow.submit(&form).await.is_err());
    assert_eq!(flow.predictor().calls.get(), 0);

    form.insert("thal".to_string(), "2".to_string());
    flow.submit(&form).await.unwrap();
    assert_eq!(flow.predictor().calls.get(), 1);
}

#[tokio::test]
async fn server_error_alerts_and_returns_to_idle() {
    let router = Router::new().route(
        "/api/predict",
        post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "model unavailable") }),
    );
    let base = spawn_mock(router).await;
    let mut flow = PredictionFlow::new(client_for(&base), MemorySurface::new());

    let err = flow.submit(&sample_form()).await.unwrap_err();
    let FlowError::Predict(PredictError::Transport { status, body }) = &err else {
        panic!("expected transport error, got {err:?}");
    };
    assert_eq!(*status, 500);
    assert_eq!(body, "model unavailable");

    assert_eq!(flow.state(), &FlowState::Idle);
    assert!(!flow.can_print());
    let surface = flow.surface();
    assert!(!surface.is_loading());
    assert!(surface.result().is_none());
    assert_eq!(surface.live_chart_count(), 0);
    assert_eq!(
        surface.alerts(),
        ["Prediction request failed with status: 500, message: model unavailable"]
    );
}

#[tokio::test]
async fn resubmit_replaces_chart() {
    let mut flow = PredictionFlow::new(
        FixedPredictor::new(PredictionResult::new(0, 0.2, "Low risk")),
        MemorySurface::new(),
    );
    flow.submit(&sample_form()).await.unwrap();
    let first = flow.renderer().chart().unwrap();
    flow.submit(&sample_form()).await.unwrap();
    let second = flow.renderer().chart().unwrap();

    assert_ne!(first, second);
    assert_eq!(flow.surface().live_chart_count(), 1);
    assert_eq!(flow.surface().destroyed(), [first]);
}

#[tokio::test]
async fn reset_hides_result_and_disables_print() {
    let mut flow = PredictionFlow::new(
        FixedPredictor::new(PredictionResult::new(1, 0.8, "High risk")),
        MemorySurface::new(),
    );
    flow.submit(&sample_form()).await.unwrap();
    assert!(flow.can_print());

    flow.reset().unwrap();
    assert_eq!(flow.state(), &FlowState::Idle);
    assert!(flow.surface().result().is_none());
    assert_eq!(flow.surface().live_chart_count(), 0);

    let mut target = RecordingTarget::default();
    let err = flow.print(&mut target, timestamp()).await.unwrap_err();
    assert!(matches!(err, FlowError::NothingToPrint));
    assert!(target.opened.is_none());
}

#[tokio::test]
async fn print_before_submit_is_rejected() {
    let flow = PredictionFlow::new(
        FixedPredictor::new(PredictionResult::new(1, 0.8, "High risk")),
        MemorySurface::new(),
    );
    let mut target = RecordingTarget::default();
    assert!(matches!(
        flow.print(&mut target, timestamp()).await,
        Err(FlowError::NothingToPrint)
    ));
}

#[tokio::test]
async fn abandoned_submit_blocks_further_submits() {
    let mut flow = PredictionFlow::new(StalledPredictor, MemorySurface::new());
    let form = sample_form();

    let pending = tokio::time::timeout(Duration::from_millis(20), flow.submit(&form)).await;
    assert!(pending.is_err());
    assert_eq!(flow.state(), &FlowState::Submitting);
    assert!(flow.surface().is_loading());

    assert!(matches!(
        flow.submit(&form).await,
        Err(FlowError::SubmitInProgress)
    ));
    assert!(matches!(flow.reset(), Err(FlowError::SubmitInProgress)));
}

#[tokio::test]
async fn html_target_writes_report_file() {
    let dir = tempfile::tempdir().unwrap();
    let mut flow = PredictionFlow::new(
        FixedPredictor::new(PredictionResult::new(0, 0.12, "Low risk")),
        MemorySurface::new(),
    );
    flow.submit(&sample_form()).await.unwrap();

    let path = dir.path().join("out").join("report.html");
    let mut target = HtmlFileTarget::new(&path, false);
    flow.print(&mut target, timestamp()).await.unwrap();

    let html = std::fs::read_to_string(&path).unwrap();
    assert!(html.contains("2024-05-01 09:30:00"));
    assert!(html.contains("Risk Probability: 12.00%"));
}
