//! Submit/reset/print lifecycle for one form.
//!
//! ```text
//! Idle ──submit──▶ Submitting ──ok──▶ Success ──reset──▶ Idle
//!                      │                 │
//!                      └──err──▶ Idle    └──submit──▶ Submitting
//! ```

use chrono::NaiveDateTime;
use thiserror::Error;

use cardio_client::{PredictError, Predictor};
use cardio_common::redact_value;
use cardio_model::{FieldSource, PatientRecord, PredictionResult, ValidationError, capture_record};
use cardio_report::{
    DisplaySurface, PrintTarget, ReportDocument, ReportError, ResultRenderer, generate_report,
    print_report,
};

/// Errors surfaced by [`PredictionFlow`].
#[derive(Debug, Error)]
pub enum FlowError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Predict(#[from] PredictError),

    #[error("A prediction is already in progress")]
    SubmitInProgress,

    #[error("No prediction to print")]
    NothingToPrint,

    #[error("report failed: {0}")]
    Report(#[from] ReportError),
}

/// A captured record together with its prediction.
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub record: PatientRecord,
    pub result: PredictionResult,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FlowState {
    Idle,
    /// A request is in flight.
    Submitting,
    /// The last submit succeeded; printing is available.
    Success(Submission),
}

/// Drives capture, prediction and rendering for a single form.
pub struct PredictionFlow<P, S> {
    predictor: P,
    renderer: ResultRenderer<S>,
    state: FlowState,
}

impl<P: Predictor, S: DisplaySurface> PredictionFlow<P, S> {
    pub fn new(predictor: P, surface: S) -> Self {
        Self {
            predictor,
            renderer: ResultRenderer::new(surface),
            state: FlowState::Idle,
        }
    }

    pub fn state(&self) -> &FlowState {
        &self.state
    }

    pub fn predictor(&self) -> &P {
        &self.predictor
    }

    pub fn renderer(&self) -> &ResultRenderer<S> {
        &self.renderer
    }

    pub fn surface(&self) -> &S {
        self.renderer.surface()
    }

    /// The last successful submission.
    pub fn submission(&self) -> Option<&Submission> {
        match &self.state {
            FlowState::Success(submission) => Some(submission),
            FlowState::Idle | FlowState::Submitting => None,
        }
    }

    pub fn can_print(&self) -> bool {
        self.submission().is_some()
    }

    /// Capture the form, request a prediction and render it.
    ///
    /// Any failure hides the result, alerts the user and returns the flow to
    /// [`FlowState::Idle`]. If the returned future is dropped before it
    /// completes the flow stays in [`FlowState::Submitting`] and rejects
    /// further submits.
    pub async fn submit<F: FieldSource + ?Sized>(
        &mut self,
        source: &F,
    ) -> Result<Submission, FlowError> {
        if self.state == FlowState::Submitting {
            return Err(FlowError::SubmitInProgress);
        }
        self.state = FlowState::Submitting;
        tracing::info!("submitting prediction");

        let surface = self.renderer.surface_mut();
        surface.set_loading(true);
        surface.hide_result();

        let outcome = self.capture_and_predict(source).await;
        self.renderer.surface_mut().set_loading(false);

        match outcome {
            Ok(submission) => {
                let view = self.renderer.render(&submission.result);
                tracing::info!(risk = %view.risk_class, "prediction rendered");
                self.state = FlowState::Success(submission.clone());
                Ok(submission)
            }
            Err(error) => {
                tracing::error!(%error, "prediction failed");
                match &error {
                    FlowError::Validation(invalid) => {
                        tracing::debug!(detail = %invalid.detail(), "form rejected");
                    }
                    FlowError::Predict(predict) => {
                        if let Some(body) = predict.raw_body() {
                            tracing::debug!(body = redact_value(body), "predictor response");
                        }
                    }
                    _ => {}
                }
                self.renderer.reset();
                self.renderer.surface_mut().alert(&error.to_string());
                self.state = FlowState::Idle;
                Err(error)
            }
        }
    }

    async fn capture_and_predict<F: FieldSource + ?Sized>(
        &self,
        source: &F,
    ) -> Result<Submission, FlowError> {
        let record = capture_record(source)?;
        for (field, value) in record.values() {
            let text = value.to_string();
            tracing::trace!(field, value = redact_value(&text), "captured field");
        }
        let result = self.predictor.predict(&record).await?;
        Ok(Submission { record, result })
    }

    /// Hide the result and forget the last submission.
    pub fn reset(&mut self) -> Result<(), FlowError> {
        if self.state == FlowState::Submitting {
            return Err(FlowError::SubmitInProgress);
        }
        self.renderer.reset();
        self.state = FlowState::Idle;
        tracing::debug!("flow reset");
        Ok(())
    }

    /// Generate the report for the last submission and print it on `target`.
    pub async fn print<T: PrintTarget + ?Sized>(
        &self,
        target: &mut T,
        generated_at: NaiveDateTime,
    ) -> Result<ReportDocument, FlowError> {
        let submission = self.submission().ok_or(FlowError::NothingToPrint)?;
        let document = generate_report(&submission.record, &submission.result, generated_at);
        print_report(target, &document).await?;
        tracing::info!(generated_at = %document.generated_at, "report printed");
        Ok(document)
    }
}
