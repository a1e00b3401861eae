//! HTTP client for the prediction endpoint.

use std::future::Future;

use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue, USER_AGENT};

use cardio_model::{PatientRecord, PredictionResult};

use crate::config::ApiConfig;
use crate::error::{PredictError, Result};

/// Path of the prediction endpoint below the base URL.
pub const PREDICT_PATH: &str = "/api/predict";

/// User agent string for API requests.
const USER_AGENT_VALUE: &str = concat!("cardio-risk/", env!("CARGO_PKG_VERSION"));

/// Something that turns a record into a prediction.
pub trait Predictor {
    fn predict(&self, record: &PatientRecord) -> impl Future<Output = Result<PredictionResult>>;
}

/// Client for the remote predictor.
#[derive(Debug, Clone)]
pub struct PredictionClient {
    client: reqwest::Client,
    endpoint: String,
}

impl PredictionClient {
    /// Creates a client for the endpoint described by `config`.
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| PredictError::Network(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            endpoint: format!("{}{}", config.resolved_base_url(), PREDICT_PATH),
        })
    }

    /// Full URL requests are posted to.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Posts `record` and parses the prediction.
    pub async fn predict(&self, record: &PatientRecord) -> Result<PredictionResult> {
        let body = serde_json::to_vec(record).map_err(|e| PredictError::Encode(e.to_string()))?;

        tracing::debug!(endpoint = %self.endpoint, "sending prediction request");

        let response = self.client.post(&self.endpoint).body(body).send().await?;
        let status = response.status();
        let text = response.text().await?;

        tracing::debug!(
            status = status.as_u16(),
            body_len = text.len(),
            "received prediction response"
        );

        if !status.is_success() {
            return Err(PredictError::Transport {
                status: status.as_u16(),
                body: text,
            });
        }

        match serde_json::from_str::<PredictionResult>(&text) {
            Ok(result) => Ok(result),
            Err(e) => {
                tracing::error!(error = %e, "failed to parse prediction response");
                Err(PredictError::Format { body: text })
            }
        }
    }
}

impl Predictor for PredictionClient {
    fn predict(&self, record: &PatientRecord) -> impl Future<Output = Result<PredictionResult>> {
        PredictionClient::predict(self, record)
    }
}
