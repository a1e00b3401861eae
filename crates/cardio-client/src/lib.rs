//! Client for the remote heart-disease predictor.
//!
//! One prediction is one `POST {base_url}/api/predict` carrying a
//! [`PatientRecord`](cardio_model::PatientRecord) as JSON. The response body is read in full before it is
//! parsed, so failures can be reported with the raw body:
//!
//! - non-2xx status: [`PredictError::Transport`]
//! - 2xx with a body that is not a prediction: [`PredictError::Format`]
//!
//! There is no retry, timeout or cancellation; a call runs to completion.
//!
//! The base URL is resolved once from an [`ApiConfig`] and injected into
//! [`PredictionClient::new`].

#![warn(clippy::all)]

pub mod client;
pub mod config;
pub mod error;

pub use client::{PREDICT_PATH, PredictionClient, Predictor};
pub use config::{ApiConfig, ApiEnvironment, DEPLOYED_BASE_URL, LOCAL_BASE_URL};
pub use error::{PredictError, Result};
