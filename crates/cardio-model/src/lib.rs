//! Data model for the Cardio Risk pipeline.
//!
//! - [`PatientRecord`]: the 13 clinical measurements sent to the predictor
//! - [`PredictionResult`]: classification, probability and message returned by it
//! - [`capture_record`]: all-or-nothing capture of a record from a [`FieldSource`]
//! - [`fields`]: the field catalog (labels, domains, code descriptions)

pub mod error;
pub mod fields;
pub mod prediction;
pub mod record;

pub use error::{Result, ValidationError, ValidationReason};
pub use fields::{FIELDS, FieldCode, FieldKind, FieldSpec, field_spec};
pub use prediction::{PredictionResult, RiskClass};
pub use record::{FieldSource, PatientRecord, capture_record};
