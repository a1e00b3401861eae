//! Patient record and form capture.

use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ValidationError, ValidationReason};
use crate::fields::{FIELDS, FieldKind, FieldSpec};

/// Validated clinical input for one prediction call.
///
/// Field names match the JSON body expected by the predictor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PatientRecord {
    /// Age in years.
    pub age: f64,
    /// 0 = female, 1 = male.
    pub sex: u8,
    /// Chest pain type (0-3).
    pub cp: u8,
    /// Resting blood pressure in mm Hg.
    pub trestbps: f64,
    /// Serum cholesterol in mg/dl.
    pub chol: f64,
    /// Fasting blood sugar > 120 mg/dl.
    pub fbs: u8,
    /// Resting ECG result (0-2).
    pub restecg: u8,
    /// Maximum heart rate achieved.
    pub thalach: f64,
    /// Exercise induced angina.
    pub exang: u8,
    /// ST depression induced by exercise relative to rest.
    pub oldpeak: f64,
    /// Slope of the peak exercise ST segment (0-2).
    pub slope: u8,
    /// Number of major vessels (0-4).
    pub ca: u8,
    /// Thalassemia (0-3).
    pub thal: u8,
}

impl PatientRecord {
    /// Build from values in catalog order. Codes must already be validated.
    fn from_values(v: [f64; FIELDS.len()]) -> Self {
        Self {
            age: v[0],
            sex: v[1] as u8,
            cp: v[2] as u8,
            trestbps: v[3],
            chol: v[4],
            fbs: v[5] as u8,
            restecg: v[6] as u8,
            thalach: v[7],
            exang: v[8] as u8,
            oldpeak: v[9],
            slope: v[10] as u8,
            ca: v[11] as u8,
            thal: v[12] as u8,
        }
    }

    /// All values keyed by field, in catalog order.
    #[must_use]
    pub fn values(&self) -> [(&'static str, f64); FIELDS.len()] {
        let v = [
            self.age,
            f64::from(self.sex),
            f64::from(self.cp),
            self.trestbps,
            self.chol,
            f64::from(self.fbs),
            f64::from(self.restecg),
            self.thalach,
            f64::from(self.exang),
            self.oldpeak,
            f64::from(self.slope),
            f64::from(self.ca),
            f64::from(self.thal),
        ];
        std::array::from_fn(|i| (FIELDS[i].key, v[i]))
    }

    #[must_use]
    pub fn is_male(&self) -> bool {
        self.sex == 1
    }
}

/// Anything that can hand out raw form values by field key.
pub trait FieldSource {
    fn field(&self, name: &str) -> Option<&str>;
}

impl<S: BuildHasher> FieldSource for HashMap<String, String, S> {
    fn field(&self, name: &str) -> Option<&str> {
        self.get(name).map(String::as_str)
    }
}

impl FieldSource for BTreeMap<String, String> {
    fn field(&self, name: &str) -> Option<&str> {
        self.get(name).map(String::as_str)
    }
}

/// Read and validate all fields from `source`.
///
/// Fields are checked in catalog order and the first failure is returned;
/// no record exists unless every field is valid.
pub fn capture_record<S: FieldSource + ?Sized>(source: &S) -> Result<PatientRecord> {
    let mut values = [0.0_f64; FIELDS.len()];
    for (slot, spec) in values.iter_mut().zip(FIELDS.iter()) {
        *slot = read_field(source, spec)?;
    }
    Ok(PatientRecord::from_values(values))
}

fn read_field<S: FieldSource + ?Sized>(source: &S, spec: &'static FieldSpec) -> Result<f64> {
    let fail = |reason| ValidationError::new(spec.key, reason);

    let raw = source
        .field(spec.key)
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .ok_or_else(|| fail(ValidationReason::Missing))?;
    let value = raw
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| fail(ValidationReason::NotANumber))?;

    match spec.kind {
        FieldKind::Numeric { .. } => {
            if spec.accepts_number(value) {
                Ok(value)
            } else {
                Err(fail(ValidationReason::OutOfRange))
            }
        }
        FieldKind::Categorical { codes } => {
            let known = value.fract() == 0.0
                && codes.iter().any(|c| f64::from(c.code) == value);
            if known {
                Ok(value)
            } else {
                Err(fail(ValidationReason::UnknownCode))
            }
        }
    }
}
