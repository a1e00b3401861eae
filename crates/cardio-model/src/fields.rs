//! Field catalog for the prediction form.
//!
//! Order matches the request body and the order in which fields are validated.

/// A single allowed code of a categorical field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldCode {
    pub code: u8,
    pub label: &'static str,
}

/// Semantic type and domain of a field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldKind {
    /// Real-valued measurement.
    Numeric {
        /// Smallest accepted value.
        min: f64,
        /// Whether `min` itself is accepted.
        min_inclusive: bool,
        /// Range seen in practice, shown as guidance only.
        typical: (f64, f64),
        unit: Option<&'static str>,
    },
    /// Integer code from a fixed set.
    Categorical { codes: &'static [FieldCode] },
}

/// Catalog entry for one form field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSpec {
    /// Key used in the form and in the JSON body.
    pub key: &'static str,
    pub label: &'static str,
    pub description: &'static str,
    /// Share of the predictor's decisions attributed to this field.
    pub importance: f64,
    pub kind: FieldKind,
}

impl FieldSpec {
    #[must_use]
    pub const fn is_numeric(&self) -> bool {
        matches!(self.kind, FieldKind::Numeric { .. })
    }

    /// Whether a parsed numeric value satisfies the lower bound.
    #[must_use]
    pub fn accepts_number(&self, value: f64) -> bool {
        match self.kind {
            FieldKind::Numeric {
                min, min_inclusive, ..
            } => {
                if min_inclusive {
                    value >= min
                } else {
                    value > min
                }
            }
            FieldKind::Categorical { .. } => false,
        }
    }

    /// Look up a categorical code.
    #[must_use]
    pub fn code(&self, code: u8) -> Option<&'static FieldCode> {
        match self.kind {
            FieldKind::Categorical { codes } => codes.iter().find(|c| c.code == code),
            FieldKind::Numeric { .. } => None,
        }
    }

    /// Human-readable domain, e.g. `> 0` or `0, 1, 2`.
    #[must_use]
    pub fn domain_text(&self) -> String {
        match self.kind {
            FieldKind::Numeric {
                min, min_inclusive, ..
            } => {
                let op = if min_inclusive { ">=" } else { ">" };
                format!("{op} {min}")
            }
            FieldKind::Categorical { codes } => codes
                .iter()
                .map(|c| c.code.to_string())
                .collect::<Vec<_>>()
                .join(", "),
        }
    }
}

const SEX_CODES: &[FieldCode] = &[
    FieldCode { code: 0, label: "Female" },
    FieldCode { code: 1, label: "Male" },
];

const CP_CODES: &[FieldCode] = &[
    FieldCode { code: 0, label: "Typical angina" },
    FieldCode { code: 1, label: "Atypical angina" },
    FieldCode { code: 2, label: "Non-anginal pain" },
    FieldCode { code: 3, label: "Asymptomatic" },
];

const FBS_CODES: &[FieldCode] = &[
    FieldCode { code: 0, label: "False" },
    FieldCode { code: 1, label: "True" },
];

const RESTECG_CODES: &[FieldCode] = &[
    FieldCode { code: 0, label: "Normal" },
    FieldCode { code: 1, label: "ST-T wave abnormality" },
    FieldCode {
        code: 2,
        label: "Probable or definite left ventricular hypertrophy",
    },
];

const YES_NO_CODES: &[FieldCode] = &[
    FieldCode { code: 0, label: "No" },
    FieldCode { code: 1, label: "Yes" },
];

const SLOPE_CODES: &[FieldCode] = &[
    FieldCode { code: 0, label: "Upsloping" },
    FieldCode { code: 1, label: "Flat" },
    FieldCode { code: 2, label: "Downsloping" },
];

const CA_CODES: &[FieldCode] = &[
    FieldCode { code: 0, label: "None" },
    FieldCode { code: 1, label: "One vessel" },
    FieldCode { code: 2, label: "Two vessels" },
    FieldCode { code: 3, label: "Three vessels" },
    FieldCode { code: 4, label: "Four vessels" },
];

const THAL_CODES: &[FieldCode] = &[
    FieldCode { code: 0, label: "Normal" },
    FieldCode { code: 1, label: "Fixed defect" },
    FieldCode { code: 2, label: "Reversible defect" },
    FieldCode { code: 3, label: "Unknown" },
];

/// All form fields in canonical order.
pub const FIELDS: [FieldSpec; 13] = [
    FieldSpec {
        key: "age",
        label: "Age",
        description: "Age in years",
        importance: 0.0779,
        kind: FieldKind::Numeric {
            min: 0.0,
            min_inclusive: false,
            typical: (0.0, 150.0),
            unit: Some("years"),
        },
    },
    FieldSpec {
        key: "sex",
        label: "Gender",
        description: "Gender (1 = male; 0 = female)",
        importance: 0.0406,
        kind: FieldKind::Categorical { codes: SEX_CODES },
    },
    FieldSpec {
        key: "cp",
        label: "Chest Pain Type",
        description: "Chest pain type",
        importance: 0.1457,
        kind: FieldKind::Categorical { codes: CP_CODES },
    },
    FieldSpec {
        key: "trestbps",
        label: "Blood Pressure",
        description: "Resting blood pressure (in mm Hg)",
        importance: 0.0503,
        kind: FieldKind::Numeric {
            min: 0.0,
            min_inclusive: false,
            typical: (94.0, 200.0),
            unit: Some("mm Hg"),
        },
    },
    FieldSpec {
        key: "chol",
        label: "Cholesterol",
        description: "Serum cholesterol in mg/dl",
        importance: 0.0568,
        kind: FieldKind::Numeric {
            min: 0.0,
            min_inclusive: false,
            typical: (126.0, 564.0),
            unit: Some("mg/dl"),
        },
    },
    FieldSpec {
        key: "fbs",
        label: "Fasting Blood Sugar",
        description: "Fasting blood sugar > 120 mg/dl",
        importance: 0.0049,
        kind: FieldKind::Categorical { codes: FBS_CODES },
    },
    FieldSpec {
        key: "restecg",
        label: "ECG Results",
        description: "Resting electrocardiographic results",
        importance: 0.0121,
        kind: FieldKind::Categorical {
            codes: RESTECG_CODES,
        },
    },
    FieldSpec {
        key: "thalach",
        label: "Maximum Heart Rate",
        description: "Maximum heart rate achieved",
        importance: 0.0893,
        kind: FieldKind::Numeric {
            min: 0.0,
            min_inclusive: false,
            typical: (71.0, 202.0),
            unit: Some("bpm"),
        },
    },
    FieldSpec {
        key: "exang",
        label: "Exercise Induced Angina",
        description: "Exercise induced angina",
        importance: 0.0725,
        kind: FieldKind::Categorical {
            codes: YES_NO_CODES,
        },
    },
    FieldSpec {
        key: "oldpeak",
        label: "ST Depression",
        description: "ST depression induced by exercise relative to rest",
        importance: 0.1106,
        kind: FieldKind::Numeric {
            min: 0.0,
            min_inclusive: true,
            typical: (0.0, 6.2),
            unit: None,
        },
    },
    FieldSpec {
        key: "slope",
        label: "ST Slope",
        description: "Slope of the peak exercise ST segment",
        importance: 0.0586,
        kind: FieldKind::Categorical { codes: SLOPE_CODES },
    },
    FieldSpec {
        key: "ca",
        label: "Number of Major Vessels",
        description: "Number of major vessels colored by fluoroscopy",
        importance: 0.1469,
        kind: FieldKind::Categorical { codes: CA_CODES },
    },
    FieldSpec {
        key: "thal",
        label: "Thalassemia",
        description: "Thalassemia",
        importance: 0.1338,
        kind: FieldKind::Categorical { codes: THAL_CODES },
    },
];

/// Look up a field by key.
#[must_use]
pub fn field_spec(key: &str) -> Option<&'static FieldSpec> {
    FIELDS.iter().find(|spec| spec.key == key)
}
