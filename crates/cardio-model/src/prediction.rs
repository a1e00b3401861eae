//! Prediction result returned by the remote predictor.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Classification, probability and label for one prediction.
///
/// Unknown fields in the response are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    /// Classification as sent by the predictor: 1 means heart disease
    /// predicted, any other number does not.
    pub prediction: f64,
    /// Probability of the positive class in `[0, 1]`.
    #[serde(default)]
    pub probability: Option<f64>,
    /// Human-readable label.
    #[serde(default)]
    pub message: Option<String>,
    /// Server-side time of the prediction, passed through verbatim.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

impl PredictionResult {
    #[must_use]
    pub fn new(prediction: u8, probability: f64, message: impl Into<String>) -> Self {
        Self {
            prediction: f64::from(prediction),
            probability: Some(probability),
            message: Some(message.into()),
            timestamp: None,
        }
    }

    #[must_use]
    pub fn risk_class(&self) -> RiskClass {
        RiskClass::from_prediction(self.prediction)
    }

    /// Probability, treating a missing value as 0.
    #[must_use]
    pub fn probability_or_zero(&self) -> f64 {
        self.probability.unwrap_or(0.0)
    }

    /// Percentage with two decimals, e.g. `87.00`. Ties round away from zero.
    #[must_use]
    pub fn percent_text(&self) -> String {
        let percent = self.probability_or_zero() * 100.0;
        format!("{:.2}", (percent * 100.0).round() / 100.0)
    }

    /// Message to show, falling back to a generic label.
    #[must_use]
    pub fn display_message(&self) -> &str {
        self.message
            .as_deref()
            .filter(|m| !m.is_empty())
            .unwrap_or("Prediction completed")
    }
}

/// Visual category derived from the classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RiskClass {
    HighRisk,
    LowRisk,
}

impl RiskClass {
    /// 1 is high risk; any other value is low risk.
    #[must_use]
    pub fn from_prediction(prediction: f64) -> Self {
        if prediction == 1.0 {
            Self::HighRisk
        } else {
            Self::LowRisk
        }
    }

    /// CSS class used by the result block and the report.
    #[must_use]
    pub const fn css_class(&self) -> &'static str {
        match self {
            Self::HighRisk => "high-risk",
            Self::LowRisk => "low-risk",
        }
    }

    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::HighRisk => "High Risk",
            Self::LowRisk => "Low Risk",
        }
    }

    /// Chart slice color for this class.
    #[must_use]
    pub const fn color(&self) -> &'static str {
        match self {
            Self::HighRisk => "#dc3545",
            Self::LowRisk => "#198754",
        }
    }

    #[must_use]
    pub const fn is_high(&self) -> bool {
        matches!(self, Self::HighRisk)
    }
}

impl fmt::Display for RiskClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.css_class())
    }
}
