//! Evaluation records returned for a trainee's chosen action.
//!
//! The generator emits these as JSON (camelCase keys); the same records flow
//! through the session unchanged, so the serde shape doubles as the wire
//! contract.

use serde::{Deserialize, Serialize};

use crate::error::{FlashpointError, Result};

/// Six-axis performance breakdown, each axis scored 0-100.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceAnalysis {
    pub decision_speed: u8,
    pub accuracy: u8,
    pub risk_assessment: u8,
    pub resource_management: u8,
    pub communication: u8,
    pub safety_protocols: u8,
}

impl PerformanceAnalysis {
    /// Axis values as `(label, value)` pairs, in display order.
    pub fn axes(&self) -> [(&'static str, u8); 6] {
        [
            ("Decision Speed", self.decision_speed),
            ("Accuracy", self.accuracy),
            ("Risk Assessment", self.risk_assessment),
            ("Resource Management", self.resource_management),
            ("Communication", self.communication),
            ("Safety Protocols", self.safety_protocols),
        ]
    }
}

/// The scored feedback result for a trainee's chosen action.
///
/// `score` and `feedback` are always present. The extended fields
/// (`decision_accuracy`, `confidence_level`, `performance_analysis`) are
/// optional on the success path: the generator may omit them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecisionEvaluation {
    /// Overall score of the decision (0-100).
    pub score: u8,
    /// Feedback text; individual points are delimited by a leading "- ".
    pub feedback: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decision_accuracy: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence_level: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub performance_analysis: Option<PerformanceAnalysis>,
}

impl DecisionEvaluation {
    /// Checks that every numeric field is within 0..=100.
    ///
    /// # Errors
    ///
    /// Returns a `Validation` error naming the first out-of-range field.
    pub fn validate(&self) -> Result<()> {
        check_range("score", self.score)?;
        if let Some(value) = self.decision_accuracy {
            check_range("decisionAccuracy", value)?;
        }
        if let Some(value) = self.confidence_level {
            check_range("confidenceLevel", value)?;
        }
        if let Some(analysis) = &self.performance_analysis {
            for (label, value) in analysis.axes() {
                check_range(label, value)?;
            }
        }
        Ok(())
    }
}

fn check_range(field: &str, value: u8) -> Result<()> {
    if value > 100 {
        return Err(FlashpointError::validation(format!(
            "{field} must be within 0..=100, got {value}"
        )));
    }
    Ok(())
}

/// Splits feedback text into display bullets on the leading "- " delimiter.
///
/// Empty segments are discarded and the remainder trimmed, so
/// `"- A\n- B\n- C"` yields exactly `["A", "B", "C"]`.
///
/// Known ambiguity: a literal hyphen-space inside a sentence over-splits.
/// The generator prompt and this renderer agree on the delimiter; degraded
/// output (one undivided point) is non-fatal.
pub fn split_feedback_points(feedback: &str) -> Vec<String> {
    feedback
        .split("- ")
        .map(str::trim)
        .filter(|point| !point.is_empty())
        .map(str::to_string)
        .collect()
}
