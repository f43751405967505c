use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{BoundingBox, Detection, Evidence, SCHEMA_VERSION};
use crate::rules::RuleEntry;

/// One emitted finding: a rule entry that a detection (or a pair of
/// detections) triggered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Violation {
    /// Source standard, uppercased for display (e.g. `OSHA`).
    pub standard: String,
    pub citation: String,
    pub description: String,
    #[serde(default)]
    pub severity: String,
    pub confidence: f32,
    pub evidence: Evidence,
}

impl Violation {
    /// Builds a violation for a direct, single-detection match.
    pub fn direct(entry: &RuleEntry, detection: &Detection) -> Self {
        Self {
            standard: entry.standard.to_uppercase(),
            citation: entry.citation.clone(),
            description: entry.description.clone(),
            severity: entry.severity.clone(),
            confidence: detection.confidence,
            evidence: Evidence::object(detection.bbox, detection.class_name.clone()),
        }
    }

    /// Builds a violation for a compound proximity match.
    pub fn compound(
        entry: &RuleEntry,
        confidence: f32,
        person_bbox: BoundingBox,
        vehicle_bbox: BoundingBox,
    ) -> Self {
        Self {
            standard: entry.standard.to_uppercase(),
            citation: entry.citation.clone(),
            description: entry.description.clone(),
            severity: entry.severity.clone(),
            confidence,
            evidence: Evidence::proximity(person_bbox, vehicle_bbox),
        }
    }
}

/// Serializable output envelope for one evaluation call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct EvaluationReport {
    pub violations: Vec<Violation>,
    pub version: String,
}

impl EvaluationReport {
    pub fn new(violations: Vec<Violation>) -> Self {
        Self {
            violations,
            version: SCHEMA_VERSION.to_string(),
        }
    }
}
