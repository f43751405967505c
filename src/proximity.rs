//! Compound hazard detection from spatial relationships.
//!
//! The canonical case is a person and a powered vehicle close enough
//! together to be a struck-by hazard, which no single detection implies on
//! its own.

use serde::{Deserialize, Serialize};

use crate::schema::{BoundingBox, Detection};

/// Configuration for one compound condition: which two detection conditions
/// to pair, what condition to synthesize, and how close is "too close".
///
/// The threshold is in raw pixel units and is camera/scene dependent; it is
/// not normalized by image resolution or physical scale. Tune it per
/// deployment rather than trusting the default everywhere.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProximityRule {
    pub person_condition: String,
    pub vehicle_condition: String,
    /// Condition synthesized for matching pairs, looked up in the rule
    /// store like any detection condition.
    pub condition: String,
    pub distance_threshold: f32,
}

impl Default for ProximityRule {
    fn default() -> Self {
        Self {
            person_condition: "person".to_string(),
            vehicle_condition: "forklift".to_string(),
            condition: "forklift_pedestrian_proximity".to_string(),
            distance_threshold: 200.0,
        }
    }
}

/// One person/vehicle pair that fell inside the distance threshold.
#[derive(Debug, Clone, PartialEq)]
pub struct CompoundMatch<'a> {
    pub condition: &'a str,
    /// Minimum of the two contributing confidences.
    pub confidence: f32,
    pub person: &'a Detection,
    pub vehicle: &'a Detection,
}

fn center_distance(a: &BoundingBox, b: &BoundingBox) -> f32 {
    let (ax, ay) = a.center();
    let (bx, by) = b.center();
    (ax - bx).hypot(ay - by)
}

/// Pairs every person-condition detection with every vehicle-condition
/// detection and keeps pairs whose box centers are strictly closer than the
/// rule's threshold.
///
/// The scan is O(|persons| x |vehicles|), which is fine at per-frame
/// detection counts (tens). A spatial grid would only pay off well beyond
/// that scale.
pub fn find_compound_matches<'a>(
    rule: &'a ProximityRule,
    detections: &'a [Detection],
) -> Vec<CompoundMatch<'a>> {
    let persons: Vec<&Detection> = detections
        .iter()
        .filter(|d| d.condition == rule.person_condition)
        .collect();
    let vehicles: Vec<&Detection> = detections
        .iter()
        .filter(|d| d.condition == rule.vehicle_condition)
        .collect();

    let mut matches = Vec::new();
    for person in &persons {
        for vehicle in &vehicles {
            let distance = center_distance(&person.bbox, &vehicle.bbox);
            if distance < rule.distance_threshold {
                matches.push(CompoundMatch {
                    condition: &rule.condition,
                    confidence: person.confidence.min(vehicle.confidence),
                    person,
                    vehicle,
                });
            }
        }
    }
    matches
}
