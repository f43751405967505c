use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::BoundingBox;

/// Bounding-box evidence attached to a violation.
///
/// The shape is a tagged variant rather than an open record so that callers
/// always know whether one or two boxes back a finding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Evidence {
    /// A single detection triggered the rule directly.
    Object {
        bbox: BoundingBox,
        class_name: String,
    },
    /// A person/vehicle pair in close proximity triggered a compound rule.
    Proximity {
        person_bbox: BoundingBox,
        vehicle_bbox: BoundingBox,
    },
}

impl Evidence {
    pub fn object(bbox: BoundingBox, class_name: impl Into<String>) -> Self {
        Self::Object {
            bbox,
            class_name: class_name.into(),
        }
    }

    pub fn proximity(person_bbox: BoundingBox, vehicle_bbox: BoundingBox) -> Self {
        Self::Proximity {
            person_bbox,
            vehicle_bbox,
        }
    }
}
