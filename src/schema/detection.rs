use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::conditions;

/// Axis-aligned bounding box in original-image pixel coordinates.
///
/// Corners are `(x1, y1)` top-left and `(x2, y2)` bottom-right. Callers
/// guarantee `x1 <= x2` and `y1 <= y2`; the engine does not validate it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct BoundingBox {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

impl BoundingBox {
    #[must_use]
    pub const fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Creates a bounding box from an array `[x1, y1, x2, y2]`.
    #[must_use]
    pub const fn from_array(coords: [f32; 4]) -> Self {
        Self {
            x1: coords[0],
            y1: coords[1],
            x2: coords[2],
            y2: coords[3],
        }
    }

    /// Returns the box as an array `[x1, y1, x2, y2]`.
    #[must_use]
    pub const fn as_array(&self) -> [f32; 4] {
        [self.x1, self.y1, self.x2, self.y2]
    }

    /// Returns the center point `(cx, cy)` in the same pixel space.
    #[must_use]
    pub fn center(&self) -> (f32, f32) {
        (
            f32::midpoint(self.x1, self.x2),
            f32::midpoint(self.y1, self.y2),
        )
    }
}

/// One observed object or attribute instance from the upstream detector.
///
/// `condition` is the canonical hazard-condition identifier used to join
/// against rule entries. It defaults to the raw class name for labels the
/// condition table does not know about.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    pub class_name: String,
    #[serde(default)]
    pub condition: String,
    pub confidence: f32,
    pub bbox: BoundingBox,
}

impl Detection {
    /// Creates a detection, resolving the hazard condition from the class
    /// name through the condition table.
    pub fn new(class_name: impl Into<String>, confidence: f32, bbox: BoundingBox) -> Self {
        let class_name = class_name.into();
        let condition = conditions::resolve(&class_name).to_string();
        Self {
            class_name,
            condition,
            confidence,
            bbox,
        }
    }

    /// Overrides the resolved condition.
    pub fn with_condition(mut self, condition: impl Into<String>) -> Self {
        self.condition = condition.into();
        self
    }
}
