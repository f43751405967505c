//! Static table mapping detector class names to canonical hazard conditions.
//!
//! The table must match the upstream model's label spelling exactly, which
//! is why it lives in-process rather than in the standards directory. In
//! most cases the condition matches the class name, but similar classes can
//! be grouped under a common condition.

use crate::schema::Detection;

/// Class labels in the order expected from the upstream model. Callers that
/// index detector output by class id must agree with this ordering.
pub const CLASS_NAMES: &[&str] = &[
    "person",
    "forklift",
    "hardhat_missing",
    "hi_vis_missing",
    "safety_glasses_missing",
    "ungaurded_machine",
    "blocked_exit",
    "ladder_unsafe",
    "spill",
    "no_guardrail",
];

/// Resolves a raw detector label to its canonical hazard condition.
///
/// Unknown labels pass through unchanged, so new detector classes become
/// self-describing conditions instead of disappearing silently.
pub fn resolve(class_name: &str) -> &str {
    match class_name {
        // The model's label set carries this misspelling; keep the canonical
        // condition spelled correctly.
        "ungaurded_machine" => "unguarded_machine",
        other => other,
    }
}

/// Fills in the condition for detections that were deserialized without one.
///
/// Detections whose condition was pre-attached upstream are left untouched.
pub fn attach_conditions(detections: &mut [Detection]) {
    for det in detections {
        if det.condition.is_empty() {
            det.condition = resolve(&det.class_name).to_string();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::BoundingBox;

    #[test]
    fn known_classes_resolve_to_themselves() {
        assert_eq!(resolve("person"), "person");
        assert_eq!(resolve("forklift"), "forklift");
        assert_eq!(resolve("hardhat_missing"), "hardhat_missing");
    }

    #[test]
    fn misspelled_label_maps_to_canonical_condition() {
        assert_eq!(resolve("ungaurded_machine"), "unguarded_machine");
    }

    #[test]
    fn unknown_class_passes_through() {
        assert_eq!(resolve("crane_overload"), "crane_overload");
    }

    #[test]
    fn every_class_name_has_a_condition() {
        for name in CLASS_NAMES {
            assert!(!resolve(name).is_empty());
        }
    }

    #[test]
    fn attach_conditions_fills_only_empty() {
        let mut detections = vec![
            Detection {
                class_name: "ungaurded_machine".to_string(),
                condition: String::new(),
                confidence: 0.7,
                bbox: BoundingBox::new(0.0, 0.0, 1.0, 1.0),
            },
            Detection::new("person", 0.9, BoundingBox::new(0.0, 0.0, 1.0, 1.0))
                .with_condition("pedestrian"),
        ];

        attach_conditions(&mut detections);

        assert_eq!(detections[0].condition, "unguarded_machine");
        assert_eq!(detections[1].condition, "pedestrian");
    }
}
