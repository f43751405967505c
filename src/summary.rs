use crate::schema::Violation;

/// Renders a human-readable, one-line-per-violation summary.
pub fn summarize(violations: &[Violation]) -> String {
    if violations.is_empty() {
        return "No potential violations detected.".to_string();
    }
    violations
        .iter()
        .map(|v| {
            format!(
                "{} {}: {} (confidence {:.2})",
                v.standard, v.citation, v.description, v.confidence
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{BoundingBox, Evidence};

    fn violation(standard: &str, citation: &str, confidence: f32) -> Violation {
        Violation {
            standard: standard.to_string(),
            citation: citation.to_string(),
            description: "Head protection required".to_string(),
            severity: "high".to_string(),
            confidence,
            evidence: Evidence::object(BoundingBox::new(0.0, 0.0, 1.0, 1.0), "hardhat_missing"),
        }
    }

    #[test]
    fn empty_input_has_fixed_message() {
        assert_eq!(summarize(&[]), "No potential violations detected.");
    }

    #[test]
    fn one_line_per_violation() {
        let summary = summarize(&[
            violation("OSHA", "1926.100", 0.91),
            violation("ANSI", "z89.1", 0.5),
        ]);

        let lines: Vec<&str> = summary.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[0],
            "OSHA 1926.100: Head protection required (confidence 0.91)"
        );
        assert!(lines[1].starts_with("ANSI z89.1:"));
        assert!(lines[1].ends_with("(confidence 0.50)"));
    }
}
