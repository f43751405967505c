use crate::config::EngineConfig;
use crate::proximity::{self, ProximityRule};
use crate::rules::{LoadError, RuleStore};
use crate::schema::{Detection, EvaluationReport, Violation};

/// Orchestrates direct and compound rule matching for detection batches.
///
/// Holds only immutable state after construction, so one engine can serve
/// concurrent `evaluate` calls. To pick up a changed rule set, build a new
/// engine and swap it in; never mutate a live one.
pub struct ViolationEngine {
    store: RuleStore,
    proximity_rules: Vec<ProximityRule>,
}

impl ViolationEngine {
    pub fn new(store: RuleStore) -> Self {
        Self {
            store,
            proximity_rules: Vec::new(),
        }
    }

    /// Registers a compound-condition rule. Rules run in registration order.
    pub fn register(mut self, rule: ProximityRule) -> Self {
        self.proximity_rules.push(rule);
        self
    }

    /// Loads the rule store and proximity rules named by `config`.
    pub fn from_config(config: &EngineConfig) -> Result<Self, LoadError> {
        let store = RuleStore::load(&config.standards_dir)?;
        let mut engine = Self::new(store);
        for rule in &config.proximity {
            engine = engine.register(rule.clone());
        }
        Ok(engine)
    }

    pub fn store(&self) -> &RuleStore {
        &self.store
    }

    /// Evaluates one batch of detections.
    ///
    /// Output order is deterministic: direct violations in detection-input
    /// order (store lookup order within one detection), then compound
    /// violations in pair-iteration order. Evaluation is total; conditions
    /// with no rule entries simply contribute nothing.
    pub fn evaluate(&self, detections: &[Detection]) -> Vec<Violation> {
        let mut violations = Vec::new();

        for det in detections {
            for entry in self.store.lookup(&det.condition) {
                violations.push(Violation::direct(entry, det));
            }
        }

        for rule in &self.proximity_rules {
            for found in proximity::find_compound_matches(rule, detections) {
                for entry in self.store.lookup(found.condition) {
                    violations.push(Violation::compound(
                        entry,
                        found.confidence,
                        found.person.bbox,
                        found.vehicle.bbox,
                    ));
                }
            }
        }

        violations
    }

    /// Evaluates and wraps the result in the versioned report envelope.
    pub fn evaluate_report(&self, detections: &[Detection]) -> EvaluationReport {
        EvaluationReport::new(self.evaluate(detections))
    }
}
