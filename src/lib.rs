pub mod conditions;
pub mod config;
pub mod engine;
pub mod proximity;
pub mod rules;
pub mod schema;
pub mod summary;

pub use engine::ViolationEngine;
pub use rules::RuleStore;
