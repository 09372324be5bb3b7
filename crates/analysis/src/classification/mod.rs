//! Rule-based classification
//!
//! Ordered threshold rules resolve overlapping index masks into mutually
//! exclusive classes:
//! - predicate: boolean threshold expressions over index surfaces
//! - rules: prioritized rule sets and first-match-wins resolution
//! - rulesets: built-in tables for crops, growth stages, yield,
//!   soil moisture, vegetation health and water detection

mod predicate;
mod rules;
mod rulesets;

pub use predicate::{gt, gte, lt, lte, Predicate};
pub use rules::{
    AreaResult, ClassArea, ClassId, ClassificationRule, FallbackRule, ResolvedClass, RuleSet,
};
pub use rulesets::{
    ai_water_mask, crop_rules, ensemble_water_mask, growth_stage_rules, moisture_rules,
    vegetation_health_rules, water_detectors, water_mask, yield_rules,
};
