//! Rule sets and priority resolution
//!
//! A rule set is an ordered list of labeled threshold predicates; order
//! encodes priority. Resolution rewrites the rules into mutually
//! exclusive predicates (first match wins), appends the fallback class
//! for units that only clear the minimal-signal floor, and leaves
//! everything else as background (excluded from areas and legends).

use agrolens_core::IndexKind;

use super::predicate::Predicate;

/// Identifier of a class within one rule set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
pub struct ClassId(pub u32);

/// One labeled threshold rule.
#[derive(Debug, Clone)]
pub struct ClassificationRule {
    pub id: ClassId,
    pub label: &'static str,
    pub color: &'static str,
    pub predicate: Predicate,
}

/// Fallback class for units above the signal floor that match no rule.
#[derive(Debug, Clone)]
pub struct FallbackRule {
    pub label: &'static str,
    pub color: &'static str,
    /// Minimal-signal predicate; units below it are background.
    pub floor: Predicate,
}

/// An ordered, prioritized classification rule set.
#[derive(Debug, Clone)]
pub struct RuleSet {
    pub name: &'static str,
    rules: Vec<ClassificationRule>,
    fallback: Option<FallbackRule>,
}

/// A class with its conflict-free predicate after resolution.
#[derive(Debug, Clone)]
pub struct ResolvedClass {
    pub id: ClassId,
    pub label: &'static str,
    pub color: &'static str,
    pub predicate: Predicate,
}

impl RuleSet {
    pub fn new(
        name: &'static str,
        rules: Vec<(&'static str, &'static str, Predicate)>,
        fallback: Option<FallbackRule>,
    ) -> Self {
        let rules = rules
            .into_iter()
            .enumerate()
            .map(|(i, (label, color, predicate))| ClassificationRule {
                id: ClassId(i as u32),
                label,
                color,
                predicate,
            })
            .collect();
        Self {
            name,
            rules,
            fallback,
        }
    }

    pub fn rules(&self) -> &[ClassificationRule] {
        &self.rules
    }

    pub fn fallback(&self) -> Option<&FallbackRule> {
        self.fallback.as_ref()
    }

    /// Identifier of the fallback class (one past the last rule).
    pub fn fallback_id(&self) -> ClassId {
        ClassId(self.rules.len() as u32)
    }

    /// All index surfaces any rule references.
    pub fn indices(&self) -> std::collections::BTreeSet<IndexKind> {
        let mut out = self
            .fallback
            .as_ref()
            .map(|f| f.floor.indices())
            .unwrap_or_default();
        for rule in &self.rules {
            out.extend(rule.predicate.indices());
        }
        out
    }

    /// Rewrite the prioritized rules into mutually exclusive predicates.
    ///
    /// Rule `i` becomes `pred_i && !pred_0 && .. && !pred_{i-1}`, so a unit
    /// matching several predicates is assigned to the earliest rule no
    /// matter in which order the masks are evaluated. The fallback class is
    /// the signal floor minus every specific rule.
    pub fn resolve(&self) -> Vec<ResolvedClass> {
        let mut out = Vec::with_capacity(self.rules.len() + 1);

        for (i, rule) in self.rules.iter().enumerate() {
            let mut predicate = rule.predicate.clone();
            for earlier in &self.rules[..i] {
                predicate = predicate.and(earlier.predicate.clone().not());
            }
            out.push(ResolvedClass {
                id: rule.id,
                label: rule.label,
                color: rule.color,
                predicate,
            });
        }

        if let Some(fallback) = &self.fallback {
            let mut fallback_pred = fallback.floor.clone();
            for rule in &self.rules {
                fallback_pred = fallback_pred.and(rule.predicate.clone().not());
            }
            out.push(ResolvedClass {
                id: self.fallback_id(),
                label: fallback.label,
                color: fallback.color,
                predicate: fallback_pred,
            });
        }

        out
    }

    /// Assign a single unit from sampled index values.
    ///
    /// Returns `None` for background (below the signal floor and matching
    /// no rule).
    pub fn classify(&self, sample: &dyn Fn(IndexKind) -> Option<f64>) -> Option<ClassId> {
        for rule in &self.rules {
            if rule.predicate.eval(sample) {
                return Some(rule.id);
            }
        }
        if let Some(fallback) = &self.fallback {
            if fallback.floor.eval(sample) {
                return Some(self.fallback_id());
            }
        }
        None
    }
}

/// Per-class area (or mean value for continuous analyses), in rule order.
#[derive(Debug, Clone, serde::Serialize)]
pub struct ClassArea {
    pub id: ClassId,
    pub label: &'static str,
    pub color: &'static str,
    pub area: f64,
}

/// Class areas for one resolved rule set.
#[derive(Debug, Clone, Default, serde::Serialize)]
pub struct AreaResult {
    classes: Vec<ClassArea>,
}

impl AreaResult {
    pub fn new(classes: Vec<ClassArea>) -> Self {
        Self { classes }
    }

    pub fn classes(&self) -> &[ClassArea] {
        &self.classes
    }

    /// Sum of all class areas.
    pub fn total(&self) -> f64 {
        self.classes.iter().map(|c| c.area).sum()
    }

    /// Label of the class with the largest area, `"Unknown"` when every
    /// area is zero (or there are no classes at all).
    pub fn dominant(&self) -> &'static str {
        let best = self
            .classes
            .iter()
            .max_by(|a, b| a.area.partial_cmp(&b.area).unwrap_or(std::cmp::Ordering::Equal));
        match best {
            Some(c) if c.area > 0.0 => c.label,
            _ => "Unknown",
        }
    }

    pub fn area_of(&self, label: &str) -> f64 {
        self.classes
            .iter()
            .find(|c| c.label == label)
            .map(|c| c.area)
            .unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classification::predicate::gt;
    use IndexKind::Ndvi;

    fn two_overlapping_rules() -> RuleSet {
        RuleSet::new(
            "test",
            vec![
                ("High", "#006400", gt(Ndvi, 0.5)),
                // Overlaps the first rule entirely above 0.5.
                ("Medium", "#FFFF00", gt(Ndvi, 0.3)),
            ],
            Some(FallbackRule {
                label: "Other",
                color: "#FF4500",
                floor: gt(Ndvi, 0.1),
            }),
        )
    }

    fn ndvi_sample(v: f64) -> impl Fn(IndexKind) -> Option<f64> {
        move |ix| (ix == Ndvi).then_some(v)
    }

    #[test]
    fn earlier_rule_wins_on_overlap() {
        let set = two_overlapping_rules();
        assert_eq!(set.classify(&ndvi_sample(0.7)), Some(ClassId(0)));
        assert_eq!(set.classify(&ndvi_sample(0.4)), Some(ClassId(1)));
        assert_eq!(set.classify(&ndvi_sample(0.2)), Some(set.fallback_id()));
        assert_eq!(set.classify(&ndvi_sample(0.05)), None);
    }

    #[test]
    fn resolved_predicates_are_disjoint() {
        let set = two_overlapping_rules();
        let resolved = set.resolve();
        assert_eq!(resolved.len(), 3);

        // Over a sweep of values, at most one exclusive predicate holds,
        // and it agrees with first-match classification.
        for i in 0..100 {
            let v = i as f64 / 100.0;
            let s = ndvi_sample(v);
            let matches: Vec<_> = resolved
                .iter()
                .filter(|c| c.predicate.eval(&s))
                .map(|c| c.id)
                .collect();
            assert!(matches.len() <= 1, "value {v} matched {matches:?}");
            assert_eq!(matches.first().copied(), set.classify(&s));
        }
    }

    #[test]
    fn resolution_order_independent() {
        // Evaluating the resolved predicates in reverse order assigns the
        // same class: exclusivity is baked into the predicates themselves.
        let set = two_overlapping_rules();
        let mut resolved = set.resolve();
        resolved.reverse();
        let s = ndvi_sample(0.7);
        let hit: Vec<_> = resolved.iter().filter(|c| c.predicate.eval(&s)).collect();
        assert_eq!(hit.len(), 1);
        assert_eq!(hit[0].label, "High");
    }

    #[test]
    fn dominant_class() {
        let areas = AreaResult::new(vec![
            ClassArea { id: ClassId(0), label: "A", color: "#000000", area: 5.0 },
            ClassArea { id: ClassId(1), label: "B", color: "#000000", area: 9.0 },
        ]);
        assert_eq!(areas.dominant(), "B");

        let empty = AreaResult::new(vec![
            ClassArea { id: ClassId(0), label: "A", color: "#000000", area: 0.0 },
        ]);
        assert_eq!(empty.dominant(), "Unknown");
        assert_eq!(AreaResult::default().dominant(), "Unknown");
    }
}
