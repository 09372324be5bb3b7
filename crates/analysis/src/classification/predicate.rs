//! Threshold predicates over index surfaces
//!
//! A predicate is a boolean expression over one or more named index
//! surfaces. The engine hands predicates to the earth-observation
//! collaborator, which evaluates them as pixel masks; local evaluation
//! against a sampled value map backs pure resolution and tests.

use std::collections::BTreeSet;

use agrolens_core::IndexKind;

/// Boolean threshold expression over index surfaces.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    Gt(IndexKind, f64),
    Lt(IndexKind, f64),
    Gte(IndexKind, f64),
    Lte(IndexKind, f64),
    And(Box<Predicate>, Box<Predicate>),
    Or(Box<Predicate>, Box<Predicate>),
    Not(Box<Predicate>),
}

/// Shorthand constructors mirroring the comparison operators.
pub fn gt(index: IndexKind, threshold: f64) -> Predicate {
    Predicate::Gt(index, threshold)
}

pub fn lt(index: IndexKind, threshold: f64) -> Predicate {
    Predicate::Lt(index, threshold)
}

pub fn gte(index: IndexKind, threshold: f64) -> Predicate {
    Predicate::Gte(index, threshold)
}

pub fn lte(index: IndexKind, threshold: f64) -> Predicate {
    Predicate::Lte(index, threshold)
}

impl Predicate {
    pub fn and(self, other: Predicate) -> Predicate {
        Predicate::And(Box::new(self), Box::new(other))
    }

    pub fn or(self, other: Predicate) -> Predicate {
        Predicate::Or(Box::new(self), Box::new(other))
    }

    #[allow(clippy::should_implement_trait)]
    pub fn not(self) -> Predicate {
        Predicate::Not(Box::new(self))
    }

    /// Evaluate against a sampled value map. A comparison on an index the
    /// sample does not carry is false (no signal).
    pub fn eval(&self, sample: &dyn Fn(IndexKind) -> Option<f64>) -> bool {
        match self {
            Predicate::Gt(ix, t) => sample(*ix).map(|v| v > *t).unwrap_or(false),
            Predicate::Lt(ix, t) => sample(*ix).map(|v| v < *t).unwrap_or(false),
            Predicate::Gte(ix, t) => sample(*ix).map(|v| v >= *t).unwrap_or(false),
            Predicate::Lte(ix, t) => sample(*ix).map(|v| v <= *t).unwrap_or(false),
            Predicate::And(a, b) => a.eval(sample) && b.eval(sample),
            Predicate::Or(a, b) => a.eval(sample) || b.eval(sample),
            Predicate::Not(inner) => !inner.eval(sample),
        }
    }

    /// All index surfaces the expression references.
    pub fn indices(&self) -> BTreeSet<IndexKind> {
        let mut out = BTreeSet::new();
        self.collect_indices(&mut out);
        out
    }

    fn collect_indices(&self, out: &mut BTreeSet<IndexKind>) {
        match self {
            Predicate::Gt(ix, _)
            | Predicate::Lt(ix, _)
            | Predicate::Gte(ix, _)
            | Predicate::Lte(ix, _) => {
                out.insert(*ix);
            }
            Predicate::And(a, b) | Predicate::Or(a, b) => {
                a.collect_indices(out);
                b.collect_indices(out);
            }
            Predicate::Not(inner) => inner.collect_indices(out),
        }
    }
}

impl std::fmt::Display for Predicate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Predicate::Gt(ix, t) => write!(f, "{ix} > {t}"),
            Predicate::Lt(ix, t) => write!(f, "{ix} < {t}"),
            Predicate::Gte(ix, t) => write!(f, "{ix} >= {t}"),
            Predicate::Lte(ix, t) => write!(f, "{ix} <= {t}"),
            Predicate::And(a, b) => write!(f, "({a} && {b})"),
            Predicate::Or(a, b) => write!(f, "({a} || {b})"),
            Predicate::Not(inner) => write!(f, "!({inner})"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use IndexKind::{Mndwi, Ndvi};

    fn sample(ndvi: f64, mndwi: f64) -> impl Fn(IndexKind) -> Option<f64> {
        move |ix| match ix {
            IndexKind::Ndvi => Some(ndvi),
            IndexKind::Mndwi => Some(mndwi),
            _ => None,
        }
    }

    #[test]
    fn comparison_operators() {
        let s = sample(0.5, 0.1);
        assert!(gt(Ndvi, 0.4).eval(&s));
        assert!(!gt(Ndvi, 0.5).eval(&s));
        assert!(gte(Ndvi, 0.5).eval(&s));
        assert!(lt(Mndwi, 0.2).eval(&s));
        assert!(lte(Mndwi, 0.1).eval(&s));
    }

    #[test]
    fn combinators() {
        let s = sample(0.5, 0.2);
        let rice = gt(Mndwi, 0.15).and(gt(Ndvi, 0.4));
        assert!(rice.eval(&s));
        assert!(rice.clone().not().eval(&sample(0.3, 0.2)));
        assert!(gt(Ndvi, 0.9).or(gt(Mndwi, 0.1)).eval(&s));
    }

    #[test]
    fn missing_index_is_no_signal() {
        let s = sample(0.5, 0.2);
        assert!(!gt(IndexKind::Evi, 0.1).eval(&s));
        // Negation of an unsampled comparison is true: "not above threshold".
        assert!(gt(IndexKind::Evi, 0.1).not().eval(&s));
    }

    #[test]
    fn collects_referenced_indices() {
        let p = gt(Ndvi, 0.4).and(gt(Mndwi, 0.15).not());
        let indices: Vec<_> = p.indices().into_iter().collect();
        assert_eq!(indices, vec![Ndvi, Mndwi]);
    }
}
