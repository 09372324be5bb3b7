//! Legend filtering
//!
//! A legend only lists classes that actually cover area: downstream map
//! consumers must never receive an empty-area class claiming visual
//! presence. Entry order follows rule order, not area magnitude.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::classification::{AreaResult, ClassId};

/// One legend entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegendEntry {
    pub label: &'static str,
    pub color: &'static str,
}

/// Ordered `label -> colorHex` legend.
///
/// Serializes as a JSON object whose key order follows rule order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Legend {
    entries: Vec<LegendEntry>,
}

impl Legend {
    pub fn entries(&self) -> &[LegendEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn color_of(&self, label: &str) -> Option<&'static str> {
        self.entries
            .iter()
            .find(|e| e.label == label)
            .map(|e| e.color)
    }
}

impl Serialize for Legend {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for entry in &self.entries {
            map.serialize_entry(entry.label, entry.color)?;
        }
        map.end()
    }
}

/// Build the filtered legend and the ids of classes worth visualizing.
///
/// Classes with area <= 0 are dropped from both outputs; callers issue
/// one per-class layer request per returned id.
pub fn build_legend(areas: &AreaResult) -> (Legend, Vec<ClassId>) {
    let mut entries = Vec::new();
    let mut included = Vec::new();
    for class in areas.classes() {
        if class.area > 0.0 {
            entries.push(LegendEntry {
                label: class.label,
                color: class.color,
            });
            included.push(class.id);
        }
    }
    (Legend { entries }, included)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classification::ClassArea;

    fn areas() -> AreaResult {
        AreaResult::new(vec![
            ClassArea { id: ClassId(0), label: "A", color: "#0066FF", area: 5.0 },
            ClassArea { id: ClassId(1), label: "B", color: "#32CD32", area: 0.0 },
            ClassArea { id: ClassId(2), label: "C", color: "#FFD700", area: 2.0 },
        ])
    }

    #[test]
    fn drops_zero_area_classes_keeps_rule_order() {
        let (legend, ids) = build_legend(&areas());
        assert_eq!(ids, vec![ClassId(0), ClassId(2)]);
        assert_eq!(
            legend.entries(),
            &[
                LegendEntry { label: "A", color: "#0066FF" },
                LegendEntry { label: "C", color: "#FFD700" },
            ]
        );
        assert_eq!(legend.color_of("B"), None);
    }

    #[test]
    fn all_zero_yields_empty_legend() {
        let empty = AreaResult::new(vec![ClassArea {
            id: ClassId(0),
            label: "A",
            color: "#0066FF",
            area: 0.0,
        }]);
        let (legend, ids) = build_legend(&empty);
        assert!(legend.is_empty());
        assert!(ids.is_empty());
    }

    #[test]
    fn serializes_as_ordered_map() {
        let (legend, _) = build_legend(&areas());
        let json = serde_json::to_string(&legend).unwrap();
        assert_eq!(json, r##"{"A":"#0066FF","C":"#FFD700"}"##);
    }
}
