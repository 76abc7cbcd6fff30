//! Selection - the unit the compatibility and performance engines operate on
//!
//! A selection is constructed fresh from catalog records for every
//! evaluation; it carries no identity, caching, or mutation hooks. The
//! engines treat it as read-only input.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::entities::part::{Part, PartCategory};
use crate::entities::power_source::PowerSource;

/// An in-progress build: one optional power source plus parts keyed by
/// category. Categories may hold more than one part; the first is the
/// primary one used for numeric rules.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Selection {
    /// The chosen power source, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub power_source: Option<PowerSource>,

    /// Selected parts by category
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub parts: BTreeMap<PartCategory, Vec<Part>>,
}

impl Selection {
    /// Create an empty selection
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a part under its own category
    pub fn add_part(&mut self, part: Part) {
        self.parts.entry(part.category).or_default().push(part);
    }

    /// The primary (first-selected) part in a category
    pub fn primary(&self, category: PartCategory) -> Option<&Part> {
        self.parts.get(&category).and_then(|parts| parts.first())
    }

    /// Whether any part in the category is selected
    pub fn has_category(&self, category: PartCategory) -> bool {
        self.parts.get(&category).map_or(false, |p| !p.is_empty())
    }

    /// Iterate over every selected part across all categories
    pub fn all_parts(&self) -> impl Iterator<Item = &Part> {
        self.parts.values().flatten()
    }

    /// Total number of selected parts
    pub fn part_count(&self) -> usize {
        self.parts.values().map(Vec::len).sum()
    }

    /// True when neither a power source nor any part is selected
    pub fn is_empty(&self) -> bool {
        self.power_source.is_none() && self.part_count() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::part::SpecValue;

    #[test]
    fn test_empty_selection() {
        let selection = Selection::new();
        assert!(selection.is_empty());
        assert_eq!(selection.part_count(), 0);
        assert!(selection.primary(PartCategory::Clutch).is_none());
    }

    #[test]
    fn test_primary_is_first_selected() {
        let mut selection = Selection::new();
        selection.add_part(
            Part::new("60T Sprocket", "60t", PartCategory::Sprocket)
                .with_spec("teeth", SpecValue::Number(60.0)),
        );
        selection.add_part(
            Part::new("72T Sprocket", "72t", PartCategory::Sprocket)
                .with_spec("teeth", SpecValue::Number(72.0)),
        );

        assert_eq!(selection.part_count(), 2);
        assert_eq!(
            selection.primary(PartCategory::Sprocket).unwrap().slug,
            "60t"
        );
        assert!(selection.has_category(PartCategory::Sprocket));
        assert!(!selection.has_category(PartCategory::Chain));
    }

    #[test]
    fn test_all_parts_spans_categories() {
        let mut selection = Selection::new();
        selection.add_part(Part::new("Chain", "chain", PartCategory::Chain));
        selection.add_part(Part::new("Clutch", "clutch", PartCategory::Clutch));

        assert_eq!(selection.all_parts().count(), 2);
        assert!(!selection.is_empty());
    }
}
