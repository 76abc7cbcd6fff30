//! Build record - a saved build file referencing catalog records
//!
//! Builds live under `builds/` as YAML and reference the power source and
//! parts by ID or slug; the catalog resolves them into a [`Selection`]
//! before the engines run.
//!
//! [`Selection`]: crate::entities::selection::Selection

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::core::entity::Record;
use crate::core::identity::{EntityId, EntityPrefix};
use crate::entities::part::PartCategory;

/// A saved build file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Build {
    /// Unique identifier (BLD-...)
    pub id: EntityId,

    /// Build title
    pub title: String,

    /// Detailed description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Gas engine reference (ID or slug); mutually exclusive with `motor`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub engine: Option<String>,

    /// Electric motor reference (ID or slug); mutually exclusive with `engine`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub motor: Option<String>,

    /// Part references by category
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub parts: BTreeMap<PartCategory, Vec<String>>,

    /// Additional notes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    /// Classification tags
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    /// Creation timestamp
    pub created: DateTime<Utc>,

    /// Author name
    pub author: String,
}

impl Build {
    /// Create a new build with required fields
    pub fn new(title: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            id: EntityId::new(EntityPrefix::Bld),
            title: title.into(),
            description: None,
            engine: None,
            motor: None,
            parts: BTreeMap::new(),
            notes: None,
            tags: Vec::new(),
            created: Utc::now(),
            author: author.into(),
        }
    }

    /// Add a part reference under a category
    pub fn add_part_ref(&mut self, category: PartCategory, reference: impl Into<String>) {
        self.parts.entry(category).or_default().push(reference.into());
    }

    /// Total number of part references
    pub fn part_ref_count(&self) -> usize {
        self.parts.values().map(Vec::len).sum()
    }
}

impl Record for Build {
    const PREFIX: &'static str = "BLD";

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn slug(&self) -> &str {
        // Builds are referenced by ID or title, not slug
        &self.title
    }

    fn name(&self) -> &str {
        &self.title
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_roundtrip() {
        let mut build = Build::new("Weekend Racer", "Author");
        build.engine = Some("predator-212".to_string());
        build.add_part_ref(PartCategory::Clutch, "max-torque-clutch");
        build.add_part_ref(PartCategory::Sprocket, "60t-sprocket");
        build.tags = vec!["racing".to_string()];

        let yaml = serde_yml::to_string(&build).unwrap();
        let parsed: Build = serde_yml::from_str(&yaml).unwrap();

        assert_eq!(parsed.title, "Weekend Racer");
        assert_eq!(parsed.engine.as_deref(), Some("predator-212"));
        assert!(parsed.motor.is_none());
        assert_eq!(parsed.part_ref_count(), 2);
        assert_eq!(
            parsed.parts[&PartCategory::Clutch],
            vec!["max-torque-clutch".to_string()]
        );
    }

    #[test]
    fn test_part_category_map_keys_serialize_snake_case() {
        let mut build = Build::new("EV Cart", "Author");
        build.motor = Some("my1020-48v".to_string());
        build.add_part_ref(PartCategory::MotorController, "kelly-48v");

        let yaml = serde_yml::to_string(&build).unwrap();
        assert!(yaml.contains("motor_controller:"));
    }
}
