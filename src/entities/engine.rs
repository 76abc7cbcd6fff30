//! Gas engine record

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::entity::Record;
use crate::core::identity::{EntityId, EntityPrefix};

/// Output shaft geometry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[derive(Default)]
pub enum ShaftType {
    #[default]
    Straight,
    Tapered,
    Threaded,
}

impl std::fmt::Display for ShaftType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShaftType::Straight => write!(f, "straight"),
            ShaftType::Tapered => write!(f, "tapered"),
            ShaftType::Threaded => write!(f, "threaded"),
        }
    }
}

/// Gas engine record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GasEngine {
    /// Unique identifier (ENG-...)
    pub id: EntityId,

    /// URL-safe slug, unique within the catalog
    pub slug: String,

    /// Display name
    pub name: String,

    /// Manufacturer/brand
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,

    /// Displacement in cc
    pub displacement_cc: f64,

    /// Rated horsepower
    pub horsepower: f64,

    /// Rated torque in ft-lb (0.0 when the manufacturer does not publish it)
    #[serde(default)]
    pub torque_ftlb: f64,

    /// Output shaft diameter in inches
    pub shaft_diameter_in: f64,

    /// Output shaft length in inches
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shaft_length_in: Option<f64>,

    /// Output shaft geometry
    #[serde(default)]
    pub shaft_type: ShaftType,

    /// Maximum governed RPM
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_rpm: Option<f64>,

    /// Dry weight in pounds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight_lb: Option<f64>,

    /// Price in USD
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,

    /// Declared-compatible engine identifiers (clones and equivalents);
    /// parts listed for any member of this family fit this engine too
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub clones: Vec<String>,

    /// Additional notes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    /// Classification tags
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    /// Creation timestamp
    pub created: DateTime<Utc>,
}

impl GasEngine {
    /// Create a new gas engine with required fields
    pub fn new(
        name: impl Into<String>,
        slug: impl Into<String>,
        displacement_cc: f64,
        horsepower: f64,
        shaft_diameter_in: f64,
    ) -> Self {
        Self {
            id: EntityId::new(EntityPrefix::Eng),
            slug: slug.into(),
            name: name.into(),
            brand: None,
            displacement_cc,
            horsepower,
            torque_ftlb: 0.0,
            shaft_diameter_in,
            shaft_length_in: None,
            shaft_type: ShaftType::default(),
            max_rpm: None,
            weight_lb: None,
            price: None,
            clones: Vec::new(),
            notes: None,
            tags: Vec::new(),
            created: Utc::now(),
        }
    }
}

impl Record for GasEngine {
    const PREFIX: &'static str = "ENG";

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn slug(&self) -> &str {
        &self.slug
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_roundtrip() {
        let mut engine = GasEngine::new("Predator 212", "predator-212", 212.0, 6.5, 0.75);
        engine.torque_ftlb = 8.1;
        engine.max_rpm = Some(3600.0);
        engine.weight_lb = Some(35.0);
        engine.clones = vec!["gx200".to_string(), "196cc-clone".to_string()];

        let yaml = serde_yml::to_string(&engine).unwrap();
        let parsed: GasEngine = serde_yml::from_str(&yaml).unwrap();

        assert_eq!(parsed.slug, "predator-212");
        assert_eq!(parsed.shaft_diameter_in, 0.75);
        assert_eq!(parsed.shaft_type, ShaftType::Straight);
        assert_eq!(parsed.clones.len(), 2);
    }

    #[test]
    fn test_shaft_type_serialization() {
        let yaml = serde_yml::to_string(&ShaftType::Tapered).unwrap();
        assert_eq!(yaml.trim(), "tapered");
    }

    #[test]
    fn test_missing_optional_fields_default() {
        let yaml = "\
id: ENG-01HQ3K4N5M6P7R8S9T0VWXYZAB
slug: bare-engine
name: Bare Engine
displacement_cc: 79.0
horsepower: 3.0
shaft_diameter_in: 0.625
created: 2026-01-01T00:00:00Z
";
        let parsed: GasEngine = serde_yml::from_str(yaml).unwrap();
        assert_eq!(parsed.torque_ftlb, 0.0);
        assert!(parsed.max_rpm.is_none());
        assert!(parsed.weight_lb.is_none());
        assert!(parsed.clones.is_empty());
    }
}
