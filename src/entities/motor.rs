//! Electric motor record

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::entity::Record;
use crate::core::identity::{EntityId, EntityPrefix};
use crate::entities::engine::ShaftType;

/// Electric motor record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElectricMotor {
    /// Unique identifier (MTR-...)
    pub id: EntityId,

    /// URL-safe slug, unique within the catalog
    pub slug: String,

    /// Display name
    pub name: String,

    /// Manufacturer/brand
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,

    /// System voltage (12, 24, 36, 48, 72 V)
    pub voltage: f64,

    /// Continuous power in kW
    pub power_kw: f64,

    /// Horsepower equivalent used for display and estimation
    pub horsepower: f64,

    /// Rated torque in ft-lb
    #[serde(default)]
    pub torque_ftlb: f64,

    /// Rated/continuous RPM
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rpm: Option<f64>,

    /// Output shaft diameter in inches (for chain-drive motors)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shaft_diameter_in: Option<f64>,

    /// Output shaft geometry
    #[serde(default)]
    pub shaft_type: ShaftType,

    /// Weight in pounds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight_lb: Option<f64>,

    /// Price in USD
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,

    /// Additional notes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    /// Classification tags
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    /// Creation timestamp
    pub created: DateTime<Utc>,
}

impl ElectricMotor {
    /// Create a new electric motor with required fields
    pub fn new(
        name: impl Into<String>,
        slug: impl Into<String>,
        voltage: f64,
        power_kw: f64,
        horsepower: f64,
    ) -> Self {
        Self {
            id: EntityId::new(EntityPrefix::Mtr),
            slug: slug.into(),
            name: name.into(),
            brand: None,
            voltage,
            power_kw,
            horsepower,
            torque_ftlb: 0.0,
            rpm: None,
            shaft_diameter_in: None,
            shaft_type: ShaftType::default(),
            weight_lb: None,
            price: None,
            notes: None,
            tags: Vec::new(),
            created: Utc::now(),
        }
    }
}

impl Record for ElectricMotor {
    const PREFIX: &'static str = "MTR";

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
    fn test_motor_roundtrip() {
        let mut motor = ElectricMotor::new("MY1020 48V", "my1020-48v", 48.0, 1.0, 1.3);
        motor.torque_ftlb = 2.9;
        motor.rpm = Some(3000.0);
        motor.shaft_diameter_in = Some(0.5);

        let yaml = serde_yml::to_string(&motor).unwrap();
        let parsed: ElectricMotor = serde_yml::from_str(&yaml).unwrap();

        assert_eq!(parsed.slug, "my1020-48v");
        assert_eq!(parsed.voltage, 48.0);
        assert_eq!(parsed.rpm, Some(3000.0));
        assert_eq!(parsed.shaft_diameter_in, Some(0.5));
    }
}
